use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};

/// Wall-clock reading normalized at the clock boundary: local calendar date
/// plus local time of day. All policy comparisons go through `day_seconds`
/// instead of re-parsing formatted time strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalStamp {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl LocalStamp {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Elapsed seconds since local midnight.
    pub fn day_seconds(&self) -> u32 {
        self.time.num_seconds_from_midnight()
    }
}

pub trait Clock {
    fn now_local(&self) -> LocalStamp;
}

/// System clock shifted into the configured local zone. Time correctness
/// (NTP sync) is owned by the OS; before first sync the reported date/time
/// may be stale, and scans are bucketed to whatever the clock says.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(utc_offset_secs: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_secs)
            .expect("UTC_OFFSET_SECS out of range (+/- 86400)");
        Self { offset }
    }

    fn stamp_of(&self, utc: DateTime<Utc>) -> LocalStamp {
        let local = utc.with_timezone(&self.offset);
        LocalStamp::new(local.date_naive(), local.time())
    }
}

impl Clock for SystemClock {
    fn now_local(&self) -> LocalStamp {
        self.stamp_of(Utc::now())
    }
}

/// Test clock pinned to a single instant.
#[cfg(test)]
pub struct FixedClock(pub LocalStamp);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_local(&self) -> LocalStamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp(h: u32, m: u32, s: u32) -> LocalStamp {
        LocalStamp::new(
            NaiveDate::from_ymd_opt(2025, 8, 6).unwrap(),
            NaiveTime::from_hms_opt(h, m, s).unwrap(),
        )
    }

    #[test]
    fn day_seconds_counts_from_midnight() {
        assert_eq!(stamp(0, 0, 0).day_seconds(), 0);
        assert_eq!(stamp(7, 15, 0).day_seconds(), 26100);
        assert_eq!(stamp(13, 0, 0).day_seconds(), 46800);
        assert_eq!(stamp(23, 59, 59).day_seconds(), 86399);
    }

    #[test]
    fn utc_offset_shifts_into_local_zone() {
        let clock = SystemClock::new(7 * 3600);
        let utc = Utc.with_ymd_and_hms(2025, 8, 6, 1, 30, 0).unwrap();
        let local = clock.stamp_of(utc);
        assert_eq!(local.date, NaiveDate::from_ymd_opt(2025, 8, 6).unwrap());
        assert_eq!(local.time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn offset_rolls_the_calendar_date() {
        // 23:30 UTC is already the next morning in UTC+7
        let clock = SystemClock::new(7 * 3600);
        let utc = Utc.with_ymd_and_hms(2025, 8, 6, 23, 30, 0).unwrap();
        let local = clock.stamp_of(utc);
        assert_eq!(local.date, NaiveDate::from_ymd_opt(2025, 8, 7).unwrap());
        assert_eq!(local.time, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
    }
}
