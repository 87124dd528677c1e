use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Arrival classification stored on the attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum ArrivalStatus {
    #[serde(rename = "on-time")]
    #[strum(serialize = "on-time")]
    OnTime,
    #[serde(rename = "late")]
    #[strum(serialize = "late")]
    Late,
}

/// The only temporal business rules the terminal applies. Pure comparisons
/// on day-second offsets; no I/O, no clock access.
#[derive(Debug, Clone, Copy)]
pub struct AttendancePolicy {
    arrival_cutoff_secs: u32,
    departure_open_secs: u32,
}

impl AttendancePolicy {
    pub fn new(arrival_cutoff: NaiveTime, departure_open: NaiveTime) -> Self {
        Self {
            arrival_cutoff_secs: arrival_cutoff.num_seconds_from_midnight(),
            departure_open_secs: departure_open.num_seconds_from_midnight(),
        }
    }

    /// On time iff at or before the cutoff.
    pub fn classify_arrival(&self, day_seconds: u32) -> ArrivalStatus {
        if day_seconds <= self.arrival_cutoff_secs {
            ArrivalStatus::OnTime
        } else {
            ArrivalStatus::Late
        }
    }

    /// Departures only count from the threshold onwards.
    pub fn is_departure_window(&self, day_seconds: u32) -> bool {
        day_seconds >= self.departure_open_secs
    }
}

#[cfg(test)]
pub fn default_policy() -> AttendancePolicy {
    AttendancePolicy::new(
        NaiveTime::from_hms_opt(7, 15, 0).unwrap(),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
    )
}
