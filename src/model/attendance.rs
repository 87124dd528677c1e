use crate::policy::ArrivalStatus;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One row of the remote attendance table. At most one exists per
/// (person_id, date) — the store's unique key enforces that, not the device.
/// check_out stays NULL until the departure patch lands; a row is never
/// reopened afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u64,
    pub person_id: u64,
    pub date: NaiveDate,
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
    pub status: ArrivalStatus,
}

/// Payload for the arrival insert. The store fills in the record id.
#[derive(Debug, Clone, Serialize)]
pub struct NewArrival {
    pub person_id: u64,
    pub date: NaiveDate,
    pub check_in: NaiveTime,
    pub status: ArrivalStatus,
}
