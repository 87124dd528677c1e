pub mod http;
#[cfg(test)]
pub mod memory;

use crate::model::attendance::{AttendanceRecord, NewArrival};
use crate::model::person::Person;
use crate::model::scan::RawUid;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

pub use http::HttpStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("store returned {0}: {1}")]
    Api(u16, String),

    /// The store's (person_id, date) unique key rejected an arrival insert.
    /// Means someone else (or a retried request) already checked this person
    /// in today.
    #[error("already checked in today")]
    Conflict,

    #[error("malformed response: {0}")]
    Parse(String),
}

/// The four remote operations the terminal needs, plus the identity lookup.
/// Every call is one bounded-timeout round trip; there is no retry layer and
/// no local cache behind this interface.
#[async_trait]
pub trait RecordStore {
    /// Person registered for a badge uid, if any.
    async fn find_person(&self, uid: &RawUid) -> Result<Option<Person>, StoreError>;

    /// Today's attendance row for a person, if one exists.
    async fn find_record(
        &self,
        person_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Insert the arrival row. Fails with `StoreError::Conflict` when the
    /// store already holds a row for this (person, date).
    async fn create_arrival(&self, arrival: &NewArrival) -> Result<AttendanceRecord, StoreError>;

    /// Set check_out on an existing row.
    async fn patch_departure(
        &self,
        record_id: u64,
        check_out: NaiveTime,
    ) -> Result<(), StoreError>;

    /// Best-effort broadcast of a raw uid to the live-scan feed.
    async fn publish_scan(&self, uid: &RawUid) -> Result<(), StoreError>;
}
