//! In-memory store stand-in for tests. Enforces the same (person_id, date)
//! uniqueness the remote store's key does, and can inject failures per
//! operation to exercise the abandon-and-keep-polling paths.

use super::{RecordStore, StoreError};
use crate::model::attendance::{AttendanceRecord, NewArrival};
use crate::model::person::Person;
use crate::model::scan::RawUid;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    people: Vec<Person>,
    records: Vec<AttendanceRecord>,
    scans: Vec<String>,
    next_id: u64,
    creates: u32,
    patches: u32,
    fail_find: bool,
    fail_create: bool,
    fail_patch: bool,
    fail_publish: bool,
    stale_reads: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_person(self, id: u64, badge_uid: &str, full_name: &str) -> Self {
        self.inner.lock().unwrap().people.push(Person {
            id,
            badge_uid: badge_uid.to_string(),
            full_name: full_name.to_string(),
        });
        self
    }

    pub fn seed_record(&self, record: AttendanceRecord) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id = inner.next_id.max(record.id);
        inner.records.push(record);
    }

    pub fn record_for(&self, person_id: u64, date: NaiveDate) -> Option<AttendanceRecord> {
        self.inner
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.person_id == person_id && r.date == date)
            .cloned()
    }

    pub fn scans(&self) -> Vec<String> {
        self.inner.lock().unwrap().scans.clone()
    }

    pub fn create_count(&self) -> u32 {
        self.inner.lock().unwrap().creates
    }

    pub fn patch_count(&self) -> u32 {
        self.inner.lock().unwrap().patches
    }

    pub fn fail_find(&self, on: bool) {
        self.inner.lock().unwrap().fail_find = on;
    }

    pub fn fail_create(&self, on: bool) {
        self.inner.lock().unwrap().fail_create = on;
    }

    pub fn fail_patch(&self, on: bool) {
        self.inner.lock().unwrap().fail_patch = on;
    }

    pub fn fail_publish(&self, on: bool) {
        self.inner.lock().unwrap().fail_publish = on;
    }

    /// Make `find_record` report no row even when one exists, simulating a
    /// concurrent writer landing between our read and our insert.
    pub fn stale_reads(&self, on: bool) {
        self.inner.lock().unwrap().stale_reads = on;
    }
}

fn injected() -> StoreError {
    StoreError::Api(500, "injected failure".to_string())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_person(&self, uid: &RawUid) -> Result<Option<Person>, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_find {
            return Err(injected());
        }
        Ok(inner
            .people
            .iter()
            .find(|p| p.badge_uid == uid.as_str())
            .cloned())
    }

    async fn find_record(
        &self,
        person_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_find {
            return Err(injected());
        }
        if inner.stale_reads {
            return Ok(None);
        }
        Ok(inner
            .records
            .iter()
            .find(|r| r.person_id == person_id && r.date == date)
            .cloned())
    }

    async fn create_arrival(&self, arrival: &NewArrival) -> Result<AttendanceRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_create {
            return Err(injected());
        }
        inner.creates += 1;
        if inner
            .records
            .iter()
            .any(|r| r.person_id == arrival.person_id && r.date == arrival.date)
        {
            return Err(StoreError::Conflict);
        }
        inner.next_id += 1;
        let record = AttendanceRecord {
            id: inner.next_id,
            person_id: arrival.person_id,
            date: arrival.date,
            check_in: arrival.check_in,
            check_out: None,
            status: arrival.status,
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn patch_departure(
        &self,
        record_id: u64,
        check_out: NaiveTime,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_patch {
            return Err(injected());
        }
        inner.patches += 1;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| StoreError::Api(404, "no such record".to_string()))?;
        record.check_out = Some(check_out);
        Ok(())
    }

    async fn publish_scan(&self, uid: &RawUid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_publish {
            return Err(injected());
        }
        inner.scans.push(uid.as_str().to_string());
        Ok(())
    }
}
