use super::{RecordStore, StoreError};
use crate::config::Config;
use crate::model::attendance::{AttendanceRecord, NewArrival};
use crate::model::person::Person;
use crate::model::scan::{RawUid, ScanEvent};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

/// PostgREST-style record store: tables under `/rest/v1/<table>`, row filters
/// as `column=eq.value` query params, writes answered with the created row
/// via `Prefer: return=representation`.
#[derive(Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    people_url: String,
    attendance_url: String,
    scans_url: String,
}

impl HttpStore {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.store_api_key)
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.store_api_key))
            .map_err(|e| StoreError::Network(e.to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let base = config.store_base_url.trim_end_matches('/');
        Ok(Self {
            client,
            people_url: format!("{}/rest/v1/{}", base, config.people_table),
            attendance_url: format!("{}/rest/v1/{}", base, config.attendance_table),
            scans_url: format!("{}/rest/v1/{}", base, config.scans_table),
        })
    }

    /// GET a filtered table and take the first row, since the filters used
    /// here (badge uid, (person, date) key) identify at most one.
    async fn fetch_first<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<T>, StoreError> {
        let response = self
            .client
            .get(url)
            .query(filters)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), body));
        }

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }
}

#[async_trait]
impl RecordStore for HttpStore {
    async fn find_person(&self, uid: &RawUid) -> Result<Option<Person>, StoreError> {
        self.fetch_first(
            &self.people_url,
            &[("badge_uid", format!("eq.{}", uid))],
        )
        .await
    }

    async fn find_record(
        &self,
        person_id: u64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.fetch_first(
            &self.attendance_url,
            &[
                ("person_id", format!("eq.{}", person_id)),
                ("date", format!("eq.{}", date)),
            ],
        )
        .await
    }

    async fn create_arrival(&self, arrival: &NewArrival) -> Result<AttendanceRecord, StoreError> {
        let response = self
            .client
            .post(&self.attendance_url)
            .json(arrival)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            // unique (person_id, date) key rejected the insert
            return Err(StoreError::Conflict);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), body));
        }

        let mut rows: Vec<AttendanceRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::Parse("empty representation".to_string()));
        }
        Ok(rows.remove(0))
    }

    async fn patch_departure(
        &self,
        record_id: u64,
        check_out: NaiveTime,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(&self.attendance_url)
            .query(&[("id", format!("eq.{}", record_id))])
            .json(&serde_json::json!({ "check_out": check_out }))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), body));
        }
        Ok(())
    }

    async fn publish_scan(&self, uid: &RawUid) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.scans_url)
            .json(&ScanEvent { uid })
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // feed table not provisioned on this deployment, stay quiet
            tracing::debug!(%uid, "scan feed table missing, publish skipped");
            return Ok(());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), body));
        }
        Ok(())
    }
}
