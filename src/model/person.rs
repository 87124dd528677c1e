use serde::{Deserialize, Serialize};

/// Registered badge holder, as stored in the remote people table. Owned by
/// the store; resolved fresh for every scan and never cached on the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub badge_uid: String,
    pub full_name: String,
}
