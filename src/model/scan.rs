use derive_more::Display;
use serde::Serialize;

/// Raw badge identifier as the reader reports it: uppercase hex over the
/// tag's UID bytes. Normalized once at the reader boundary.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(transparent)]
pub struct RawUid(String);

impl RawUid {
    /// Normalize one reader line into a uid. Strips whitespace and any
    /// separator characters some wedge readers emit between bytes, then
    /// uppercases. Returns None when nothing hex remains.
    pub fn parse(line: &str) -> Option<Self> {
        let hex: String = line
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if hex.is_empty() { None } else { Some(Self(hex)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Live-feed payload: just the uid. Whether anyone is listening has no
/// bearing on attendance processing.
#[derive(Debug, Serialize)]
pub struct ScanEvent<'a> {
    pub uid: &'a RawUid,
}
