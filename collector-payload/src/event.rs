use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::payload::TrackerPayload;

/// Identifies the collector that received the raw tracker request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    /// Collector name and version, e.g. "clj-collector-0.7.0".
    pub name: String,
    pub hostname: Option<String>,
}

impl InputSource {
    pub fn new(name: impl Into<String>, hostname: Option<String>) -> Self {
        InputSource {
            name: name.into(),
            hostname,
        }
    }
}

/// One ingested tracker event, independent of the collector it came from.
///
/// Built once by a collector adapter and read-only from then on; this crate
/// only defines the shape, it never constructs or mutates these itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CanonicalInput {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub payload: TrackerPayload,
    pub source: InputSource,
    /// Charset name the payload was extracted with, e.g. "UTF-8".
    pub encoding: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer_uri: Option<String>,
    /// Raw header lines in arrival order. May be empty.
    pub headers: Vec<String>,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::querystring::extract;
    use time::macros::datetime;

    #[test]
    fn canonical_input_serializes_with_rfc3339_timestamp() {
        let input = CanonicalInput {
            timestamp: datetime!(2024-03-01 12:30:45 UTC),
            payload: TrackerPayload::NvGet(extract("e=pv", "UTF-8").unwrap()),
            source: InputSource::new("test-collector-0.1.0", Some("collector.local".to_string())),
            encoding: "UTF-8".to_string(),
            ip_address: Some("10.0.0.1".to_string()),
            user_agent: None,
            referer_uri: None,
            headers: vec![],
            user_id: None,
        };

        let serialized = serde_json::to_value(&input).unwrap();
        assert_eq!(serialized["timestamp"], "2024-03-01T12:30:45Z");
        assert_eq!(serialized["source"]["name"], "test-collector-0.1.0");
        assert_eq!(serialized["payload"]["NvGet"][0]["name"], "e");
    }
}
