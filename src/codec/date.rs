//! Serde helpers for date fields in the server's UTC wire format.
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "solrlink::codec::date")]
//!     starts_at: DateTime<Utc>,
//!     #[serde(default, with = "solrlink::codec::date::option")]
//!     ends_at: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// Wire format, e.g. `2024-03-01T09:30:00.000Z`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn format(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| de::Error::custom(format!("invalid date '{raw}': {e}")))
}

/// Same format for `Option<DateTime<Utc>>`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            super::parse(&s).map_err(|e| de::Error::custom(format!("invalid date '{s}': {e}")))
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Event {
        #[serde(with = "crate::codec::date")]
        starts_at: DateTime<Utc>,
        #[serde(default, with = "crate::codec::date::option")]
        ends_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_format_has_millisecond_precision() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format(&dt), "2024-03-01T09:30:00.000Z");
    }

    #[test]
    fn test_parse_accepts_missing_fraction() {
        let dt = parse("2024-03-01T09:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_serde_helpers() {
        let event: Event = serde_json::from_value(json!({
            "starts_at": "2024-03-01T09:30:00.250Z"
        }))
        .unwrap();
        assert_eq!(event.ends_at, None);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"starts_at": "2024-03-01T09:30:00.250Z", "ends_at": null})
        );

        assert!(serde_json::from_value::<Event>(json!({"starts_at": "yesterday"})).is_err());
    }
}
