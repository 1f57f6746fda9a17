//! Response header.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// The `responseHeader` block returned with every response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseHeader {
    #[serde(default)]
    pub status: i32,
    /// Server side processing time in milliseconds.
    #[serde(rename = "QTime", default)]
    pub qtime: i64,
    /// Echoed request parameters, when the server sends them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct HeaderOnly {
    #[serde(rename = "responseHeader")]
    header: ResponseHeader,
}

impl ResponseHeader {
    /// Parse the header of an update (add/commit/rollback) response.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed: HeaderOnly = serde_json::from_str(raw)?;
        Ok(parsed.header)
    }

    pub fn is_ok(&self) -> bool {
        self.status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_response() {
        let header =
            ResponseHeader::parse(r#"{"responseHeader":{"status":0,"QTime":12}}"#).unwrap();
        assert_eq!(header.qtime, 12);
        assert!(header.is_ok());
        assert!(header.params.is_none());
    }

    #[test]
    fn test_missing_header_is_an_error() {
        assert!(ResponseHeader::parse(r#"{"response":{}}"#).is_err());
    }
}
