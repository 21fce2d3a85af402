//! JSON envelopes returned by the load board API
//!
//! Every response carries `success`. Successful searches add `count`, `data`
//! and `timestamp`; successful inserts add `data`; failures add `error`.

use chrono::{SecondsFormat, Utc};
use loadboard_domain::model::PostingRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<PostingRecord>,
    pub timestamp: String,
}

impl SearchEnvelope {
    pub fn new(data: Vec<PostingRecord>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingEnvelope {
    pub success: bool,
    pub data: PostingRecord,
}

impl PostingEnvelope {
    pub fn new(data: PostingRecord) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_search_envelope_counts_and_stamps() {
        let envelope = SearchEnvelope::new(Vec::new());
        assert!(envelope.success);
        assert_eq!(envelope.count, 0);
        assert!(envelope.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&envelope.timestamp).is_ok());
    }

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_value(ErrorEnvelope::new("Missing required fields: origin")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Missing required fields: origin");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
