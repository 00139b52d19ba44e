//! Request DTOs for the store API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the PUT operation (PUT /put)
///
/// Keys are not validated: empty keys are stored like any other.
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: i64,
    /// Insertion time in Unix milliseconds (server time if omitted)
    #[serde(default)]
    pub timestamp: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let json = r#"{"key": "test", "value": -5}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, -5);
        assert!(req.timestamp.is_none());
    }

    #[test]
    fn test_put_request_with_timestamp() {
        let json = r#"{"key": "", "value": 1, "timestamp": 1700000000000}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "");
        assert_eq!(req.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn test_put_request_rejects_non_integer_value() {
        let json = r#"{"key": "k", "value": "seven"}"#;
        assert!(serde_json::from_str::<PutRequest>(json).is_err());
    }
}
