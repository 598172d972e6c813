//! Request DTOs for the cache server API
//!
//! Built from the raw query string pairs. A missing parameter reads as an
//! empty string, and a repeated parameter keeps its first value.

use std::time::Duration;

use super::duration::{parse_duration, DurationParseError};

/// Query string as decoded `(name, value)` pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Returns the first value given for `name`, or an empty string.
fn first_value(pairs: &[(String, String)], name: &str) -> String {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// Query parameters for the SET operation (GET /set)
#[derive(Debug, Clone, Default)]
pub struct SetParams {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// TTL such as `30s` or `1h30m`
    pub duration: String,
}

impl SetParams {
    /// Reads `key`, `value` and `duration` from query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            key: first_value(pairs, "key"),
            value: first_value(pairs, "value"),
            duration: first_value(pairs, "duration"),
        }
    }

    /// Parses the `duration` parameter into a TTL.
    pub fn ttl(&self) -> Result<Duration, DurationParseError> {
        parse_duration(&self.duration)
    }
}

/// Query parameters for the GET operation (GET /get)
#[derive(Debug, Clone, Default)]
pub struct GetParams {
    /// The cache key
    pub key: String,
}

impl GetParams {
    /// Reads `key` from query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            key: first_value(pairs, "key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_set_params_from_pairs() {
        let params = SetParams::from_pairs(&pairs(&[
            ("key", "test"),
            ("value", "hello"),
            ("duration", "1m"),
        ]));
        assert_eq!(params.key, "test");
        assert_eq!(params.value, "hello");
        assert_eq!(params.ttl().unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_missing_params_default_to_empty() {
        let params = SetParams::from_pairs(&[]);
        assert!(params.key.is_empty());
        assert!(params.value.is_empty());
        assert_eq!(params.ttl(), Err(DurationParseError::Empty));

        assert!(GetParams::from_pairs(&[]).key.is_empty());
    }

    #[test]
    fn test_repeated_params_keep_first_value() {
        let params = SetParams::from_pairs(&pairs(&[
            ("key", "a"),
            ("value", "v"),
            ("key", "b"),
            ("duration", "1h"),
            ("duration", "bogus"),
        ]));
        assert_eq!(params.key, "a");
        assert_eq!(params.ttl().unwrap(), Duration::from_secs(3600));

        let params = GetParams::from_pairs(&pairs(&[("key", "a"), ("key", "a")]));
        assert_eq!(params.key, "a");
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let params = GetParams::from_pairs(&pairs(&[("other", "x"), ("key", "k")]));
        assert_eq!(params.key, "k");
    }

    #[test]
    fn test_invalid_duration() {
        let params = SetParams {
            key: "k".to_string(),
            value: "v".to_string(),
            duration: "forever".to_string(),
        };
        assert!(params.ttl().is_err());
    }
}
