//! Configuration record and its lenient stored form.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::derive::{DerivationRequest, HashMethod};

/// Settings remembered for a domain.
///
/// Serialized with the exact keys `length`, `secret`, `method`, `disableTLD`,
/// `costFactor`, `counter`. Request-local state (subdomain flag, progress,
/// completion hooks, the master password) has no place here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    pub length: u32,
    pub secret: String,
    pub method: HashMethod,
    #[serde(rename = "disableTLD")]
    pub disable_tld: bool,
    pub cost_factor: u32,
    pub counter: u32,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            length: 12,
            secret: String::new(),
            method: HashMethod::Md5,
            disable_tld: false,
            cost_factor: 12,
            counter: 0,
        }
    }
}

impl ConfigRecord {
    /// Record to persist after a successful derivation.
    pub fn from_request(request: &DerivationRequest) -> Self {
        Self {
            length: request.length,
            secret: request.master_secret.clone(),
            method: request.method,
            disable_tld: !request.remove_subdomains,
            cost_factor: request.cost_factor,
            counter: request.counter,
        }
    }

    /// Copy every field present in `overlay` over `self`.
    pub fn overlay(mut self, overlay: &ConfigOverlay) -> Self {
        if let Some(length) = overlay.length {
            self.length = length;
        }
        if let Some(secret) = &overlay.secret {
            self.secret.clone_from(secret);
        }
        if let Some(method) = overlay.method {
            self.method = method;
        }
        if let Some(disable_tld) = overlay.disable_tld {
            self.disable_tld = disable_tld;
        }
        if let Some(cost_factor) = overlay.cost_factor {
            self.cost_factor = cost_factor;
        }
        if let Some(counter) = overlay.counter {
            self.counter = counter;
        }
        self
    }
}

/// A stored record with every field optional.
///
/// Older writers stored raw form values, so numbers may arrive as strings;
/// any field of the wrong shape is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverlay {
    pub length: Option<u32>,
    pub secret: Option<String>,
    pub method: Option<HashMethod>,
    pub disable_tld: Option<bool>,
    pub cost_factor: Option<u32>,
    pub counter: Option<u32>,
}

impl ConfigOverlay {
    /// Parse a stored JSON string. Anything but a JSON object is an empty overlay.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            Ok(_) => Self::default(),
            Err(err) => {
                tracing::debug!("ignoring unparsable config record: {err}");
                Self::default()
            }
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            length: map.get("length").and_then(lenient_uint),
            secret: map.get("secret").and_then(Value::as_str).map(str::to_owned),
            method: map
                .get("method")
                .and_then(Value::as_str)
                .and_then(|m| m.parse().ok()),
            disable_tld: map.get("disableTLD").and_then(Value::as_bool),
            cost_factor: map.get("costFactor").and_then(lenient_uint),
            counter: map.get("counter").and_then(lenient_uint),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Unsigned integer from a JSON number or a numeric string.
pub(crate) fn lenient_uint<T: TryFrom<u64>>(value: &Value) -> Option<T> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    T::try_from(n).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_stored_key_names() {
        let json = serde_json::to_value(ConfigRecord::default()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["costFactor", "counter", "disableTLD", "length", "method", "secret"]
        );
        assert_eq!(json["method"], "md5");
    }

    #[test]
    fn overlay_parses_strings_and_skips_bad_fields() {
        let overlay = ConfigOverlay::parse(
            r#"{"length":"16","costFactor":10,"counter":"x","method":"sha512","disableTLD":"yes"}"#,
        );
        assert_eq!(overlay.length, Some(16));
        assert_eq!(overlay.cost_factor, Some(10));
        assert_eq!(overlay.counter, None);
        assert_eq!(overlay.method, Some(HashMethod::Sha512));
        assert_eq!(overlay.disable_tld, None);
    }

    #[test]
    fn non_object_json_is_empty_overlay() {
        assert!(ConfigOverlay::parse("null").is_empty());
        assert!(ConfigOverlay::parse("[1,2]").is_empty());
        assert!(ConfigOverlay::parse("{not json").is_empty());
    }

    #[test]
    fn lenient_uint_bounds() {
        assert_eq!(lenient_uint::<u32>(&Value::from(7)), Some(7));
        assert_eq!(lenient_uint::<u32>(&Value::from(-1)), None);
        assert_eq!(lenient_uint::<u32>(&Value::from(u64::MAX)), None);
        assert_eq!(lenient_uint::<u64>(&Value::from(" 20140715 ")), Some(20140715));
        assert_eq!(lenient_uint::<u32>(&Value::Bool(true)), None);
    }
}
