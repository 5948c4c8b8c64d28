use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded token payload.
///
/// Claims are kept as the raw JSON object the caller signed. Only a handful of
/// fields matter to authorization, so they are read through accessors instead of
/// being forced into a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Claims(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `aud` when it is a string
    pub fn audience(&self) -> Option<&str> {
        self.get("aud").and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.get("role").and_then(Value::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Nested `app_metadata` object, if present and an object
    pub fn app_metadata(&self) -> Option<&Map<String, Value>> {
        self.get("app_metadata").and_then(Value::as_object)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        match value {
            Value::Object(map) => Claims::new(map),
            _ => panic!("claims must be an object"),
        }
    }

    #[test]
    fn test_accessors_ignore_wrong_types() {
        let c = claims(json!({"aud": ["authenticated"], "role": 7, "app_metadata": "staff"}));
        assert_eq!(c.audience(), None);
        assert_eq!(c.role(), None);
        assert!(c.app_metadata().is_none());
    }

    #[test]
    fn test_accessors() {
        let c = claims(json!({
            "sub": "user-1",
            "aud": "authenticated",
            "role": "authenticated",
            "app_metadata": {"staff": true}
        }));
        assert_eq!(c.subject(), Some("user-1"));
        assert_eq!(c.audience(), Some("authenticated"));
        assert_eq!(c.role(), Some("authenticated"));
        assert_eq!(
            c.app_metadata().and_then(|m| m.get("staff")),
            Some(&json!(true))
        );
    }
}
