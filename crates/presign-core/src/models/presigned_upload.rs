use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// What the caller wants to upload, after trimming and defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadIntent {
    pub customer_id: String,
    pub object_name: String,
    pub content_type: String,
}

/// Object key inside the upload bucket.
///
/// Always of the shape `media/{customer_id}/{YYYY}/{MM}/{DD}/{object_name}`; only the
/// key namer in the storage crate builds these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Wrap an already-derived key.
    pub fn new(key: String) -> Self {
        StorageKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Time-boxed permission to PUT one object, created fresh for every request.
#[derive(Debug, Clone, Serialize)]
pub struct UploadCredential {
    pub bucket: String,
    pub key: StorageKey,
    /// Presigned PUT URL
    pub url: String,
    /// Headers the client must send unchanged on the PUT; the signature covers them
    #[serde(rename = "headers")]
    pub required_headers: BTreeMap<String, String>,
    /// URL lifetime in seconds
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_wire_shape() {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "image/png".to_string());
        let credential = UploadCredential {
            bucket: "media-bucket".to_string(),
            key: StorageKey::new("media/acme/2025/09/27/photo.png".to_string()),
            url: "https://example/signed".to_string(),
            required_headers: headers,
            expires_in: 300,
        };

        let json = serde_json::to_value(&credential).unwrap();
        assert_eq!(json["bucket"], "media-bucket");
        assert_eq!(json["key"], "media/acme/2025/09/27/photo.png");
        assert_eq!(json["url"], "https://example/signed");
        assert_eq!(json["headers"]["Content-Type"], "image/png");
        assert_eq!(json["expires_in"], 300);
        assert!(json.get("required_headers").is_none());
    }
}
