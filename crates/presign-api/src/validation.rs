//! Upload request body parsing

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use presign_core::constants::DEFAULT_CONTENT_TYPE;
use presign_core::{AppError, UploadIntent};
use serde_json::{Map, Value};

/// Parse a presign request body into an [`UploadIntent`].
///
/// An empty body is read as `{}`. When `is_base64` is set the body is first decoded
/// with the standard base64 alphabet. Fields that are not strings count as absent.
pub fn parse_upload_intent(raw: &[u8], is_base64: bool) -> Result<UploadIntent, AppError> {
    let decoded;
    let bytes = if is_base64 {
        decoded = STANDARD
            .decode(raw)
            .map_err(|e| AppError::InvalidPayload(format!("body is not base64: {}", e)))?;
        decoded.as_slice()
    } else {
        raw
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|e| AppError::InvalidPayload(format!("body is not UTF-8: {}", e)))?;

    let object = if text.trim().is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            _ => {
                return Err(AppError::InvalidPayload(
                    "body must be a JSON object".to_string(),
                ))
            }
        }
    };

    let customer_id = string_field(&object, "cust_id");
    let object_name = string_field(&object, "object_name");
    if customer_id.is_empty() || object_name.is_empty() {
        return Err(AppError::MissingFields);
    }

    let content_type = match string_field(&object, "content_type") {
        "" => DEFAULT_CONTENT_TYPE,
        value => value,
    };

    validate_customer_id(customer_id)?;
    validate_object_name(object_name)?;

    Ok(UploadIntent {
        customer_id: customer_id.to_string(),
        object_name: object_name.to_string(),
        content_type: content_type.to_string(),
    })
}

/// Trimmed string value of `name`, or `""` when absent or not a string.
fn string_field<'a>(object: &'a Map<String, Value>, name: &str) -> &'a str {
    object.get(name).and_then(Value::as_str).unwrap_or("").trim()
}

// The customer id is a single key segment.
fn validate_customer_id(customer_id: &str) -> Result<(), AppError> {
    if customer_id.contains(['/', '\\']) {
        return Err(AppError::InvalidPayload(
            "cust_id must not contain path separators".to_string(),
        ));
    }
    if is_dot_segment(customer_id) {
        return Err(AppError::InvalidPayload(
            "cust_id must not be '.' or '..'".to_string(),
        ));
    }
    reject_control_chars("cust_id", customer_id)
}

fn validate_object_name(object_name: &str) -> Result<(), AppError> {
    if object_name.starts_with('/') {
        return Err(AppError::InvalidPayload(
            "object_name must be relative".to_string(),
        ));
    }
    if object_name.split(['/', '\\']).any(is_dot_segment) {
        return Err(AppError::InvalidPayload(
            "object_name must not contain '.' or '..' segments".to_string(),
        ));
    }
    reject_control_chars("object_name", object_name)
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

fn reject_control_chars(field: &str, value: &str) -> Result<(), AppError> {
    if value.chars().any(char::is_control) {
        return Err(AppError::InvalidPayload(format!(
            "{} contains control characters",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<UploadIntent, AppError> {
        parse_upload_intent(body.as_bytes(), false)
    }

    #[test]
    fn test_parses_and_trims_fields() {
        let intent = parse(
            r#"{"cust_id":"  acme ","object_name":" photo.png\t","content_type":" image/png "}"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            UploadIntent {
                customer_id: "acme".to_string(),
                object_name: "photo.png".to_string(),
                content_type: "image/png".to_string(),
            }
        );
    }

    #[test]
    fn test_content_type_defaults() {
        for body in [
            r#"{"cust_id":"acme","object_name":"a.bin"}"#,
            r#"{"cust_id":"acme","object_name":"a.bin","content_type":""}"#,
            r#"{"cust_id":"acme","object_name":"a.bin","content_type":"   "}"#,
            r#"{"cust_id":"acme","object_name":"a.bin","content_type":null}"#,
        ] {
            assert_eq!(parse(body).unwrap().content_type, "application/octet-stream");
        }
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            "",
            "   ",
            "{}",
            r#"{"cust_id":"acme"}"#,
            r#"{"cust_id":"acme","object_name":"   "}"#,
            r#"{"cust_id":"","object_name":"a.png"}"#,
            r#"{"cust_id":42,"object_name":"a.png"}"#,
            r#"{"cust_id":"acme","object_name":["a.png"]}"#,
        ] {
            assert!(
                matches!(parse(body), Err(AppError::MissingFields)),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_invalid_json() {
        for body in ["{", "not json", "[1,2]", "\"text\"", "null"] {
            assert!(
                matches!(parse(body), Err(AppError::InvalidPayload(_))),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            parse_upload_intent(&[0xff, 0xfe, b'{', b'}'], false),
            Err(AppError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_base64_body() {
        let body = STANDARD.encode(r#"{"cust_id":"acme","object_name":"scan.pdf"}"#);
        let intent = parse_upload_intent(body.as_bytes(), true).unwrap();
        assert_eq!(intent.customer_id, "acme");
        assert_eq!(intent.object_name, "scan.pdf");

        assert!(matches!(
            parse_upload_intent(b"%%%not-base64%%%", true),
            Err(AppError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_path_escape_rejected() {
        for body in [
            r#"{"cust_id":"acme/other","object_name":"a.png"}"#,
            r#"{"cust_id":"acme\\other","object_name":"a.png"}"#,
            r#"{"cust_id":"acme","object_name":"/etc/passwd"}"#,
            r#"{"cust_id":"acme","object_name":"../other/a.png"}"#,
            r#"{"cust_id":"acme","object_name":"scans/../../a.png"}"#,
            r#"{"cust_id":"ac\u0000me","object_name":"a.png"}"#,
            r#"{"cust_id":"acme","object_name":"a\nb.png"}"#,
            r#"{"cust_id":"..","object_name":"other-customer/x.png"}"#,
            r#"{"cust_id":" . ","object_name":"x.png"}"#,
            r#"{"cust_id":"acme","object_name":"./x.png"}"#,
            r#"{"cust_id":"acme","object_name":"scans/./x.png"}"#,
            r#"{"cust_id":"acme","object_name":"scans/."}"#,
        ] {
            assert!(
                matches!(parse(body), Err(AppError::InvalidPayload(_))),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_nested_object_names_allowed() {
        let intent = parse(r#"{"cust_id":"acme","object_name":"visits/2025/scan..v2.pdf"}"#).unwrap();
        assert_eq!(intent.object_name, "visits/2025/scan..v2.pdf");
    }
}
