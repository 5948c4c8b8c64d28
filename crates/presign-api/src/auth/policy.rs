//! Staff authorization policy
//!
//! The audience is checked first so a token minted for another audience is reported
//! as such even when its role would otherwise pass.

use crate::auth::models::Claims;
use presign_core::constants::EXPECTED_AUDIENCE;
use presign_core::AppError;
use serde_json::Value;

const STAFF_ROLE: &str = "staff";
const AUTHENTICATED_ROLE: &str = "authenticated";

/// Whether the caller may request upload credentials.
///
/// True when any of these holds: `app_metadata.staff` is `true`,
/// `app_metadata.roles` is the string `"staff"`, or `role` is `"authenticated"`.
pub fn is_staff(claims: &Claims) -> bool {
    let metadata_grants = claims.app_metadata().is_some_and(|metadata| {
        metadata.get("staff") == Some(&Value::Bool(true))
            || metadata.get("roles").and_then(Value::as_str) == Some(STAFF_ROLE)
    });

    metadata_grants || claims.role() == Some(AUTHENTICATED_ROLE)
}

/// `aud` must be exactly the expected audience.
pub fn check_audience(claims: &Claims) -> Result<(), AppError> {
    if claims.audience() == Some(EXPECTED_AUDIENCE) {
        Ok(())
    } else {
        Err(AppError::BadAudience)
    }
}

/// Audience check followed by the staff predicate.
pub fn authorize(claims: &Claims) -> Result<(), AppError> {
    check_audience(claims)?;
    if !is_staff(claims) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}
