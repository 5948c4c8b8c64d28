//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p presign-api --test presign_test`.
//! Everything runs in-process: the upload signer is a fake and the clock is fixed.

pub mod auth;
pub mod storage;

use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use presign_api::constants;
use presign_api::setup::routes;
use presign_api::state::{AppState, Clock};
use presign_api::CredentialIssuer;
use presign_core::{Config, PresignConfig};
use presign_storage::UploadSigner;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub const TEST_BUCKET: &str = "media-bucket";
pub const TEST_KMS_KEY_ID: &str = "arn:aws:kms:us-east-2:000000000000:key/test";
pub const TEST_ORIGIN: &str = "https://app.example.com";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn presign_path() -> String {
    api_path(constants::PRESIGN_PATH)
}

/// 2025-09-27T12:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 27, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that moves forward one second after every read.
pub struct SteppingClock {
    start: DateTime<Utc>,
    reads: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            reads: AtomicI64::new(0),
        }
    }

    pub fn reads(&self) -> i64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let step = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(step)
    }
}

pub fn create_test_config(allow_anonymous: bool) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("JWT_SECRET", auth::TEST_JWT_SECRET.to_string());
    vars.insert("S3_BUCKET", TEST_BUCKET.to_string());
    vars.insert("KMS_KEY_ID", TEST_KMS_KEY_ID.to_string());
    vars.insert("CORS_ALLOWED_ORIGIN", TEST_ORIGIN.to_string());
    vars.insert("ALLOW_ANON", allow_anonymous.to_string());

    let config = PresignConfig::from_vars(|name| vars.get(name).cloned())
        .expect("test configuration is valid");
    Config(Box::new(config))
}

/// Test application: server plus the signer it was built with.
pub struct TestApp<S> {
    pub server: TestServer,
    pub signer: Arc<S>,
}

impl<S> TestApp<S> {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app_with<S>(signer: S, allow_anonymous: bool) -> TestApp<S>
where
    S: UploadSigner + 'static,
{
    setup_test_app_with_clock(signer, allow_anonymous, Arc::new(FixedClock(fixed_now())))
}

pub fn setup_test_app_with_clock<S>(
    signer: S,
    allow_anonymous: bool,
    clock: Arc<dyn Clock>,
) -> TestApp<S>
where
    S: UploadSigner + 'static,
{
    let config = create_test_config(allow_anonymous);
    let signer = Arc::new(signer);
    let issuer = CredentialIssuer::new(
        signer.clone(),
        config.s3_bucket().to_string(),
        config.kms_key_id().to_string(),
    );
    let state = Arc::new(AppState::new(
        config.clone(),
        issuer,
        clock,
    ));

    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, signer }
}

/// Setup test app with a recording signer and anonymous mode off.
pub fn setup_test_app() -> TestApp<storage::RecordingSigner> {
    setup_test_app_with(storage::RecordingSigner::default(), false)
}
