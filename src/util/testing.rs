//! Test support: tracing setup and referral fixtures

use std::path::PathBuf;
use std::sync::Once;

use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::ApplicationResult;
use crate::domain::RawReferralRecord;
use crate::infrastructure::traits::{FileReferralSource, ReferralSource};

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refnet=debug"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("tracing subscriber already set");
        }
        info!("Test Setup complete");
    });
}

/// Path of a referral response document under `tests/resources/referrals`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/referrals")
        .join(name)
}

/// Read a fixture the way the CLI reads `--file`.
pub fn load_fixture(name: &str) -> ApplicationResult<Option<RawReferralRecord>> {
    FileReferralSource::new(fixture_path(name)).fetch("fixture")
}
