//! I/O boundary traits for testability
//!
//! The referral fetch is the only I/O the core depends on. Services take a
//! `dyn ReferralSource`, so tests can substitute in-memory implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::ApiConfig;
use crate::domain::{RawReferralRecord, ReferralResponse};

/// Source of raw referral hierarchies (`GET /referrals/{userId}`).
pub trait ReferralSource: Send + Sync {
    /// Fetch the referral tree rooted at `user_id`.
    /// `Ok(None)` means the service has no tree for this user.
    fn fetch(&self, user_id: &str) -> ApplicationResult<Option<RawReferralRecord>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Referral service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReferralSource {
    client: Client,
    base_url: String,
}

impl HttpReferralSource {
    pub fn new(api: &ApiConfig) -> ApplicationResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| ApplicationError::fetch("build HTTP client", e))?;
        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, user_id: &str) -> String {
        format!("{}/referrals/{}", self.base_url, user_id)
    }
}

impl ReferralSource for HttpReferralSource {
    #[instrument(level = "debug", skip(self))]
    fn fetch(&self, user_id: &str) -> ApplicationResult<Option<RawReferralRecord>> {
        let url = self.url_for(user_id);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApplicationError::fetch(format!("GET {url}"), e))?;
        let bytes = response
            .bytes()
            .map_err(|e| ApplicationError::fetch(format!("read {url}"), e))?;
        let body = ReferralResponse::from_slice(&bytes)
            .map_err(|e| ApplicationError::fetch(format!("decode {url}"), e))?;
        Ok(body.referral_tree)
    }
}

/// Referral response document read from disk; the user id is not used.
#[derive(Debug, Clone)]
pub struct FileReferralSource {
    path: PathBuf,
}

impl FileReferralSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferralSource for FileReferralSource {
    #[instrument(level = "debug", skip(self))]
    fn fetch(&self, user_id: &str) -> ApplicationResult<Option<RawReferralRecord>> {
        let context = || format!("read {}", self.path.display());
        let content =
            std::fs::read(&self.path).map_err(|e| ApplicationError::fetch(context(), e))?;
        let body = ReferralResponse::from_slice(&content)
            .map_err(|e| ApplicationError::fetch(context(), e))?;
        debug!("loaded referral document from {}", self.path.display());
        Ok(body.referral_tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_base_url_with_slash_when_building_url_then_joins_cleanly() {
        let source = HttpReferralSource::new(&ApiConfig {
            base_url: "http://example.test/api/".into(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(
            source.url_for("66f69bfea34d00c7e5915adc"),
            "http://example.test/api/referrals/66f69bfea34d00c7e5915adc"
        );
    }
}
