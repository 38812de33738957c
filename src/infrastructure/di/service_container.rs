//! Service container for dependency injection
//!
//! Wires the referral source and services from settings.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::render::RenderAdapter;
use crate::application::services::ReferralService;
use crate::application::session::ReferralSession;
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::traits::{FileReferralSource, HttpReferralSource, ReferralSource};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Referral fetch boundary
    pub source: Arc<dyn ReferralSource>,

    pub referrals: ReferralService,
}

impl ServiceContainer {
    /// Create a container with real implementations.
    ///
    /// With `file`, referrals are read from that document instead of the service.
    pub fn new(settings: Settings, file: Option<PathBuf>) -> InfraResult<Self> {
        let source: Arc<dyn ReferralSource> = match file {
            Some(path) => Arc::new(FileReferralSource::new(path)),
            None => Arc::new(HttpReferralSource::new(&settings.api)?),
        };
        Ok(Self::with_deps(settings, source))
    }

    /// Create a container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, source: Arc<dyn ReferralSource>) -> Self {
        let settings = Arc::new(settings);
        let referrals = ReferralService::new(Arc::clone(&source));
        Self {
            settings,
            source,
            referrals,
        }
    }

    /// Fresh session configured from settings.
    pub fn session(&self) -> InfraResult<ReferralSession> {
        Ok(ReferralSession::new(
            self.settings.viewport.to_viewport_config()?,
            self.settings.render.initial_depth,
        ))
    }

    pub fn renderer(&self) -> RenderAdapter {
        RenderAdapter::new(self.settings.render.clone())
    }
}
