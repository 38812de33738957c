//! Referral network service
//!
//! Fetches the raw hierarchy for a user and hands it to the session, which
//! decides whether the response is still wanted.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::session::{FetchOutcome, ReferralSession};
use crate::infrastructure::traits::ReferralSource;

/// Service for loading referral trees into a session.
pub struct ReferralService {
    source: Arc<dyn ReferralSource>,
}

impl ReferralService {
    /// Create a new referral service.
    pub fn new(source: Arc<dyn ReferralSource>) -> Self {
        Self { source }
    }

    /// Fetch the tree for `user_id` and install it in `session`.
    ///
    /// Failures are reported through the session's error indicator, not as an
    /// `Err`: the host keeps running with whatever tree it had.
    #[instrument(level = "debug", skip(self, session))]
    pub fn refresh(&self, session: &mut ReferralSession, user_id: &str) -> FetchOutcome {
        let ticket = session.begin_fetch();
        let result = self.source.fetch(user_id);
        let outcome = session.complete_fetch(ticket, result);
        info!("refresh for {}: {:?}", user_id, outcome);
        outcome
    }
}
