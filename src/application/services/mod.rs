//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ReferralSource)
//! but are themselves concrete structs, not traits.

mod referral;

pub use referral::ReferralService;
