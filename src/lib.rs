//! refnet: referral network explorer
//!
//! Layers, innermost first:
//! - `domain`: canonical referral tree, path search, viewport, selection and expansion state
//! - `application`: session event handling, rendering, referral service
//! - `infrastructure`: referral sources (HTTP, file) and dependency wiring
//! - `cli`: argument parsing and commands

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;
