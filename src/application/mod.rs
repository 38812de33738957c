//! Application layer: session state, rendering and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod render;
pub mod services;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use render::{DrawEdge, DrawInstruction, FillStyle, OutlineLabel, RenderAdapter, Scene};
pub use services::ReferralService;
pub use session::{FetchOutcome, FetchTicket, ReferralSession, ViewEvent, FETCH_FAILED_MESSAGE};
