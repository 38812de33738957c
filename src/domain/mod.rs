//! Domain layer: the referral tree and the view-state controllers around it
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod expansion;
pub mod record;
pub mod search;
pub mod selection;
pub mod transform;
pub mod tree;
pub mod viewport;

pub use error::{DomainError, DomainResult};
pub use expansion::ExpansionState;
pub use record::{RawReferralRecord, ReferralResponse};
pub use search::search;
pub use selection::{NodeDetails, SelectionController};
pub use transform::transform;
pub use tree::{NodeData, NodeId, ReferralTree, TreeNode};
pub use viewport::{ContainerSize, Point, ViewportConfig, ViewportController};
