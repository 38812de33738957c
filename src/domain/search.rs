//! Name search over the canonical tree.

use tracing::{debug, instrument};

use crate::domain::tree::{NodeId, ReferralTree};

/// Find the first node whose name contains `term` and return its root-to-node path.
///
/// Matching is case-insensitive substring containment against the trimmed term.
/// Nodes are visited in pre-order with children in stored order, so when several
/// nodes match, the one reached first (leftmost) wins.
///
/// Returns an empty path when the term is blank, the tree is absent, or nothing
/// matches. Callers treat an empty path as "clear highlighting".
#[instrument(level = "debug", skip(tree))]
pub fn search(tree: Option<&ReferralTree>, term: &str) -> Vec<NodeId> {
    let needle = term.trim().to_lowercase();
    let Some(tree) = tree else {
        return Vec::new();
    };
    if needle.is_empty() {
        return Vec::new();
    }

    match tree
        .iter()
        .find(|(_, node, _)| node.name().to_lowercase().contains(&needle))
    {
        Some((id, node, depth)) => {
            debug!("match '{}' at depth {}", node.name(), depth);
            tree.path_to(id)
        }
        None => {
            debug!("no match for '{}'", needle);
            Vec::new()
        }
    }
}
