//! Expand/collapse state, kept outside the tree and keyed by node id.

use std::collections::HashSet;

use crate::domain::tree::{NodeId, ReferralTree};

/// Which nodes currently hide their children.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    collapsed: HashSet<NodeId>,
}

impl ExpansionState {
    /// Collapse every node at `initial_depth` or deeper.
    pub fn new(tree: &ReferralTree, initial_depth: usize) -> Self {
        let collapsed = tree
            .iter()
            .filter(|(_, node, depth)| *depth >= initial_depth && !node.is_leaf())
            .map(|(id, _, _)| id)
            .collect();
        Self { collapsed }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        !self.collapsed.contains(&id)
    }

    pub fn toggle(&mut self, id: NodeId) {
        if !self.collapsed.remove(&id) {
            self.collapsed.insert(id);
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Expand the ancestors on a root-to-node path so its last node is visible.
    pub fn reveal(&mut self, path: &[NodeId]) {
        if let Some((_, ancestors)) = path.split_last() {
            for id in ancestors {
                self.collapsed.remove(id);
            }
        }
    }

    pub fn collapsed_count(&self) -> usize {
        self.collapsed.len()
    }
}
