//! Selected node and highlight path.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::tree::{NodeId, ReferralTree, TreeNode};

/// Detail card for the selected referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub name: String,
    pub email: Option<String>,
    pub referral_code: Option<String>,
    pub image: Option<String>,
}

/// Owns the (single) selected node and the highlight path of the last search.
///
/// Highlight membership is decided by name: every node whose name equals the
/// name of a node on the path is highlighted, including unrelated nodes that
/// happen to share that name. Use [`SelectionController::is_on_path`] for
/// id-based membership.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<NodeId>,
    highlight_path: Vec<NodeId>,
    highlight_names: HashSet<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent of the highlight path.
    pub fn select_node(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Replace the highlight path wholesale; names are resolved against `tree`.
    pub fn set_highlight_path(&mut self, tree: Option<&ReferralTree>, path: Vec<NodeId>) {
        self.highlight_names = match tree {
            Some(tree) => tree.names(&path).into_iter().map(str::to_string).collect(),
            None => HashSet::new(),
        };
        self.highlight_path = path;
    }

    pub fn highlight_path(&self) -> &[NodeId] {
        &self.highlight_path
    }

    pub fn is_highlighted(&self, node: &TreeNode) -> bool {
        self.highlight_names.contains(node.name())
    }

    pub fn is_on_path(&self, id: NodeId) -> bool {
        self.highlight_path.contains(&id)
    }

    pub fn details(&self, tree: &ReferralTree) -> Option<NodeDetails> {
        let node = tree.node(self.selected?)?;
        Some(NodeDetails {
            name: node.data.name.clone(),
            email: node.data.email.clone(),
            referral_code: node.data.referral_code.clone(),
            image: node.data.image.clone(),
        })
    }

    /// Forget everything; used when the tree is replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
