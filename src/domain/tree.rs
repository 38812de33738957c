use std::fmt;

use generational_arena::{Arena, Index};
use serde::{Serialize, Serializer};
use tracing::instrument;

/// Stable identifier of a node, assigned when the tree is built.
///
/// Ids are only meaningful for the tree that issued them; a refreshed tree
/// issues new ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "n{}g{}", slot, generation)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identity payload of a referral node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Display label; also the key used for highlight matching
    pub name: String,
    pub email: Option<String>,
    pub referral_code: Option<String>,
    /// Avatar URL
    pub image: Option<String>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Node of the canonical referral tree.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// None for the root
    pub parent: Option<NodeId>,
    /// In the order the referral service delivered them
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Canonical referral tree backed by a generational arena.
///
/// The tree is read-only once built: nodes are only ever handed out by shared
/// reference, and all view state (highlight, selection, expansion) is kept by
/// the controllers, keyed by [`NodeId`] or name.
#[derive(Debug)]
pub struct ReferralTree {
    arena: Arena<TreeNode>,
    root: NodeId,
}

impl ReferralTree {
    pub(crate) fn with_root(data: NodeData) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        }));
        Self { arena, root }
    }

    /// Append a child below `parent`; unknown parents leave the tree unchanged.
    pub(crate) fn push_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let idx = NodeId(self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        }));
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children.push(idx);
        }
        idx
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal yielding `(id, node, depth)`, root at depth 0.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    /// Number of levels (a lone root has height 1).
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter().map(|(_, _, depth)| depth + 1).max().unwrap_or(0)
    }

    /// Distance from the root, None for ids of another tree.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        let mut node = self.node(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Root-to-node path following parent links; empty for unknown ids.
    #[instrument(level = "trace", skip(self))]
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(idx) = current {
            match self.node(idx) {
                Some(node) => {
                    path.push(idx);
                    current = node.parent;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    /// First node in pre-order whose name equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node, _)| node.name() == name)
            .map(|(id, _, _)| id)
    }

    /// Names for a sequence of ids, skipping ids not in this tree.
    pub fn names(&self, ids: &[NodeId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|&id| self.node(id))
            .map(TreeNode::name)
            .collect()
    }

    /// Names of all leaves in pre-order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node, _)| node.is_leaf())
            .map(|(_, node, _)| node.name())
            .collect()
    }
}

pub struct PreOrderIter<'a> {
    tree: &'a ReferralTree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (NodeId, &'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.node(idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((idx, node, depth));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> NodeData {
        NodeData {
            name: name.to_string(),
            email: None,
            referral_code: None,
            image: None,
        }
    }

    //      root
    //      /  \
    // child1 child2
    //    |
    // grandchild1
    fn sample() -> (ReferralTree, NodeId, NodeId) {
        let mut tree = ReferralTree::with_root(data("root"));
        let child1 = tree.push_child(tree.root(), data("child1"));
        tree.push_child(tree.root(), data("child2"));
        let grandchild = tree.push_child(child1, data("grandchild1"));
        (tree, child1, grandchild)
    }

    #[test]
    fn given_tree_when_iterating_then_yields_pre_order_with_depth() {
        let (tree, _, _) = sample();
        let visited: Vec<(&str, usize)> = tree
            .iter()
            .map(|(_, node, depth)| (node.name(), depth))
            .collect();
        assert_eq!(
            visited,
            vec![("root", 0), ("child1", 1), ("grandchild1", 2), ("child2", 1)]
        );
    }

    #[test]
    fn given_tree_when_measuring_then_reports_height_and_depth() {
        let (tree, child1, grandchild) = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.depth_of(tree.root()), Some(0));
        assert_eq!(tree.depth_of(child1), Some(1));
        assert_eq!(tree.depth_of(grandchild), Some(2));
    }

    #[test]
    fn given_grandchild_when_building_path_then_starts_at_root() {
        let (tree, _, grandchild) = sample();
        let path = tree.path_to(grandchild);
        assert_eq!(tree.names(&path), vec!["root", "child1", "grandchild1"]);
    }

    #[test]
    fn given_foreign_id_when_looking_up_then_returns_nothing() {
        let (other, _, grandchild) = sample();
        let tree = ReferralTree::with_root(data("solo"));
        assert!(other.contains(grandchild));
        assert!(!tree.contains(grandchild));
        assert!(tree.path_to(grandchild).is_empty());
        assert_eq!(tree.depth_of(grandchild), None);
    }

    #[test]
    fn given_tree_when_collecting_leaves_then_keeps_order() {
        let (tree, _, _) = sample();
        assert_eq!(tree.leaf_names(), vec!["grandchild1", "child2"]);
        assert_eq!(tree.find_by_name("child2").map(|id| tree.depth_of(id)), Some(Some(1)));
        assert_eq!(tree.find_by_name("missing"), None);
    }
}
