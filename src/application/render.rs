//! Render adapter: turns tree + view state into draw instructions.
//!
//! Layout is a deterministic tidy layout: visible leaves take consecutive
//! horizontal slots, parents sit centred over their first and last visible
//! child, and each level is one node height further down. Coordinates are
//! shifted so the root is at x = 0, then scaled by the zoom factor and moved
//! to the viewport's translate anchor.

use std::collections::HashMap;
use std::fmt;

use colored::Colorize;
use serde::Serialize;
use termtree::Tree;
use tracing::instrument;

use crate::config::RenderSettings;
use crate::domain::{
    ExpansionState, NodeId, Point, ReferralTree, SelectionController, TreeNode,
    ViewportController,
};

/// Which palette entry a node is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    Root,
    Highlight,
    Default,
}

impl FillStyle {
    /// Root wins over highlight.
    pub fn select(depth: usize, highlighted: bool) -> Self {
        if depth == 0 {
            FillStyle::Root
        } else if highlighted {
            FillStyle::Highlight
        } else {
            FillStyle::Default
        }
    }

    pub fn stroke_width(self) -> u8 {
        match self {
            FillStyle::Default => 2,
            FillStyle::Root | FillStyle::Highlight => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawInstruction {
    pub id: NodeId,
    pub name: String,
    pub depth: usize,
    pub position: Point,
    pub fill: FillStyle,
    pub color: String,
    pub stroke_width: u8,
    pub bold_label: bool,
    pub image: Option<String>,
    /// Children exist but are hidden
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Everything a drawing surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub zoom: f64,
    pub anchor: Point,
    pub nodes: Vec<DrawInstruction>,
    pub edges: Vec<DrawEdge>,
}

pub struct RenderAdapter {
    settings: RenderSettings,
}

impl RenderAdapter {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    fn color(&self, fill: FillStyle) -> &str {
        match fill {
            FillStyle::Root => &self.settings.root_color,
            FillStyle::Highlight => &self.settings.highlight_color,
            FillStyle::Default => &self.settings.default_color,
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn render(
        &self,
        tree: &ReferralTree,
        viewport: &ViewportController,
        selection: &SelectionController,
        expansion: &ExpansionState,
    ) -> Scene {
        let shown = visible(tree, expansion);
        let positions = self.place(&shown, expansion);

        let zoom = viewport.zoom_factor();
        let anchor = viewport.translate_anchor();
        let root_x = positions.get(&tree.root()).map_or(0.0, |p: &Point| p.x);

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (id, node, depth) in shown {
            let local = positions.get(&id).copied().unwrap_or_default();
            let fill = FillStyle::select(depth, selection.is_highlighted(node));
            nodes.push(DrawInstruction {
                id,
                name: node.data.name.clone(),
                depth,
                position: Point {
                    x: anchor.x + (local.x - root_x) * zoom,
                    y: anchor.y + local.y * zoom,
                },
                fill,
                color: self.color(fill).to_string(),
                stroke_width: fill.stroke_width(),
                bold_label: selection.is_highlighted(node),
                image: node.data.image.clone(),
                collapsed: !node.is_leaf() && !expansion.is_expanded(id),
            });
            if let Some(parent) = node.parent {
                edges.push(DrawEdge { from: parent, to: id });
            }
        }

        Scene {
            zoom,
            anchor,
            nodes,
            edges,
        }
    }

    /// Unscaled layout positions of the visible nodes, given in pre-order.
    ///
    /// Leaves take slots in pre-order, which is left to right. Walking the
    /// same list backwards reaches every node after all of its descendants,
    /// so parents can be centred without recursion.
    fn place(
        &self,
        shown: &[(NodeId, &TreeNode, usize)],
        expansion: &ExpansionState,
    ) -> HashMap<NodeId, Point> {
        let spacing = self.settings.node_width * self.settings.sibling_separation;
        let mut xs: HashMap<NodeId, f64> = HashMap::with_capacity(shown.len());

        let mut next_slot = 0.0;
        for &(id, node, _) in shown {
            if !shows_children(id, node, expansion) {
                xs.insert(id, next_slot);
                next_slot += spacing;
            }
        }

        for &(id, node, _) in shown.iter().rev() {
            if shows_children(id, node, expansion) {
                let first = node.children.first().and_then(|c| xs.get(c).copied());
                let last = node.children.last().and_then(|c| xs.get(c).copied());
                if let (Some(first), Some(last)) = (first, last) {
                    let x = (first + last) / 2.0;
                    xs.insert(id, x);
                }
            }
        }

        shown
            .iter()
            .map(|&(id, _, depth)| {
                let point = Point {
                    x: xs.get(&id).copied().unwrap_or_default(),
                    y: depth as f64 * self.settings.node_height,
                };
                (id, point)
            })
            .collect()
    }

    /// Terminal outline of the visible tree, assembled bottom-up.
    pub fn outline(
        &self,
        tree: &ReferralTree,
        selection: &SelectionController,
        expansion: &ExpansionState,
        colorize: bool,
    ) -> Tree<OutlineLabel> {
        let mut built: HashMap<NodeId, Tree<OutlineLabel>> = HashMap::new();
        for (id, node, depth) in visible(tree, expansion).into_iter().rev() {
            let expanded = expansion.is_expanded(id);
            let fill = FillStyle::select(depth, selection.is_highlighted(node));
            let label = OutlineLabel {
                name: node.data.name.clone(),
                fill,
                hidden_children: if expanded { 0 } else { node.children.len() },
                rgb: hex_rgb(self.color(fill)),
                colorize,
            };
            let leaves: Vec<_> = if expanded {
                node.children
                    .iter()
                    .filter_map(|child| built.remove(child))
                    .collect()
            } else {
                Vec::new()
            };
            built.insert(id, Tree::new(label).with_leaves(leaves));
        }
        built
            .remove(&tree.root())
            .unwrap_or_else(|| Tree::new(OutlineLabel::missing(tree.root())))
    }
}

/// Label of one node in the terminal outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLabel {
    pub name: String,
    pub fill: FillStyle,
    pub hidden_children: usize,
    rgb: Option<(u8, u8, u8)>,
    colorize: bool,
}

impl OutlineLabel {
    fn missing(id: NodeId) -> Self {
        Self {
            name: format!("<{}>", id),
            fill: FillStyle::Default,
            hidden_children: 0,
            rgb: None,
            colorize: false,
        }
    }
}

impl fmt::Display for OutlineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.hidden_children > 0 {
            format!(" [+{}]", self.hidden_children)
        } else {
            String::new()
        };
        if !self.colorize {
            return write!(f, "{}{}", self.name, suffix);
        }
        let name = match (self.fill, self.rgb) {
            (FillStyle::Default, _) => self.name.normal(),
            (_, Some((r, g, b))) => self.name.truecolor(r, g, b).bold(),
            (_, None) => self.name.bold(),
        };
        write!(f, "{}{}", name, suffix.dimmed())
    }
}

fn shows_children(id: NodeId, node: &TreeNode, expansion: &ExpansionState) -> bool {
    !node.is_leaf() && expansion.is_expanded(id)
}

/// Visible nodes in pre-order: children of collapsed nodes are skipped.
fn visible<'a>(
    tree: &'a ReferralTree,
    expansion: &ExpansionState,
) -> Vec<(NodeId, &'a TreeNode, usize)> {
    let mut out = Vec::new();
    let mut stack = vec![(tree.root(), 0)];
    while let Some((id, depth)) = stack.pop() {
        if let Some(node) = tree.node(id) {
            if expansion.is_expanded(id) {
                for &child in node.children.iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
            out.push((id, node, depth));
        }
    }
    out
}

/// Parse `#RRGGBB`.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_palette_hex_when_parsing_then_returns_channels() {
        assert_eq!(hex_rgb("#FF5722"), Some((255, 87, 34)));
        assert_eq!(hex_rgb("#4caf50"), Some((76, 175, 80)));
        assert_eq!(hex_rgb("FF5722"), None);
        assert_eq!(hex_rgb("#FFF"), None);
    }

    #[test]
    fn given_depth_and_highlight_when_selecting_fill_then_root_wins() {
        assert_eq!(FillStyle::select(0, true), FillStyle::Root);
        assert_eq!(FillStyle::select(0, false), FillStyle::Root);
        assert_eq!(FillStyle::select(2, true), FillStyle::Highlight);
        assert_eq!(FillStyle::select(1, false), FillStyle::Default);
        assert_eq!(FillStyle::Highlight.stroke_width(), 4);
        assert_eq!(FillStyle::Default.stroke_width(), 2);
    }
}
