use serde::Serialize;

use crate::ir::AgentId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A hierarchy node annotated with the horizontal space its whole subtree
/// needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredNode {
    pub id: AgentId,
    pub display_name: String,
    pub rank: String,
    pub subtree_width: f32,
    pub children: Vec<MeasuredNode>,
}

/// A measured node with its final position. `center_x` is the horizontal
/// center of the node box, `top_y` the top edge of its row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: AgentId,
    pub display_name: String,
    pub rank: String,
    pub depth: usize,
    pub subtree_width: f32,
    pub center_x: f32,
    pub top_y: f32,
    pub children: Vec<PositionedNode>,
}

impl PositionedNode {
    pub fn subtree_left(&self) -> f32 {
        self.center_x - self.subtree_width / 2.0
    }

    pub fn subtree_right(&self) -> f32 {
        self.center_x + self.subtree_width / 2.0
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn find(&self, id: AgentId) -> Option<&PositionedNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Pre-order walk, parents before their recruits.
    pub fn iter(&self) -> impl Iterator<Item = &PositionedNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

// Both trees mirror the input hierarchy, so they are torn down over a heap
// stack rather than one native frame per level.
impl Drop for MeasuredNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Drop for PositionedNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    fn include(&mut self, other: Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }
}

/// The positioned tree together with the box size it was laid out with.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    pub root: PositionedNode,
    pub node_width: f32,
    pub node_height: f32,
    pub row_height: f32,
}

impl TreeLayout {
    pub fn nodes(&self) -> impl Iterator<Item = &PositionedNode> {
        self.root.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn node_bounds(&self, node: &PositionedNode) -> Bounds {
        Bounds {
            min_x: node.center_x - self.node_width / 2.0,
            min_y: node.top_y,
            max_x: node.center_x + self.node_width / 2.0,
            max_y: node.top_y + self.node_height,
        }
    }

    /// Smallest box covering every node box.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = self.node_bounds(&self.root);
        for node in self.nodes().skip(1) {
            bounds.include(self.node_bounds(node));
        }
        bounds
    }
}
