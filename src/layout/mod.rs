mod edges;
pub(crate) mod types;
mod viewport;

pub use edges::*;
pub use types::*;
pub use viewport::*;

use crate::config::LayoutConfig;
use crate::ir::AgentId;
use crate::tree::HierarchyNode;
use tracing::debug;

/// Lays the hierarchy out top-down: every row shares one `top_y`, sibling
/// subtrees never overlap, and each parent is centered over its subtree.
///
/// The result is a fresh tree mirroring `root` one-to-one; the same input
/// and config always produce identical coordinates.
pub fn compute_layout(root: &HierarchyNode, config: &LayoutConfig) -> TreeLayout {
    let measured = measure(root, config);
    let positioned = assign(measured, config.origin_x, config.origin_y, 0, config);
    let layout = TreeLayout {
        root: positioned,
        node_width: config.node_width,
        node_height: config.node_height,
        row_height: config.row_height(),
    };
    debug!(
        root = layout.root.id,
        nodes = layout.node_count(),
        width = layout.root.subtree_width,
        "computed hierarchy layout"
    );
    layout
}

/// Post-order pass: a subtree is as wide as its own box or its children side
/// by side, whichever is larger.
///
/// Walks an explicit stack; the chain of recruiters can be far deeper than
/// the native stack allows.
pub fn measure(node: &HierarchyNode, config: &LayoutConfig) -> MeasuredNode {
    let mut finished: Vec<MeasuredNode> = Vec::new();
    let mut stack: Vec<Visit<'_>> = node.children.iter().rev().map(Visit::Enter).collect();
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(current) => {
                stack.push(Visit::Exit(current));
                stack.extend(current.children.iter().rev().map(Visit::Enter));
            }
            Visit::Exit(current) => {
                let children = finished.split_off(finished.len() - current.children.len());
                finished.push(measured(current, children, config));
            }
        }
    }
    measured(node, finished, config)
}

enum Visit<'a> {
    Enter(&'a HierarchyNode),
    Exit(&'a HierarchyNode),
}

fn measured(
    node: &HierarchyNode,
    children: Vec<MeasuredNode>,
    config: &LayoutConfig,
) -> MeasuredNode {
    let subtree_width = if children.is_empty() {
        config.node_width
    } else {
        config.node_width.max(children_span(&children, config.gap_x))
    };
    MeasuredNode {
        id: node.id,
        display_name: node.display_name.clone(),
        rank: node.rank.clone(),
        subtree_width,
        children,
    }
}

/// Pre-order pass placing `node`'s subtree with its left edge at `left` and
/// its row at `top`.
pub fn assign(
    node: MeasuredNode,
    left: f32,
    top: f32,
    depth: usize,
    config: &LayoutConfig,
) -> PositionedNode {
    let mut finished: Vec<PositionedNode> = Vec::new();
    let (root, pending) = place(node, left, top, depth, config);
    let mut stack: Vec<Step> = pending.into_iter().rev().collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter {
                node,
                left,
                top,
                depth,
            } => {
                let (placement, pending) = place(node, left, top, depth, config);
                stack.push(Step::Exit(placement));
                stack.extend(pending.into_iter().rev());
            }
            Step::Exit(placement) => {
                let children = finished.split_off(finished.len() - placement.child_count);
                finished.push(placement.finish(children));
            }
        }
    }
    root.finish(finished)
}

enum Step {
    Enter {
        node: MeasuredNode,
        left: f32,
        top: f32,
        depth: usize,
    },
    Exit(Placement),
}

/// A node whose own position is known but whose children are still being
/// placed.
struct Placement {
    id: AgentId,
    display_name: String,
    rank: String,
    depth: usize,
    subtree_width: f32,
    center_x: f32,
    top_y: f32,
    child_count: usize,
}

impl Placement {
    fn finish(self, children: Vec<PositionedNode>) -> PositionedNode {
        PositionedNode {
            id: self.id,
            display_name: self.display_name,
            rank: self.rank,
            depth: self.depth,
            subtree_width: self.subtree_width,
            center_x: self.center_x,
            top_y: self.top_y,
            children,
        }
    }
}

/// Positions `node` and hands back one pending step per child, left to
/// right, with each child's left edge already decided.
fn place(
    mut node: MeasuredNode,
    left: f32,
    top: f32,
    depth: usize,
    config: &LayoutConfig,
) -> (Placement, Vec<Step>) {
    let children = std::mem::take(&mut node.children);
    let span = children_span(&children, config.gap_x);

    let mut cursor = left;
    if !children.is_empty() && node.subtree_width > span {
        // Floored so odd leftovers land on the same unit everywhere.
        cursor += ((node.subtree_width - span) / 2.0).floor();
    }

    let child_top = top + config.row_height();
    let mut pending = Vec::with_capacity(children.len());
    for child in children {
        let width = child.subtree_width;
        pending.push(Step::Enter {
            node: child,
            left: cursor,
            top: child_top,
            depth: depth + 1,
        });
        cursor += width + config.gap_x;
    }

    let placement = Placement {
        id: node.id,
        display_name: std::mem::take(&mut node.display_name),
        rank: std::mem::take(&mut node.rank),
        depth,
        subtree_width: node.subtree_width,
        center_x: left + node.subtree_width / 2.0,
        top_y: top,
        child_count: pending.len(),
    };
    (placement, pending)
}

fn children_span(children: &[MeasuredNode], gap_x: f32) -> f32 {
    if children.is_empty() {
        return 0.0;
    }
    let widths: f32 = children.iter().map(|child| child.subtree_width).sum();
    widths + gap_x * (children.len() - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::AgentRecord;
    use crate::tree::build_tree;

    const EPS: f32 = 1e-3;

    fn agent(id: i64, parent: Option<i64>) -> AgentRecord {
        AgentRecord::new(id, format!("Agent {id}"), "agent", parent)
    }

    fn layout_of(rows: &[AgentRecord]) -> TreeLayout {
        let tree = build_tree(&agent(1, None), rows);
        compute_layout(&tree, &LayoutConfig::default())
    }

    #[test]
    fn single_node_is_one_box_wide() {
        let config = LayoutConfig::default();
        let layout = layout_of(&[]);
        assert_eq!(layout.root.subtree_width, config.node_width);
        assert_eq!(layout.root.center_x, config.node_width / 2.0);
        assert_eq!(layout.root.top_y, config.origin_y);
    }

    #[test]
    fn three_leaves_center_under_root() {
        let config = LayoutConfig::default();
        let layout = layout_of(&[agent(2, Some(1)), agent(3, Some(1)), agent(4, Some(1))]);
        let root = &layout.root;
        assert_eq!(
            root.subtree_width,
            3.0 * config.node_width + 2.0 * config.gap_x
        );
        let first = &root.children[0];
        let last = &root.children[2];
        let midpoint = (first.subtree_left() + last.subtree_right()) / 2.0;
        assert!((root.center_x - midpoint).abs() < EPS);
        assert!((root.children[1].center_x - root.center_x).abs() < EPS);
    }

    #[test]
    fn nested_width_propagates_to_root() {
        let config = LayoutConfig::default();
        // 1 -> {2 (leaf), 3 -> {4, 5}}
        let layout = layout_of(&[
            agent(2, Some(1)),
            agent(3, Some(1)),
            agent(4, Some(3)),
            agent(5, Some(3)),
        ]);
        let a = layout.root.find(2).unwrap();
        let b = layout.root.find(3).unwrap();
        let grandchild = layout.root.find(4).unwrap();
        assert_eq!(b.subtree_width, 2.0 * config.node_width + config.gap_x);
        assert_eq!(
            layout.root.subtree_width,
            a.subtree_width + b.subtree_width + config.gap_x
        );
        assert_eq!(grandchild.top_y - a.top_y, config.row_height());
        assert_eq!(grandchild.top_y - layout.root.top_y, 2.0 * config.row_height());
    }

    #[test]
    fn single_child_sits_directly_below_parent() {
        let layout = layout_of(&[agent(2, Some(1))]);
        assert_eq!(layout.root.children[0].center_x, layout.root.center_x);
    }

    #[test]
    fn wide_parent_centers_narrow_children() {
        // A box wider than its single recruit exercises the centering branch.
        let config = LayoutConfig::default();
        let mut measured = measure(&build_tree(&agent(1, None), &[agent(2, Some(1))]), &config);
        measured.subtree_width = 201.0;
        let positioned = assign(measured, 0.0, 0.0, 0, &config);
        // (201 - 160) / 2 = 20.5, floored to 20.
        assert_eq!(positioned.children[0].subtree_left(), 20.0);
        assert_eq!(positioned.center_x, 100.5);
    }

    #[test]
    fn rows_follow_depth() {
        let config = LayoutConfig::default();
        let layout = layout_of(&[
            agent(2, Some(1)),
            agent(3, Some(2)),
            agent(4, Some(3)),
            agent(5, Some(1)),
        ]);
        for node in layout.nodes() {
            let expected = config.origin_y + node.depth as f32 * config.row_height();
            assert_eq!(node.top_y, expected, "node {}", node.id);
        }
    }

    #[test]
    fn siblings_never_overlap() {
        let layout = layout_of(&[
            agent(2, Some(1)),
            agent(3, Some(1)),
            agent(4, Some(2)),
            agent(5, Some(2)),
            agent(6, Some(2)),
            agent(7, Some(3)),
            agent(8, Some(7)),
            agent(9, Some(7)),
        ]);
        for node in layout.nodes() {
            for pair in node.children.windows(2) {
                assert!(pair[0].subtree_right() <= pair[1].subtree_left() + EPS);
            }
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let rows = [agent(2, Some(1)), agent(3, Some(2)), agent(4, Some(2))];
        assert_eq!(layout_of(&rows), layout_of(&rows));
    }
}
