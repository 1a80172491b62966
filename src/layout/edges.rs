use serde::Serialize;

use super::{Point, PositionedNode, TreeLayout};
use crate::ir::AgentId;

/// Connector from a recruiter's bottom edge to a recruit's top edge, as one
/// cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeGeometry {
    pub from_id: AgentId,
    pub to_id: AgentId,
    pub start: Point,
    pub control_start: Point,
    pub control_end: Point,
    pub end: Point,
}

impl EdgeGeometry {
    /// Both control points sit on the horizontal midline between the rows,
    /// so the curve leaves and enters vertically.
    pub fn between(parent: &PositionedNode, child: &PositionedNode, node_height: f32) -> Self {
        let start = Point::new(parent.center_x, parent.top_y + node_height);
        let end = Point::new(child.center_x, child.top_y);
        let mid_y = (start.y + end.y) / 2.0;
        Self {
            from_id: parent.id,
            to_id: child.id,
            start,
            control_start: Point::new(start.x, mid_y),
            control_end: Point::new(end.x, mid_y),
            end,
        }
    }

    pub fn points(&self) -> [Point; 4] {
        [self.start, self.control_start, self.control_end, self.end]
    }

    pub fn to_svg_path(&self) -> String {
        format!(
            "M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            self.start.x,
            self.start.y,
            self.control_start.x,
            self.control_start.y,
            self.control_end.x,
            self.control_end.y,
            self.end.x,
            self.end.y
        )
    }
}

/// One connector per recruiter/recruit pair, in pre-order of the recruiter
/// and left-to-right within its recruits.
pub fn compute_edges(layout: &TreeLayout) -> Vec<EdgeGeometry> {
    layout
        .nodes()
        .flat_map(|parent| {
            parent
                .children
                .iter()
                .map(move |child| EdgeGeometry::between(parent, child, layout.node_height))
        })
        .collect()
}
