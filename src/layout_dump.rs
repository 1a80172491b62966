use crate::HierarchyChart;
use crate::ir::AgentId;
use crate::layout::{Bounds, ViewTransform};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub root_id: AgentId,
    pub node_width: f32,
    pub node_height: f32,
    pub row_height: f32,
    pub bounds: Bounds,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub viewport: ViewportDump,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: AgentId,
    pub parent_id: Option<AgentId>,
    pub display_name: String,
    pub rank: String,
    pub depth: usize,
    pub subtree_width: f32,
    pub center_x: f32,
    pub top_y: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: AgentId,
    pub to: AgentId,
    pub points: Vec<[f32; 2]>,
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportDump {
    pub zoom: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub scaled_width: f32,
    pub scaled_height: f32,
    pub transform: ViewTransform,
}

impl LayoutDump {
    pub fn from_chart(chart: &HierarchyChart) -> Self {
        let layout = &chart.layout;
        let mut nodes = Vec::with_capacity(layout.node_count());
        let mut stack = vec![(&layout.root, None)];
        while let Some((node, parent_id)) = stack.pop() {
            nodes.push(NodeDump {
                id: node.id,
                parent_id,
                display_name: node.display_name.clone(),
                rank: node.rank.clone(),
                depth: node.depth,
                subtree_width: node.subtree_width,
                center_x: node.center_x,
                top_y: node.top_y,
            });
            stack.extend(node.children.iter().rev().map(|child| (child, Some(node.id))));
        }

        let edges = chart
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from_id,
                to: edge.to_id,
                points: edge.points().iter().map(|p| [p.x, p.y]).collect(),
                path: edge.to_svg_path(),
            })
            .collect();

        let viewport = &chart.viewport;
        LayoutDump {
            root_id: layout.root.id,
            node_width: layout.node_width,
            node_height: layout.node_height,
            row_height: layout.row_height,
            bounds: layout.bounds(),
            nodes,
            edges,
            viewport: ViewportDump {
                zoom: viewport.zoom(),
                content_width: viewport.content_width,
                content_height: viewport.content_height,
                scaled_width: viewport.scaled_width(),
                scaled_height: viewport.scaled_height(),
                transform: viewport.transform(),
            },
        }
    }
}

pub fn layout_dump_json(chart: &HierarchyChart) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&LayoutDump::from_chart(chart))?)
}

pub fn write_layout_dump(path: &Path, chart: &HierarchyChart) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_chart(chart))?;
    Ok(())
}
