use std::path::Path;

use downline_chart::{
    AgentId, AgentRecord, Config, HierarchyChart, HierarchyInput, LayoutConfig, PositionedNode,
    build_tree, compute_layout,
};

const EPS: f32 = 1e-3;

fn load_fixture(name: &str) -> HierarchyInput {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    HierarchyInput::from_path(&path).expect("fixture load failed")
}

fn chart(name: &str) -> HierarchyChart {
    HierarchyChart::build(load_fixture(name), &Config::default()).expect("chart build failed")
}

fn child_ids(node: &PositionedNode) -> Vec<AgentId> {
    node.children.iter().map(|c| c.id).collect()
}

fn assert_layout_invariants(chart: &HierarchyChart, fixture: &str) {
    let config = LayoutConfig::default();
    let root_y = chart.layout.root.top_y;
    for node in chart.layout.nodes() {
        assert!(
            node.subtree_width >= config.node_width,
            "{fixture}: node {} narrower than its box",
            node.id
        );
        assert_eq!(
            node.top_y,
            root_y + node.depth as f32 * config.row_height(),
            "{fixture}: node {} off its row",
            node.id
        );
        if !node.children.is_empty() {
            let span: f32 = node.children.iter().map(|c| c.subtree_width).sum::<f32>()
                + config.gap_x * (node.children.len() - 1) as f32;
            assert!(node.subtree_width + EPS >= span, "{fixture}: node {}", node.id);
            if node.subtree_width > config.node_width {
                assert!((node.subtree_width - span).abs() < EPS);
            }
        }
        for pair in node.children.windows(2) {
            assert!(
                pair[0].subtree_right() <= pair[1].subtree_left() + EPS,
                "{fixture}: siblings {} and {} overlap",
                pair[0].id,
                pair[1].id
            );
        }
    }
    assert_eq!(chart.edges.len(), chart.layout.node_count() - 1, "{fixture}");
}

#[test]
fn all_fixtures_satisfy_layout_invariants() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = [
        "single.json",
        "three_leaves.json",
        "nested.json",
        "downline_rows.json",
        "malformed.json",
    ];
    for fixture in fixtures {
        let chart = chart(fixture);
        assert_layout_invariants(&chart, fixture);
        let svg = chart.to_svg(&Config::default());
        assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    }
}

#[test]
fn single_root_ignores_its_own_recruiter() {
    let chart = chart("single.json");
    let config = LayoutConfig::default();
    assert_eq!(chart.layout.node_count(), 1);
    assert_eq!(chart.layout.root.subtree_width, config.node_width);
    assert_eq!(chart.layout.root.center_x, config.node_width / 2.0);
    assert!(chart.edges.is_empty());
}

#[test]
fn three_leaves_scenario() {
    let chart = chart("three_leaves.json");
    let config = LayoutConfig::default();
    let root = &chart.layout.root;
    assert_eq!(
        root.subtree_width,
        3.0 * config.node_width + 2.0 * config.gap_x
    );
    let midpoint = (root.children[0].subtree_left() + root.children[2].subtree_right()) / 2.0;
    assert!((root.center_x - midpoint).abs() < EPS);
    assert!((root.children[1].center_x - root.center_x).abs() < EPS);
}

#[test]
fn nested_scenario() {
    let chart = chart("nested.json");
    let config = LayoutConfig::default();
    let root = &chart.layout.root;
    let a = root.find(2).unwrap();
    let b = root.find(3).unwrap();
    assert_eq!(b.subtree_width, 2.0 * config.node_width + config.gap_x);
    assert_eq!(
        root.subtree_width,
        a.subtree_width + b.subtree_width + config.gap_x
    );
    let grandchild = root.find(4).unwrap();
    assert_eq!(grandchild.top_y - a.top_y, config.row_height());
    assert_eq!(grandchild.top_y - root.top_y, 2.0 * config.row_height());
}

#[test]
fn backend_rows_are_accepted() {
    let chart = chart("downline_rows.json");
    let root = &chart.layout.root;
    assert_eq!(root.id, 40);
    assert_eq!(root.display_name, "Noel Garcia");
    assert_eq!(child_ids(root), vec![41, 42]);
    assert_eq!(child_ids(root.find(42).unwrap()), vec![43, 44]);
    assert_eq!(child_ids(root.find(43).unwrap()), vec![45]);
}

#[test]
fn malformed_rows_degrade_to_root_children() {
    let chart = chart("malformed.json");
    let root = &chart.layout.root;
    assert_eq!(chart.layout.node_count(), 7);
    assert_eq!(child_ids(root), vec![2, 3, 4, 5]);
    assert_eq!(child_ids(root.find(2).unwrap()), vec![7]);
    assert_eq!(child_ids(root.find(5).unwrap()), vec![6]);
    assert_eq!(root.find(2).unwrap().display_name, "Ramon Diaz");
}

#[test]
fn layout_is_deterministic_across_rebuilds() {
    let first = chart("downline_rows.json");
    let second = chart("downline_rows.json");
    let a: Vec<(AgentId, f32, f32)> = first
        .layout
        .nodes()
        .map(|n| (n.id, n.center_x, n.top_y))
        .collect();
    let b: Vec<(AgentId, f32, f32)> = second
        .layout
        .nodes()
        .map(|n| (n.id, n.center_x, n.top_y))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn large_generated_hierarchy_stays_non_overlapping() {
    let root = AgentRecord::new(0, "Root", "Director", None);
    let rows: Vec<AgentRecord> = (1..300)
        .map(|id: AgentId| AgentRecord::new(id, format!("Agent {id}"), "agent", Some((id - 1) / 3)))
        .collect();
    let tree = build_tree(&root, &rows);
    assert_eq!(tree.node_count(), 300);
    let layout = compute_layout(&tree, &LayoutConfig::default());

    // Boxes on the same row must not overlap either.
    let config = LayoutConfig::default();
    let mut rows_by_depth: Vec<Vec<f32>> = vec![Vec::new(); tree.depth() + 1];
    for node in layout.nodes() {
        rows_by_depth[node.depth].push(node.center_x);
    }
    for row in &mut rows_by_depth {
        row.sort_by(|a, b| a.total_cmp(b));
        for pair in row.windows(2) {
            assert!(pair[1] - pair[0] + EPS >= config.node_width + config.gap_x);
        }
    }
}

#[test]
fn long_recruiter_chain_lays_out_to_the_last_row() {
    const CHAIN: AgentId = 20_000;
    let root = AgentRecord::new(0, "Root", "Director", None);
    let rows: Vec<AgentRecord> = (1..=CHAIN)
        .map(|id| AgentRecord::new(id, format!("Agent {id}"), "agent", Some(id - 1)))
        .collect();
    let chart = HierarchyChart::build(HierarchyInput::new(root, rows), &Config::default())
        .expect("chart build failed");

    let config = LayoutConfig::default();
    let deepest = chart.layout.root.find(CHAIN).expect("deepest agent missing");
    assert_eq!(deepest.depth, CHAIN as usize);
    assert_eq!(
        deepest.top_y,
        config.origin_y + CHAIN as f32 * config.row_height()
    );
    assert_eq!(deepest.center_x, chart.layout.root.center_x);
    assert_eq!(chart.edges.len(), CHAIN as usize);
}

#[test]
fn zoom_clamps_at_both_ends() {
    let mut chart = chart("nested.json");
    for _ in 0..30 {
        chart.zoom_in();
    }
    assert_eq!(chart.viewport.zoom(), 2.0);
    for _ in 0..30 {
        chart.zoom_out();
    }
    assert_eq!(chart.viewport.zoom(), 0.4);
}
