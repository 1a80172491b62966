use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use downline_chart::config::Config;
use downline_chart::ir::{AgentId, AgentRecord, HierarchyInput};
use downline_chart::layout::{compute_edges, compute_layout, compute_viewport};
use downline_chart::render::render_svg;
use downline_chart::tree::build_tree;
use downline_chart::HierarchyChart;
use std::hint::black_box;

fn root() -> AgentRecord {
    AgentRecord::new(0, "Root Agent", "Regional Director", None)
}

/// Every row recruited directly by the root.
fn wide_rows(count: usize) -> Vec<AgentRecord> {
    (1..=count as AgentId)
        .map(|id| AgentRecord::new(id, format!("Agent {id}"), "agent", Some(0)))
        .collect()
}

/// A single recruitment chain.
fn deep_rows(count: usize) -> Vec<AgentRecord> {
    (1..=count as AgentId)
        .map(|id| AgentRecord::new(id, format!("Agent {id}"), "agent", Some(id - 1)))
        .collect()
}

/// Each agent recruits `fanout` others, listed breadth first.
fn balanced_rows(count: usize, fanout: AgentId) -> Vec<AgentRecord> {
    (1..=count as AgentId)
        .map(|id| AgentRecord::new(id, format!("Agent {id}"), "Unit Manager", Some((id - 1) / fanout)))
        .collect()
}

/// Balanced rows listed children-first, with some orphans and duplicates.
fn noisy_rows(count: usize) -> Vec<AgentRecord> {
    let mut rows = balanced_rows(count, 3);
    rows.reverse();
    for (idx, row) in rows.iter_mut().enumerate() {
        if idx % 17 == 0 {
            row.parent_id = Some(-1);
        }
    }
    let duplicates: Vec<AgentRecord> = rows.iter().step_by(11).cloned().collect();
    rows.extend(duplicates);
    rows
}

fn datasets() -> Vec<(&'static str, Vec<AgentRecord>)> {
    vec![
        ("wide_50", wide_rows(50)),
        ("deep_200", deep_rows(200)),
        ("balanced_120", balanced_rows(120, 3)),
        ("balanced_500", balanced_rows(500, 4)),
        ("noisy_300", noisy_rows(300)),
    ]
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    let root = root();
    for (name, rows) in datasets() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &rows, |b, rows| {
            b.iter(|| {
                let tree = build_tree(black_box(&root), black_box(rows));
                black_box(tree.children.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    let root = root();
    for (name, rows) in datasets() {
        let tree = build_tree(&root, &rows);
        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| {
                let layout = compute_layout(black_box(tree), &config.layout);
                let edges = compute_edges(&layout);
                let viewport = compute_viewport(&layout, 1.0, &config.viewport);
                black_box((layout.root.subtree_width, edges.len(), viewport.content_width));
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = Config::default();
    for (name, rows) in datasets() {
        let chart = HierarchyChart::build(HierarchyInput::new(root(), rows), &config)
            .expect("chart build failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &chart, |b, chart| {
            b.iter(|| {
                let svg = render_svg(
                    black_box(&chart.layout),
                    &chart.edges,
                    &chart.viewport,
                    &config.theme,
                    &config.layout,
                );
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_build, bench_layout, bench_render
);
criterion_main!(benches);
