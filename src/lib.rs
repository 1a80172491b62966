pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod refresh;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod tree;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, ViewportConfig};
pub use error::{Error, Result};
pub use ir::{AgentId, AgentRecord, HierarchyInput};
pub use layout::{
    EdgeGeometry, PositionedNode, TreeLayout, ViewportState, compute_edges, compute_layout,
    compute_viewport,
};
pub use render::render_svg;
pub use theme::Theme;
pub use tree::{HierarchyNode, build_tree};

/// Everything the renderer needs for one record set: the positioned tree,
/// its connectors and the zoomable canvas.
#[derive(Debug, Clone)]
pub struct HierarchyChart {
    pub layout: TreeLayout,
    pub edges: Vec<EdgeGeometry>,
    pub viewport: ViewportState,
}

impl HierarchyChart {
    /// Rebuilds the chart from scratch for a complete record set.
    pub fn build(input: HierarchyInput, config: &Config) -> Result<Self> {
        let tree = input.into_tree()?;
        Ok(Self::from_tree(&tree, config))
    }

    pub fn from_tree(tree: &HierarchyNode, config: &Config) -> Self {
        let layout = compute_layout(tree, &config.layout);
        let edges = compute_edges(&layout);
        let viewport = compute_viewport(&layout, config.viewport.initial_zoom, &config.viewport);
        Self {
            layout,
            edges,
            viewport,
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.viewport.set_zoom(zoom);
    }

    pub fn to_svg(&self, config: &Config) -> String {
        render_svg(
            &self.layout,
            &self.edges,
            &self.viewport,
            &config.theme,
            &config.layout,
        )
    }
}

/// Settings for one-call rendering from JSON input.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
    pub zoom: Option<f32>,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn modern() -> Self {
        let mut config = Config::default();
        config.theme = Theme::modern();
        config.render.background = config.theme.background.clone();
        Self { config, zoom: None }
    }
}

/// Parses a hierarchy JSON document and renders it to SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let chart = chart_with_options(input, &options)?;
    Ok(chart.to_svg(&options.config))
}

pub fn chart_with_options(input: &str, options: &RenderOptions) -> anyhow::Result<HierarchyChart> {
    let input = HierarchyInput::from_json(input)?;
    let mut chart = HierarchyChart::build(input, &options.config)?;
    if let Some(zoom) = options.zoom {
        chart.set_zoom(zoom);
    }
    Ok(chart)
}

pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_options(input, RenderOptions::default())
}
