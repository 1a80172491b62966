use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Box and spacing constants of the hierarchy layout, in layout units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Minimum horizontal gap between adjacent sibling subtrees.
    pub gap_x: f32,
    /// Vertical gap between rows.
    pub gap_y: f32,
    /// Left edge of the root's subtree.
    pub origin_x: f32,
    /// Top of the root row.
    pub origin_y: f32,
    /// Padding inside a node box around its two label lines.
    pub label_padding: f32,
}

impl LayoutConfig {
    pub fn row_height(&self) -> f32 {
        self.node_height + self.gap_y
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 70.0,
            gap_x: 30.0,
            gap_y: 80.0,
            origin_x: 0.0,
            origin_y: 50.0,
            label_padding: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Space added past the right and bottom edges of the diagram.
    pub margin: f32,
    /// Smallest canvas width, typically the screen width.
    pub min_width: f32,
    pub min_height: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub initial_zoom: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            min_width: 0.0,
            min_height: 500.0,
            min_zoom: 0.4,
            max_zoom: 2.0,
            zoom_step: 0.1,
            initial_zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutFile>,
    viewport: Option<ViewportFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    name_font_size: Option<f32>,
    rank_font_size: Option<f32>,
    node_fill: Option<String>,
    node_border: Option<String>,
    name_color: Option<String>,
    rank_color: Option<String>,
    root_fill: Option<String>,
    root_border: Option<String>,
    root_name_color: Option<String>,
    root_rank_color: Option<String>,
    line_color: Option<String>,
    line_width: Option<f32>,
    corner_radius: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    gap_x: Option<f32>,
    gap_y: Option<f32>,
    origin_x: Option<f32>,
    origin_y: Option<f32>,
    label_padding: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportFile {
    margin: Option<f32>,
    min_width: Option<f32>,
    min_height: Option<f32>,
    min_zoom: Option<f32>,
    max_zoom: Option<f32>,
    zoom_step: Option<f32>,
    initial_zoom: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme: {theme_name}"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.name_font_size {
            theme.name_font_size = v;
        }
        if let Some(v) = vars.rank_font_size {
            theme.rank_font_size = v;
        }
        if let Some(v) = vars.node_fill {
            theme.node_fill = v;
        }
        if let Some(v) = vars.node_border {
            theme.node_border = v;
        }
        if let Some(v) = vars.name_color {
            theme.name_color = v;
        }
        if let Some(v) = vars.rank_color {
            theme.rank_color = v;
        }
        if let Some(v) = vars.root_fill {
            theme.root_fill = v;
        }
        if let Some(v) = vars.root_border {
            theme.root_border = v;
        }
        if let Some(v) = vars.root_name_color {
            theme.root_name_color = v;
        }
        if let Some(v) = vars.root_rank_color {
            theme.root_rank_color = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.line_width {
            theme.line_width = v;
        }
        if let Some(v) = vars.corner_radius {
            theme.corner_radius = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
    }
    config.render.background = config.theme.background.clone();

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.node_width {
            target.node_width = v.max(1.0);
        }
        if let Some(v) = layout.node_height {
            target.node_height = v.max(1.0);
        }
        if let Some(v) = layout.gap_x {
            target.gap_x = v.max(0.0);
        }
        if let Some(v) = layout.gap_y {
            target.gap_y = v.max(0.0);
        }
        if let Some(v) = layout.origin_x {
            target.origin_x = v;
        }
        if let Some(v) = layout.origin_y {
            target.origin_y = v;
        }
        if let Some(v) = layout.label_padding {
            target.label_padding = v.max(0.0);
        }
    }

    if let Some(viewport) = parsed.viewport {
        let target = &mut config.viewport;
        if let Some(v) = viewport.margin {
            target.margin = v.max(0.0);
        }
        if let Some(v) = viewport.min_width {
            target.min_width = v.max(0.0);
        }
        if let Some(v) = viewport.min_height {
            target.min_height = v.max(0.0);
        }
        if let Some(v) = viewport.min_zoom {
            target.min_zoom = v;
        }
        if let Some(v) = viewport.max_zoom {
            target.max_zoom = v;
        }
        if let Some(v) = viewport.zoom_step {
            target.zoom_step = v.abs();
        }
        if let Some(v) = viewport.initial_zoom {
            target.initial_zoom = v;
        }
        if target.min_zoom <= 0.0 || target.min_zoom > target.max_zoom {
            return Err(anyhow::anyhow!(
                "invalid zoom range: {}..{}",
                target.min_zoom,
                target.max_zoom
            ));
        }
    }

    Ok(config)
}
