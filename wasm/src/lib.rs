use downline_chart::layout_dump::layout_dump_json;
use downline_chart::{RenderOptions, Theme, chart_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    zoom: Option<f32>,
    screen_width: Option<f32>,
}

fn build_render_options(options: ChartRenderOptions) -> RenderOptions {
    let mut render_options = RenderOptions::classic();
    if let Some(theme) = options.theme.as_deref().and_then(Theme::by_name) {
        render_options.config.render.background = theme.background.clone();
        render_options.config.theme = theme;
    }
    if let Some(font_family) = options.font_family {
        render_options.config.theme.font_family = font_family;
    }
    if let Some(width) = options.screen_width {
        render_options.config.viewport.min_width = width.max(0.0);
    }
    render_options.zoom = options.zoom;
    render_options
}

fn parse_options(options_json: Option<String>) -> Result<ChartRenderOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| error.to_string()),
        None => Ok(ChartRenderOptions::default()),
    }
}

fn render_svg_string(input_json: &str, options_json: Option<String>) -> Result<String, String> {
    let options = build_render_options(parse_options(options_json)?);
    let chart = chart_with_options(input_json, &options).map_err(|error| error.to_string())?;
    Ok(chart.to_svg(&options.config))
}

fn layout_json_string(input_json: &str, options_json: Option<String>) -> Result<String, String> {
    let options = build_render_options(parse_options(options_json)?);
    let chart = chart_with_options(input_json, &options).map_err(|error| error.to_string())?;
    layout_dump_json(&chart).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn render_hierarchy_svg(input_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    render_svg_string(input_json, options_json).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn layout_hierarchy_json(input_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json_string(input_json, options_json).map_err(|error| JsValue::from_str(&error))
}
