use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::display_rank;
use crate::layout::{EdgeGeometry, PositionedNode, TreeLayout, ViewportState};
use crate::text_metrics::truncate_to_width;
use crate::theme::Theme;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Draws connectors first, then node boxes on top, inside the viewport's
/// zoom transform. The SVG canvas takes the zoomed content size.
pub fn render_svg(
    layout: &TreeLayout,
    edges: &[EdgeGeometry],
    viewport: &ViewportState,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let mut svg = String::new();
    let width = viewport.scaled_width().max(1.0);
    let height = viewport.scaled_height().max(1.0);

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    );

    let transform = viewport.transform();
    let center_x = viewport.content_width / 2.0;
    let center_y = viewport.content_height / 2.0;
    let _ = write!(
        svg,
        "<g transform=\"translate({:.2} {:.2}) translate({center_x:.2} {center_y:.2}) scale({:.3}) translate({:.2} {:.2})\">",
        transform.translate_x,
        transform.translate_y,
        transform.scale,
        -center_x,
        -center_y
    );

    svg.push_str("<g class=\"edges\">");
    for edge in edges {
        let _ = write!(
            svg,
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" data-from=\"{}\" data-to=\"{}\"/>",
            edge.to_svg_path(),
            theme.line_color,
            theme.line_width,
            edge.from_id,
            edge.to_id
        );
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in layout.nodes() {
        let is_root = node.id == layout.root.id;
        svg.push_str(&node_svg(node, layout, is_root, theme, config));
    }
    svg.push_str("</g>");

    svg.push_str("</g></svg>");
    svg
}

fn node_svg(
    node: &PositionedNode,
    layout: &TreeLayout,
    is_root: bool,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let (fill, border, name_color, rank_color) = if is_root {
        (
            &theme.root_fill,
            &theme.root_border,
            &theme.root_name_color,
            &theme.root_rank_color,
        )
    } else {
        (
            &theme.node_fill,
            &theme.node_border,
            &theme.name_color,
            &theme.rank_color,
        )
    };

    let bounds = layout.node_bounds(node);
    let label_width = (layout.node_width - config.label_padding * 2.0).max(0.0);
    let name = truncate_to_width(
        &node.display_name,
        label_width,
        theme.name_font_size,
        &theme.font_family,
    );
    let rank = truncate_to_width(
        display_rank(&node.rank),
        label_width,
        theme.rank_font_size,
        &theme.font_family,
    );
    let middle_y = node.top_y + layout.node_height / 2.0;
    let name_y = middle_y - 2.0;
    let rank_y = middle_y + theme.rank_font_size + 2.0;

    let mut out = String::new();
    let _ = write!(out, "<g class=\"node\" data-id=\"{}\">", node.id);
    let _ = write!(
        out,
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" ry=\"{}\" fill=\"{fill}\" stroke=\"{border}\" stroke-width=\"1\"/>",
        bounds.min_x,
        bounds.min_y,
        bounds.width(),
        bounds.height(),
        theme.corner_radius,
        theme.corner_radius
    );
    let _ = write!(
        out,
        "<text x=\"{:.2}\" y=\"{name_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"700\" fill=\"{name_color}\">{}</text>",
        node.center_x,
        escape_xml(&theme.font_family),
        theme.name_font_size,
        escape_xml(&name)
    );
    let _ = write!(
        out,
        "<text x=\"{:.2}\" y=\"{rank_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{rank_color}\">{}</text>",
        node.center_x,
        escape_xml(&theme.font_family),
        theme.rank_font_size,
        escape_xml(&rank)
    );
    out.push_str("</g>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    let fallback = usvg::Size::from_wh(800.0, 600.0)
        .ok_or_else(|| anyhow::anyhow!("invalid fallback canvas size"))?;
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height).unwrap_or(fallback);

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_hex_color(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(feature = "png")]
fn parse_hex_color(value: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(resvg::tiny_skia::Color::from_rgba8(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
        255,
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
