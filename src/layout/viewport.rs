use serde::Serialize;

use super::{Point, TreeLayout};
use crate::config::ViewportConfig;

/// Allowed zoom interval and the increment of one zoom action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ZoomRange {
    /// Builds a range with `min <= max` whichever order the bounds come in.
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            step: step.abs(),
        }
    }

    /// Brings `zoom` into the range; NaN counts as the identity zoom. Never
    /// panics, even for a hand-built range with its bounds swapped.
    pub fn clamp(&self, zoom: f32) -> f32 {
        let zoom = if zoom.is_nan() { 1.0 } else { zoom };
        let ZoomRange { min, max, .. } = Self::new(self.min, self.max, self.step);
        zoom.max(min).min(max)
    }
}

impl From<&ViewportConfig> for ZoomRange {
    fn from(config: &ViewportConfig) -> Self {
        Self::new(config.min_zoom, config.max_zoom, config.zoom_step)
    }
}

/// Scale about the content center followed by a translation that puts the
/// scaled content's top-left corner back on the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

/// Canvas size of a laid out hierarchy and the user's current zoom. Only the
/// zoom actions change it after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    zoom: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub range: ZoomRange,
}

impl ViewportState {
    pub fn new(content_width: f32, content_height: f32, zoom: f32, range: ZoomRange) -> Self {
        let range = ZoomRange::new(range.min, range.max, range.step);
        Self {
            zoom: range.clamp(zoom),
            content_width,
            content_height,
            range,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.range.clamp(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.range.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.range.step);
    }

    pub fn scaled_width(&self) -> f32 {
        self.content_width * self.zoom
    }

    pub fn scaled_height(&self) -> f32 {
        self.content_height * self.zoom
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.zoom,
            translate_x: self.content_width * (self.zoom - 1.0) / 2.0,
            translate_y: self.content_height * (self.zoom - 1.0) / 2.0,
        }
    }

    /// Maps a layout coordinate to the zoomed canvas by applying
    /// [`Self::transform`] about the content center.
    pub fn to_screen(&self, point: Point) -> Point {
        let transform = self.transform();
        let center_x = self.content_width / 2.0;
        let center_y = self.content_height / 2.0;
        Point::new(
            center_x + (point.x - center_x) * transform.scale + transform.translate_x,
            center_y + (point.y - center_y) * transform.scale + transform.translate_y,
        )
    }
}

/// Sizes the canvas to the node boxes plus the margin, never below the
/// configured minimums. The content size does not depend on `zoom`.
pub fn compute_viewport(layout: &TreeLayout, zoom: f32, config: &ViewportConfig) -> ViewportState {
    let bounds = layout.bounds();
    let content_width = (bounds.max_x + config.margin).max(config.min_width);
    let content_height = (bounds.max_y + config.margin).max(config.min_height);
    ViewportState::new(content_width, content_height, zoom, ZoomRange::from(config))
}
