//! Core configuration for vizij-curves-core.

use serde::{Deserialize, Serialize};

use crate::viewport::ViewState;

/// Tunables for one editor session.
/// Every field has a default so hosts may pass a partial JSON object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of history entries kept (oldest evicted first).
    pub history_capacity: usize,
    /// Pixel displacement (either axis) after which a press becomes a drag.
    pub drag_threshold_px: f64,
    /// Tangent x-offsets shorter than this are snapped when switching into a Bezier mode.
    pub min_tangent_length: f64,
    /// Length used for snapped tangents and for newly inserted points.
    pub default_tangent_length: f64,
    /// Screen padding applied on every side by fit-view.
    pub fit_padding_px: f64,
    /// View restored when there is nothing to fit.
    pub default_view: ViewState,
    /// Absolute scale clamp applied by zoom.
    pub min_scale: f64,
    pub max_scale: f64,
    /// Pick radius used by [`crate::hit::hit_test`].
    pub hit_radius_px: f64,
    /// Quiet period after the last document change before the token is republished.
    pub token_debounce_ms: f64,
    /// Tokens longer than this are not published.
    pub max_token_len: usize,
    /// Colors assigned to new or imported curves by index.
    pub palette: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            drag_threshold_px: 2.0,
            min_tangent_length: 0.1,
            default_tangent_length: 0.25,
            fit_padding_px: 40.0,
            default_view: ViewState::default(),
            min_scale: 1e-3,
            max_scale: 1e6,
            hit_radius_px: 8.0,
            token_debounce_ms: 500.0,
            max_token_len: 8000,
            palette: default_palette(),
        }
    }
}

impl EditorConfig {
    /// Palette color for the curve at `index`, rotating through the palette.
    pub fn color_for_index(&self, index: usize) -> String {
        palette_color(&self.palette, index)
    }
}

pub(crate) fn palette_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
    }
    palette[index % palette.len()].clone()
}

const DEFAULT_PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#bfef45",
];

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}
