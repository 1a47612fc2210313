//! DPI-dependent pixel constants of the strip.
//!
//! Rebuilt wholesale from [`LayoutConfig`] on every DPI change; nothing here
//! survives a change of DPI.

use crate::config::{FontConfig, LayoutConfig};

pub const BASE_DPI: u32 = 96;
const MIN_DPI: u32 = 48;
const MAX_DPI: u32 = 480;

/// Insertion indicator width and vertical inset (96-DPI pixels).
const INDICATOR_WIDTH: u32 = 2;
const INDICATOR_INSET: u32 = 5;

/// Horizontal/vertical tooltip padding (96-DPI pixels).
const TOOLTIP_PADDING_X: u32 = 6;
const TOOLTIP_PADDING_Y: u32 = 3;

/// Clamps a reported DPI into a usable range; zero maps to 96.
pub fn sanitize_dpi(dpi: u32) -> u32 {
    if dpi == 0 {
        BASE_DPI
    } else {
        dpi.clamp(MIN_DPI, MAX_DPI)
    }
}

/// DPI equivalent of a winit scale factor.
pub fn dpi_from_scale(scale_factor: f64) -> u32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        sanitize_dpi((scale_factor * BASE_DPI as f64).round() as u32)
    } else {
        BASE_DPI
    }
}

/// `value * dpi / 96`, rounded to nearest.
pub fn scale_to_dpi(value: u32, dpi: u32) -> i32 {
    ((value as u64 * dpi as u64 + BASE_DPI as u64 / 2) / BASE_DPI as u64) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripMetrics {
    pub dpi: u32,
    /// Font height in pixels requested from the shaper.
    pub font_px: u32,
    pub tab_height: i32,
    pub padding_x: i32,
    /// Width of the trailing close square (always equal to the tab height).
    pub close_width: i32,
    pub close_glyph: i32,
    pub corner_radius: i32,
    pub scroll_button_width: i32,
    pub scroll_step: i32,
    pub drag_threshold: i32,
    pub indicator_width: i32,
    pub indicator_inset: i32,
    pub tooltip_padding_x: i32,
    pub tooltip_padding_y: i32,
}

impl StripMetrics {
    pub fn new(layout: &LayoutConfig, font: &FontConfig, dpi: u32) -> Self {
        let dpi = sanitize_dpi(dpi);
        let scaled = |v: u32| scale_to_dpi(v, dpi);

        let size_pt = if font.size_pt.is_finite() && font.size_pt > 0.0 {
            font.size_pt
        } else {
            FontConfig::default().size_pt
        };
        let font_px = ((size_pt as f64 * dpi as f64 / 72.0).round() as u32).max(1);
        let tab_height = font_px as i32 + scaled(layout.tab_padding_y * 2);

        Self {
            dpi,
            font_px,
            tab_height,
            padding_x: scaled(layout.tab_padding_x),
            close_width: tab_height,
            close_glyph: scaled(layout.close_glyph_size).min(tab_height),
            corner_radius: scaled(layout.corner_radius),
            scroll_button_width: scaled(layout.scroll_button_width).max(1),
            scroll_step: scaled(layout.scroll_step).max(1),
            drag_threshold: scaled(layout.drag_threshold),
            indicator_width: scaled(INDICATOR_WIDTH).max(1),
            indicator_inset: scaled(INDICATOR_INSET),
            tooltip_padding_x: scaled(TOOLTIP_PADDING_X),
            tooltip_padding_y: scaled(TOOLTIP_PADDING_Y),
        }
    }

    /// Scales an arbitrary 96-DPI length to this DPI.
    pub fn scaled(&self, value: u32) -> i32 {
        scale_to_dpi(value, self.dpi)
    }

    /// Space reserved at the right edge for both scroll buttons.
    pub fn scroll_buttons_width(&self) -> i32 {
        self.scroll_button_width * 2
    }

    /// Returns `true` once a pointer displacement qualifies as a drag.
    pub fn exceeds_drag_threshold(&self, dx: i32, dy: i32) -> bool {
        dx.abs() > self.drag_threshold || dy.abs() > self.drag_threshold
    }
}
