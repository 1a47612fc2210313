use crate::config::ThemePalette;
use crate::strip::{StripMetrics, TextShaper};

use super::RenderTarget;
use super::primitives::{draw_text, stroke_rect};

/// Paints a tooltip popup: flat fill, one-pixel border, untruncated text.
/// `target` is expected to be sized from the `ShowTooltip` request.
pub fn paint_tooltip(
    palette: &ThemePalette,
    metrics: &StripMetrics,
    shaper: &mut dyn TextShaper,
    text: &str,
    target: &mut RenderTarget<'_>,
) {
    target.reset_clip();
    target.clear(palette.tooltip_bg.to_pixel());
    let bounds = target.clip();
    stroke_rect(target, bounds, palette.tooltip_border);
    draw_text(
        target,
        shaper,
        metrics.tooltip_padding_x,
        metrics.tooltip_padding_y,
        text,
        palette.tooltip_text,
    );
}
