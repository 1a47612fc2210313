use crate::core::Rect;
use crate::strip::{StripScene, TextShaper};

use super::strip::{CloseTier, TabStyle, paint_tab};
use super::{RenderTarget, blend_rgb};

/// Preview opacity (~70%). The popup surface has no alpha channel, so the
/// tab is faded toward the strip background instead.
pub const PREVIEW_OPACITY: u8 = 179;

/// Renders the dragged tab in its active style, filling `target`.
/// Does nothing when no drag is in progress.
pub fn paint_drag_preview(
    scene: &StripScene<'_>,
    shaper: &mut dyn TextShaper,
    target: &mut RenderTarget<'_>,
) {
    let Some(drag) = &scene.drag else {
        return;
    };
    let palette = scene.palette;
    let title = scene.titles.get(drag.source).map_or("", String::as_str);
    let background = palette.background.to_pixel();

    target.reset_clip();
    target.clear(background);
    let rect = Rect::new(0, 0, target.width as i32, target.height as i32);
    let style = TabStyle {
        fill: palette.active_tab,
        active: true,
        close: CloseTier::Idle,
    };
    paint_tab(target, shaper, scene.metrics, palette, rect, title, style);

    for px in target.buffer.iter_mut() {
        *px = blend_rgb(background, *px, PREVIEW_OPACITY);
    }
}
