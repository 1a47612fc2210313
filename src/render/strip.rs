//! Strip painter.
//!
//! Paint order: background, clip to the tab region, tabs (skipping the one
//! being dragged), insertion indicator, inline drag ghost, unclip, scroll
//! buttons.

use crate::config::ThemePalette;
use crate::core::{Color, Rect};
use crate::strip::{StripHit, StripMetrics, StripScene, TextShaper, ellipsize};

use super::RenderTarget;
use super::primitives::{
    draw_text, fill_circle, fill_rect, fill_top_rounded_rect, fill_triangle, stroke_line,
    stroke_top_rounded_rect,
};

/// Visual tier of a close glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CloseTier {
    Idle,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct TabStyle {
    pub fill: Color,
    pub active: bool,
    pub close: CloseTier,
}

pub fn paint_strip(scene: &StripScene<'_>, shaper: &mut dyn TextShaper, target: &mut RenderTarget<'_>) {
    let palette = scene.palette;
    let layout = scene.layout;

    target.reset_clip();
    target.clear(palette.background.to_pixel());
    target.set_clip(layout.display_rect());

    let dragged = scene.drag.as_ref().map(|d| d.source);
    for (index, rect) in layout.tabs.iter().enumerate() {
        if dragged == Some(index) {
            continue;
        }
        let offset = scene.drag.as_ref().map_or(0, |d| d.offsets.get(index).copied().unwrap_or(0));
        let rect = rect.offset(offset, 0);
        let style = tab_style(scene, index);
        let title = scene.titles.get(index).map_or("", String::as_str);
        paint_tab(target, shaper, scene.metrics, palette, rect, title, style);
    }

    if let Some(drag) = &scene.drag {
        if let Some(indicator) = drag.indicator {
            fill_rect(target, indicator, palette.insertion);
        }
        if let Some(ghost) = drag.ghost {
            let title = scene.titles.get(drag.source).map_or("", String::as_str);
            let style = TabStyle {
                fill: palette.active_tab,
                active: true,
                close: CloseTier::Idle,
            };
            paint_tab(target, shaper, scene.metrics, palette, ghost, title, style);
        }
    }

    target.reset_clip();

    if layout.show_scroll_buttons {
        paint_scroll_button(
            target,
            scene,
            layout.scroll_left,
            scene.hovered == StripHit::ScrollLeft,
            true,
        );
        paint_scroll_button(
            target,
            scene,
            layout.scroll_right,
            scene.hovered == StripHit::ScrollRight,
            false,
        );
    }
}

fn tab_style(scene: &StripScene<'_>, index: usize) -> TabStyle {
    let palette = scene.palette;
    let active = scene.selected == Some(index);
    let dragging = scene.drag.is_some();
    let hovered = !dragging && scene.hovered.tab_index() == Some(index);

    let fill = if active {
        palette.active_tab
    } else if hovered {
        palette.hover
    } else {
        palette.background
    };
    let close = if scene.pressed_close == Some(index) {
        CloseTier::Pressed
    } else if !dragging && scene.hovered == StripHit::CloseButton(index) {
        CloseTier::Hovered
    } else {
        CloseTier::Idle
    };
    TabStyle {
        fill,
        active,
        close,
    }
}

/// Body, border, label and close glyph of one tab at `rect`.
pub(super) fn paint_tab(
    target: &mut RenderTarget<'_>,
    shaper: &mut dyn TextShaper,
    metrics: &StripMetrics,
    palette: &ThemePalette,
    rect: Rect,
    title: &str,
    style: TabStyle,
) {
    let body = if style.active {
        Rect::new(rect.x, rect.y, rect.w, rect.h + 1)
    } else {
        rect
    };
    fill_top_rounded_rect(target, body, metrics.corner_radius, style.fill);
    if !style.active {
        stroke_top_rounded_rect(target, rect, metrics.corner_radius, palette.separator);
    }

    let close_w = metrics.close_width.min(rect.w);
    let text_left = rect.x + metrics.padding_x / 2;
    let text_right = rect.right() - close_w;
    if text_right > text_left {
        let label = ellipsize(shaper, title, text_right - text_left);
        let text_y = rect.y + (rect.h - shaper.line_height()) / 2;
        let outer_clip = target.clip();
        target.set_clip(outer_clip.intersect(&Rect::new(
            text_left,
            rect.y,
            text_right - text_left,
            rect.h,
        )));
        draw_text(target, shaper, text_left, text_y, &label, palette.text);
        target.set_clip(outer_clip);
    }

    let close = Rect::new(rect.right() - close_w, rect.y, close_w, rect.h);
    paint_close_glyph(target, metrics, palette, close, style.close);
}

fn paint_close_glyph(
    target: &mut RenderTarget<'_>,
    metrics: &StripMetrics,
    palette: &ThemePalette,
    square: Rect,
    tier: CloseTier,
) {
    let (cx, cy) = (
        square.x as f32 + square.w as f32 / 2.0,
        square.y as f32 + square.h as f32 / 2.0,
    );
    let size = metrics.close_glyph as f32;
    let color = match tier {
        CloseTier::Idle => palette.close_glyph,
        CloseTier::Hovered | CloseTier::Pressed => {
            fill_circle(target, cx, cy, size / 2.0, palette.close_hover_bg);
            palette.close_glyph_hover
        }
    };

    let arm = size * 0.2;
    let thickness = (metrics.dpi as f32 / 96.0).max(1.0) * 1.3;
    stroke_line(target, (cx - arm, cy - arm), (cx + arm, cy + arm), thickness, color);
    stroke_line(target, (cx - arm, cy + arm), (cx + arm, cy - arm), thickness, color);
}

fn paint_scroll_button(
    target: &mut RenderTarget<'_>,
    scene: &StripScene<'_>,
    rect: Rect,
    hovered: bool,
    points_left: bool,
) {
    let palette = scene.palette;
    let fill = if hovered {
        palette.scroll_hover
    } else {
        palette.background
    };
    fill_rect(target, rect, fill);

    let (cx, cy) = (
        rect.x as f32 + rect.w as f32 / 2.0,
        rect.y as f32 + rect.h as f32 / 2.0,
    );
    let half_w = scene.metrics.scaled(5) as f32 / 2.0;
    let half_h = scene.metrics.scaled(5) as f32;
    let points = if points_left {
        [(cx - half_w, cy), (cx + half_w, cy - half_h), (cx + half_w, cy + half_h)]
    } else {
        [(cx + half_w, cy), (cx - half_w, cy - half_h), (cx - half_w, cy + half_h)]
    };
    fill_triangle(target, points, palette.scroll_glyph);
}

#[cfg(test)]
#[path = "../../tests/unit/render_strip.rs"]
mod tests;
