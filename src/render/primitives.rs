use crate::core::{Color, Rect};
use crate::strip::TextShaper;

use super::RenderTarget;

pub fn fill_rect(target: &mut RenderTarget<'_>, rect: Rect, color: Color) {
    let area = rect.intersect(&target.clip());
    if area.is_empty() {
        return;
    }
    let pixel = color.to_pixel();
    for y in area.y..area.bottom() {
        let row = y as usize * target.width;
        target.buffer[row + area.x as usize..row + area.right() as usize].fill(pixel);
    }
}

/// One-pixel rectangle outline.
pub fn stroke_rect(target: &mut RenderTarget<'_>, rect: Rect, color: Color) {
    if rect.is_empty() {
        return;
    }
    fill_rect(target, Rect::new(rect.x, rect.y, rect.w, 1), color);
    fill_rect(target, Rect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
    fill_rect(target, Rect::new(rect.x, rect.y, 1, rect.h), color);
    fill_rect(target, Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
}

/// Coverage of a rect with only its top two corners rounded.
fn top_rounded_coverage(px: i32, py: i32, w: i32, h: i32, r: i32) -> f32 {
    if px < 0 || py < 0 || px >= w || py >= h {
        return 0.0;
    }
    if r <= 0 {
        return 1.0;
    }

    let in_tl = px < r && py < r;
    let in_tr = px >= w - r && py < r;
    if !(in_tl || in_tr) {
        return 1.0;
    }

    let cx = if in_tl {
        r as f32 - 0.5
    } else {
        (w - r) as f32 - 0.5
    };
    let cy = r as f32 - 0.5;

    let dx = px as f32 + 0.5 - cx;
    let dy = py as f32 + 0.5 - cy;
    let dist = (dx * dx + dy * dy).sqrt();
    (r as f32 + 0.5 - dist).clamp(0.0, 1.0)
}

fn clamp_radius(rect: Rect, radius: i32) -> i32 {
    radius.min(rect.w / 2).min(rect.h / 2).max(0)
}

/// Tab body: top corners rounded, bottom corners square.
pub fn fill_top_rounded_rect(target: &mut RenderTarget<'_>, rect: Rect, radius: i32, color: Color) {
    let area = rect.intersect(&target.clip());
    if area.is_empty() {
        return;
    }
    let r = clamp_radius(rect, radius);
    let pixel = color.to_pixel();
    for sy in area.y..area.bottom() {
        for sx in area.x..area.right() {
            let coverage = top_rounded_coverage(sx - rect.x, sy - rect.y, rect.w, rect.h, r);
            let alpha = (coverage * 255.0).round() as u8;
            target.blend(sx, sy, pixel, alpha);
        }
    }
}

/// One-pixel outline of a top-rounded rect: outer shape minus the shape
/// inset by one pixel on the left, top and right.
pub fn stroke_top_rounded_rect(
    target: &mut RenderTarget<'_>,
    rect: Rect,
    radius: i32,
    color: Color,
) {
    let area = rect.intersect(&target.clip());
    if area.is_empty() {
        return;
    }
    let r = clamp_radius(rect, radius);
    let inner_r = (r - 1).max(0);
    let pixel = color.to_pixel();
    for sy in area.y..area.bottom() {
        for sx in area.x..area.right() {
            let px = sx - rect.x;
            let py = sy - rect.y;
            let outer = top_rounded_coverage(px, py, rect.w, rect.h, r);
            let inner = top_rounded_coverage(px - 1, py - 1, rect.w - 2, rect.h - 1, inner_r);
            let coverage = (outer - inner).clamp(0.0, 1.0);
            let alpha = (coverage * 255.0).round() as u8;
            target.blend(sx, sy, pixel, alpha);
        }
    }
}

/// Antialiased filled circle.
pub fn fill_circle(target: &mut RenderTarget<'_>, cx: f32, cy: f32, radius: f32, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let clip = target.clip();
    let min_x = ((cx - radius - 1.0).floor() as i32).max(clip.x);
    let max_x = ((cx + radius + 1.0).ceil() as i32).min(clip.right() - 1);
    let min_y = ((cy - radius - 1.0).floor() as i32).max(clip.y);
    let max_y = ((cy + radius + 1.0).ceil() as i32).min(clip.bottom() - 1);
    let pixel = color.to_pixel();

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            target.blend(px, py, pixel, (coverage * 255.0).round() as u8);
        }
    }
}

fn point_to_segment_distance(px: f32, py: f32, p0: (f32, f32), p1: (f32, f32)) -> f32 {
    let (x0, y0) = p0;
    let (x1, y1) = p1;
    let vx = x1 - x0;
    let vy = y1 - y0;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f32::EPSILON {
        return ((px - x0) * (px - x0) + (py - y0) * (py - y0)).sqrt();
    }

    let t = (((px - x0) * vx + (py - y0) * vy) / len_sq).clamp(0.0, 1.0);
    let proj_x = x0 + t * vx;
    let proj_y = y0 + t * vy;
    ((px - proj_x) * (px - proj_x) + (py - proj_y) * (py - proj_y)).sqrt()
}

/// Antialiased line segment of the given thickness.
pub fn stroke_line(
    target: &mut RenderTarget<'_>,
    p0: (f32, f32),
    p1: (f32, f32),
    thickness: f32,
    color: Color,
) {
    if thickness <= 0.0 {
        return;
    }
    let clip = target.clip();
    let half = thickness * 0.5;
    let min_x = ((p0.0.min(p1.0) - half - 1.0).floor() as i32).max(clip.x);
    let max_x = ((p0.0.max(p1.0) + half + 1.0).ceil() as i32).min(clip.right() - 1);
    let min_y = ((p0.1.min(p1.1) - half - 1.0).floor() as i32).max(clip.y);
    let max_y = ((p0.1.max(p1.1) + half + 1.0).ceil() as i32).min(clip.bottom() - 1);
    let pixel = color.to_pixel();

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let dist = point_to_segment_distance(px as f32 + 0.5, py as f32 + 0.5, p0, p1);
            let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            target.blend(px, py, pixel, (coverage * 255.0).round() as u8);
        }
    }
}

/// Filled triangle; pixel centres inside all three edges are painted.
pub fn fill_triangle(target: &mut RenderTarget<'_>, points: [(f32, f32); 3], color: Color) {
    let [a, b, c] = points;
    let edge = |p: (f32, f32), q: (f32, f32), x: f32, y: f32| {
        (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
    };
    let area = edge(a, b, c.0, c.1);
    if area.abs() <= f32::EPSILON {
        return;
    }

    let clip = target.clip();
    let min_x = (a.0.min(b.0).min(c.0).floor() as i32).max(clip.x);
    let max_x = (a.0.max(b.0).max(c.0).ceil() as i32).min(clip.right() - 1);
    let min_y = (a.1.min(b.1).min(c.1).floor() as i32).max(clip.y);
    let max_y = (a.1.max(b.1).max(c.1).ceil() as i32).min(clip.bottom() - 1);
    let pixel = color.to_pixel();

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let (x, y) = (px as f32 + 0.5, py as f32 + 0.5);
            let w0 = edge(b, c, x, y) * area.signum();
            let w1 = edge(c, a, x, y) * area.signum();
            let w2 = edge(a, b, x, y) * area.signum();
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                target.blend(px, py, pixel, 255);
            }
        }
    }
}

/// Draws one line of text with its top edge at `y`. Returns the pen
/// position after the last glyph.
pub fn draw_text(
    target: &mut RenderTarget<'_>,
    shaper: &mut dyn TextShaper,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
) -> i32 {
    let baseline = y + shaper.ascent();
    let pixel = color.to_pixel();
    let mut pen = x;
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        match shaper.glyph(ch) {
            Some(glyph) => {
                for gy in 0..glyph.height {
                    for gx in 0..glyph.width {
                        let alpha = glyph.coverage[gy * glyph.width + gx];
                        let sx = pen + glyph.left + gx as i32;
                        let sy = baseline - glyph.top + gy as i32;
                        target.blend(sx, sy, pixel, alpha);
                    }
                }
                pen += glyph.advance;
            }
            None => pen += shaper.text_width(ch.encode_utf8(&mut buf)),
        }
    }
    pen
}
