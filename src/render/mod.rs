//! Software renderer for the strip and its popups.
//!
//! Everything draws into 0x00RRGGBB `u32` buffers (the softbuffer pixel
//! format). Painters compose a whole frame off-screen in a [`Frame`] and the
//! host copies it to the window surface once.

mod drag_preview;
mod primitives;
mod strip;
mod text;
mod tooltip;

use crate::core::Rect;

pub use drag_preview::{PREVIEW_OPACITY, paint_drag_preview};
pub use primitives::{
    draw_text, fill_circle, fill_rect, fill_top_rounded_rect, fill_triangle, stroke_line,
    stroke_rect, stroke_top_rounded_rect,
};
pub use strip::paint_strip;
pub use text::FontFace;
pub use tooltip::paint_tooltip;

/// Blends `src` over `dst` with `alpha` in 0..=255 (both colors are 0xRRGGBB).
pub fn blend_rgb(dst: u32, src: u32, alpha: u8) -> u32 {
    if alpha == 255 {
        return src;
    }
    if alpha == 0 {
        return dst;
    }

    let a = alpha as u32;
    let inv = 255 - a;

    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;

    let sr = (src >> 16) & 0xFF;
    let sg = (src >> 8) & 0xFF;
    let sb = src & 0xFF;

    let r = (sr * a + dr * inv + 127) / 255;
    let g = (sg * a + dg * inv + 127) / 255;
    let b = (sb * a + db * inv + 127) / 255;

    (r << 16) | (g << 8) | b
}

/// A mutable pixel buffer with a clip rectangle.
pub struct RenderTarget<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
    clip: Rect,
}

impl<'a> RenderTarget<'a> {
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let mut target = Self {
            buffer,
            width,
            height,
            clip: Rect::default(),
        };
        target.reset_clip();
        target
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Restricts drawing to `rect` (intersected with the buffer bounds).
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = rect.intersect(&self.bounds());
    }

    pub fn reset_clip(&mut self) {
        self.clip = self.bounds();
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        self.buffer.get(y as usize * self.width + x as usize).copied()
    }

    /// Blends `color` into one pixel, honouring the clip.
    pub fn blend(&mut self, x: i32, y: i32, color: u32, alpha: u8) {
        if alpha == 0 || !self.clip.contains(x, y) {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if let Some(px) = self.buffer.get_mut(idx) {
            *px = blend_rgb(*px, color, alpha);
        }
    }

    /// Fills the whole buffer, ignoring the clip.
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }
}

/// Off-screen frame the size of a client area.
#[derive(Debug, Default)]
pub struct Frame {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        let mut frame = Self::default();
        frame.resize(width, height);
        frame
    }

    /// Reallocates only when the size changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn target(&mut self) -> RenderTarget<'_> {
        RenderTarget::new(&mut self.pixels, self.width, self.height)
    }
}
