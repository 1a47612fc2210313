//! Text measurement seam between the strip engine and the font backend.

/// A rasterized glyph: 8-bit coverage, positioned relative to the pen.
#[derive(Debug, Clone, Default)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Horizontal offset from the pen position to the bitmap's left edge.
    pub left: i32,
    /// Distance from the baseline up to the bitmap's top edge.
    pub top: i32,
    pub advance: i32,
    pub coverage: Vec<u8>,
}

/// Everything the strip needs to know about a font.
///
/// Implemented by the fontdue-backed `FontFace`; tests substitute a
/// monospace stub so layout is exact.
pub trait TextShaper {
    /// Switches the face to a new pixel size, dropping any cached glyphs.
    fn set_pixel_size(&mut self, px: u32);

    fn pixel_size(&self) -> u32;

    /// Horizontal extent of `text` on one line.
    fn text_width(&mut self, text: &str) -> i32;

    fn line_height(&self) -> i32;

    fn ascent(&self) -> i32;

    fn glyph(&mut self, ch: char) -> Option<&GlyphBitmap>;
}

pub const ELLIPSIS: &str = "...";

/// Shortens `text` with a trailing ellipsis so it fits in `max_width`.
///
/// Text that fits is returned untouched. When not even the ellipsis fits,
/// the ellipsis alone is returned and the painter's clip trims it.
pub fn ellipsize(shaper: &mut dyn TextShaper, text: &str, max_width: i32) -> String {
    if shaper.text_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width - shaper.text_width(ELLIPSIS);
    let mut fitted = String::new();
    if budget > 0 {
        for ch in text.chars() {
            fitted.push(ch);
            if shaper.text_width(&fitted) > budget {
                fitted.pop();
                break;
            }
        }
    }
    let trimmed_len = fitted.trim_end().len();
    fitted.truncate(trimmed_len);
    fitted.push_str(ELLIPSIS);
    fitted
}
