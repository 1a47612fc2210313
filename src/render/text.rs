use std::collections::HashMap;
use std::collections::hash_map::Entry;

use fontdue::{Font, FontSettings};

use crate::StripError;
use crate::strip::{GlyphBitmap, TextShaper};

/// fontdue-backed [`TextShaper`] with a per-size glyph cache.
pub struct FontFace {
    font: Font,
    px: u32,
    ascent: i32,
    line_height: i32,
    glyph_cache: HashMap<char, GlyphBitmap>,
}

impl FontFace {
    pub fn from_bytes(data: Vec<u8>, px: u32) -> Result<Self, StripError> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|err| StripError::Font(err.to_string()))?;
        let mut face = Self {
            font,
            px: 0,
            ascent: 0,
            line_height: 0,
            glyph_cache: HashMap::new(),
        };
        face.set_pixel_size(px);
        Ok(face)
    }

    fn size(&self) -> f32 {
        self.px as f32
    }
}

impl TextShaper for FontFace {
    fn set_pixel_size(&mut self, px: u32) {
        let px = px.max(1);
        if px == self.px {
            return;
        }
        self.px = px;
        self.glyph_cache.clear();

        let size = self.size();
        match self.font.horizontal_line_metrics(size) {
            Some(lm) => {
                self.ascent = lm.ascent.ceil() as i32;
                self.line_height = (lm.ascent.ceil() - lm.descent.floor()).max(1.0) as i32;
            }
            None => {
                self.ascent = (size * 0.8).ceil() as i32;
                self.line_height = px as i32;
            }
        }
    }

    fn pixel_size(&self) -> u32 {
        self.px
    }

    fn text_width(&mut self, text: &str) -> i32 {
        let size = self.size();
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum();
        width.ceil() as i32
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn ascent(&self) -> i32 {
        self.ascent
    }

    fn glyph(&mut self, ch: char) -> Option<&GlyphBitmap> {
        let size = self.size();
        let glyph = match self.glyph_cache.entry(ch) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let (metrics, coverage) = self.font.rasterize(ch, size);
                entry.insert(GlyphBitmap {
                    width: metrics.width,
                    height: metrics.height,
                    left: metrics.xmin,
                    top: metrics.height as i32 + metrics.ymin,
                    advance: metrics.advance_width.round() as i32,
                    coverage,
                })
            }
        };
        Some(glyph)
    }
}
