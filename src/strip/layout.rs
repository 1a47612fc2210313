//! Layout engine: tab rectangles, scroll range and scroll-button placement.
//!
//! A layout is a pure function of the titles, the font, the metrics, the
//! client width and the requested scroll offset. The strip rebuilds it on
//! every structural change instead of patching it.

use crate::core::Rect;

use super::metrics::StripMetrics;
use super::text::TextShaper;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripLayout {
    /// One rectangle per tab, in display order, scroll offset applied.
    pub tabs: Vec<Rect>,
    pub tab_height: i32,
    pub close_width: i32,
    /// Unclipped sum of all tab widths.
    pub total_width: i32,
    pub client_width: i32,
    pub show_scroll_buttons: bool,
    /// Client width minus the scroll-button reservation when shown.
    pub visible_width: i32,
    pub max_scroll: i32,
    /// Requested offset clamped to `[0, max_scroll]`.
    pub scroll_offset: i32,
    pub scroll_left: Rect,
    pub scroll_right: Rect,
}

/// Natural width of a tab: label + horizontal padding + close square.
pub fn tab_width(shaper: &mut dyn TextShaper, metrics: &StripMetrics, title: &str) -> i32 {
    shaper.text_width(title) + metrics.padding_x + metrics.close_width
}

impl StripLayout {
    pub fn compute(
        titles: &[String],
        shaper: &mut dyn TextShaper,
        metrics: &StripMetrics,
        client_width: i32,
        scroll_offset: i32,
    ) -> Self {
        let client_width = client_width.max(0);
        let widths: Vec<i32> = titles
            .iter()
            .map(|title| tab_width(shaper, metrics, title))
            .collect();
        let total_width: i32 = widths.iter().sum();

        let show_scroll_buttons = total_width > client_width;
        let visible_width = if show_scroll_buttons {
            (client_width - metrics.scroll_buttons_width()).max(0)
        } else {
            client_width
        };
        let max_scroll = (total_width - visible_width).max(0);
        let scroll_offset = scroll_offset.clamp(0, max_scroll);

        let height = metrics.tab_height;
        let mut tabs = Vec::with_capacity(widths.len());
        let mut x = -scroll_offset;
        for w in widths {
            tabs.push(Rect::new(x, 0, w, height));
            x += w;
        }

        let (scroll_left, scroll_right) = if show_scroll_buttons {
            let bw = metrics.scroll_button_width;
            let left_x = client_width - bw * 2;
            (
                Rect::new(left_x, 0, bw, height),
                Rect::new(left_x + bw, 0, bw, height),
            )
        } else {
            (Rect::default(), Rect::default())
        };

        Self {
            tabs,
            tab_height: height,
            close_width: metrics.close_width,
            total_width,
            client_width,
            show_scroll_buttons,
            visible_width,
            max_scroll,
            scroll_offset,
            scroll_left,
            scroll_right,
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab_rect(&self, index: usize) -> Option<Rect> {
        self.tabs.get(index).copied()
    }

    /// Trailing square of the tab that hosts the close glyph.
    pub fn close_rect(&self, index: usize) -> Option<Rect> {
        self.tab_rect(index).map(|tab| {
            let w = self.close_width.min(tab.w);
            Rect::new(tab.right() - w, tab.y, w, tab.h)
        })
    }

    /// Area tabs are painted into; scroll buttons sit to its right.
    pub fn display_rect(&self) -> Rect {
        Rect::new(0, 0, self.visible_width, self.tab_height)
    }

    /// Tab span in unscrolled row coordinates.
    pub fn virtual_span(&self, index: usize) -> Option<(i32, i32)> {
        self.tab_rect(index).map(|tab| {
            let left = tab.x + self.scroll_offset;
            (left, left + tab.w)
        })
    }

    /// Smallest scroll adjustment that brings tab `index` fully into view.
    pub fn scroll_to_reveal(&self, index: usize) -> i32 {
        let Some((left, right)) = self.virtual_span(index) else {
            return self.scroll_offset;
        };
        let target = if left < self.scroll_offset {
            left
        } else if right > self.scroll_offset + self.visible_width {
            right - self.visible_width
        } else {
            self.scroll_offset
        };
        target.clamp(0, self.max_scroll)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_layout.rs"]
mod tests;
