//! Headless tab-strip engine.
//!
//! [`TabStrip`] owns the titles, selection, scroll offset, DPI metrics,
//! palette and pointer state machine. It never touches a window: everything
//! the host must do in response (pointer capture, popups, timers) is queued
//! as a [`StripRequest`] and drained with [`TabStrip::take_requests`].

mod animation;
mod hover;
mod interaction;
mod layout;
mod metrics;
mod tabs;
mod text;

use std::time::{Duration, Instant};

use crate::config::{StripConfig, ThemePalette};
use crate::core::Rect;

pub use animation::{FRAME_INTERVAL, SlideAnimation, gap_offsets};
pub use hit_test::{StripHit, drag_target, hit_test};
pub use hover::{HoverTracker, TooltipContent, TooltipState};
pub use interaction::{DragSession, PointerState, SiblingMotion};
pub use layout::{StripLayout, tab_width};
pub use metrics::{BASE_DPI, StripMetrics, dpi_from_scale, sanitize_dpi, scale_to_dpi};
pub use tabs::{TabList, index_after_move, index_after_remove};
pub use text::{ELLIPSIS, GlyphBitmap, TextShaper, ellipsize};

#[cfg(test)]
pub(crate) use text::testing::MonoShaper;

/// Work the host performs on behalf of the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripRequest {
    CapturePointer,
    ReleasePointer,
    /// Open the floating preview for tab `tab`, `width` x `height` px.
    ShowDragPreview { tab: usize, width: i32, height: i32 },
    /// Top-left of the preview in strip-local pixels.
    MoveDragPreview { x: i32, y: i32 },
    HideDragPreview,
    /// Show the tooltip popup at strip-local `(x, y)`.
    ShowTooltip { text: String, x: i32, y: i32, width: i32, height: i32 },
    HideTooltip,
    StartAnimation,
    StopAnimation,
    /// Popups must be repainted (palette or metrics changed).
    RefreshPopups,
    SelectionChanged(Option<usize>),
    TabClosed(usize),
    TabMoved { from: usize, to: usize },
}

/// Borrowed view of everything a painter needs for one frame.
pub struct StripScene<'a> {
    pub titles: &'a [String],
    pub layout: &'a StripLayout,
    pub metrics: &'a StripMetrics,
    pub palette: &'a ThemePalette,
    pub selected: Option<usize>,
    pub hovered: StripHit,
    /// Tab whose close glyph is held down.
    pub pressed_close: Option<usize>,
    pub drag: Option<DragView>,
    pub tooltip: Option<&'a TooltipContent>,
}

/// Paint-time snapshot of a drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragView {
    pub source: usize,
    pub pointer: (i32, i32),
    /// Per-tab horizontal display offsets.
    pub offsets: Vec<i32>,
    pub indicator: Option<Rect>,
    /// Inline ghost rectangle, when no preview window exists.
    pub ghost: Option<Rect>,
}

pub struct TabStrip {
    tabs: TabList,
    config: StripConfig,
    metrics: StripMetrics,
    shaper: Box<dyn TextShaper>,
    palette: ThemePalette,
    client_width: i32,
    scroll_offset: i32,
    layout: StripLayout,
    hovered: StripHit,
    pointer: PointerState,
    captured: bool,
    animating: bool,
    hover: HoverTracker,
    tooltip: TooltipState,
    inline_ghost: bool,
    pending: Vec<StripRequest>,
    needs_redraw: bool,
}

impl TabStrip {
    pub fn new(
        mut shaper: Box<dyn TextShaper>,
        config: &StripConfig,
        dpi: u32,
        dark: bool,
        client_width: i32,
    ) -> Self {
        let metrics = StripMetrics::new(&config.layout, &config.font, dpi);
        shaper.set_pixel_size(metrics.font_px);

        let mut strip = Self {
            tabs: TabList::new(config.initial_tabs.clone()),
            config: config.clone(),
            metrics,
            shaper,
            palette: ThemePalette::for_mode(dark),
            client_width: client_width.max(0),
            scroll_offset: 0,
            layout: StripLayout::default(),
            hovered: StripHit::Empty,
            pointer: PointerState::Idle,
            captured: false,
            animating: false,
            hover: HoverTracker::new(Duration::from_millis(config.behavior.hover_delay_ms)),
            tooltip: TooltipState::default(),
            inline_ghost: false,
            pending: Vec::new(),
            needs_redraw: true,
        };
        strip.relayout();
        strip
    }

    // ── Tab operations ───────────────────────────────────────────────

    /// Appends a tab. Selection is unchanged unless the strip was empty.
    pub fn add_tab(&mut self, title: impl Into<String>) {
        self.reset_transients();
        let before = self.tabs.selected();
        self.tabs.push(title.into());
        tracing::debug!(count = self.tabs.len(), "tab added");
        self.notify_selection(before);
        self.relayout();
    }

    /// Removes tab `index`. Out-of-range indices and the last remaining
    /// tab are ignored.
    pub fn remove_tab(&mut self, index: usize) {
        if index >= self.tabs.len() || self.tabs.len() <= 1 {
            tracing::debug!(index, count = self.tabs.len(), "remove_tab ignored");
            return;
        }
        self.reset_transients();
        let before = self.tabs.selected();
        if self.tabs.remove(index).is_some() {
            tracing::debug!(index, "tab closed");
            self.hovered = StripHit::Empty;
            self.pending.push(StripRequest::TabClosed(index));
            self.notify_selection(before);
            self.relayout();
        }
    }

    pub fn rename_tab(&mut self, index: usize, title: impl Into<String>) {
        if !self.tabs.rename(index, title.into()) {
            tracing::debug!(index, "rename_tab ignored");
            return;
        }
        if self.tooltip.shown().is_some_and(|t| t.tab == index) {
            self.hide_tooltip();
        }
        self.relayout();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.tabs.selected()
    }

    /// Selects tab `index` and scrolls just enough to show all of it.
    pub fn set_selected_index(&mut self, index: usize) {
        let before = self.tabs.selected();
        if !self.tabs.select(index) {
            tracing::debug!(index, "set_selected_index ignored");
            return;
        }
        self.scroll_offset = self.layout.scroll_to_reveal(index);
        self.notify_selection(before);
        self.relayout();
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.tabs.title(index)
    }

    pub fn titles(&self) -> &[String] {
        self.tabs.titles()
    }

    /// Moves tab `from` to position `to`; the selection follows its tab.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.tabs.len() || to >= self.tabs.len() {
            tracing::debug!(from, to, "reorder ignored");
            return;
        }
        self.reset_transients();
        self.move_tab(from, to);
        self.relayout();
    }

    pub fn select_next(&mut self) {
        let count = self.tabs.len();
        if let Some(sel) = self.tabs.selected()
            && count > 1
        {
            self.set_selected_index((sel + 1) % count);
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.tabs.len();
        if let Some(sel) = self.tabs.selected()
            && count > 1
        {
            self.set_selected_index((sel + count - 1) % count);
        }
    }

    pub fn close_selected(&mut self) {
        if let Some(sel) = self.tabs.selected() {
            self.remove_tab(sel);
        }
    }

    // ── Environment notifications ────────────────────────────────────

    /// Swaps the palette wholesale and repaints strip and popups.
    pub fn on_theme_changed(&mut self, dark: bool) {
        if self.palette.is_dark == dark {
            return;
        }
        tracing::info!(dark, "strip theme changed");
        self.palette = ThemePalette::for_mode(dark);
        self.pending.push(StripRequest::RefreshPopups);
        self.needs_redraw = true;
    }

    /// Rebuilds metrics and font size for a new DPI. Tabs, order and
    /// selection are untouched.
    pub fn on_dpi_changed(&mut self, dpi: u32) {
        let dpi = sanitize_dpi(dpi);
        if dpi == self.metrics.dpi {
            return;
        }
        tracing::info!(old = self.metrics.dpi, new = dpi, "strip DPI changed");
        self.reset_transients();
        let old_dpi = self.metrics.dpi;
        self.metrics = StripMetrics::new(&self.config.layout, &self.config.font, dpi);
        self.shaper.set_pixel_size(self.metrics.font_px);
        self.scroll_offset = self.scroll_offset * dpi as i32 / old_dpi as i32;
        self.pending.push(StripRequest::RefreshPopups);
        self.relayout();
    }

    /// New client width in pixels. The strip's height is always
    /// [`TabStrip::height`].
    pub fn resize(&mut self, width: i32) {
        let width = width.max(0);
        if width == self.client_width {
            return;
        }
        self.client_width = width;
        self.relayout();
    }

    pub fn height(&self) -> i32 {
        self.metrics.tab_height
    }

    /// Host tells the strip whether drag previews get their own window.
    /// Without one the dragged tab is painted inside the strip.
    pub fn set_inline_drag_ghost(&mut self, inline: bool) {
        if self.inline_ghost != inline {
            self.inline_ghost = inline;
            self.needs_redraw = true;
        }
    }

    // ── Scrolling ────────────────────────────────────────────────────

    pub fn scroll_left(&mut self) {
        self.scroll_by(-self.metrics.scroll_step);
    }

    pub fn scroll_right(&mut self) {
        self.scroll_by(self.metrics.scroll_step);
    }

    pub fn scroll_offset(&self) -> i32 {
        self.layout.scroll_offset
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = self
            .scroll_offset
            .saturating_add(delta)
            .clamp(0, self.layout.max_scroll);
        if next != self.scroll_offset {
            self.scroll_offset = next;
            self.relayout();
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn hit_test(&self, x: i32, y: i32) -> StripHit {
        hit_test(&self.layout, x, y)
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    pub fn metrics(&self) -> &StripMetrics {
        &self.metrics
    }

    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerState::Dragging(_))
    }

    pub fn hovered(&self) -> StripHit {
        self.hovered
    }

    pub fn tooltip(&self) -> Option<&TooltipContent> {
        self.tooltip.shown()
    }

    /// Drains queued host requests in emission order.
    pub fn take_requests(&mut self) -> Vec<StripRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Returns `true` once per state change that needs a repaint.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    /// Earliest instant at which [`TabStrip::on_timer`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let frame = match &self.pointer {
            PointerState::Dragging(session) => session.next_frame(),
            _ => None,
        };
        match (frame, self.hover.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Frame data for painters plus the font to draw with.
    pub fn scene(&mut self) -> (StripScene<'_>, &mut dyn TextShaper) {
        let drag = self.drag_view();
        let pressed_close = match self.pointer {
            PointerState::CloseArmed { tab, over: true } => Some(tab),
            _ => None,
        };
        let scene = StripScene {
            titles: self.tabs.titles(),
            layout: &self.layout,
            metrics: &self.metrics,
            palette: &self.palette,
            selected: self.tabs.selected(),
            hovered: self.hovered,
            pressed_close,
            drag,
            tooltip: self.tooltip.shown(),
        };
        (scene, self.shaper.as_mut())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn relayout(&mut self) {
        self.layout = StripLayout::compute(
            self.tabs.titles(),
            self.shaper.as_mut(),
            &self.metrics,
            self.client_width,
            self.scroll_offset,
        );
        self.scroll_offset = self.layout.scroll_offset;
        self.needs_redraw = true;
    }

    fn move_tab(&mut self, from: usize, to: usize) {
        let before = self.tabs.selected();
        if self.tabs.move_tab(from, to) {
            tracing::debug!(from, to, "tab moved");
            self.pending.push(StripRequest::TabMoved { from, to });
            self.notify_selection(before);
        }
    }

    fn notify_selection(&mut self, before: Option<usize>) {
        let after = self.tabs.selected();
        if after != before {
            self.pending.push(StripRequest::SelectionChanged(after));
            self.needs_redraw = true;
        }
    }

    fn capture(&mut self) {
        if !self.captured {
            self.captured = true;
            self.pending.push(StripRequest::CapturePointer);
        }
    }

    fn release_capture(&mut self) {
        if self.captured {
            self.captured = false;
            self.pending.push(StripRequest::ReleasePointer);
        }
    }

    /// Structural or metric change: tab indices and sizes held by the
    /// press, drag, hover and tooltip state are stale.
    fn reset_transients(&mut self) {
        self.cancel_interaction();
        self.hover.clear();
        self.hide_tooltip();
    }

    fn hide_tooltip(&mut self) {
        if self.tooltip.hide() {
            self.pending.push(StripRequest::HideTooltip);
        }
    }

    fn drag_view(&self) -> Option<DragView> {
        let PointerState::Dragging(session) = &self.pointer else {
            return None;
        };
        let count = self.layout.tab_count();
        let offsets: Vec<i32> = (0..count).map(|i| session.offset(i)).collect();

        let indicator = (session.drop_target != session.source)
            .then(|| self.layout.tab_rect(session.drop_target))
            .flatten()
            .map(|tab| {
                let shifted = tab.offset(offsets[session.drop_target], 0);
                let w = self.metrics.indicator_width;
                let x = if session.source < session.drop_target {
                    shifted.right() - w
                } else {
                    shifted.x
                };
                let inset = self.metrics.indicator_inset;
                Rect::new(x, inset, w, (shifted.h - inset * 2).max(0))
            });

        let ghost = if self.inline_ghost {
            self.layout.tab_rect(session.source).map(|tab| {
                let (px, py) = session.pointer;
                Rect::new(px - tab.w / 2, py - tab.h / 2, tab.w, tab.h)
            })
        } else {
            None
        };

        Some(DragView {
            source: session.source,
            pointer: session.pointer,
            offsets,
            indicator,
            ghost,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_operations.rs"]
mod tests;
