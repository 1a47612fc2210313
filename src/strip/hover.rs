//! Hover-settle detection and tooltip bookkeeping.

use std::time::{Duration, Instant};

/// Emits one hover-settle per pointer rest.
///
/// Any movement restarts the dwell; after it fires the tracker stays quiet
/// until the pointer moves again.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    delay: Duration,
    pending: Option<PendingHover>,
}

#[derive(Debug, Clone, Copy)]
struct PendingHover {
    x: i32,
    y: i32,
    due: Instant,
}

impl HoverTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn pointer_moved(&mut self, x: i32, y: i32, now: Instant) {
        if let Some(p) = self.pending
            && p.x == x
            && p.y == y
        {
            return;
        }
        self.pending = Some(PendingHover {
            x,
            y,
            due: now + self.delay,
        });
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Returns the rest point once the dwell has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<(i32, i32)> {
        let p = self.pending?;
        if now < p.due {
            return None;
        }
        self.pending = None;
        Some((p.x, p.y))
    }
}

/// What the tooltip popup currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub tab: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct TooltipState {
    shown: Option<TooltipContent>,
}

impl TooltipState {
    pub fn shown(&self) -> Option<&TooltipContent> {
        self.shown.as_ref()
    }

    /// Records new content. Returns `false` when the same tab and text are
    /// already on screen, so the popup needs no repaint.
    pub fn show(&mut self, tab: usize, text: &str) -> bool {
        if let Some(current) = &self.shown
            && current.tab == tab
            && current.text == text
        {
            return false;
        }
        self.shown = Some(TooltipContent {
            tab,
            text: text.to_string(),
        });
        true
    }

    /// Returns `true` if a tooltip was visible.
    pub fn hide(&mut self) -> bool {
        self.shown.take().is_some()
    }
}
