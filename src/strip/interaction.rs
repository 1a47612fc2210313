//! Pointer state machine: press, close-press, drag-reorder, hover, tooltip.
//!
//! Every path that captures the pointer releases it again: pointer-up,
//! focus loss and any structural change that cancels the interaction.

use std::time::Instant;

use super::animation::{SlideAnimation, gap_offsets};
use super::hit_test::{StripHit, drag_target};
use super::{StripRequest, TabStrip};

#[derive(Debug, Clone, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Button down on a tab body; becomes a drag past the threshold.
    PressArmed { tab: usize, anchor: (i32, i32) },
    Dragging(DragSession),
    /// Button down on a close glyph; removal needs a release on the same glyph.
    /// The glyph looks pressed only while `over` it.
    CloseArmed { tab: usize, over: bool },
}

/// How siblings move out of the way of the dragged tab.
#[derive(Debug, Clone)]
pub enum SiblingMotion {
    /// Siblings jump straight to their shifted slot.
    Instant(Vec<i32>),
    Slide(SlideAnimation),
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub source: usize,
    pub pointer: (i32, i32),
    pub drop_target: usize,
    pub motion: SiblingMotion,
}

impl DragSession {
    pub fn offset(&self, index: usize) -> i32 {
        match &self.motion {
            SiblingMotion::Instant(offsets) => offsets.get(index).copied().unwrap_or(0),
            SiblingMotion::Slide(anim) => anim.offset(index),
        }
    }

    pub fn next_frame(&self) -> Option<Instant> {
        match &self.motion {
            SiblingMotion::Instant(_) => None,
            SiblingMotion::Slide(anim) => anim.next_frame(),
        }
    }
}

impl TabStrip {
    pub fn on_pointer_down(&mut self, x: i32, y: i32) {
        self.hover.clear();
        self.hide_tooltip();

        // A stray press while already interacting restarts from idle.
        if !matches!(self.pointer, PointerState::Idle) {
            self.cancel_interaction();
        }

        match self.hit_test(x, y) {
            StripHit::ScrollLeft => self.scroll_left(),
            StripHit::ScrollRight => self.scroll_right(),
            StripHit::CloseButton(tab) => {
                self.pointer = PointerState::CloseArmed { tab, over: true };
                self.capture();
                self.needs_redraw = true;
            }
            StripHit::Tab(tab) => {
                let before = self.tabs.selected();
                self.tabs.select(tab);
                self.notify_selection(before);
                self.pointer = PointerState::PressArmed {
                    tab,
                    anchor: (x, y),
                };
                self.capture();
                self.needs_redraw = true;
            }
            StripHit::Empty => {}
        }
    }

    pub fn on_pointer_move(&mut self, x: i32, y: i32, now: Instant) {
        match &self.pointer {
            PointerState::PressArmed { tab, anchor } => {
                let (tab, anchor) = (*tab, *anchor);
                if self.captured
                    && self
                        .metrics
                        .exceeds_drag_threshold(x - anchor.0, y - anchor.1)
                {
                    self.begin_drag(tab, (x, y), now);
                    return;
                }
            }
            PointerState::Dragging(_) => {
                self.update_drag(x, y, now);
                return;
            }
            PointerState::CloseArmed { tab, over } => {
                let (tab, was_over) = (*tab, *over);
                let over = self.hit_test(x, y) == StripHit::CloseButton(tab);
                if over != was_over {
                    self.pointer = PointerState::CloseArmed { tab, over };
                    self.needs_redraw = true;
                }
            }
            PointerState::Idle => {}
        }

        self.update_hover(x, y);
        self.hover.pointer_moved(x, y, now);
        if let Some(shown) = self.tooltip.shown()
            && self.hovered != StripHit::Tab(shown.tab)
        {
            self.hide_tooltip();
        }
    }

    pub fn on_pointer_up(&mut self, x: i32, y: i32) {
        match std::mem::take(&mut self.pointer) {
            PointerState::Dragging(session) => {
                self.stop_animation();
                self.pending.push(StripRequest::HideDragPreview);
                self.release_capture();
                self.finish_drag(&session, x);
            }
            PointerState::CloseArmed { tab, .. } => {
                self.release_capture();
                if self.hit_test(x, y) == StripHit::CloseButton(tab) {
                    self.remove_tab(tab);
                } else {
                    tracing::debug!(tab, "close press released elsewhere");
                }
            }
            PointerState::PressArmed { .. } => self.release_capture(),
            PointerState::Idle => {}
        }
        self.needs_redraw = true;
        self.update_hover(x, y);
    }

    /// Pointer left the strip. Hover and press visuals and the tooltip go
    /// away; a captured press or drag continues.
    pub fn on_pointer_leave(&mut self) {
        self.hover.clear();
        self.hide_tooltip();
        if let PointerState::CloseArmed { over, .. } = &mut self.pointer
            && *over
        {
            *over = false;
            self.needs_redraw = true;
        }
        if self.hovered != StripHit::Empty {
            self.hovered = StripHit::Empty;
            self.needs_redraw = true;
        }
    }

    /// Host window lost focus: abandon any press or drag.
    pub fn on_focus_lost(&mut self) {
        self.hover.clear();
        self.hide_tooltip();
        self.cancel_interaction();
        self.hovered = StripHit::Empty;
        self.needs_redraw = true;
    }

    /// Wheel notches; positive values scroll toward the first tab.
    pub fn on_wheel(&mut self, notches: f32) {
        if !notches.is_finite() || notches == 0.0 {
            return;
        }
        let step = self.metrics.scroll_step.max(1);
        let useful = self.layout.max_scroll / step + 1;
        let steps = (notches.abs().round().max(1.0) as i32).min(useful);
        let direction = if notches > 0.0 { -1 } else { 1 };
        self.scroll_by(direction * steps.saturating_mul(step));
    }

    /// Hover-settle at `(x, y)`: show the full title of the tab body
    /// under the pointer, hide the tooltip otherwise.
    pub fn on_hover_settle(&mut self, x: i32, y: i32) {
        if !matches!(self.pointer, PointerState::Idle) {
            self.hide_tooltip();
            return;
        }
        let StripHit::Tab(tab) = self.hit_test(x, y) else {
            self.hide_tooltip();
            return;
        };
        let Some(title) = self.tabs.title(tab).map(str::to_owned) else {
            return;
        };
        if !self.tooltip.show(tab, &title) {
            return;
        }
        let (ox, oy) = self.config.behavior.tooltip_offset;
        let width = self.shaper.text_width(&title) + self.metrics.tooltip_padding_x * 2;
        let height = self.shaper.line_height() + self.metrics.tooltip_padding_y * 2;
        self.pending.push(StripRequest::ShowTooltip {
            text: title,
            x: x + scale_signed(ox, self.metrics.dpi),
            y: y + scale_signed(oy, self.metrics.dpi),
            width,
            height,
        });
    }

    /// Advances timed work: slide frames and hover-settle.
    pub fn on_timer(&mut self, now: Instant) {
        if let PointerState::Dragging(session) = &mut self.pointer
            && let SiblingMotion::Slide(anim) = &mut session.motion
        {
            if anim.advance(now) {
                self.needs_redraw = true;
            }
            if anim.is_settled() {
                self.stop_animation();
            }
        }

        if let Some((x, y)) = self.hover.poll(now) {
            self.on_hover_settle(x, y);
        }
    }

    /// Drops any press or drag without reordering and releases capture.
    pub(super) fn cancel_interaction(&mut self) {
        match std::mem::take(&mut self.pointer) {
            PointerState::Dragging(session) => {
                tracing::debug!(source = session.source, "drag cancelled");
                self.stop_animation();
                self.pending.push(StripRequest::HideDragPreview);
                self.needs_redraw = true;
            }
            PointerState::CloseArmed { .. } => self.needs_redraw = true,
            PointerState::PressArmed { .. } | PointerState::Idle => {}
        }
        self.release_capture();
    }

    fn begin_drag(&mut self, source: usize, pointer: (i32, i32), now: Instant) {
        let Some(rect) = self.layout.tab_rect(source) else {
            self.cancel_interaction();
            return;
        };
        tracing::debug!(source, "drag started");
        self.hover.clear();
        self.hide_tooltip();
        self.hovered = StripHit::Empty;

        let count = self.layout.tab_count();
        let motion = if self.config.behavior.slide_animation {
            SiblingMotion::Slide(SlideAnimation::new(count, now))
        } else {
            SiblingMotion::Instant(vec![0; count])
        };
        self.pointer = PointerState::Dragging(DragSession {
            source,
            pointer,
            drop_target: source,
            motion,
        });
        self.pending.push(StripRequest::ShowDragPreview {
            tab: source,
            width: rect.w,
            height: rect.h,
        });
        self.update_drag(pointer.0, pointer.1, now);
    }

    fn update_drag(&mut self, x: i32, y: i32, now: Instant) {
        let PointerState::Dragging(session) = &self.pointer else {
            return;
        };
        let source = session.source;
        let width = self.layout.tab_rect(source).map_or(0, |r| r.w);
        let target = drag_target(&self.layout, x).unwrap_or(source);
        let offsets = gap_offsets(self.layout.tab_count(), source, target, width);

        let PointerState::Dragging(session) = &mut self.pointer else {
            return;
        };
        session.pointer = (x, y);
        session.drop_target = target;
        let start_animation = match &mut session.motion {
            SiblingMotion::Instant(current) => {
                *current = offsets;
                false
            }
            SiblingMotion::Slide(anim) => {
                anim.retarget(&offsets, now);
                !anim.is_settled()
            }
        };

        self.pending.push(StripRequest::MoveDragPreview {
            x: x - width / 2,
            y: y - self.layout.tab_height / 2,
        });
        if start_animation && !self.animating {
            self.animating = true;
            self.pending.push(StripRequest::StartAnimation);
        }
        self.needs_redraw = true;
    }

    fn finish_drag(&mut self, session: &DragSession, x: i32) {
        let drop = drag_target(&self.layout, x).unwrap_or(session.source);
        tracing::debug!(from = session.source, to = drop, "drag dropped");
        if drop != session.source {
            self.move_tab(session.source, drop);
        }
        let before = self.tabs.selected();
        self.tabs.select(drop);
        self.notify_selection(before);
        self.relayout();
    }

    fn stop_animation(&mut self) {
        if self.animating {
            self.animating = false;
            self.pending.push(StripRequest::StopAnimation);
        }
    }

    fn update_hover(&mut self, x: i32, y: i32) {
        let hit = self.hit_test(x, y);
        if hit != self.hovered {
            self.hovered = hit;
            self.needs_redraw = true;
        }
    }
}

fn scale_signed(value: i32, dpi: u32) -> i32 {
    let magnitude = super::metrics::scale_to_dpi(value.unsigned_abs(), dpi);
    if value < 0 { -magnitude } else { magnitude }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_interaction.rs"]
mod tests;
