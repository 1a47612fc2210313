//! Sibling slide animation shown while a tab is dragged.
//!
//! Each tab carries a horizontal display offset relative to its layout
//! rectangle. Retargeting changes where tabs are heading; time advances the
//! current offsets toward the targets in fixed frames, each frame closing
//! 20% of the remaining gap and snapping once the gap drops under 2 px.

use std::time::{Duration, Instant};

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const EASE_FRACTION: f32 = 0.2;
const SNAP_DISTANCE: f32 = 2.0;
/// Upper bound on frames replayed after a stall.
const MAX_CATCH_UP_FRAMES: u32 = 60;

/// Target display offsets for every tab while tab `source` (of width
/// `source_width`) hovers over slot `target`.
pub fn gap_offsets(tab_count: usize, source: usize, target: usize, source_width: i32) -> Vec<i32> {
    let mut offsets = vec![0; tab_count];
    if source >= tab_count || target >= tab_count {
        return offsets;
    }
    if source < target {
        for offset in offsets.iter_mut().take(target + 1).skip(source + 1) {
            *offset = -source_width;
        }
    } else {
        for offset in offsets.iter_mut().take(source).skip(target) {
            *offset = source_width;
        }
    }
    offsets
}

#[derive(Debug, Clone)]
pub struct SlideAnimation {
    current: Vec<f32>,
    target: Vec<f32>,
    last_frame: Instant,
}

impl SlideAnimation {
    pub fn new(tab_count: usize, now: Instant) -> Self {
        Self {
            current: vec![0.0; tab_count],
            target: vec![0.0; tab_count],
            last_frame: now,
        }
    }

    /// Points every tab at a new offset. Tabs keep their current position
    /// and glide from there.
    pub fn retarget(&mut self, targets: &[i32], now: Instant) {
        let was_settled = self.is_settled();
        self.target = targets.iter().map(|&t| t as f32).collect();
        self.current.resize(self.target.len(), 0.0);
        if was_settled {
            self.last_frame = now;
        }
    }

    /// Replays the frames elapsed since the last call. Returns `true` when
    /// any offset moved.
    pub fn advance(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_frame);
        let frames = (elapsed.as_millis() / FRAME_INTERVAL.as_millis()) as u32;
        if frames == 0 {
            return false;
        }
        self.last_frame += FRAME_INTERVAL * frames;

        let mut moved = false;
        for _ in 0..frames.min(MAX_CATCH_UP_FRAMES) {
            if !self.step() {
                break;
            }
            moved = true;
        }
        moved
    }

    fn step(&mut self) -> bool {
        let mut moved = false;
        for (current, &target) in self.current.iter_mut().zip(&self.target) {
            let delta = target - *current;
            if delta == 0.0 {
                continue;
            }
            if delta.abs() < SNAP_DISTANCE {
                *current = target;
            } else {
                *current += delta * EASE_FRACTION;
            }
            moved = true;
        }
        moved
    }

    pub fn is_settled(&self) -> bool {
        self.current.iter().zip(&self.target).all(|(c, t)| c == t)
    }

    /// When the next frame is due, or `None` once every tab has arrived.
    pub fn next_frame(&self) -> Option<Instant> {
        (!self.is_settled()).then(|| self.last_frame + FRAME_INTERVAL)
    }

    /// Current rounded display offset of tab `index`.
    pub fn offset(&self, index: usize) -> i32 {
        self.current.get(index).map_or(0, |c| c.round() as i32)
    }
}
