//! winit + softbuffer integration.
//!
//! A [`StripRegistry`] owns every strip hosted by the application, keyed by
//! the `WindowId` of the window it lives in. The host forwards that
//! window's events, paints the strip into the window buffer and lets the
//! registry service the strip's requests (popups, capture, timers).

mod popup;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use softbuffer::Context;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, OwnedDisplayHandle};
use winit::window::{CursorIcon, Theme, Window, WindowId};

use crate::StripError;
use crate::config::{StripConfig, ThemeChoice, load_font_data};
use crate::render::{self, FontFace, Frame, RenderTarget};
use crate::strip::{StripRequest, TabStrip, TextShaper, dpi_from_scale};

pub use popup::PopupWindow;

/// Identifies a strip to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StripHandle {
    pub window: WindowId,
    pub id: u32,
}

/// Arguments for [`StripRegistry::create`].
pub struct StripParams<'a> {
    pub parent: Arc<Window>,
    /// Top-left of the strip inside the parent's client area.
    pub origin: (i32, i32),
    pub size: (u32, u32),
    /// Host-chosen identifier, echoed back in the handle.
    pub id: u32,
    /// Initial palette. `ThemeChoice::System` strips follow later OS changes.
    pub dark: bool,
    pub config: &'a StripConfig,
}

/// Strip state changes the application may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripEvent {
    SelectionChanged(Option<usize>),
    TabClosed(usize),
    TabMoved { from: usize, to: usize },
}

/// Whether the OS currently prefers a dark theme. Unknown counts as dark.
pub fn system_prefers_dark(window: &Window, event_loop: &ActiveEventLoop) -> bool {
    window
        .theme()
        .or_else(|| event_loop.system_theme())
        .is_none_or(|theme| theme == Theme::Dark)
}

/// Wheel delta in notches. Pixel deltas only contribute their direction.
fn wheel_notches(delta: &MouseScrollDelta) -> f32 {
    match *delta {
        MouseScrollDelta::LineDelta(x, y) => {
            if y != 0.0 {
                y
            } else {
                x
            }
        }
        MouseScrollDelta::PixelDelta(p) => {
            let d = if p.y != 0.0 { p.y } else { p.x };
            if d == 0.0 { 0.0 } else { d.signum() as f32 }
        }
    }
}

/// One strip embedded in a region of a host window.
pub struct HostedStrip {
    id: u32,
    parent: Arc<Window>,
    origin: (i32, i32),
    strip: TabStrip,
    /// Separate face for popups so tooltip text never disturbs strip caches.
    popup_face: Option<FontFace>,
    frame: Frame,
    follows_system_theme: bool,
    cursor: Option<PhysicalPosition<f64>>,
    pointer_inside: bool,
    captured: bool,
    drag_preview: Option<PopupWindow>,
    tooltip: Option<(PopupWindow, String)>,
}

impl HostedStrip {
    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut TabStrip {
        &mut self.strip
    }

    /// Switches between following the OS theme and a forced one.
    pub fn apply_theme(&mut self, choice: ThemeChoice) {
        self.follows_system_theme = choice.follows_system();
        let system_dark = self.parent.theme().is_none_or(|theme| theme == Theme::Dark);
        self.strip.on_theme_changed(choice.is_dark(system_dark));
    }

    fn local(&self, position: PhysicalPosition<f64>) -> (i32, i32) {
        (
            position.x.floor() as i32 - self.origin.0,
            position.y.floor() as i32 - self.origin.1,
        )
    }

    fn contains_local(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.strip.layout().client_width && y < self.strip.height()
    }

    /// Strip-local point to screen coordinates, when the platform reports
    /// window positions.
    fn to_screen(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let inner = self.parent.inner_position().ok()?;
        Some((inner.x + self.origin.0 + x, inner.y + self.origin.1 + y))
    }

    /// Feeds one window event to the strip. Returns `true` when the event
    /// belonged to the strip.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        let now = Instant::now();
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(*position);
                let local = self.local(*position);
                let inside = self.contains_local(local);
                if inside || self.captured {
                    self.strip.on_pointer_move(local.0, local.1, now);
                } else if self.pointer_inside {
                    self.strip.on_pointer_leave();
                }
                self.pointer_inside = inside;
                inside || self.captured
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer_inside = false;
                self.strip.on_pointer_leave();
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let Some(position) = self.cursor else {
                    return false;
                };
                let local = self.local(position);
                match state {
                    ElementState::Pressed if self.contains_local(local) => {
                        self.strip.on_pointer_down(local.0, local.1);
                        true
                    }
                    ElementState::Released if self.captured || self.contains_local(local) => {
                        self.strip.on_pointer_up(local.0, local.1);
                        true
                    }
                    _ => false,
                }
            }
            WindowEvent::MouseWheel { delta, .. } if self.pointer_inside => {
                let notches = wheel_notches(delta);
                self.strip.on_wheel(notches);
                true
            }
            WindowEvent::Focused(false) => {
                self.strip.on_focus_lost();
                false
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.strip.on_dpi_changed(dpi_from_scale(*scale_factor));
                if let Some(face) = &mut self.popup_face {
                    face.set_pixel_size(self.strip.metrics().font_px);
                }
                false
            }
            WindowEvent::ThemeChanged(theme) => {
                if self.follows_system_theme {
                    self.strip.on_theme_changed(*theme == Theme::Dark);
                }
                false
            }
            _ => false,
        }
    }

    /// Paints the strip off-screen and copies it into the host's window
    /// buffer at the strip's origin.
    pub fn paint_into(&mut self, buffer: &mut [u32], buf_width: usize, buf_height: usize) {
        let width = self.strip.layout().client_width.max(0) as usize;
        let height = self.strip.height().max(0) as usize;
        self.frame.resize(width, height);
        {
            let (scene, shaper) = self.strip.scene();
            render::paint_strip(&scene, shaper, &mut self.frame.target());
        }

        let (ox, oy) = self.origin;
        for row in 0..height {
            let dy = oy + row as i32;
            if dy < 0 || dy as usize >= buf_height {
                continue;
            }
            let x0 = ox.max(0) as usize;
            let x1 = ((ox + width as i32).max(0) as usize).min(buf_width);
            if x0 >= x1 {
                continue;
            }
            let src_start = row * width + (x0 as i32 - ox) as usize;
            let dst_start = dy as usize * buf_width + x0;
            let len = x1 - x0;
            buffer[dst_start..dst_start + len]
                .copy_from_slice(&self.frame.pixels()[src_start..src_start + len]);
        }
    }

    fn paint_drag_preview(&mut self) {
        let Some(popup) = &mut self.drag_preview else {
            return;
        };
        let (scene, shaper) = self.strip.scene();
        if let Err(err) = popup.present(|target| render::paint_drag_preview(&scene, shaper, target)) {
            tracing::warn!("drag preview paint failed: {err}");
        }
    }

    fn paint_tooltip(&mut self) {
        let (Some((popup, text)), Some(face)) = (&mut self.tooltip, &mut self.popup_face) else {
            return;
        };
        let palette = self.strip.palette();
        let metrics = self.strip.metrics();
        if let Err(err) = popup.present(|target: &mut RenderTarget<'_>| {
            render::paint_tooltip(palette, metrics, face, text.as_str(), target)
        }) {
            tracing::warn!("tooltip paint failed: {err}");
        }
    }

    fn update_cursor(&self) {
        let icon = if self.strip.is_dragging() {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Default
        };
        self.parent.set_cursor(icon);
    }

    /// Services queued strip requests. Popup failures degrade: the drag
    /// ghost is drawn inline and tooltips are skipped.
    fn service_requests(
        &mut self,
        event_loop: &ActiveEventLoop,
        context: &Context<OwnedDisplayHandle>,
    ) -> Vec<StripEvent> {
        let mut events = Vec::new();
        for request in self.strip.take_requests() {
            match request {
                StripRequest::CapturePointer => self.captured = true,
                StripRequest::ReleasePointer => self.captured = false,
                StripRequest::ShowDragPreview { tab, width, height } => {
                    self.open_drag_preview(event_loop, context, tab, width, height);
                }
                StripRequest::MoveDragPreview { x, y } => {
                    if self.drag_preview.is_none() {
                        continue;
                    }
                    if let Some((sx, sy)) = self.to_screen(x, y)
                        && let Some(popup) = &self.drag_preview
                    {
                        popup.move_to(sx, sy);
                        popup.show();
                    } else {
                        tracing::warn!("window position unavailable, drawing drag ghost inline");
                        self.drag_preview = None;
                        self.strip.set_inline_drag_ghost(true);
                    }
                }
                StripRequest::HideDragPreview => {
                    self.drag_preview = None;
                }
                StripRequest::ShowTooltip {
                    text,
                    x,
                    y,
                    width,
                    height,
                } => self.open_tooltip(event_loop, context, text, (x, y), (width, height)),
                StripRequest::HideTooltip => self.tooltip = None,
                StripRequest::StartAnimation => tracing::trace!(strip = self.id, "slide started"),
                StripRequest::StopAnimation => tracing::trace!(strip = self.id, "slide stopped"),
                StripRequest::RefreshPopups => {
                    self.paint_drag_preview();
                    self.paint_tooltip();
                }
                StripRequest::SelectionChanged(sel) => events.push(StripEvent::SelectionChanged(sel)),
                StripRequest::TabClosed(index) => events.push(StripEvent::TabClosed(index)),
                StripRequest::TabMoved { from, to } => events.push(StripEvent::TabMoved { from, to }),
            }
        }
        self.update_cursor();
        events
    }

    fn open_drag_preview(
        &mut self,
        event_loop: &ActiveEventLoop,
        context: &Context<OwnedDisplayHandle>,
        tab: usize,
        width: i32,
        height: i32,
    ) {
        let (w, h) = (width.max(1) as u32, height.max(1) as u32);
        match PopupWindow::open(event_loop, context, "Tab drag preview", w, h) {
            Ok(popup) => {
                tracing::debug!(tab, "drag preview opened");
                self.drag_preview = Some(popup);
                self.strip.set_inline_drag_ghost(false);
                self.paint_drag_preview();
            }
            Err(err) => {
                tracing::warn!("drag preview unavailable, drawing inline: {err}");
                self.drag_preview = None;
                self.strip.set_inline_drag_ghost(true);
            }
        }
    }

    fn open_tooltip(
        &mut self,
        event_loop: &ActiveEventLoop,
        context: &Context<OwnedDisplayHandle>,
        text: String,
        (x, y): (i32, i32),
        (width, height): (i32, i32),
    ) {
        if self.popup_face.is_none() {
            return;
        }
        let Some((sx, sy)) = self.to_screen(x, y) else {
            tracing::debug!("window position unavailable, skipping tooltip");
            return;
        };
        let (w, h) = (width.max(1) as u32, height.max(1) as u32);

        let popup = match self.tooltip.take() {
            Some((mut popup, _)) => {
                popup.resize(w, h);
                popup
            }
            None => match PopupWindow::open(event_loop, context, "Tab tooltip", w, h) {
                Ok(popup) => popup,
                Err(err) => {
                    tracing::warn!("tooltip unavailable: {err}");
                    return;
                }
            },
        };
        popup.move_to(sx, sy);
        self.tooltip = Some((popup, text));
        self.paint_tooltip();
        if let Some((popup, _)) = &self.tooltip {
            popup.show();
        }
    }
}

/// Owns every hosted strip and the shared softbuffer context.
#[derive(Default)]
pub struct StripRegistry {
    context: Option<Context<OwnedDisplayHandle>>,
    strips: HashMap<WindowId, HostedStrip>,
}

impl StripRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the shared drawing context once; later calls are no-ops.
    pub fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StripError> {
        if self.context.is_none() {
            self.context = Some(Context::new(event_loop.owned_display_handle())?);
        }
        Ok(())
    }

    pub fn context(&self) -> Option<&Context<OwnedDisplayHandle>> {
        self.context.as_ref()
    }

    /// Embeds a strip in `params.parent`. Height is fixed by the strip's
    /// metrics, so `params.size.1` only matters to the host's own layout.
    pub fn create(
        &mut self,
        event_loop: &ActiveEventLoop,
        params: StripParams<'_>,
    ) -> Result<StripHandle, StripError> {
        self.init(event_loop)?;
        let StripParams {
            parent,
            origin: (x, y),
            size: (width, _),
            id,
            dark,
            config,
        } = params;

        let dpi = dpi_from_scale(parent.scale_factor());
        let font_data = load_font_data(&config.font)?;
        let face = FontFace::from_bytes(font_data.clone(), 16)?;
        let mut popup_face = match FontFace::from_bytes(font_data, 16) {
            Ok(face) => Some(face),
            Err(err) => {
                tracing::warn!("tooltip font unavailable: {err}");
                None
            }
        };

        let strip = TabStrip::new(Box::new(face), config, dpi, dark, width as i32);
        if let Some(face) = popup_face.as_mut() {
            face.set_pixel_size(strip.metrics().font_px);
        }

        let window = parent.id();
        tracing::info!(id, dpi, dark, tabs = strip.tab_count(), "strip created");

        let hosted = HostedStrip {
            id,
            parent,
            origin: (x, y),
            strip,
            popup_face,
            frame: Frame::default(),
            follows_system_theme: config.theme.follows_system(),
            cursor: None,
            pointer_inside: false,
            captured: false,
            drag_preview: None,
            tooltip: None,
        };
        if self.strips.insert(window, hosted).is_some() {
            tracing::warn!(?window, "replaced an existing strip in this window");
        }
        Ok(StripHandle { window, id })
    }

    pub fn get_mut(&mut self, window: WindowId) -> Option<&mut HostedStrip> {
        self.strips.get_mut(&window)
    }

    pub fn remove(&mut self, window: WindowId) -> Option<HostedStrip> {
        self.strips.remove(&window)
    }

    /// Routes a window event to the strip in that window. Returns whether
    /// the strip consumed it.
    pub fn dispatch(&mut self, window: WindowId, event: &WindowEvent) -> bool {
        self.strips
            .get_mut(&window)
            .is_some_and(|hosted| hosted.handle_event(event))
    }

    /// Services the strip's requests and asks for a repaint when needed.
    pub fn process_requests(
        &mut self,
        event_loop: &ActiveEventLoop,
        window: WindowId,
    ) -> Vec<StripEvent> {
        let (Some(context), Some(hosted)) = (self.context.as_ref(), self.strips.get_mut(&window))
        else {
            return Vec::new();
        };
        let events = hosted.service_requests(event_loop, context);
        if hosted.strip.take_redraw() {
            hosted.parent.request_redraw();
        }
        events
    }

    /// Runs timed strip work that is due and returns the next deadline.
    pub fn tick(&mut self, event_loop: &ActiveEventLoop, now: Instant) -> Option<Instant> {
        let windows: Vec<WindowId> = self.strips.keys().copied().collect();
        let mut next: Option<Instant> = None;
        for window in windows {
            if let Some(hosted) = self.strips.get_mut(&window) {
                if hosted.strip.next_deadline().is_some_and(|d| d <= now) {
                    hosted.strip.on_timer(now);
                }
            }
            self.process_requests(event_loop, window);
            if let Some(deadline) = self.strips.get(&window).and_then(|h| h.strip.next_deadline()) {
                next = Some(next.map_or(deadline, |current| current.min(deadline)));
            }
        }
        next
    }
}
