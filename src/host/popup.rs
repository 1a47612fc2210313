use std::num::NonZeroU32;
use std::sync::Arc;

use softbuffer::{Context, Surface};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::{ActiveEventLoop, OwnedDisplayHandle};
use winit::window::{Window, WindowLevel};

use crate::StripError;
use crate::render::{Frame, RenderTarget};

/// Borderless, always-on-top, non-activating window that never takes
/// pointer input. Used for the drag preview and the tooltip.
pub struct PopupWindow {
    window: Arc<Window>,
    surface: Surface<OwnedDisplayHandle, Arc<Window>>,
    frame: Frame,
}

impl PopupWindow {
    pub fn open(
        event_loop: &ActiveEventLoop,
        context: &Context<OwnedDisplayHandle>,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Self, StripError> {
        let attrs = Window::default_attributes()
            .with_title(title)
            .with_decorations(false)
            .with_resizable(false)
            .with_active(false)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)));
        let window = Arc::new(event_loop.create_window(attrs)?);
        if let Err(err) = window.set_cursor_hittest(false) {
            tracing::debug!("popup cursor hittest unsupported: {err}");
        }
        let surface = Surface::new(context, window.clone())?;
        Ok(Self {
            window,
            surface,
            frame: Frame::new(width.max(1) as usize, height.max(1) as usize),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width.max(1), height.max(1));
        if self.frame.width() != w as usize || self.frame.height() != h as usize {
            let _ = self.window.request_inner_size(PhysicalSize::new(w, h));
            self.frame.resize(w as usize, h as usize);
        }
    }

    pub fn move_to(&self, x: i32, y: i32) {
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    pub fn show(&self) {
        self.window.set_visible(true);
    }

    /// Paints the popup off-screen with `paint`, then presents it.
    pub fn present(
        &mut self,
        paint: impl FnOnce(&mut RenderTarget<'_>),
    ) -> Result<(), StripError> {
        paint(&mut self.frame.target());

        let (w, h) = (self.frame.width() as u32, self.frame.height() as u32);
        let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            return Ok(());
        };
        self.surface.resize(nw, nh)?;
        let mut buffer = self.surface.buffer_mut()?;
        let len = buffer.len().min(self.frame.pixels().len());
        buffer[..len].copy_from_slice(&self.frame.pixels()[..len]);
        buffer.present()?;
        Ok(())
    }
}
