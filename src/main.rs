#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use softbuffer::Surface;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, OwnedDisplayHandle};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use tabstrip::config::{StripConfig, ThemeChoice, load_config, save_config};
use tabstrip::host::{StripEvent, StripParams, StripRegistry, system_prefers_dark};

const WINDOW_TITLE: &str = "Custom Tab Control";

/// Host-level commands bound to keyboard accelerators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
    RenameTab,
    CycleTheme,
}

fn command_for(key: KeyCode, modifiers: ModifiersState) -> Option<Command> {
    let ctrl = modifiers.control_key();
    let shift = modifiers.shift_key();
    match key {
        KeyCode::KeyT if ctrl && !shift => Some(Command::NewTab),
        KeyCode::KeyW if ctrl && !shift => Some(Command::CloseTab),
        KeyCode::Tab if ctrl && shift => Some(Command::PreviousTab),
        KeyCode::Tab if ctrl => Some(Command::NextTab),
        KeyCode::KeyD if ctrl && shift => Some(Command::CycleTheme),
        KeyCode::F2 => Some(Command::RenameTab),
        _ => None,
    }
}

fn next_theme(choice: ThemeChoice) -> ThemeChoice {
    match choice {
        ThemeChoice::System => ThemeChoice::Dark,
        ThemeChoice::Dark => ThemeChoice::Light,
        ThemeChoice::Light => ThemeChoice::System,
    }
}

struct App {
    config: StripConfig,
    registry: StripRegistry,
    window: Option<Arc<Window>>,
    surface: Option<Surface<OwnedDisplayHandle, Arc<Window>>>,
    modifiers: ModifiersState,
    new_tab_counter: usize,
    rename_counter: usize,
}

impl App {
    fn new(config: StripConfig) -> Self {
        let new_tab_counter = config.initial_tabs.len();
        Self {
            config,
            registry: StripRegistry::new(),
            window: None,
            surface: None,
            modifiers: ModifiersState::empty(),
            new_tab_counter,
            rename_counter: 0,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(800.0, 600.0));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let dark = self
            .config
            .theme
            .is_dark(system_prefers_dark(&window, event_loop));
        self.registry
            .create(
                event_loop,
                StripParams {
                    parent: window.clone(),
                    origin: (0, 0),
                    size: (size.width, size.height),
                    id: 1,
                    dark,
                    config: &self.config,
                },
            )
            .context("failed to create tab strip")?;

        let context = self
            .registry
            .context()
            .context("drawing context missing after strip creation")?;
        let surface = Surface::new(context, window.clone())
            .map_err(|err| anyhow::anyhow!("failed to create window surface: {err}"))?;

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn run_command(&mut self, window_id: WindowId, command: Command) {
        if command == Command::CycleTheme {
            self.config.theme = next_theme(self.config.theme);
            tracing::info!(theme = ?self.config.theme, "theme choice changed");
            if let Some(hosted) = self.registry.get_mut(window_id) {
                hosted.apply_theme(self.config.theme);
            }
            if let Err(err) = save_config(&self.config) {
                tracing::warn!("failed to save config: {err}");
            }
            return;
        }

        let Some(hosted) = self.registry.get_mut(window_id) else {
            return;
        };
        let strip = hosted.strip_mut();
        match command {
            Command::NewTab => {
                self.new_tab_counter += 1;
                strip.add_tab(format!("New Tab {}", self.new_tab_counter));
            }
            Command::CloseTab => strip.close_selected(),
            Command::NextTab => strip.select_next(),
            Command::PreviousTab => strip.select_previous(),
            Command::RenameTab => {
                if let Some(index) = strip.selected_index() {
                    self.rename_counter += 1;
                    let base = strip.title(index).unwrap_or_default();
                    let base = base.split(" #").next().unwrap_or(base).to_owned();
                    strip.rename_tab(index, format!("{base} #{}", self.rename_counter));
                }
            }
            Command::CycleTheme => {}
        }
    }

    fn handle_key(&mut self, window_id: WindowId, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if let Some(command) = command_for(code, self.modifiers) {
            tracing::debug!(?command, "accelerator");
            self.run_command(window_id, command);
        }
    }

    fn redraw(&mut self, window_id: WindowId) {
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return;
        };
        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        if let Err(err) = surface.resize(w, h) {
            tracing::warn!("surface resize failed: {err}");
            return;
        }
        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(err) => {
                tracing::warn!("surface buffer unavailable: {err}");
                return;
            }
        };

        let (width, height) = (size.width as usize, size.height as usize);
        if let Some(hosted) = self.registry.get_mut(window_id) {
            let content = hosted.strip().palette().active_tab.to_pixel();
            buffer.fill(content);
            hosted.paint_into(&mut buffer, width, height);
        }
        if let Err(err) = buffer.present() {
            tracing::warn!("present failed: {err}");
        }
    }

    fn report(&self, events: Vec<StripEvent>) {
        for event in events {
            match event {
                StripEvent::SelectionChanged(index) => {
                    tracing::info!(?index, "selection changed");
                }
                StripEvent::TabClosed(index) => tracing::info!(index, "tab closed"),
                StripEvent::TabMoved { from, to } => tracing::info!(from, to, "tab moved"),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            tracing::error!("{err:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        self.registry.dispatch(window_id, &event);

        match &event {
            WindowEvent::CloseRequested => {
                self.registry.remove(window_id);
                event_loop.exit();
                return;
            }
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::Focused(false) => self.modifiers = ModifiersState::empty(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(window_id, event),
            WindowEvent::Resized(size) => {
                if let Some(hosted) = self.registry.get_mut(window_id) {
                    hosted.strip_mut().resize(size.width as i32);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(window_id),
            _ => {}
        }

        let events = self.registry.process_requests(event_loop, window_id);
        self.report(events);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.registry.tick(event_loop, Instant::now()) {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = load_config();
    tracing::info!(
        theme = ?config.theme,
        tabs = config.initial_tabs.len(),
        "config loaded"
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabstrip=info")),
        )
        .init();

    if let Err(err) = run() {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
