use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub font: FontConfig,
    pub theme: ThemeChoice,
    pub layout: LayoutConfig,
    pub behavior: BehaviorConfig,
    /// Titles the strip is seeded with on startup.
    pub initial_tabs: Vec<String>,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
            theme: ThemeChoice::default(),
            layout: LayoutConfig::default(),
            behavior: BehaviorConfig::default(),
            initial_tabs: default_tab_titles(),
        }
    }
}

pub fn default_tab_titles() -> Vec<String> {
    [
        "Tab 1",
        "Tab 2",
        "Tab 3",
        "Long Tab Title 4",
        "Another Tab",
        "Final Tab 6",
        "Tab 7",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Point size; converted to pixels as `size_pt * dpi / 72`.
    pub size_pt: f32,
    /// Explicit font file. When unset, well-known system locations are probed.
    pub path: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size_pt: 16.0,
            path: None,
        }
    }
}

/// Layout constants in 96-DPI pixels. Scaled with `value * dpi / 96`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub tab_padding_x: u32,
    pub tab_padding_y: u32,
    pub corner_radius: u32,
    pub close_glyph_size: u32,
    pub scroll_button_width: u32,
    pub scroll_step: u32,
    pub drag_threshold: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tab_padding_x: 16,
            tab_padding_y: 8,
            corner_radius: 8,
            close_glyph_size: 16,
            scroll_button_width: 30,
            scroll_step: 50,
            drag_threshold: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Dwell time before a stationary pointer counts as hover-settle.
    pub hover_delay_ms: u64,
    /// `true`: siblings glide toward their slot while dragging.
    /// `false`: siblings jump to their shifted slot immediately.
    pub slide_animation: bool,
    /// Tooltip anchor offset from the pointer (96-DPI pixels).
    pub tooltip_offset: (i32, i32),
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            hover_delay_ms: 400,
            slide_animation: true,
            tooltip_offset: (10, 20),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeChoice {
    /// Follow the OS dark-mode setting, including live changes.
    #[default]
    System,
    Dark,
    Light,
}

impl ThemeChoice {
    /// Resolves the effective dark flag given the OS preference.
    pub fn is_dark(self, system_dark: bool) -> bool {
        match self {
            ThemeChoice::System => system_dark,
            ThemeChoice::Dark => true,
            ThemeChoice::Light => false,
        }
    }

    pub fn follows_system(self) -> bool {
        self == ThemeChoice::System
    }
}
