mod fonts;
mod model;
mod persistence;
mod theme;

pub use fonts::{BUNDLED_FONT, load_font_data};
pub use model::{
    BehaviorConfig, FontConfig, LayoutConfig, StripConfig, ThemeChoice, default_tab_titles,
};
pub use persistence::{config_base_dir, load_config, save_config};
pub use theme::ThemePalette;
