use crate::core::Color;

/// Named colours used by every painter of the strip.
///
/// Owned by the widget and replaced wholesale on a theme change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    pub is_dark: bool,

    // -- Strip --
    pub background: Color,
    pub text: Color,
    pub active_tab: Color,
    pub separator: Color,
    pub hover: Color,
    pub insertion: Color,

    // -- Close glyph --
    pub close_glyph: Color,
    pub close_glyph_hover: Color,
    pub close_hover_bg: Color,

    // -- Scroll buttons --
    pub scroll_hover: Color,
    pub scroll_glyph: Color,

    // -- Tooltip --
    pub tooltip_bg: Color,
    pub tooltip_text: Color,
    pub tooltip_border: Color,
}

impl ThemePalette {
    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Dark palette (the control's default look).
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            background: Color::rgb(32, 32, 32),
            text: Color::rgb(220, 220, 220),
            active_tab: Color::rgb(50, 50, 50),
            separator: Color::rgb(60, 60, 60),
            hover: Color::rgb(45, 45, 45),
            insertion: Color::rgb(0, 120, 215),
            close_glyph: Color::rgb(150, 150, 150),
            close_glyph_hover: Color::WHITE,
            close_hover_bg: Color::rgb(200, 0, 0),
            scroll_hover: Color::rgb(60, 60, 60),
            scroll_glyph: Color::rgb(220, 220, 220),
            tooltip_bg: Color::rgb(43, 43, 43),
            tooltip_text: Color::rgb(220, 220, 220),
            tooltip_border: Color::rgb(80, 80, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            is_dark: false,
            background: Color::rgb(243, 243, 243),
            text: Color::rgb(30, 30, 30),
            active_tab: Color::rgb(255, 255, 255),
            separator: Color::rgb(210, 210, 210),
            hover: Color::rgb(232, 232, 232),
            insertion: Color::rgb(0, 120, 215),
            close_glyph: Color::rgb(110, 110, 110),
            close_glyph_hover: Color::WHITE,
            close_hover_bg: Color::rgb(232, 17, 35),
            scroll_hover: Color::rgb(222, 222, 222),
            scroll_glyph: Color::rgb(60, 60, 60),
            tooltip_bg: Color::rgb(255, 255, 255),
            tooltip_text: Color::rgb(30, 30, 30),
            tooltip_border: Color::rgb(200, 200, 200),
        }
    }
}
