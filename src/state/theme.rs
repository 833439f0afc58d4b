use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    /// Dark background (default)
    Dark,
    /// Light background
    Light,
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Dark
    }
}

impl ThemeVariant {
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Accent colors
    pub accent_primary: Color,   // Focus, selection, primary highlight
    pub accent_secondary: Color, // Info, links, secondary actions
    pub accent_error: Color,     // Errors, failures
    pub accent_success: Color,   // Success, completion
    pub accent_muted: Color,     // Labels, keys, subtle highlights

    // Text hierarchy
    pub text_primary: Color,   // Main content
    pub text_secondary: Color, // Less important content

    // UI structure
    pub border_primary: Color, // Main borders, separators
    pub bg_base: Color,        // Main background
    pub bg_surface: Color,     // Elevated surfaces, selection bg
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    fn dark() -> Self {
        Self {
            accent_primary: Color::Rgb(0xb4, 0xbe, 0xfe),   // lavender
            accent_secondary: Color::Rgb(0x89, 0xb4, 0xfa), // blue
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
            accent_muted: Color::Rgb(0xfa, 0xb3, 0x87),     // peach

            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),   // text
            text_secondary: Color::Rgb(0xba, 0xc2, 0xde), // subtext1

            border_primary: Color::Rgb(0x7f, 0x84, 0x9c), // overlay1
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),        // base
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),     // surface0
        }
    }

    fn light() -> Self {
        Self {
            accent_primary: Color::Rgb(0x72, 0x87, 0xfd),   // lavender
            accent_secondary: Color::Rgb(0x1e, 0x66, 0xf5), // blue
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),     // red
            accent_success: Color::Rgb(0x40, 0xa0, 0x2b),   // green
            accent_muted: Color::Rgb(0xfe, 0x64, 0x0b),     // peach

            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),   // text
            text_secondary: Color::Rgb(0x5c, 0x5f, 0x77), // subtext1

            border_primary: Color::Rgb(0x8c, 0x8f, 0xa1), // overlay1
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),        // base
            bg_surface: Color::Rgb(0xcc, 0xd0, 0xda),     // surface0
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
