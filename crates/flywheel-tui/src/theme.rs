use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,

    // Semantic colors
    pub selection: Color,
    pub focused: Color,
    pub unfocused: Color,
    pub accent: Color,
    pub hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            focused: Color::Rgb(0x89, 0xb4, 0x82),
            unfocused: Color::Rgb(0x7c, 0x6f, 0x64),
            accent: Color::Rgb(0xd8, 0xa6, 0x57),
            hint: Color::Rgb(0x92, 0x83, 0x74),
        }
    }
}
