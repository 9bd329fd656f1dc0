use crossterm::style::Color;

/// Which theme is active, for cycling and CLI selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Rose,
    Dark,
    HighContrast,
}

impl ThemeKind {
    pub fn theme(self) -> Theme {
        match self {
            ThemeKind::Rose => Theme::rose(),
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::HighContrast => Theme::high_contrast(),
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeKind::Rose => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::HighContrast,
            ThemeKind::HighContrast => ThemeKind::Rose,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Rose => "Rose",
            ThemeKind::Dark => "Dark",
            ThemeKind::HighContrast => "High contrast",
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid and panel border color
    pub border: Color,
    /// Story title color
    pub title: Color,
    /// Occasion banner / panel label color
    pub accent: Color,
    /// Grid letter color
    pub letter: Color,
    /// Found cell background
    pub found_bg: Color,
    /// Found cell letter color
    pub found_fg: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Live selection path background
    pub selection_bg: Color,
    /// Unrevealed sentence blank color
    pub blank: Color,
    /// Revealed word color in sentences
    pub revealed: Color,
    /// Locked hint color
    pub locked: Color,
    /// Unlocked hint text color
    pub unlocked: Color,
    /// Progress bar fill color
    pub progress: Color,
    /// Secondary/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Prompt error color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::rose()
    }
}

impl Theme {
    /// Rose theme (default) - warm reds and pinks
    pub fn rose() -> Self {
        Self {
            bg: Color::Rgb { r: 28, g: 14, b: 20 },
            fg: Color::Rgb { r: 255, g: 228, b: 235 },
            border: Color::Rgb { r: 120, g: 60, b: 82 },
            title: Color::Rgb { r: 251, g: 113, b: 133 },
            accent: Color::Rgb { r: 244, g: 114, b: 182 },
            letter: Color::Rgb { r: 255, g: 214, b: 224 },
            found_bg: Color::Rgb { r: 136, g: 19, b: 55 },
            found_fg: Color::Rgb { r: 255, g: 241, b: 242 },
            cursor_bg: Color::Rgb { r: 190, g: 18, b: 60 },
            selection_bg: Color::Rgb { r: 88, g: 32, b: 50 },
            blank: Color::Rgb { r: 160, g: 96, b: 116 },
            revealed: Color::Rgb { r: 251, g: 113, b: 133 },
            locked: Color::Rgb { r: 140, g: 105, b: 118 },
            unlocked: Color::Rgb { r: 244, g: 114, b: 182 },
            progress: Color::Rgb { r: 244, g: 63, b: 94 },
            info: Color::Rgb { r: 190, g: 145, b: 160 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
        }
    }

    /// Dark theme - neutral palette, improved contrast
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            title: Color::Rgb { r: 80, g: 180, b: 255 },
            accent: Color::Rgb { r: 130, g: 140, b: 170 },
            letter: Color::Rgb { r: 235, g: 235, b: 245 },
            found_bg: Color::Rgb { r: 35, g: 70, b: 110 },
            found_fg: Color::Rgb { r: 220, g: 240, b: 255 },
            cursor_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            selection_bg: Color::Rgb { r: 40, g: 48, b: 70 },
            blank: Color::Rgb { r: 120, g: 128, b: 150 },
            revealed: Color::Rgb { r: 80, g: 180, b: 255 },
            locked: Color::Rgb { r: 110, g: 115, b: 130 },
            unlocked: Color::Rgb { r: 140, g: 200, b: 255 },
            progress: Color::Rgb { r: 80, g: 180, b: 255 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            title: Color::Yellow,
            accent: Color::Cyan,
            letter: Color::White,
            found_bg: Color::Blue,
            found_fg: Color::White,
            cursor_bg: Color::Magenta,
            selection_bg: Color::DarkBlue,
            blank: Color::Grey,
            revealed: Color::Yellow,
            locked: Color::Grey,
            unlocked: Color::Cyan,
            progress: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            error: Color::Red,
        }
    }
}
