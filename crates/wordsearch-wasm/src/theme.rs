//! Color themes for the canvas word-search UI

use serde::{Deserialize, Serialize};

/// RGB color
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn as_css_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Color theme for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Page background
    pub background: Color,
    /// Grid lines
    pub grid_lines: Color,
    /// Letter cell background
    pub cell_bg: Color,
    /// Letter color
    pub letter_text: Color,
    /// Cells under the current drag
    pub selection_bg: Color,
    /// Cells of found words
    pub found_bg: Color,
    /// Letter color on found cells
    pub found_text: Color,
    /// Big title
    pub title_text: Color,
    /// Occasion banner and section labels
    pub accent: Color,
    /// Secondary text
    pub info_text: Color,
    /// Unrevealed sentence blanks
    pub blank_text: Color,
    /// Revealed words in sentences
    pub revealed_text: Color,
    /// Locked hint entries
    pub locked_text: Color,
    /// Unlocked hint text
    pub unlocked_text: Color,
    /// Progress counter
    pub progress_text: Color,
    /// Transient message text
    pub message_text: Color,
    /// Prompt validation errors
    pub error_text: Color,
}

impl Theme {
    /// Rose theme (default)
    pub fn rose() -> Self {
        Self {
            background: Color::new(28, 14, 20),
            grid_lines: Color::new(90, 48, 62),
            cell_bg: Color::new(38, 20, 28),
            letter_text: Color::new(255, 228, 235),
            selection_bg: Color::new(136, 52, 84),
            found_bg: Color::new(88, 28, 52),
            found_text: Color::new(255, 190, 205),
            title_text: Color::new(251, 113, 133),
            accent: Color::new(244, 63, 94),
            info_text: Color::new(168, 124, 140),
            blank_text: Color::new(150, 100, 116),
            revealed_text: Color::new(253, 164, 175),
            locked_text: Color::new(130, 92, 106),
            unlocked_text: Color::new(255, 214, 170),
            progress_text: Color::new(251, 113, 133),
            message_text: Color::new(255, 220, 100),
            error_text: Color::new(255, 110, 110),
        }
    }

    /// Dark theme
    pub fn dark() -> Self {
        Self {
            background: Color::new(24, 24, 32),
            grid_lines: Color::new(60, 60, 80),
            cell_bg: Color::new(32, 32, 44),
            letter_text: Color::new(210, 210, 225),
            selection_bg: Color::new(70, 100, 150),
            found_bg: Color::new(40, 80, 60),
            found_text: Color::new(150, 230, 180),
            title_text: Color::new(140, 170, 255),
            accent: Color::new(100, 140, 230),
            info_text: Color::new(150, 150, 170),
            blank_text: Color::new(120, 120, 140),
            revealed_text: Color::new(130, 200, 255),
            locked_text: Color::new(110, 110, 130),
            unlocked_text: Color::new(240, 200, 120),
            progress_text: Color::new(140, 170, 255),
            message_text: Color::new(255, 220, 100),
            error_text: Color::new(255, 100, 100),
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            background: Color::new(0, 0, 0),
            grid_lines: Color::new(130, 130, 130),
            cell_bg: Color::new(0, 0, 0),
            letter_text: Color::new(255, 255, 255),
            selection_bg: Color::new(0, 90, 180),
            found_bg: Color::new(0, 110, 0),
            found_text: Color::new(255, 255, 255),
            title_text: Color::new(255, 255, 255),
            accent: Color::new(0, 255, 255),
            info_text: Color::new(200, 200, 200),
            blank_text: Color::new(170, 170, 170),
            revealed_text: Color::new(0, 255, 0),
            locked_text: Color::new(150, 150, 150),
            unlocked_text: Color::new(255, 255, 0),
            progress_text: Color::new(255, 255, 255),
            message_text: Color::new(255, 255, 0),
            error_text: Color::new(255, 60, 60),
        }
    }
}
