//! WebAssembly word-search story with a canvas UI
//!
//! This crate provides a browser-based word search that looks and feels
//! like the terminal version.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};
use wordsearch_core::Story;

mod theme;
mod render;
mod game;
mod animations;

// WASM tests require wasm-pack test to run
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use theme::Theme;
pub use game::GameState;

use game::ScreenState;

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct WordSearchGame {
    state: GameState,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    theme: Theme,
    cell_size: f64,
    font_size: f64,
    width: u32,
    height: u32,
    dpr: f64, // Device pixel ratio for crisp rendering
}

#[wasm_bindgen]
impl WordSearchGame {
    /// Create a new game attached to a canvas element
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WordSearchGame, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Get device pixel ratio for crisp rendering on high-DPI displays
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        // Set canvas size for crisp rendering
        let width = 1000;
        let height = 760;

        // Set actual canvas resolution (scaled by dpr)
        canvas.set_width((width as f64 * dpr) as u32);
        canvas.set_height((height as f64 * dpr) as u32);

        // Set CSS display size (logical pixels)
        let html_element: &HtmlElement = canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        // Scale context to account for dpr
        let _ = ctx.scale(dpr, dpr);

        let state =
            GameState::new(Story::reference()).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = WordSearchGame {
            state,
            canvas,
            ctx,
            theme: Theme::rose(),
            cell_size: 36.0,
            font_size: 20.0,
            width,
            height,
            dpr,
        };

        game.render();
        Ok(game)
    }

    /// Handle keyboard input
    #[wasm_bindgen]
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let key = event.key();
        let consumed = self.state.handle_key(&key);

        self.render();
        consumed
    }

    /// Pointer pressed at CSS pixel coordinates
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.state.screen() == ScreenState::Playing {
            let layout = self.layout();
            let size = self.state.session().puzzle().grid.size();
            if let Some(cell) = layout.cell_at(x, y, size) {
                self.state.begin_drag(cell);
            } else if let Some(index) = layout.hint_at(x, y, self.state.hint_entries().len()) {
                self.state.click_hint(index);
            }
        }
        self.render();
    }

    /// Pointer moved while held down
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.state.screen() == ScreenState::Playing && self.state.is_dragging() {
            let layout = self.layout();
            let size = self.state.session().puzzle().grid.size();
            if let Some(cell) = layout.cell_at(x, y, size) {
                self.state.extend_drag(cell);
            }
            self.render();
        }
    }

    /// Pointer released: resolve the drag, or advance past the finale
    #[wasm_bindgen]
    pub fn pointer_up(&mut self) {
        match self.state.screen() {
            ScreenState::Playing => self.state.end_drag(),
            ScreenState::Finale => self.state.enter_summary(),
            ScreenState::Summary => {}
        }
        self.render();
    }

    /// Update game state (call from requestAnimationFrame)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.state.tick();
        self.render();
    }

    /// Start a fresh board for the same story
    #[wasm_bindgen]
    pub fn new_board(&mut self) {
        self.state.new_board();
        self.render();
    }

    /// Replace the story with one parsed from JSON
    #[wasm_bindgen]
    pub fn load_story_json(&mut self, json: &str) -> bool {
        let loaded = serde_json::from_str::<Story>(json)
            .ok()
            .and_then(|story| GameState::new(story).ok());
        match loaded {
            Some(state) => {
                self.state = state;
                self.render();
                true
            }
            None => false,
        }
    }

    /// Set the color theme
    #[wasm_bindgen]
    pub fn set_theme(&mut self, theme_name: &str) {
        self.theme = match theme_name {
            "dark" => Theme::dark(),
            "high_contrast" => Theme::high_contrast(),
            _ => Theme::rose(),
        };
        self.render();
    }

    /// Found words as a JS array of { word, id }
    #[wasm_bindgen]
    pub fn found(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.state.session().found()).unwrap_or(JsValue::NULL)
    }

    /// Found words as JSON
    #[wasm_bindgen]
    pub fn found_json(&self) -> String {
        serde_json::to_string(self.state.session().found()).unwrap_or_default()
    }

    /// Check if every placed word has been found
    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Words found so far
    #[wasm_bindgen]
    pub fn found_count(&self) -> usize {
        self.state.session().progress().0
    }

    /// Words hidden in the board
    #[wasm_bindgen]
    pub fn word_count(&self) -> usize {
        self.state.session().progress().1
    }

    /// Resize the game canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        // Minimum sizes
        let width = width.max(640);
        let height = height.max(520);

        self.width = width;
        self.height = height;

        // Update dpr in case it changed (e.g., moving to different monitor)
        self.dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        // Set actual canvas resolution (scaled by dpr for crisp rendering)
        self.canvas.set_width((width as f64 * self.dpr) as u32);
        self.canvas.set_height((height as f64 * self.dpr) as u32);

        // Set CSS display size (logical pixels)
        let html_element: &HtmlElement = self.canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        // Reset and scale context to account for dpr
        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);

        // Cell size is limited by both dimensions: the header and the
        // sentences need vertical room, the hint panel needs width
        let size = self.state.session().puzzle().grid.size().max(1);
        let cell_by_height = (height as f64 - 340.0).max(240.0) / size as f64;
        let cell_by_width = (width as f64 - 390.0).max(240.0) / size as f64;
        self.cell_size = cell_by_height.min(cell_by_width).min(48.0).max(22.0);

        // Font size scales with cell size
        self.font_size = (self.cell_size * 0.55).max(12.0).min(24.0);

        self.render();
    }

    /// Get current width
    #[wasm_bindgen]
    pub fn get_width(&self) -> u32 {
        self.width
    }

    /// Get current height
    #[wasm_bindgen]
    pub fn get_height(&self) -> u32 {
        self.height
    }

    fn layout(&self) -> render::Layout {
        render::layout(
            self.state.session().puzzle().grid.size(),
            self.width,
            self.cell_size,
            self.font_size,
        )
    }

    /// Render the game to canvas
    fn render(&self) {
        render::render_game(
            &self.ctx,
            &self.state,
            &self.theme,
            self.width,
            self.height,
            self.cell_size,
            self.font_size,
        );
    }
}
