//! Canvas rendering for the word-search story UI

use crate::game::{GameState, ScreenState};
use crate::theme::{Color, Theme};
use web_sys::CanvasRenderingContext2d;
use wordsearch_core::{Coordinate, SentencePart};

/// Pixel layout shared by the renderer and pointer hit-testing
pub struct Layout {
    pub grid_x: f64,
    pub grid_y: f64,
    pub cell_size: f64,
    pub grid_px: f64,
    pub panel_x: f64,
    pub panel_width: f64,
    pub hints_y: f64,
    pub hint_entry_height: f64,
    pub sentences_y: f64,
}

pub fn layout(grid_size: usize, width: u32, cell_size: f64, font_size: f64) -> Layout {
    let grid_px = cell_size * grid_size as f64;
    let grid_x = 40.0;
    let grid_y = 92.0;
    let panel_x = grid_x + grid_px + 30.0;
    Layout {
        grid_x,
        grid_y,
        cell_size,
        grid_px,
        panel_x,
        panel_width: (width as f64 - panel_x - 20.0).max(120.0),
        hints_y: grid_y + font_size * 2.4,
        hint_entry_height: font_size * 2.4,
        sentences_y: grid_y + grid_px + font_size * 1.4,
    }
}

impl Layout {
    /// Map a pixel position to a grid cell
    pub fn cell_at(&self, x: f64, y: f64, grid_size: usize) -> Option<Coordinate> {
        if x < self.grid_x || y < self.grid_y {
            return None;
        }
        let col = ((x - self.grid_x) / self.cell_size) as usize;
        let row = ((y - self.grid_y) / self.cell_size) as usize;
        if row < grid_size && col < grid_size {
            Some(Coordinate::new(row, col))
        } else {
            None
        }
    }

    /// Map a pixel position to a hint-panel row
    pub fn hint_at(&self, x: f64, y: f64, entry_count: usize) -> Option<usize> {
        if x < self.panel_x || y < self.hints_y {
            return None;
        }
        let index = ((y - self.hints_y) / self.hint_entry_height) as usize;
        if index < entry_count {
            Some(index)
        } else {
            None
        }
    }
}

/// Render the complete game to canvas
pub fn render_game(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    height: u32,
    cell_size: f64,
    font_size: f64,
) {
    // Clear background
    ctx.set_fill_style_str(&theme.background.as_css());
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

    let layout = layout(
        state.session().puzzle().grid.size(),
        width,
        cell_size,
        font_size,
    );

    match state.screen() {
        ScreenState::Playing => {
            render_header(ctx, state, theme, width, font_size);
            render_grid(ctx, state, theme, &layout, font_size);
            render_hint_panel(ctx, state, theme, &layout, font_size);
            render_sentences(ctx, state, theme, &layout, width, font_size);

            if state.prompt().is_some() {
                render_prompt(ctx, state, theme, width, height, font_size);
            }
        }
        ScreenState::Finale => {
            render_grid(ctx, state, theme, &layout, font_size);
            render_finale(ctx, state, theme, width, height, font_size);
        }
        ScreenState::Summary => {
            render_summary(ctx, state, theme, width, height, font_size);
        }
    }

    // Render message if present
    if let Some(msg) = state.message() {
        render_message(ctx, theme, msg, width, height, font_size);
    }
}

fn render_header(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    font_size: f64,
) {
    let center = width as f64 / 2.0;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!(
        "{}px 'JetBrains Mono', 'Fira Code', 'Consolas', monospace",
        font_size * 0.7
    ));
    ctx.set_fill_style_str(&theme.accent.as_css());
    let _ = ctx.fill_text(
        &format!("♥ {} ♥", state.story().occasion.to_uppercase()),
        center,
        20.0,
    );

    ctx.set_font(&format!(
        "bold {}px 'JetBrains Mono', monospace",
        font_size * 1.5
    ));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    let _ = ctx.fill_text(&state.story().title, center, 48.0);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.8));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text(&state.story().tagline, center, 74.0);
}

/// Render the letter grid with drag and found highlights
fn render_grid(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    layout: &Layout,
    font_size: f64,
) {
    let puzzle = state.session().puzzle();
    let size = puzzle.grid.size();
    let found = state.session().found_cells();
    let selection = state.selection_cells();

    ctx.set_font(&format!(
        "{}px 'JetBrains Mono', 'Fira Code', 'Consolas', monospace",
        font_size
    ));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    for row in 0..size {
        for col in 0..size {
            let at = Coordinate::new(row, col);
            let cell_x = layout.grid_x + col as f64 * layout.cell_size;
            let cell_y = layout.grid_y + row as f64 * layout.cell_size;

            let bg = if selection.contains(&at) {
                &theme.selection_bg
            } else if found.contains(&at) {
                &theme.found_bg
            } else {
                &theme.cell_bg
            };
            ctx.set_fill_style_str(&bg.as_css());
            ctx.fill_rect(cell_x, cell_y, layout.cell_size, layout.cell_size);

            let text_color = if found.contains(&at) {
                &theme.found_text
            } else {
                &theme.letter_text
            };
            ctx.set_fill_style_str(&text_color.as_css());
            if let Some(letter) = puzzle.grid.letter(at) {
                let _ = ctx.fill_text(
                    &letter.to_string(),
                    cell_x + layout.cell_size / 2.0,
                    cell_y + layout.cell_size / 2.0,
                );
            }
        }
    }

    // Grid lines
    ctx.set_stroke_style_str(&theme.grid_lines.as_css());
    ctx.set_line_width(1.0);

    for i in 0..=size {
        let offset = i as f64 * layout.cell_size;

        ctx.begin_path();
        ctx.move_to(layout.grid_x + offset, layout.grid_y);
        ctx.line_to(layout.grid_x + offset, layout.grid_y + layout.grid_px);
        ctx.stroke();

        ctx.begin_path();
        ctx.move_to(layout.grid_x, layout.grid_y + offset);
        ctx.line_to(layout.grid_x + layout.grid_px, layout.grid_y + offset);
        ctx.stroke();
    }
}

/// Render the hint panel. Words stay hidden; only numbered hints show.
fn render_hint_panel(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    layout: &Layout,
    font_size: f64,
) {
    let small = font_size * 0.8;
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    ctx.set_font(&format!("bold {}px 'JetBrains Mono', monospace", font_size));
    ctx.set_fill_style_str(&theme.accent.as_css());
    let _ = ctx.fill_text("Hints", layout.panel_x, layout.grid_y);

    let (found, total) = state.session().progress();
    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
    ctx.set_fill_style_str(&theme.progress_text.as_css());
    let _ = ctx.fill_text(
        &format!("{} of {} found", found, total),
        layout.panel_x,
        layout.grid_y + font_size * 1.2,
    );

    // Hint numbers keep their story positions so they stay stable
    // as words are found.
    let mut row = 0usize;
    for (index, spec) in state.story().words.iter().enumerate() {
        if state.session().found_word(&spec.id) {
            continue;
        }
        let entry_y = layout.hints_y + row as f64 * layout.hint_entry_height;

        ctx.set_font(&format!("bold {}px 'JetBrains Mono', monospace", small));
        ctx.set_fill_style_str(&theme.accent.as_css());
        let _ = ctx.fill_text(&format!("Hint {}", index + 1), layout.panel_x, entry_y);

        ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
        if state.is_unlocked(&spec.id) {
            let hint = state
                .story()
                .hints
                .get(&spec.id)
                .map(|info| info.hint.as_str())
                .unwrap_or("");
            ctx.set_fill_style_str(&theme.unlocked_text.as_css());
            let _ = ctx.fill_text(
                &truncate_to_width(ctx, hint, layout.panel_width),
                layout.panel_x,
                entry_y + small * 1.25,
            );
        } else {
            ctx.set_fill_style_str(&theme.locked_text.as_css());
            let _ = ctx.fill_text(
                "Locked. Click to unlock.",
                layout.panel_x,
                entry_y + small * 1.25,
            );
        }
        row += 1;
    }

    if row == 0 {
        ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
        ctx.set_fill_style_str(&theme.revealed_text.as_css());
        let _ = ctx.fill_text("All words found! 💖", layout.panel_x, layout.hints_y);
    }
}

/// Render the story sentences below the grid, blanks filling in as
/// their words are found
fn render_sentences(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    layout: &Layout,
    width: u32,
    font_size: f64,
) {
    let small = font_size * 0.85;
    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    let line_height = font_size * 1.1;
    for (i, sentence) in state.story().sentences.iter().enumerate() {
        let y = layout.sentences_y + i as f64 * line_height;

        let mut segments: Vec<(String, &Color)> = Vec::new();
        for part in sentence {
            match part {
                SentencePart::Text(text) => segments.push((text.clone(), &theme.info_text)),
                SentencePart::Blank { id } => {
                    match state.session().found().iter().find(|hit| &hit.id == id) {
                        Some(hit) => segments.push((hit.word.clone(), &theme.revealed_text)),
                        None => segments.push(("____".to_string(), &theme.blank_text)),
                    }
                }
            }
        }

        let total: f64 = segments
            .iter()
            .map(|(text, _)| ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0))
            .sum();
        let mut x = (width as f64 - total) / 2.0;

        for (text, color) in segments {
            ctx.set_fill_style_str(&color.as_css());
            let _ = ctx.fill_text(&text, x, y);
            x += ctx.measure_text(&text).map(|m| m.width()).unwrap_or(0.0);
        }
    }
}

/// Render the unlock dialog
fn render_prompt(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let prompt = match state.prompt() {
        Some(prompt) => prompt,
        None => return,
    };
    let w = width as f64;
    let h = height as f64;

    // Dim the board behind the dialog
    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.75));
    ctx.fill_rect(0.0, 0.0, w, h);

    let box_width = 520.0;
    let box_height = 220.0;
    let x = (w - box_width) / 2.0;
    let y = (h - box_height) / 2.0;

    ctx.set_fill_style_str(&theme.cell_bg.as_css());
    ctx.fill_rect(x, y, box_width, box_height);
    ctx.set_stroke_style_str(&theme.accent.as_css());
    ctx.set_line_width(2.0);
    ctx.stroke_rect(x, y, box_width, box_height);

    let center = w / 2.0;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!("bold {}px 'JetBrains Mono', monospace", font_size));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    let _ = ctx.fill_text("Unlock Hint", center, y + 28.0);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.75));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text("Answer this to see the hint", center, y + 52.0);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.8));
    ctx.set_fill_style_str(&theme.letter_text.as_css());
    let mut line_y = y + 86.0;
    for line in wrap_to_width(ctx, &prompt.question, box_width - 40.0) {
        let _ = ctx.fill_text(&line, center, line_y);
        line_y += font_size;
    }

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.85));
    ctx.set_fill_style_str(&theme.unlocked_text.as_css());
    let _ = ctx.fill_text(&format!("> {}_", prompt.input), center, line_y + 12.0);

    if let Some(ref error) = prompt.error {
        ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.7));
        ctx.set_fill_style_str(&theme.error_text.as_css());
        let _ = ctx.fill_text(error, center, line_y + 38.0);
    }

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.7));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text("Enter Unlock   Esc Cancel", center, y + box_height - 20.0);
}

/// Render the finale overlay with drifting hearts
fn render_finale(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let w = width as f64;
    let h = height as f64;

    // Near-opaque rose backdrop over the solved board
    ctx.set_fill_style_str("rgba(24, 8, 14, 0.92)");
    ctx.fill_rect(0.0, 0.0, w, h);

    if let Some(finale_screen) = state.finale_screen() {
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for particle in finale_screen.particles() {
            if particle.is_visible(w as f32, h as f32) {
                ctx.set_fill_style_str(&particle.color.as_css());
                ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", particle.size));
                let _ = ctx.fill_text(
                    &particle.char.to_string(),
                    particle.x as f64,
                    particle.y as f64,
                );
            }
        }
    }

    let finale = &state.story().finale;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!(
        "bold {}px 'JetBrains Mono', monospace",
        font_size * 1.8
    ));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    let _ = ctx.fill_text(&finale.heading, w / 2.0, h / 2.0 - 70.0);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size));
    ctx.set_fill_style_str(&theme.letter_text.as_css());
    let _ = ctx.fill_text(&finale.line, w / 2.0, h / 2.0 - 30.0);

    // Sign-off throbs between deep and bright rose
    let pulse = state.finale_screen().map(|f| f.pulse()).unwrap_or(1.0);
    let signoff = Color::new(
        (190.0 + 65.0 * pulse) as u8,
        (18.0 + 95.0 * pulse) as u8,
        (60.0 + 73.0 * pulse) as u8,
    );
    ctx.set_font(&format!(
        "bold {}px 'JetBrains Mono', monospace",
        font_size * 1.3
    ));
    ctx.set_fill_style_str(&signoff.as_css());
    let _ = ctx.fill_text(&finale.signoff, w / 2.0, h / 2.0 + 20.0);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.75));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text("Click anywhere to see your keepsake", w / 2.0, h / 2.0 + 80.0);
}

/// Render the keepsake: written answers plus the final note
fn render_summary(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let w = width as f64;
    let h = height as f64;
    let center = w / 2.0;
    let small = font_size * 0.8;

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!(
        "bold {}px 'JetBrains Mono', monospace",
        font_size * 1.4
    ));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    let _ = ctx.fill_text("Here’s what you wrote for me", center, 46.0);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text("Your answers are safe here.", center, 76.0);

    let note_y = h - 110.0;
    let left = (center - 280.0).max(30.0);

    if state.answers().is_empty() {
        ctx.set_fill_style_str(&theme.info_text.as_css());
        let _ = ctx.fill_text("No hints unlocked, no secrets told!", center, 140.0);
    } else {
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");

        let entry_height = small * 4.0;
        let mut y = 110.0;
        let mut shown = 0usize;

        for stored in state.answers() {
            if y + entry_height > note_y - 20.0 {
                break;
            }
            ctx.set_font(&format!("bold {}px 'JetBrains Mono', monospace", small));
            ctx.set_fill_style_str(&theme.accent.as_css());
            let _ = ctx.fill_text(&format!("On {}", stored.word), left, y);

            ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
            ctx.set_fill_style_str(&theme.info_text.as_css());
            let _ = ctx.fill_text(
                &truncate_to_width(ctx, &stored.question, 560.0),
                left,
                y + small * 1.2,
            );

            ctx.set_fill_style_str(&theme.revealed_text.as_css());
            let _ = ctx.fill_text(
                &truncate_to_width(ctx, &format!("\"{}\"", stored.answer), 548.0),
                left + 12.0,
                y + small * 2.4,
            );

            y += entry_height;
            shown += 1;
        }

        let remaining = state.answers().len().saturating_sub(shown);
        if remaining > 0 {
            ctx.set_fill_style_str(&theme.info_text.as_css());
            let _ = ctx.fill_text(&format!("and {} more…", remaining), left, y);
        }
    }

    // Final note
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.set_font(&format!("bold {}px 'JetBrains Mono', monospace", small));
    ctx.set_fill_style_str(&theme.accent.as_css());
    let _ = ctx.fill_text("♥ Final message", left, note_y);

    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", small));
    match state.note_input() {
        Some(buffer) => {
            ctx.set_fill_style_str(&theme.unlocked_text.as_css());
            let _ = ctx.fill_text(&format!("> {}_", buffer), left, note_y + small * 1.4);
            ctx.set_fill_style_str(&theme.info_text.as_css());
            let _ = ctx.fill_text("Enter Save   Esc Cancel", left, note_y + small * 2.8);
        }
        None => match state.note() {
            Some(note) => {
                ctx.set_fill_style_str(&theme.revealed_text.as_css());
                let _ = ctx.fill_text(
                    &truncate_to_width(ctx, &format!("\"{}\"", note), 560.0),
                    left,
                    note_y + small * 1.4,
                );
            }
            None => {
                ctx.set_fill_style_str(&theme.info_text.as_css());
                let _ = ctx.fill_text("Press E to write a note", left, note_y + small * 1.4);
            }
        },
    }

    ctx.set_text_align("center");
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text("E Note   Esc Back to board", center, h - 24.0);
}

/// Render temporary message
fn render_message(
    ctx: &CanvasRenderingContext2d,
    theme: &Theme,
    message: &str,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let msg_y = height as f64 - 50.0;

    // Background
    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.8));
    let metrics = ctx.measure_text(message).ok();
    let msg_width = metrics.map(|m| m.width()).unwrap_or(200.0) + 40.0;
    ctx.fill_rect(
        (width as f64 - msg_width) / 2.0,
        msg_y - font_size,
        msg_width,
        font_size * 2.0,
    );

    // Text
    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", font_size * 0.8));
    ctx.set_fill_style_str(&theme.message_text.as_css());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(message, width as f64 / 2.0, msg_y);
}

/// Shorten text with an ellipsis until it fits the pixel width
fn truncate_to_width(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
    let fits = ctx
        .measure_text(text)
        .map(|m| m.width() <= max_width)
        .unwrap_or(true);
    if fits {
        return text.to_string();
    }

    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        let width = ctx.measure_text(&out).map(|m| m.width()).unwrap_or(0.0);
        if width > max_width - 12.0 {
            out.pop();
            out.push('…');
            return out;
        }
    }
    out
}

/// Word-wrap text to a pixel width
fn wrap_to_width(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        let width = ctx.measure_text(&candidate).map(|m| m.width()).unwrap_or(0.0);
        if width > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
