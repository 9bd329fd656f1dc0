use crate::app::{App, Focus, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use wordsearch_core::{Coordinate, SentencePart};

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        // The finale repaints every row itself, so skip the clear
        ScreenState::Finale => render_finale_screen(stdout, app, term_width, term_height)?,
        ScreenState::Summary => {
            execute!(stdout, Clear(ClearType::All))?;
            render_summary_screen(stdout, app, term_width, term_height)?;
        }
        ScreenState::Playing => {
            execute!(stdout, Clear(ClearType::All))?;
            render_play_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_play_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let size = app.session.puzzle().grid.size() as u16;

    // Cells are three columns wide; one border column each side
    let grid_width = size * 3 + 2;
    let grid_height = size + 2;
    let panel_width: u16 = 36;

    let total_width = grid_width + 3 + panel_width;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y: u16 = 4;

    render_header(stdout, app, term_width)?;

    // The mouse handler maps positions back through this origin
    app.grid_origin = (start_x, start_y);
    render_grid(stdout, app, start_x, start_y)?;

    let panel_x = start_x + grid_width + 3;
    render_progress(stdout, app, panel_x, start_y)?;
    render_hint_panel(stdout, app, panel_x, start_y + 2, panel_width)?;

    let sentences_y = start_y + grid_height + 1;
    render_sentences(
        stdout,
        app,
        term_width,
        sentences_y,
        term_height.saturating_sub(4),
    )?;

    if app.focus == Focus::Hints {
        render_hint_detail(stdout, app, term_width, term_height)?;
    }
    render_controls(stdout, app, term_height)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    if app.prompt.is_some() {
        render_prompt(stdout, app, term_width, term_height)?;
    }

    Ok(())
}

fn render_header(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let occasion = format!("♥ {} ♥", app.story.occasion.to_uppercase());
    print_centered(stdout, 0, &occasion, theme.accent, theme.bg, term_width)?;
    print_centered(stdout, 1, &app.story.title, theme.title, theme.bg, term_width)?;
    print_centered(stdout, 2, &app.story.tagline, theme.info, theme.bg, term_width)?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let puzzle = app.session.puzzle();
    let size = puzzle.grid.size();
    let found = app.session.found_cells();
    let selection = app.selection_cells();
    let inner = size * 3;

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print(format!("┌{}┐", "─".repeat(inner)))
    )?;

    for row in 0..size {
        let cell_y = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;

        for col in 0..size {
            let at = Coordinate::new(row, col);
            let is_cursor = at == app.cursor && app.focus == Focus::Grid;
            let bg = if is_cursor {
                theme.cursor_bg
            } else if selection.contains(&at) {
                theme.selection_bg
            } else if found.contains(&at) {
                theme.found_bg
            } else {
                theme.bg
            };
            let fg = if found.contains(&at) {
                theme.found_fg
            } else {
                theme.letter
            };
            let letter = puzzle.grid.letter(at).unwrap_or(' ');
            execute!(
                stdout,
                SetBackgroundColor(bg),
                SetForegroundColor(fg),
                Print(format!(" {} ", letter))
            )?;
        }

        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 1 + size as u16),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(format!("└{}┘", "─".repeat(inner)))
    )?;

    Ok(())
}

fn render_progress(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let (found, total) = app.session.progress();

    let bar_width = 24usize;
    let filled = if total > 0 {
        bar_width * found / total
    } else {
        bar_width
    };

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.progress),
        Print("█".repeat(filled)),
        SetForegroundColor(theme.border),
        Print("─".repeat(bar_width - filled)),
        SetForegroundColor(theme.info),
        Print(format!(" {}/{}", found, total))
    )?;

    Ok(())
}

fn render_hint_panel(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.accent),
        Print("Hints")
    )?;

    let entries = app.hint_entries();
    if entries.is_empty() {
        execute!(
            stdout,
            MoveTo(x, y + 2),
            SetForegroundColor(theme.revealed),
            Print("All words found! ♥")
        )?;
        return Ok(());
    }

    // One line per hidden word; hint numbers keep their story positions
    // so they stay stable as words are found.
    let mut row: u16 = 0;
    for (index, spec) in app.story.words.iter().enumerate() {
        if app.session.found_word(&spec.id) {
            continue;
        }
        let selected = app.focus == Focus::Hints && row as usize == app.hint_selection;
        let marker = if selected { "▶ " } else { "  " };
        let line_y = y + 1 + row;

        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(if selected { theme.key } else { theme.accent }),
            Print(format!("{}Hint {:<2} ", marker, index + 1))
        )?;

        let body_width = width.saturating_sub(10) as usize;
        if app.keepsake.is_unlocked(&spec.id) {
            let hint = app
                .story
                .hints
                .get(&spec.id)
                .map(|info| info.hint.as_str())
                .unwrap_or("");
            execute!(
                stdout,
                SetForegroundColor(theme.unlocked),
                Print(truncate(hint, body_width))
            )?;
        } else {
            execute!(stdout, SetForegroundColor(theme.locked), Print("locked"))?;
        }
        row += 1;
    }

    Ok(())
}

/// Context strip for the selected hint, above the controls line
fn render_hint_detail(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let entries = app.hint_entries();
    let spec = match entries.get(app.hint_selection) {
        Some(spec) => *spec,
        None => return Ok(()),
    };
    let y = term_height.saturating_sub(3);

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    if app.keepsake.is_unlocked(&spec.id) {
        if let Some(info) = app.story.hints.get(&spec.id) {
            let lines = wrap_text(&info.hint, term_width.saturating_sub(4) as usize);
            for (i, line) in lines.iter().take(2).enumerate() {
                execute!(
                    stdout,
                    MoveTo(2, y + i as u16),
                    SetForegroundColor(theme.unlocked),
                    Print(line)
                )?;
            }
        }
    } else {
        execute!(
            stdout,
            MoveTo(2, y),
            SetForegroundColor(theme.info),
            Print("Enter answers its question and unlocks the hint.")
        )?;
    }

    Ok(())
}

fn render_sentences(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    y_start: u16,
    y_limit: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    for (i, sentence) in app.story.sentences.iter().enumerate() {
        let y = y_start + i as u16;
        if y >= y_limit {
            break;
        }

        let mut length = 0usize;
        for part in sentence {
            length += match part {
                SentencePart::Text(text) => text.chars().count(),
                SentencePart::Blank { id } => match app.session.found().iter().find(|hit| &hit.id == id) {
                    Some(hit) => hit.word.chars().count(),
                    None => 4,
                },
            };
        }

        let x = term_width.saturating_sub(length as u16) / 2;
        execute!(stdout, MoveTo(x, y))?;

        for part in sentence {
            match part {
                SentencePart::Text(text) => {
                    execute!(stdout, SetForegroundColor(theme.fg), Print(text))?;
                }
                SentencePart::Blank { id } => {
                    match app.session.found().iter().find(|hit| &hit.id == id) {
                        Some(hit) => {
                            execute!(
                                stdout,
                                SetForegroundColor(theme.revealed),
                                Print(&hit.word)
                            )?;
                        }
                        None => {
                            execute!(stdout, SetForegroundColor(theme.blank), Print("____"))?;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, term_height: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("Arrows", "Move"),
        ("Space", "Anchor/confirm"),
        ("Tab", "Hints"),
        ("n", "New board"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    execute!(
        stdout,
        MoveTo(2, term_height.saturating_sub(1)),
        SetBackgroundColor(theme.bg)
    )?;
    for (key, desc) in controls {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {}   ", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selection_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn render_prompt(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let prompt = match app.prompt.as_ref() {
        Some(prompt) => prompt,
        None => return Ok(()),
    };
    let theme = &app.theme;

    let box_width: u16 = 54;
    let question_lines = wrap_text(&prompt.question, box_width as usize - 6);
    let box_height = 9 + question_lines.len() as u16;
    let x = term_width.saturating_sub(box_width) / 2;
    let y = term_height.saturating_sub(box_height) / 2;

    let bg = Color::Rgb {
        r: 38,
        g: 22,
        b: 30,
    };

    // Backdrop
    for row in 0..box_height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(box_width as usize))
        )?;
    }

    // Border
    execute!(stdout, SetForegroundColor(theme.border), SetBackgroundColor(bg))?;
    execute!(
        stdout,
        MoveTo(x, y),
        Print("┌"),
        Print("─".repeat(box_width as usize - 2)),
        Print("┐")
    )?;
    for row in 1..box_height - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + box_width - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + box_height - 1),
        Print("└"),
        Print("─".repeat(box_width as usize - 2)),
        Print("┘")
    )?;

    print_centered_at(stdout, x, y + 1, box_width, "Unlock Hint", theme.title, bg)?;
    print_centered_at(
        stdout,
        x,
        y + 2,
        box_width,
        "Answer this to see the hint",
        theme.info,
        bg,
    )?;

    for (i, line) in question_lines.iter().enumerate() {
        print_centered_at(stdout, x, y + 4 + i as u16, box_width, line, theme.fg, bg)?;
    }

    let input_y = y + 5 + question_lines.len() as u16;
    execute!(
        stdout,
        MoveTo(x + 3, input_y),
        SetForegroundColor(theme.key),
        SetBackgroundColor(bg),
        Print(format!("> {}_", prompt.input))
    )?;

    if let Some(ref error) = prompt.error {
        print_centered_at(stdout, x, input_y + 1, box_width, error, theme.error, bg)?;
    }

    print_centered_at(
        stdout,
        x,
        y + box_height - 2,
        box_width,
        "Enter Unlock   Esc Cancel",
        theme.info,
        bg,
    )?;

    Ok(())
}

// Finale and summary screens

fn render_finale_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.finale_screen.resize(term_width, term_height);

    let bg_base = Color::Rgb { r: 24, g: 8, b: 14 };

    // Backdrop, row by row
    for y in 0..term_height {
        execute!(
            stdout,
            MoveTo(0, y),
            SetBackgroundColor(bg_base),
            Print(" ".repeat(term_width as usize))
        )?;
    }

    // Hearts behind the text
    for particle in app.finale_screen.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                SetBackgroundColor(bg_base),
                Print(particle.char)
            )?;
        }
    }

    let finale = &app.story.finale;
    let mid = term_height / 2;

    print_centered(
        stdout,
        mid.saturating_sub(4),
        &finale.heading,
        app.theme.title,
        bg_base,
        term_width,
    )?;
    print_centered(
        stdout,
        mid.saturating_sub(2),
        &finale.line,
        app.theme.fg,
        bg_base,
        term_width,
    )?;

    // Sign-off throbs between deep and bright rose
    let pulse = app.finale_screen.pulse();
    let signoff_color = Color::Rgb {
        r: (190.0 + 65.0 * pulse) as u8,
        g: (18.0 + 95.0 * pulse) as u8,
        b: (60.0 + 73.0 * pulse) as u8,
    };
    print_centered(stdout, mid + 1, &finale.signoff, signoff_color, bg_base, term_width)?;

    print_centered(
        stdout,
        mid + 4,
        "Press any key to see your keepsake",
        app.theme.info,
        bg_base,
        term_width,
    )?;

    Ok(())
}

fn render_summary_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    print_centered(
        stdout,
        1,
        "Here’s what you wrote for me",
        theme.title,
        theme.bg,
        term_width,
    )?;
    print_centered(
        stdout,
        2,
        "Your answers are safe here.",
        theme.info,
        theme.bg,
        term_width,
    )?;

    let note_y = term_height.saturating_sub(6);
    let answers = &app.keepsake.answers;

    if answers.is_empty() {
        print_centered(
            stdout,
            6,
            "No hints unlocked, no secrets told!",
            theme.info,
            theme.bg,
            term_width,
        )?;
    } else {
        // Four lines per answer; scroll moves one answer at a time
        let left = term_width.saturating_sub(56) / 2;
        let visible = (note_y.saturating_sub(5) / 4) as usize;
        let start = app.summary_scroll.min(answers.len().saturating_sub(1));

        if start > 0 {
            print_centered(stdout, 3, "↑ more", theme.info, theme.bg, term_width)?;
        }
        if start + visible < answers.len() {
            print_centered(
                stdout,
                note_y.saturating_sub(1),
                "↓ more",
                theme.info,
                theme.bg,
                term_width,
            )?;
        }

        for (i, stored) in answers.iter().skip(start).take(visible).enumerate() {
            let y = 4 + i as u16 * 4;
            execute!(
                stdout,
                MoveTo(left, y),
                SetForegroundColor(theme.accent),
                Print(format!("On {}", stored.word)),
                MoveTo(left, y + 1),
                SetForegroundColor(theme.fg),
                Print(truncate(&stored.question, 56)),
                MoveTo(left + 2, y + 2),
                SetForegroundColor(theme.revealed),
                Print(truncate(&format!("\"{}\"", stored.answer), 54))
            )?;
        }
    }

    // Final note
    let left = term_width.saturating_sub(56) / 2;
    execute!(
        stdout,
        MoveTo(left, note_y),
        SetForegroundColor(theme.accent),
        Print("♥ Final message")
    )?;
    match app.note_input.as_ref() {
        Some(buffer) => {
            execute!(
                stdout,
                MoveTo(left, note_y + 1),
                SetForegroundColor(theme.key),
                Print(format!("> {}_", buffer)),
                MoveTo(left, note_y + 2),
                SetForegroundColor(theme.info),
                Print("Enter Save   Esc Cancel")
            )?;
        }
        None => match app.keepsake.note.as_ref() {
            Some(note) => {
                execute!(
                    stdout,
                    MoveTo(left, note_y + 1),
                    SetForegroundColor(theme.revealed),
                    Print(truncate(&format!("\"{}\"", note), 56))
                )?;
            }
            None => {
                execute!(
                    stdout,
                    MoveTo(left, note_y + 1),
                    SetForegroundColor(theme.info),
                    Print("Press e to write a note")
                )?;
            }
        },
    }

    // Controls
    execute!(
        stdout,
        MoveTo(2, term_height.saturating_sub(1)),
        SetForegroundColor(theme.key),
        Print("↑↓"),
        SetForegroundColor(theme.info),
        Print(" Scroll   "),
        SetForegroundColor(theme.key),
        Print("e"),
        SetForegroundColor(theme.info),
        Print(" Note   "),
        SetForegroundColor(theme.key),
        Print("Esc"),
        SetForegroundColor(theme.info),
        Print(" Board   "),
        SetForegroundColor(theme.key),
        Print("q"),
        SetForegroundColor(theme.info),
        Print(" Quit")
    )?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

// Helpers

fn print_centered(
    stdout: &mut io::Stdout,
    y: u16,
    text: &str,
    fg: Color,
    bg: Color,
    term_width: u16,
) -> io::Result<()> {
    let x = term_width.saturating_sub(text.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(fg),
        SetBackgroundColor(bg),
        Print(text)
    )
}

fn print_centered_at(
    stdout: &mut io::Stdout,
    x: u16,
    y: u16,
    width: u16,
    text: &str,
    fg: Color,
    bg: Color,
) -> io::Result<()> {
    let offset = width.saturating_sub(text.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x + offset, y),
        SetForegroundColor(fg),
        SetBackgroundColor(bg),
        Print(text)
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
