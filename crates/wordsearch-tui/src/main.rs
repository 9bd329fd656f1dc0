#![allow(clippy::too_many_arguments)]

mod animations;
mod app;
mod keepsake;
mod render;
mod theme;

use app::App;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};
use theme::ThemeKind;
use wordsearch_core::Story;

#[derive(Parser)]
#[command(name = "wordsearch", about = "A word-search puzzle that tells a story")]
struct Args {
    /// Reproduce a specific board layout
    #[arg(long)]
    seed: Option<u64>,

    /// Load a story from a JSON file instead of the built-in one
    #[arg(long, value_name = "FILE")]
    story: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Rose)]
    theme: ThemeArg,

    /// Skip reading and writing the keepsake file
    #[arg(long)]
    no_save: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum ThemeArg {
    Rose,
    Dark,
    Contrast,
}

impl From<ThemeArg> for ThemeKind {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Rose => ThemeKind::Rose,
            ThemeArg::Dark => ThemeKind::Dark,
            ThemeArg::Contrast => ThemeKind::HighContrast,
        }
    }
}

fn load_story(path: &PathBuf) -> Result<Story, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("could not parse {}: {}", path.display(), e))
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let story = match args.story.as_ref() {
        Some(path) => match load_story(path) {
            Ok(story) => story,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Story::reference(),
    };

    // Build the app before touching the terminal so errors print cleanly
    let app = match App::new(story, args.seed, args.theme.into(), args.no_save) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Determine tick rate based on screen mode
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &mut app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => match app.handle_mouse(mouse) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                },
                _ => {}
            }
        }

        // Tick animations and timer
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
