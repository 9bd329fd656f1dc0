//! Basic example of using the word-search engine

use wordsearch_core::{Generator, SelectionOutcome, Session, Story};

fn main() {
    // Generate the built-in puzzle
    let story = Story::reference();
    println!("Generating \"{}\" ({}x{})...\n", story.title, story.grid_size, story.grid_size);

    let mut generator = Generator::new();
    let puzzle = match generator.generate(&story.words, story.grid_size) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("bad word list: {}", err);
            return;
        }
    };

    println!("{}", puzzle.grid);

    // Show what landed
    println!("Hidden words: {}", puzzle.placements.len());
    for placement in &puzzle.placements {
        println!(
            "  {:<9} {} -> {}",
            placement.spec.word, placement.start, placement.end
        );
    }
    if !puzzle.all_words_placed() {
        println!("Skipped: {:?}", puzzle.unplaced());
    }

    // Play it by dragging along every placement
    println!("\nPlaying the puzzle...");
    let targets: Vec<_> = puzzle
        .placements
        .iter()
        .map(|p| (p.start, p.end))
        .collect();
    let mut session = Session::new(puzzle);
    for (start, end) in targets {
        if let SelectionOutcome::Found(hit) = session.select(start, end) {
            let (found, total) = session.progress();
            println!("  found {:<9} ({}/{})", hit.word, found, total);
        }
    }

    if session.is_complete() {
        println!("\n{}", story.finale.heading);
        println!("{}", story.finale.line);
        println!("{}", story.finale.signoff);
    }
}
