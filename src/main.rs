mod audio;
mod card;
mod command;
mod game;
mod history;
mod renderer;
mod table;

use game::Game;
use renderer::TuiRenderer;
use table::{Geometry, Table, NUM_CARDS};

fn main() {
    // Parse optional seed from command-line arguments for a reproducible row.
    let seed: Option<u64> = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok());

    // Queue the background music before the terminal is taken over, so the
    // degrade-to-silence warnings stay visible on the normal screen.
    let _music = audio::Jukebox::start(audio::MUSIC_PATH);

    let geometry = Geometry::default();
    let table = match seed {
        Some(seed) => Table::deal_seeded(NUM_CARDS, &geometry, seed),
        None => Table::deal_random(NUM_CARDS, &geometry),
    };

    let renderer = match TuiRenderer::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[ERR ] Could not set up the terminal: {e}");
            std::process::exit(1);
        }
    };

    let mut game = Game::new(table, renderer, seed);
    let result = game.run();
    drop(game); // hands the screen back before anything is printed

    match result {
        Ok(()) => println!("Thanks for playing. Goodbye!"),
        Err(e) => {
            eprintln!("[ERR ] Terminal I/O failed: {e}");
            std::process::exit(1);
        }
    }
}
