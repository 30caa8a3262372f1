use std::io;

use crossterm::event;

use crate::command::{self, Command};
use crate::history::{unix_now, History, SessionRecord};
use crate::renderer::Renderer;
use crate::table::Table;

/// The main game loop. `renderer` is injected so the engine stays
/// renderer-agnostic; tests drive `handle` with a recording stand-in.
pub struct Game<R: Renderer> {
    table: Table,
    renderer: R,
    history: History,
    session: SessionRecord,
}

impl<R: Renderer> Game<R> {
    pub fn new(table: Table, renderer: R, seed: Option<u64>) -> Self {
        Game {
            table,
            renderer,
            history: History::load(),
            session: SessionRecord::new(seed),
        }
    }

    /// Run the loop until the player quits: block on the next terminal
    /// event, translate it, dispatch, repaint. Returns after the session
    /// has been appended to the ledger.
    pub fn run(&mut self) -> io::Result<()> {
        self.renderer.render(&self.table)?;

        loop {
            let event = event::read()?;
            let Some(cmd) = command::translate(&event) else {
                continue;
            };
            if self.handle(cmd)? {
                break;
            }
            self.renderer.render(&self.table)?;
        }

        self.finish();
        Ok(())
    }

    /// Dispatch a command. Returns `true` if the game should exit.
    fn handle(&mut self, cmd: Command) -> io::Result<bool> {
        match cmd {
            Command::Quit => return Ok(true),
            Command::Redraw => {}
            Command::Reveal { x, y } => {
                if let Some(index) = self.table.flip_at(x, y) {
                    self.renderer.flash(&self.table, index)?;

                    let prize = self.table.cards[index].prize;
                    self.session.revealed.push(prize);

                    if self.table.all_revealed() {
                        self.renderer
                            .info(&format!("You won {}! All cards are revealed.", prize.label()));
                    } else {
                        self.renderer.info(&format!("You won {}!", prize.label()));
                    }
                }
            }
        }
        Ok(false)
    }

    /// Close out the session record and persist the ledger.
    fn finish(&mut self) {
        self.session.ended = Some(unix_now());
        self.history.records.push(self.session.clone());
        self.history.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Prize;
    use crate::table::{Geometry, NUM_CARDS};

    /// Records every call the game makes instead of touching a terminal.
    #[derive(Default)]
    struct RecordingRenderer {
        renders: usize,
        flashes: Vec<usize>,
        messages: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, _table: &Table) -> io::Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn flash(&mut self, _table: &Table, index: usize) -> io::Result<()> {
            self.flashes.push(index);
            Ok(())
        }

        fn info(&mut self, msg: &str) {
            self.messages.push(msg.to_string());
        }
    }

    fn test_game() -> Game<RecordingRenderer> {
        let geometry = Geometry {
            origin_x: 50,
            origin_y: 200,
            card_w: 100,
            card_h: 150,
        };
        let table = Table::deal_with_prizes(
            &geometry,
            vec![
                Prize::Milk,
                Prize::Chips,
                Prize::Chocolate,
                Prize::ExamPapers,
                Prize::Squats,
            ],
        );
        Game::new(table, RecordingRenderer::default(), None)
    }

    #[test]
    fn reveal_inside_a_card_flashes_and_records() {
        let mut game = test_game();
        let quit = game.handle(Command::Reveal { x: 60, y: 210 }).unwrap();

        assert!(!quit);
        assert_eq!(game.renderer.flashes, vec![0]);
        assert_eq!(game.session.revealed, vec![Prize::Milk]);
        assert!(game.renderer.messages.last().unwrap().contains("一瓶盒牛奶"));
    }

    #[test]
    fn reveal_on_a_flipped_card_does_nothing() {
        let mut game = test_game();
        game.handle(Command::Reveal { x: 60, y: 210 }).unwrap();
        game.handle(Command::Reveal { x: 60, y: 210 }).unwrap();

        assert_eq!(game.renderer.flashes, vec![0]);
        assert_eq!(game.session.revealed, vec![Prize::Milk]);
    }

    #[test]
    fn reveal_outside_every_card_does_nothing() {
        let mut game = test_game();
        game.handle(Command::Reveal { x: 160, y: 210 }).unwrap();

        assert!(game.renderer.flashes.is_empty());
        assert!(game.session.revealed.is_empty());
        assert!(game.renderer.messages.is_empty());
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut game = test_game();
        assert!(game.handle(Command::Quit).unwrap());
    }

    #[test]
    fn redraw_changes_no_state() {
        let mut game = test_game();
        let quit = game.handle(Command::Redraw).unwrap();

        assert!(!quit);
        assert!(game.table.cards.iter().all(|c| !c.flipped));
    }

    #[test]
    fn revealing_everything_is_announced() {
        let mut game = test_game();
        for i in 0..NUM_CARDS {
            let rect = game.table.cards[i].rect;
            game.handle(Command::Reveal { x: rect.x, y: rect.y }).unwrap();
        }

        assert_eq!(game.session.revealed.len(), NUM_CARDS);
        assert!(game
            .renderer
            .messages
            .last()
            .unwrap()
            .contains("All cards are revealed"));
    }
}
