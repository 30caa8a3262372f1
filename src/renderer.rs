use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Terminal;

use crate::card::Card;
use crate::table::Table;

/// How long the highlight stays on screen after a reveal click. The whole
/// loop blocks for this duration; no input is processed meanwhile.
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Trait that abstracts the rendering layer.
///
/// The game loop talks only to this trait, so the engine stays
/// renderer-agnostic. `TuiRenderer` is the shipped implementation; tests
/// use a recording stand-in.
pub trait Renderer {
    /// Render the full table.
    fn render(&mut self, table: &Table) -> io::Result<()>;
    /// Render the table with card `index` highlighted, then hold the
    /// frame for `FLASH_DURATION`.
    fn flash(&mut self, table: &Table, index: usize) -> io::Result<()>;
    /// Set the status-strip message shown on subsequent frames.
    fn info(&mut self, msg: &str);
}

/// Which face of a card gets drawn this frame. Exactly one per card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Solid back colour; the prize stays hidden.
    Back,
    /// The prize label, drawn at the card's origin.
    Prize(&'static str),
}

pub fn face_of(card: &Card) -> Face {
    if card.flipped {
        Face::Prize(card.prize.label())
    } else {
        Face::Back
    }
}

// ---------------------------------------------------------------------------
// TUI Renderer
// ---------------------------------------------------------------------------

const BACKGROUND: Color = Color::White;
const CARD_BACK: Color = Color::Blue;
const CARD_FLASH: Color = Color::Yellow;
const PRIZE_TEXT: Color = Color::Black;
const STATUS_TEXT: Color = Color::DarkGray;

const HINT: &str = "Click a card to reveal a prize. Press q to quit.";

/// Full-screen ratatui renderer over a raw-mode alternate screen with
/// mouse capture enabled.
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: String,
}

impl TuiRenderer {
    /// Take over the terminal. Fails if raw mode or the alternate screen
    /// cannot be entered; the caller treats that as fatal setup failure.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(TuiRenderer {
                terminal,
                status: HINT.to_string(),
            }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
                Err(e)
            }
        }
    }

    fn draw(&mut self, table: &Table, flash: Option<usize>) -> io::Result<()> {
        let status = self.status.clone();
        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

            for (i, card) in table.cards.iter().enumerate() {
                let rect = Rect::new(card.rect.x, card.rect.y, card.rect.w, card.rect.h)
                    .intersection(area);
                if rect.is_empty() {
                    continue; // card lies outside a shrunken terminal
                }

                if flash == Some(i) {
                    frame.render_widget(
                        Block::default().style(Style::default().bg(CARD_FLASH)),
                        rect,
                    );
                    continue;
                }

                match face_of(card) {
                    Face::Back => {
                        frame.render_widget(
                            Block::default().style(Style::default().bg(CARD_BACK)),
                            rect,
                        );
                    }
                    Face::Prize(label) => {
                        frame.render_widget(
                            Paragraph::new(label)
                                .style(Style::default().fg(PRIZE_TEXT).bg(BACKGROUND))
                                .wrap(Wrap { trim: false }),
                            rect,
                        );
                    }
                }
            }

            if area.height > 0 {
                let strip = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
                frame.render_widget(
                    Paragraph::new(status.as_str())
                        .style(Style::default().fg(STATUS_TEXT).bg(BACKGROUND)),
                    strip,
                );
            }
        })?;
        Ok(())
    }
}

impl Renderer for TuiRenderer {
    fn render(&mut self, table: &Table) -> io::Result<()> {
        self.draw(table, None)
    }

    fn flash(&mut self, table: &Table, index: usize) -> io::Result<()> {
        self.draw(table, Some(index))?;
        thread::sleep(FLASH_DURATION);
        Ok(())
    }

    fn info(&mut self, msg: &str) {
        self.status = msg.to_string();
    }
}

impl Drop for TuiRenderer {
    /// Best-effort teardown so the shell gets its screen back even when
    /// the loop exits through an error path.
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardRect, Prize};

    fn card() -> Card {
        Card::new(CardRect { x: 0, y: 0, w: 10, h: 5 }, Prize::Chocolate)
    }

    #[test]
    fn unflipped_card_shows_its_back() {
        assert_eq!(face_of(&card()), Face::Back);
    }

    #[test]
    fn flipped_card_shows_its_prize() {
        let mut card = card();
        card.flipped = true;
        assert_eq!(face_of(&card), Face::Prize("一粒巧克力"));
    }
}
