use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// All commands a player can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Try to reveal the card under the given cell.
    Reveal { x: u16, y: u16 },
    /// Repaint without touching game state (terminal was resized).
    Redraw,
    /// Quit the game.
    Quit,
}

/// Translate a raw terminal event into a `Command`.
///
/// Returns `None` for events the game ignores: key releases, mouse
/// movement and scrolling, button releases, and unbound keys.
pub fn translate(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            match (key.code, key.modifiers) {
                (KeyCode::Char('q') | KeyCode::Char('Q'), _) => Some(Command::Quit),
                (KeyCode::Esc, _) => Some(Command::Quit),
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Command::Quit),
                _ => None,
            }
        }
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(Command::Reveal {
                x: mouse.column,
                y: mouse.row,
            })
        }
        Event::Resize(_, _) => Some(Command::Redraw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn left_press_becomes_reveal() {
        let event = mouse(MouseEventKind::Down(MouseButton::Left), 60, 10);
        assert_eq!(translate(&event), Some(Command::Reveal { x: 60, y: 10 }));
    }

    #[test]
    fn other_mouse_activity_is_ignored() {
        for kind in [
            MouseEventKind::Down(MouseButton::Right),
            MouseEventKind::Up(MouseButton::Left),
            MouseEventKind::Moved,
            MouseEventKind::ScrollUp,
            MouseEventKind::ScrollDown,
        ] {
            assert_eq!(translate(&mouse(kind, 5, 5)), None);
        }
    }

    #[test]
    fn quit_keys() {
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Char('Q'), KeyModifiers::SHIFT),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(translate(&event), Some(Command::Quit));
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(translate(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(translate(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(translate(&Event::Key(event)), None);
    }

    #[test]
    fn resize_requests_redraw() {
        assert_eq!(translate(&Event::Resize(80, 24)), Some(Command::Redraw));
    }
}
