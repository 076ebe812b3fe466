//! Key and mouse mapping from terminal events to session commands.

use crate::gesture::{resolve_swipe, SwipeTracker};
use crate::types::{Command, Direction, LifecycleEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Terminal cells are roughly twice as tall as wide; rows are scaled by this
/// to get comparable horizontal and vertical swipe lengths.
pub const ROW_ASPECT: f32 = 2.0;

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Move(Direction::Down))
        }

        // Session
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::StartCountdown),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),

        // Host lifecycle, simulated from the keyboard
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::Lifecycle(LifecycleEvent::Backgrounded)),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::Lifecycle(LifecycleEvent::Foregrounded)),

        _ => None,
    }
}

/// Feed a mouse event to the tracker; a left-button drag long enough yields a move.
pub fn handle_mouse_event(
    tracker: &mut SwipeTracker,
    event: MouseEvent,
    min_distance: f32,
) -> Option<Command> {
    let x = event.column as f32;
    let y = event.row as f32 * ROW_ASPECT;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            tracker.press(x, y);
            None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let swipe = tracker.release(x, y)?;
            resolve_swipe(swipe, min_distance).map(Command::Move)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Command::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(Command::Move(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(Command::Move(Direction::Right))
        );
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::StartCountdown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(Command::StartCountdown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(Command::TogglePause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(Command::Reset)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('b'))),
            Some(Command::Lifecycle(LifecycleEvent::Backgrounded))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_control_chords_are_not_commands() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_mouse_drag_becomes_move() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(
            handle_mouse_event(&mut tracker, mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), 10.0),
            None
        );
        assert_eq!(
            handle_mouse_event(&mut tracker, mouse(MouseEventKind::Up(MouseButton::Left), 30, 6), 10.0),
            Some(Command::Move(Direction::Right))
        );

        // 8 rows is 16 units after aspect scaling.
        handle_mouse_event(&mut tracker, mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), 10.0);
        assert_eq!(
            handle_mouse_event(&mut tracker, mouse(MouseEventKind::Up(MouseButton::Left), 11, 2), 10.0),
            Some(Command::Move(Direction::Up))
        );
    }

    #[test]
    fn test_short_drag_is_ignored() {
        let mut tracker = SwipeTracker::new();
        handle_mouse_event(&mut tracker, mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), 10.0);
        assert_eq!(
            handle_mouse_event(&mut tracker, mouse(MouseEventKind::Up(MouseButton::Left), 20, 5), 10.0),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
