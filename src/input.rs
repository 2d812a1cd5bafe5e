/// Keyboard mapping.
///
/// Terminals with the keyboard-enhancement protocol (kitty, Ghostty, …)
/// report proper `Press` / `Repeat` / `Release` events.  Classic terminals
/// only send `Press`, with OS key-repeat showing up as repeated presses, so
/// the fast-fall key is treated as released once it has been silent for
/// `HOLD_WINDOW`.
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Long enough to bridge the initial OS key-repeat delay (≈250–500 ms).
pub const HOLD_WINDOW: Duration = Duration::from_millis(550);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Jump,
    FastFallPress,
    FastFallRelease,
    Quit,
}

/// Translate one terminal key event into a game action, if it maps to one.
pub fn translate(event: &KeyEvent) -> Option<Action> {
    let KeyEvent {
        code,
        kind,
        modifiers,
        ..
    } = *event;
    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => match code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => {
                Some(Action::Jump)
            }
            KeyCode::Down => Some(Action::FastFallPress),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                if kind == KeyEventKind::Press =>
            {
                Some(Action::Quit)
            }
            _ => None,
        },
        KeyEventKind::Release => match code {
            KeyCode::Down => Some(Action::FastFallRelease),
            _ => None,
        },
    }
}

/// Tracks when the fast-fall key was last seen so a release can be inferred
/// on terminals that never report one.
#[derive(Clone, Debug, Default)]
pub struct HoldTracker {
    last_seen: Option<Duration>,
}

impl HoldTracker {
    pub fn seen(&mut self, now: Duration) {
        self.last_seen = Some(now);
    }

    pub fn clear(&mut self) {
        self.last_seen = None;
    }

    pub fn is_held(&self) -> bool {
        self.last_seen.is_some()
    }

    /// True once, when the key has been silent for longer than `HOLD_WINDOW`.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.last_seen {
            Some(last) if now.saturating_sub(last) > HOLD_WINDOW => {
                self.last_seen = None;
                true
            }
            _ => false,
        }
    }
}
