//! Non-blocking key input.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

/// Source of key presses. `next_key` never blocks.
pub trait KeySource {
    /// Returns the next pending key, or `None` when nothing is queued.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Reads keys from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        // Drain non-key events (resize, focus) so they don't shadow a key.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

/// Replays a fixed key sequence, one key per call.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_scripted_keys_drain() {
        let mut keys = ScriptedKeys::new([
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
        ]);
        assert_eq!(keys.next_key().unwrap().unwrap().code, KeyCode::Char('p'));
        assert_eq!(keys.next_key().unwrap().unwrap().code, KeyCode::Enter);
        assert!(keys.next_key().unwrap().is_none());
    }
}
