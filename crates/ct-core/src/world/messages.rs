//! In-game combat log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::MESSAGE_HISTORY_LEN;

/// Messages produced while resolving turns
///
/// `current` holds what happened since the last [`MessageLog::end_turn`];
/// `history` keeps a bounded tail of older lines for UI consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    current: Vec<String>,
    history: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::debug!("{msg}");
        self.current.push(msg);
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub fn history(&self) -> impl Iterator<Item = &String> {
        self.history.iter()
    }

    pub fn last(&self) -> Option<&str> {
        self.current
            .last()
            .or_else(|| self.history.back())
            .map(String::as_str)
    }

    /// Move this turn's lines into history
    pub fn end_turn(&mut self) {
        for msg in self.current.drain(..) {
            if self.history.len() == MESSAGE_HISTORY_LEN {
                self.history.pop_front();
            }
            self.history.push_back(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_turn_moves_to_history() {
        let mut log = MessageLog::new();
        log.push("a");
        log.push("b");
        assert_eq!(log.current().len(), 2);
        log.end_turn();
        assert!(log.current().is_empty());
        assert_eq!(log.history().count(), 2);
        assert_eq!(log.last(), Some("b"));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut log = MessageLog::new();
        for i in 0..(MESSAGE_HISTORY_LEN + 10) {
            log.push(format!("line {i}"));
        }
        log.end_turn();
        assert_eq!(log.history().count(), MESSAGE_HISTORY_LEN);
        assert_eq!(log.history().next().map(String::as_str), Some("line 10"));
    }
}
