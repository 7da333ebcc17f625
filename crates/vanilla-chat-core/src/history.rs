//! Conversation history: an ordered list of completed [`Turn`]s.
//!
//! The store itself grows without bound unless a retention limit is set via
//! [`History::with_max_turns`]. How much of it is *sent* is decided
//! separately by the [`RequestBuilder`](crate::request::RequestBuilder).
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One completed prompt/result exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub prompt: String,
    pub result: String,
}

impl Turn {
    pub fn new(prompt: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            result: result.into(),
        }
    }
}

/// Oldest-first sequence of turns. Append-only, except for [`History::clear`]
/// and retention eviction.
#[derive(Debug, Clone, Default)]
pub struct History {
    turns: VecDeque<Turn>,
    max_turns: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_turns` turns, evicting the oldest first.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = Some(max_turns);
        self.evict();
        self
    }

    pub fn max_turns(&self) -> Option<usize> {
        self.max_turns
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        self.evict();
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> impl DoubleEndedIterator<Item = &Turn> + ExactSizeIterator {
        self.turns.iter()
    }

    /// The newest `n` turns, still in chronological order.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Turn> {
        self.turns.iter().skip(self.turns.len().saturating_sub(n))
    }

    fn evict(&mut self) {
        if let Some(max) = self.max_turns {
            while self.turns.len() > max {
                self.turns.pop_front();
            }
        }
    }
}

impl Extend<Turn> for History {
    fn extend<I: IntoIterator<Item = Turn>>(&mut self, iter: I) {
        for turn in iter {
            self.push(turn);
        }
    }
}

impl FromIterator<Turn> for History {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        let mut history = History::new();
        history.extend(iter);
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> History {
        (0..n)
            .map(|i| Turn::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn push_keeps_insertion_order() {
        let history = sample(3);
        let prompts: Vec<_> = history.turns().map(|t| t.prompt.as_str()).collect();
        assert_eq!(prompts, ["q0", "q1", "q2"]);
    }

    #[test]
    fn recent_returns_newest_in_chronological_order() {
        let history = sample(5);
        let prompts: Vec<_> = history.recent(2).map(|t| t.prompt.as_str()).collect();
        assert_eq!(prompts, ["q3", "q4"]);

        assert_eq!(history.recent(10).count(), 5);
        assert_eq!(history.recent(0).count(), 0);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut history = sample(2);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn unbounded_by_default() {
        let history = sample(100);
        assert_eq!(history.len(), 100);
        assert_eq!(history.max_turns(), None);
    }

    #[test]
    fn retention_evicts_oldest() {
        let mut history = History::new().with_max_turns(2);
        history.push(Turn::new("q0", "a0"));
        history.push(Turn::new("q1", "a1"));
        history.push(Turn::new("q2", "a2"));

        let prompts: Vec<_> = history.turns().map(|t| t.prompt.as_str()).collect();
        assert_eq!(prompts, ["q1", "q2"]);
    }
}
