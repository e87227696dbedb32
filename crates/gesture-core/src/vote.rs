//! Sliding majority-vote window

use std::collections::VecDeque;

/// Bounded window of per-frame candidates. `None` records a frame that
/// produced no candidate and still counts toward the window length.
#[derive(Debug, Clone)]
pub struct VoteHistory<T> {
    votes: VecDeque<Option<T>>,
    capacity: usize,
}

impl<T: PartialEq> VoteHistory<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            votes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a vote, evicting the oldest once full
    pub fn push(&mut self, vote: Option<T>) {
        if self.votes.len() >= self.capacity {
            self.votes.pop_front();
        }
        self.votes.push_back(vote);
    }

    /// Fraction of the current window held by `candidate`
    pub fn share_of(&self, candidate: &T) -> f64 {
        if self.votes.is_empty() {
            return 0.0;
        }
        let count = self
            .votes
            .iter()
            .filter(|v| v.as_ref() == Some(candidate))
            .count();
        count as f64 / self.votes.len() as f64
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn clear(&mut self) {
        self.votes.clear();
    }
}
