//! Bounded undo/redo snapshots of the annotation list.

use super::annotation::Annotation;
use std::collections::VecDeque;

/// Maximum number of snapshots kept on each side of the present.
pub const HISTORY_LIMIT: usize = 3;

/// Past, present and future annotation lists.
///
/// `past` is ordered oldest to newest; `future` is ordered next-to-redo first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    past: VecDeque<Vec<Annotation>>,
    present: Vec<Annotation>,
    future: VecDeque<Vec<Annotation>>,
}

impl History {
    /// Starts from an existing list with empty undo and redo stacks.
    pub fn new(present: Vec<Annotation>) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
        }
    }

    pub fn present(&self) -> &[Annotation] {
        &self.present
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Records `next` as the new present.
    ///
    /// Returns `false` without touching any stack when `next` equals the present.
    pub fn push(&mut self, next: Vec<Annotation>) -> bool {
        if next == self.present {
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.record_past(previous);
        true
    }

    /// Replaces the present without recording anything.
    ///
    /// Used while a drag is in motion; [`commit_live`](Self::commit_live) records
    /// the move once the pointer is released.
    pub fn set_live(&mut self, live: Vec<Annotation>) {
        self.present = live;
    }

    /// Mutable access to the present for in-motion edits.
    pub fn live_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.present
    }

    /// Commits a live edit, using `snapshot` (the list before the edit began)
    /// as the entry moved into `past`.
    ///
    /// Returns `false` when the live list ended up equal to the snapshot.
    pub fn commit_live(&mut self, snapshot: Vec<Annotation>) -> bool {
        if snapshot == self.present {
            return false;
        }
        self.record_past(snapshot);
        true
    }

    /// Steps back one snapshot. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        self.future.truncate(HISTORY_LIMIT);
        true
    }

    /// Steps forward one snapshot. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        if self.past.len() > HISTORY_LIMIT {
            self.past.pop_front();
        }
        true
    }

    fn record_past(&mut self, previous: Vec<Annotation>) {
        self.past.push_back(previous);
        if self.past.len() > HISTORY_LIMIT {
            self.past.pop_front();
        }
        self.future.clear();
    }
}
