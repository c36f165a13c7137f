//! Deferred style mutations.
//!
//! A layer whose source has not finished loading on the peer waits here
//! until the next flush.

use crate::command::Command;
use maplink_types::{LayerId, SourceId};
use std::collections::VecDeque;
use tracing::debug;

/// A mutation waiting for its dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    /// Layer the mutation creates.
    pub target: LayerId,
    /// Source that must be loaded first.
    pub dependency: SourceId,
    /// Command to send once it is.
    pub command: Command,
}

/// FIFO queue of pending mutations.
#[derive(Debug, Default)]
pub struct PendingMutationQueue {
    queue: VecDeque<PendingMutation>,
}

impl PendingMutationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Tasks in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingMutation> {
        self.queue.iter()
    }

    /// Returns `true` if a task targets `layer`.
    #[must_use]
    pub fn is_pending(&self, layer: &LayerId) -> bool {
        self.queue.iter().any(|t| &t.target == layer)
    }

    pub(crate) fn push(&mut self, task: PendingMutation) {
        debug!(
            layer = %task.target,
            source = %task.dependency,
            queue_size = self.queue.len() + 1,
            "deferring layer until source loads"
        );
        self.queue.push_back(task);
    }

    /// Removes every task, in FIFO order.
    pub(crate) fn take_all(&mut self) -> Vec<PendingMutation> {
        self.queue.drain(..).collect()
    }

    /// Discards tasks targeting `layer`. Returns how many.
    pub(crate) fn discard_target(&mut self, layer: &LayerId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|t| &t.target != layer);
        let discarded = before - self.queue.len();
        if discarded > 0 {
            debug!(layer = %layer, discarded, "discarded pending mutations for removed layer");
        }
        discarded
    }

    /// Discards tasks depending on `source`. Returns their targets.
    pub(crate) fn discard_dependency(&mut self, source: &SourceId) -> Vec<LayerId> {
        let mut targets = Vec::new();
        self.queue.retain(|t| {
            if &t.dependency == source {
                targets.push(t.target.clone());
                false
            } else {
                true
            }
        });
        if !targets.is_empty() {
            debug!(source = %source, discarded = targets.len(), "discarded pending mutations for removed source");
        }
        targets
    }

    /// Discards everything. Returns how many.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.queue.len();
        self.queue.clear();
        count
    }
}
