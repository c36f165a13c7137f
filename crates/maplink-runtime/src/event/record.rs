//! Bounded record of recent gesture activity.
//!
//! Backed by a [`VecDeque`]; when full, the oldest entry is evicted on each
//! push. The event processor writes touch-end events and double-tap markers
//! here and reads it back on `idle`.

use maplink_event::Event;
use std::collections::VecDeque;
use std::time::Instant;

/// Default number of entries kept.
pub const DEFAULT_RECORD_CAPACITY: usize = 20;

/// One record entry.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEntry {
    /// A recorded peer event.
    Event(Event),
    /// Two touch ends arrived within the sensitivity window.
    DoubleTapMarker {
        /// Receive time of the second touch end.
        at: Instant,
    },
}

/// Circular event record.
#[derive(Debug)]
pub struct EventRecord {
    entries: VecDeque<RecordEntry>,
    capacity: usize,
}

impl EventRecord {
    /// Creates a record with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECORD_CAPACITY)
    }

    /// Creates a record holding at most `capacity` entries.
    ///
    /// A capacity of 0 is treated as 1.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest if at capacity.
    pub fn push(&mut self, entry: RecordEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns `true` if any entry is a double-tap marker.
    #[must_use]
    pub fn has_double_tap_marker(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, RecordEntry::DoubleTapMarker { .. }))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RecordEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplink_event::EventName;

    fn touch_end() -> RecordEntry {
        RecordEntry::Event(Event::new(EventName::TouchEnd))
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut record = EventRecord::with_capacity(3);
        record.push(RecordEntry::DoubleTapMarker { at: Instant::now() });
        for _ in 0..3 {
            record.push(touch_end());
        }
        assert_eq!(record.len(), 3);
        assert!(!record.has_double_tap_marker(), "marker was evicted");
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut record = EventRecord::with_capacity(0);
        record.push(touch_end());
        record.push(touch_end());
        assert_eq!(record.capacity(), 1);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn clear_empties() {
        let mut record = EventRecord::new();
        assert_eq!(record.capacity(), DEFAULT_RECORD_CAPACITY);
        record.push(touch_end());
        record.push(RecordEntry::DoubleTapMarker { at: Instant::now() });
        assert!(record.has_double_tap_marker());
        record.clear();
        assert!(record.is_empty());
    }
}
