use std::collections::VecDeque;

use thiserror::Error;

use crate::CellSet;

/// How many snapshots a [`History`] retains before evicting the oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDepth {
    /// Keep at most this many snapshots.
    Bounded(usize),
    /// Never evict.
    Unbounded,
}

/// Raised when a requested history depth is neither positive nor the
/// unbounded sentinel.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid history depth {0}: expected a positive bound or -1 for unbounded")]
pub struct InvalidHistoryDepth(pub i64);

impl HistoryDepth {
    /// Raw depth value that disables the bound.
    pub const UNBOUNDED: i64 = -1;

    /// Validates a raw depth, with `-1` selecting [`HistoryDepth::Unbounded`].
    pub fn from_raw(raw: i64) -> Result<Self, InvalidHistoryDepth> {
        match raw {
            Self::UNBOUNDED => Ok(Self::Unbounded),
            depth if depth > 0 => Ok(Self::Bounded(depth as usize)),
            other => Err(InvalidHistoryDepth(other)),
        }
    }
}
impl Default for HistoryDepth {
    /// 1000 snapshots.
    fn default() -> Self {
        Self::Bounded(1000)
    }
}

/// Past generations, most recent last.
///
/// The snapshot on top always equals the generation currently
/// installed in the engine, so rewinding needs at least two entries.
#[derive(Debug)]
pub(super) struct History {
    snapshots: VecDeque<CellSet>,
    depth: HistoryDepth,
}

impl History {
    pub(super) fn new(depth: HistoryDepth) -> Self {
        Self {
            snapshots: VecDeque::new(),
            depth,
        }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.snapshots.len()
    }
    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Pushes a snapshot, evicting from the front once over the bound.
    pub(super) fn push(&mut self, snapshot: CellSet) {
        self.snapshots.push_back(snapshot);
        if let HistoryDepth::Bounded(depth) = self.depth {
            while self.snapshots.len() > depth {
                self.snapshots.pop_front();
            }
        }
    }

    /// Discards the top snapshot and returns the one before it, which
    /// stays recorded as the new top. `None` when nothing older is held.
    pub(super) fn rewind(&mut self) -> Option<&CellSet> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop_back();
        self.snapshots.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos2;

    fn snapshot(n: i32) -> CellSet {
        let mut cells = CellSet::new();
        cells.activate(Pos2 { x: n, y: 0 });
        cells
    }

    #[test]
    fn from_raw_validates_depths() {
        assert_eq!(HistoryDepth::from_raw(-1), Ok(HistoryDepth::Unbounded));
        assert_eq!(HistoryDepth::from_raw(250), Ok(HistoryDepth::Bounded(250)));
        assert_eq!(HistoryDepth::from_raw(0), Err(InvalidHistoryDepth(0)));
        assert_eq!(HistoryDepth::from_raw(-5), Err(InvalidHistoryDepth(-5)));
    }

    #[test]
    fn push_evicts_the_oldest_beyond_the_bound() {
        let mut history = History::new(HistoryDepth::Bounded(3));
        for n in 0..5 {
            history.push(snapshot(n));
        }

        assert_eq!(history.len(), 3);
        // the two oldest are gone, rewinding walks 4 -> 3 -> 2
        assert_eq!(history.rewind(), Some(&snapshot(3)));
        assert_eq!(history.rewind(), Some(&snapshot(2)));
        assert_eq!(history.rewind(), None);
    }

    #[test]
    fn unbounded_depth_never_evicts() {
        let mut history = History::new(HistoryDepth::Unbounded);
        for n in 0..2_000 {
            history.push(snapshot(n));
        }

        assert_eq!(history.len(), 2_000);
    }

    #[test]
    fn rewind_needs_two_snapshots() {
        let mut history = History::new(HistoryDepth::default());
        assert_eq!(history.rewind(), None);

        history.push(snapshot(0));
        assert_eq!(history.rewind(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn rewind_keeps_the_returned_snapshot_on_top() {
        let mut history = History::new(HistoryDepth::default());
        history.push(snapshot(0));
        history.push(snapshot(1));

        assert_eq!(history.rewind(), Some(&snapshot(0)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.rewind(), None);
    }
}
