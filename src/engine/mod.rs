mod history;
mod rule;

use self::history::History;
pub use self::history::{HistoryDepth, InvalidHistoryDepth};
use self::rule::{NEIGHBOR_OFFSETS, next_state};
use crate::{CellSet, Pos2, Region};
use std::collections::HashMap;

/// Where the transition rule is evaluated on each forward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Births and deaths happen only inside the region. Live cells
    /// beyond it still count as neighbors but persist unchanged.
    Viewport(Region),
    /// The rule covers every live cell and its whole neighborhood.
    Unbounded,
}

#[derive(Debug)]
pub struct Simulation {
    cells: CellSet,
    scope: RuleScope,
    generation: u64,
    history: History,
}

impl Simulation {
    pub fn new(scope: RuleScope, depth: HistoryDepth) -> Self {
        Self::from_cells(CellSet::new(), scope, depth)
    }

    pub fn from_cells(cells: CellSet, scope: RuleScope, depth: HistoryDepth) -> Self {
        Self {
            cells,
            scope,
            generation: 0,
            history: History::new(depth),
        }
    }

    #[inline]
    pub fn cells(&self) -> &CellSet {
        &self.cells
    }

    /// Write access for manual editing; edits bypass history and the
    /// generation counter.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut CellSet {
        &mut self.cells
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of snapshots currently retained.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Live cells among the eight neighbors of `pos`, the cell itself
    /// excluded.
    pub fn neighbor_count(&self, pos: Pos2) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&offset| self.cells.contains(pos + offset))
            .count() as u8
    }

    /// Advances one generation.
    ///
    /// The rule is applied against the pre-step cells and the result
    /// swapped in whole, so births and deaths within one step never
    /// observe each other. The new generation is then snapshotted; the
    /// very first step also records the seed so it stays reachable by
    /// [`Simulation::step_backward`].
    pub fn step_forward(&mut self) {
        if self.history.is_empty() {
            self.history.push(self.cells.clone());
        }

        self.cells = match self.scope {
            RuleScope::Viewport(region) => self.next_generation_within(region),
            RuleScope::Unbounded => self.next_generation_unbounded(),
        };
        self.generation += 1;
        self.history.push(self.cells.clone());
    }

    /// Reinstates the previous generation, or does nothing when no
    /// earlier snapshot is retained.
    pub fn step_backward(&mut self) {
        if let Some(previous) = self.history.rewind() {
            self.cells = previous.clone();
            self.generation -= 1;
        }
    }

    fn next_generation_within(&self, region: Region) -> CellSet {
        let mut next = CellSet::new();
        // cells beyond the evaluated region carry over untouched
        for pos in self.cells.iter() {
            if !region.contains(pos) {
                next.activate(pos);
            }
        }
        for pos in region.cells() {
            if next_state(self.cells.contains(pos), self.neighbor_count(pos)) {
                next.activate(pos);
            }
        }
        next
    }

    fn next_generation_unbounded(&self) -> CellSet {
        // tally neighborhoods; cells with zero live neighbors never
        // show up, and they could not survive anyway
        let mut counts: HashMap<Pos2, u8> = HashMap::new();
        for pos in self.cells.iter() {
            for offset in NEIGHBOR_OFFSETS {
                *counts.entry(pos + offset).or_insert(0) += 1;
            }
        }

        let mut next = CellSet::new();
        for (pos, neighbors) in counts {
            if next_state(self.cells.contains(pos), neighbors) {
                next.activate(pos);
            }
        }
        next
    }
}
