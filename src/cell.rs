use std::collections::HashSet;

use crate::{Pos2, Region};

/// Sparse set of live cells keyed by coordinate.
///
/// A coordinate is present iff the cell is alive. Coordinates are
/// unrestricted, so patterns may extend past any rendered viewport.
///
/// ```
/// use lifeterm::{CellSet, Pos2};
///
/// let mut cells = CellSet::new();
/// cells.toggle(Pos2 { x: 2, y: 5 });
/// assert!(cells.contains(Pos2 { x: 2, y: 5 }));
/// assert_eq!(cells.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSet {
    alive: HashSet<Pos2>,
}
impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `pos` alive. No effect if it already is.
    pub fn activate(&mut self, pos: Pos2) {
        self.alive.insert(pos);
    }

    /// Marks `pos` dead. No effect if it already is.
    pub fn deactivate(&mut self, pos: Pos2) {
        self.alive.remove(&pos);
    }

    /// Flips `pos` between alive and dead.
    pub fn toggle(&mut self, pos: Pos2) {
        if !self.alive.remove(&pos) {
            self.alive.insert(pos);
        }
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        self.alive.contains(&pos)
    }

    pub fn clear(&mut self) {
        self.alive.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alive.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.alive.iter().copied()
    }

    /// Activates every cell of `region`.
    pub fn fill(&mut self, region: Region) {
        for pos in region.cells() {
            self.activate(pos);
        }
    }

    /// Redraws `region` from a per-cell coin flip with the given
    /// probability of coming up alive; prior region contents are
    /// replaced. Cells outside the region are untouched.
    pub fn randomize<R: rand::Rng + ?Sized>(
        &mut self,
        region: Region,
        probability: f64,
        rng: &mut R,
    ) {
        for pos in region.cells() {
            if rng.random_bool(probability) {
                self.activate(pos);
            } else {
                self.deactivate(pos);
            }
        }
    }

    /// Toggles every cell of `region`.
    pub fn invert(&mut self, region: Region) {
        for pos in region.cells() {
            self.toggle(pos);
        }
    }
}
impl FromIterator<Pos2> for CellSet {
    fn from_iter<I: IntoIterator<Item = Pos2>>(iter: I) -> Self {
        Self {
            alive: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn activate_and_deactivate_are_idempotent() {
        let mut cells = CellSet::new();
        let target = pos(3, -7);

        cells.activate(target);
        cells.activate(target);
        assert!(cells.contains(target));
        assert_eq!(cells.len(), 1);

        cells.deactivate(target);
        cells.deactivate(target);
        assert!(!cells.contains(target));
        assert!(cells.is_empty());
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut cells = CellSet::new();
        let target = pos(0, 0);

        cells.toggle(target);
        assert!(cells.contains(target));
        cells.toggle(target);
        assert!(!cells.contains(target));

        cells.activate(target);
        cells.toggle(target);
        cells.toggle(target);
        assert!(cells.contains(target));
    }

    #[test]
    fn fill_leaves_outside_cells_alone() {
        let mut cells = CellSet::new();
        cells.activate(pos(10, 10));

        let region = Region::of_size(2, 2);
        cells.fill(region);

        assert_eq!(cells.len(), 5);
        assert!(region.cells().all(|p| cells.contains(p)));
        assert!(cells.contains(pos(10, 10)));
    }

    #[test]
    fn randomize_replaces_region_contents() {
        let mut cells = CellSet::new();
        let region = Region::of_size(4, 4);
        let mut rng = StdRng::seed_from_u64(7);

        cells.fill(region);
        cells.activate(pos(100, 100));
        cells.randomize(region, 0.0, &mut rng);
        assert!(region.cells().all(|p| !cells.contains(p)));
        assert!(cells.contains(pos(100, 100)));

        cells.randomize(region, 1.0, &mut rng);
        assert!(region.cells().all(|p| cells.contains(p)));
    }

    #[test]
    fn invert_flips_region_cells_only() {
        let mut cells = CellSet::new();
        let region = Region::of_size(3, 1);
        cells.activate(pos(1, 0));
        cells.activate(pos(5, 5));

        cells.invert(region);

        assert!(cells.contains(pos(0, 0)));
        assert!(!cells.contains(pos(1, 0)));
        assert!(cells.contains(pos(2, 0)));
        assert!(cells.contains(pos(5, 5)));
    }

    #[test]
    fn clear_empties_everything() {
        let mut cells = CellSet::new();
        cells.fill(Region::of_size(3, 3));
        cells.activate(pos(-4, 9));

        cells.clear();

        assert!(cells.is_empty());
    }
}
