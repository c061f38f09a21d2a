use crate::Pos2;

/// The eight offsets of the Moore neighborhood.
pub(super) const NEIGHBOR_OFFSETS: [Pos2; 8] = [
    Pos2 { x: -1, y: -1 },
    Pos2 { x: 0, y: -1 },
    Pos2 { x: 1, y: -1 },
    Pos2 { x: -1, y: 0 },
    Pos2 { x: 1, y: 0 },
    Pos2 { x: -1, y: 1 },
    Pos2 { x: 0, y: 1 },
    Pos2 { x: 1, y: 1 },
];

/// Whether a cell is alive in the next generation, given its current
/// state and the number of live neighbors.
pub(super) fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (_, 3) => true,
        _ => false,
    }
}
