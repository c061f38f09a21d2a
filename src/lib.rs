//! Core engine for an interactive Game of Life with rewindable history.

pub mod cell;
pub mod engine;
pub mod pos;
pub mod region;

pub use cell::CellSet;
pub use engine::{HistoryDepth, InvalidHistoryDepth, RuleScope, Simulation};
pub use pos::Pos2;
pub use region::Region;
