//! Pile addressing for the solitaire board.
//!
//! ## Key Types
//!
//! - `PileId`: A specific pile (`Tableau(2)`, `Stock`, `FreeCell(0)`, ...)
//! - `PileKind`: The pile's kind without an index

pub mod pile;

pub use pile::{PileId, PileKind};
