//! Pile addressing.
//!
//! A `PileId` names one pile on a board. Indices are zero-based within
//! their pile kind; whether an index exists depends on the board's
//! configuration, so every engine operation bounds-checks it.

use serde::{Deserialize, Serialize};

/// The kind of a pile, without its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Tableau,
    Foundation,
    Stock,
    Waste,
    FreeCell,
}

/// One pile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileId {
    Tableau(usize),
    Foundation(usize),
    Stock,
    Waste,
    FreeCell(usize),
}

impl PileId {
    #[must_use]
    pub const fn kind(self) -> PileKind {
        match self {
            PileId::Tableau(_) => PileKind::Tableau,
            PileId::Foundation(_) => PileKind::Foundation,
            PileId::Stock => PileKind::Stock,
            PileId::Waste => PileKind::Waste,
            PileId::FreeCell(_) => PileKind::FreeCell,
        }
    }

    /// Index within the pile kind; `None` for the single stock and waste.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            PileId::Tableau(i) | PileId::Foundation(i) | PileId::FreeCell(i) => Some(i),
            PileId::Stock | PileId::Waste => None,
        }
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileId::Tableau(i) => write!(f, "Tableau({})", i),
            PileId::Foundation(i) => write!(f, "Foundation({})", i),
            PileId::Stock => write!(f, "Stock"),
            PileId::Waste => write!(f, "Waste"),
            PileId::FreeCell(i) => write!(f, "FreeCell({})", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_index() {
        assert_eq!(PileId::Tableau(3).kind(), PileKind::Tableau);
        assert_eq!(PileId::Tableau(3).index(), Some(3));
        assert_eq!(PileId::Stock.index(), None);
        assert_eq!(PileId::FreeCell(1).kind(), PileKind::FreeCell);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PileId::Foundation(2)), "Foundation(2)");
        assert_eq!(format!("{}", PileId::Waste), "Waste");
    }
}
