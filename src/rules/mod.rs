//! Solitaire rules.
//!
//! - `policy`: Movement-rule families parsed from variant documents
//! - `engine`: `SolitaireRules`, the live board and its state machine

pub mod engine;
pub mod policy;

pub use engine::{FreeCells, SolitaireRules, FOUNDATION_RUN};
pub use policy::{
    BuildRule, EmptyFoundationRule, EmptyTableauRule, FoundationRule, FreeCellRule,
    RedealPolicy, WinCondition,
};
