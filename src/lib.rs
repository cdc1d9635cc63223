//! # klondike-rules
//!
//! A rules engine for Klondike-style solitaire games.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: Pile counts, deal shape, movement
//!    rules, and draw rules come from `GameConfig`. The default config is
//!    classic Klondike.
//!
//! 2. **Speculative Queries Are Cheap**: Move legality checks return `bool`
//!    or `Option` and never fail, so a UI can call them on every drag.
//!
//! 3. **Deterministic**: Shuffles draw from an injected `RandomSource`; the
//!    same seed deals the same game.
//!
//! ## Modules
//!
//! - `core`: Cards, deck, RNG, configuration, snapshots, errors
//! - `zones`: Pile addressing
//! - `rules`: Movement-rule policies and the `SolitaireRules` board
//!
//! ## Example
//!
//! ```
//! use klondike_rules::{Deck, GameRng, GameState, PileId, SolitaireRules};
//!
//! let mut deck = Deck::with_rng(GameRng::new(2024));
//! deck.shuffle();
//!
//! let mut game = SolitaireRules::new();
//! game.deal_cards(&mut deck).unwrap();
//! game.draw_from_stock();
//!
//! if let Some(card) = game.top_card(PileId::Waste) {
//!     for column in 0..game.tableau_columns().len() {
//!         if game.can_place_card_on_tableau(&card, column) {
//!             game.move_cards(PileId::Waste, PileId::Tableau(column), 1);
//!             break;
//!         }
//!     }
//! }
//!
//! let saved = game.export(Some("autosave")).to_document(false).unwrap();
//! let state = GameState::from_document(&saved).unwrap();
//!
//! let mut restored = SolitaireRules::new();
//! restored.import(Some(&state)).unwrap();
//! assert_eq!(restored.tableau_columns(), game.tableau_columns());
//! ```

pub mod core;
pub mod zones;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Card, Color, Rank, Suit,
    Deck, DECK_SIZE,
    GameRng, RandomSource,
    GameCatalog, GameConfig, MAX_DECKS, PileCounts, InitialLayout, MovementRules, DrawRules, Metadata,
    GameState,
    Error, Result,
};

pub use crate::zones::{PileId, PileKind};

pub use crate::rules::{
    SolitaireRules, FreeCells, FOUNDATION_RUN,
    BuildRule, FoundationRule, EmptyTableauRule, EmptyFoundationRule, FreeCellRule,
    RedealPolicy, WinCondition,
};
