//! Core types: cards, deck, random sources, configuration, snapshots.
//!
//! This module contains the leaf building blocks. Variants are described by
//! `GameConfig` rather than by changing the engine.

pub mod card;
pub mod rng;
pub mod deck;
pub mod config;
pub mod state;
pub mod error;

pub use card::{Card, Color, Rank, Suit};
pub use rng::{GameRng, RandomSource};
pub use deck::{Deck, DECK_SIZE};
pub use config::{MAX_DECKS, DrawRules, GameCatalog, GameConfig, InitialLayout, Metadata, MovementRules, PileCounts};
pub use state::GameState;
pub use error::{Error, Result};
