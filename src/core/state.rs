//! Game state snapshots.
//!
//! `GameState` is a flat, serializable copy of a board: every pile as an
//! ordered list of cards, free cells with explicit empty slots, per-column
//! face-up flags, the originating variant name, and a free-text note.
//!
//! Snapshots are plain data. They are produced by
//! `SolitaireRules::export` and consumed by `SolitaireRules::import`; in
//! between they can be written as JSON documents or compact binary.
//!
//! ## Face-up flags
//!
//! The engine does not track card orientation, so exported snapshots carry
//! one empty `face_up` list per column. A presentation layer may fill them
//! in before saving; a non-empty list must then match its column's length.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::config::to_json;
use super::error::{ensure_not_blank, from_json_error, into_deserialization, Error, Result};
use crate::rules::SolitaireRules;

/// Serializable board snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameState {
    /// Stock, bottom to top.
    pub stock: Vec<Card>,
    /// Waste, bottom to top.
    pub waste: Vec<Card>,
    /// One list per foundation pile.
    pub foundations: Vec<Vec<Card>>,
    /// One list per tableau column.
    pub tableau: Vec<Vec<Card>>,
    /// Free-cell slots; `None` is an empty slot.
    pub free_cells: Vec<Option<Card>>,
    /// Face-up flags per tableau column, parallel to `tableau`.
    pub face_up: Vec<Vec<bool>>,
    /// Name of the variant the board was playing, if known.
    pub game_name: Option<String>,
    /// Seed of the shuffle that dealt the board, if it came from a seeded
    /// source.
    pub deal_seed: Option<u64>,
    pub note: String,
}

impl GameState {
    /// Snapshot `board`. See `SolitaireRules::export`.
    #[must_use]
    pub fn export(board: &SolitaireRules, note: Option<&str>) -> Self {
        board.export(note)
    }

    /// Restore `state` onto `board`. See `SolitaireRules::import`.
    pub fn import(board: &mut SolitaireRules, state: Option<&GameState>) -> Result<()> {
        board.import(state)
    }

    /// Attach face-up flags for the tableau columns.
    #[must_use]
    pub fn with_face_up(mut self, face_up: Vec<Vec<bool>>) -> Self {
        self.face_up = face_up;
        self
    }

    /// Cards held by the snapshot across every pile.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let piles: usize = self
            .foundations
            .iter()
            .chain(&self.tableau)
            .map(Vec::len)
            .sum();
        piles + self.stock.len() + self.waste.len() + self.free_cells.iter().flatten().count()
    }

    /// Check that every non-empty face-up list matches its column.
    pub fn validate(&self) -> Result<()> {
        for (i, flags) in self.face_up.iter().enumerate() {
            if flags.is_empty() {
                continue;
            }
            let column_len = self.tableau.get(i).map_or(0, Vec::len);
            if flags.len() != column_len {
                return Err(Error::InvalidArgument(format!(
                    "column {} has {} cards but {} face-up flags",
                    i,
                    column_len,
                    flags.len()
                )));
            }
        }
        Ok(())
    }

    /// Serialize to a JSON document.
    pub fn to_document(&self, pretty: bool) -> Result<String> {
        to_json(self, pretty)
    }

    /// Parse a JSON document.
    ///
    /// A document that is literally `null` is `Error::NullState`; blank or
    /// malformed text is `Error::Parse`; anything else that does not describe
    /// a valid snapshot is `Error::Deserialization`.
    pub fn from_document(text: &str) -> Result<Self> {
        ensure_not_blank(text)?;
        let state: Option<GameState> = serde_json::from_str(text).map_err(from_json_error)?;
        let state = state.ok_or(Error::NullState)?;
        state.validate().map_err(into_deserialization)?;
        Ok(state)
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| Error::InvalidArgument(format!("snapshot cannot be encoded: {e}")))
    }

    /// Decode from `to_bytes` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::Parse("snapshot bytes are empty".to_string()));
        }
        let state: GameState =
            bincode::deserialize(bytes).map_err(|e| Error::Deserialization(e.to_string()))?;
        state.validate().map_err(into_deserialization)?;
        Ok(state)
    }
}
