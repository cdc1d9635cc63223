//! Game variant configuration.
//!
//! A `GameConfig` describes one solitaire variant:
//! - `PileCounts`: how many tableau, foundation, waste, and free-cell piles
//! - `InitialLayout`: how many cards each tableau column is dealt
//! - `MovementRules`: which moves are legal between pile kinds
//! - `DrawRules`: cards per draw and how often the waste may be recycled
//!
//! Configurations are loaded from JSON documents. A `GameCatalog` holds
//! several variants and looks them up by case-insensitive name.
//!
//! ```
//! use klondike_rules::core::GameCatalog;
//!
//! let catalog = GameCatalog::from_document(r#"{
//!     "games": [{ "gameName": "Thoughtful", "drawRules": { "drawCount": 3 } }]
//! }"#).unwrap();
//!
//! let game = catalog.find_game("thoughtful").unwrap();
//! assert_eq!(game.draw_rules.draw_count, 3);
//! assert_eq!(game.piles.tableau, 7);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::deck::DECK_SIZE;
use super::error::{ensure_not_blank, from_json_error, into_deserialization, Error, Result};
use crate::rules::policy::{
    BuildRule, EmptyFoundationRule, EmptyTableauRule, FoundationRule, FreeCellRule,
    RedealPolicy, WinCondition,
};

/// Largest deck count a variant may declare.
pub const MAX_DECKS: usize = 8;

/// Pile counts for a variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PileCounts {
    pub tableau: usize,
    pub foundation: usize,
    pub waste: usize,
    pub freecells: usize,
}

impl Default for PileCounts {
    fn default() -> Self {
        Self {
            tableau: 7,
            foundation: 4,
            waste: 1,
            freecells: 0,
        }
    }
}

/// Initial deal shape.
///
/// An empty `tableau` list means the triangular default: column `i` is
/// dealt `i + 1` cards. `face_up` is advisory for the presentation layer;
/// the engine itself does not track card orientation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitialLayout {
    /// Cards dealt to each tableau column.
    pub tableau: Vec<usize>,
    /// Whether each column's top card is dealt face up.
    pub face_up: Vec<bool>,
}

/// Movement rules between pile kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovementRules {
    pub tableau_to_tableau: BuildRule,
    pub tableau_to_foundation: FoundationRule,
    pub waste_to_tableau: BuildRule,
    pub waste_to_foundation: FoundationRule,
    pub empty_tableau: EmptyTableauRule,
    pub empty_foundation: EmptyFoundationRule,
    pub free_cell: FreeCellRule,
}

/// Stock draw rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawRules {
    /// Cards moved from stock to waste per draw.
    pub draw_count: usize,
    /// How many times the waste may be turned back into the stock.
    pub redeals: RedealPolicy,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            draw_count: 1,
            redeals: RedealPolicy::Unlimited,
        }
    }
}

/// Descriptive metadata. Not interpreted by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub author: Option<String>,
    pub version: Option<String>,
    pub created: Option<String>,
    pub description: Option<String>,
}

/// Complete variant configuration.
///
/// Missing document fields take the classic Klondike defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub game_name: String,
    pub decks: usize,
    pub piles: PileCounts,
    pub initial_layout: InitialLayout,
    pub movement_rules: MovementRules,
    pub draw_rules: DrawRules,
    pub win_condition: WinCondition,
    /// Scoring scheme name. Scoring is left to the host.
    pub scoring: Option<String>,
    pub metadata: Metadata,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::klondike()
    }
}

impl GameConfig {
    /// Classic single-deck, draw-one Klondike.
    #[must_use]
    pub fn klondike() -> Self {
        Self {
            game_name: "Klondike".to_string(),
            decks: 1,
            piles: PileCounts::default(),
            initial_layout: InitialLayout::default(),
            movement_rules: MovementRules::default(),
            draw_rules: DrawRules::default(),
            win_condition: WinCondition::default(),
            scoring: None,
            metadata: Metadata::default(),
        }
    }

    /// Set the variant name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.game_name = name.into();
        self
    }

    /// Set pile counts.
    #[must_use]
    pub fn with_piles(mut self, piles: PileCounts) -> Self {
        self.piles = piles;
        self
    }

    /// Set explicit per-column deal counts.
    #[must_use]
    pub fn with_layout(mut self, tableau: Vec<usize>) -> Self {
        self.initial_layout.tableau = tableau;
        self
    }

    /// Set cards per draw.
    #[must_use]
    pub fn with_draw_count(mut self, count: usize) -> Self {
        self.draw_rules.draw_count = count;
        self
    }

    /// Set the redeal policy.
    #[must_use]
    pub fn with_redeals(mut self, redeals: RedealPolicy) -> Self {
        self.draw_rules.redeals = redeals;
        self
    }

    /// Set the movement rules.
    #[must_use]
    pub fn with_rules(mut self, rules: MovementRules) -> Self {
        self.movement_rules = rules;
        self
    }

    /// Cards in play: 52 per deck. Saturates rather than overflowing.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        DECK_SIZE.saturating_mul(self.decks)
    }

    /// Cards the layout deals to the tableau, or `None` on overflow.
    #[must_use]
    pub fn dealt_cards(&self) -> Option<usize> {
        self.tableau_layout()
            .iter()
            .try_fold(0usize, |total, &count| total.checked_add(count))
    }

    /// Cards dealt to each tableau column.
    ///
    /// Explicit layout if one is configured, otherwise `1, 2, .., n`.
    #[must_use]
    pub fn tableau_layout(&self) -> Vec<usize> {
        if self.initial_layout.tableau.is_empty() {
            (1..=self.piles.tableau).collect()
        } else {
            self.initial_layout.tableau.clone()
        }
    }

    /// Check internal consistency.
    ///
    /// Returns `Error::InvalidArgument` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidArgument(msg));

        if self.game_name.trim().is_empty() {
            return invalid("game name is empty".to_string());
        }
        if self.decks == 0 || self.decks > MAX_DECKS {
            return invalid(format!(
                "{}: deck count must be between 1 and {}, found {}",
                self.game_name, MAX_DECKS, self.decks
            ));
        }
        if self.draw_rules.draw_count == 0 {
            return invalid(format!("{}: draw count must be at least 1", self.game_name));
        }
        let total = self.total_cards();
        for (kind, count) in [
            ("tableau", self.piles.tableau),
            ("foundation", self.piles.foundation),
            ("free cell", self.piles.freecells),
        ] {
            if count > total {
                return invalid(format!(
                    "{}: {} {} piles for only {} cards",
                    self.game_name, count, kind, total
                ));
            }
        }
        let layout = &self.initial_layout;
        if !layout.tableau.is_empty() && layout.tableau.len() != self.piles.tableau {
            return invalid(format!(
                "{}: layout describes {} columns but {} tableau piles are configured",
                self.game_name,
                layout.tableau.len(),
                self.piles.tableau
            ));
        }
        if !layout.face_up.is_empty() && layout.face_up.len() != self.piles.tableau {
            return invalid(format!(
                "{}: {} face-up flags for {} tableau piles",
                self.game_name,
                layout.face_up.len(),
                self.piles.tableau
            ));
        }
        match self.dealt_cards() {
            Some(dealt) if dealt <= total => {}
            Some(dealt) => {
                return invalid(format!(
                    "{}: layout deals {} cards but only {} exist",
                    self.game_name, dealt, total
                ));
            }
            None => {
                return invalid(format!("{}: layout card counts overflow", self.game_name));
            }
        }
        Ok(())
    }

    /// Parse a single variant from a JSON document.
    pub fn from_document(text: &str) -> Result<Self> {
        let value = parse_object(text)?;
        let config: GameConfig = serde_json::from_value(value).map_err(from_json_error)?;
        config.validate().map_err(into_deserialization)?;
        Ok(config)
    }

    /// Serialize to a JSON document.
    pub fn to_document(&self, pretty: bool) -> Result<String> {
        to_json(self, pretty)
    }
}

/// A named collection of variants.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCatalog {
    pub games: Vec<GameConfig>,
}

impl GameCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant (builder pattern).
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.games.push(game);
        self
    }

    /// Parse a catalog from a JSON document.
    ///
    /// Accepts either `{"games": [...]}` or a single variant object with a
    /// `gameName`. Fails with `Error::Parse` for blank or malformed text and
    /// `Error::Deserialization` when the document holds no usable variant.
    pub fn from_document(text: &str) -> Result<Self> {
        let value = parse_object(text)?;

        let catalog = if value.get("games").is_some() {
            serde_json::from_value::<GameCatalog>(value).map_err(from_json_error)?
        } else if value.get("gameName").is_some() {
            let game = serde_json::from_value::<GameConfig>(value).map_err(from_json_error)?;
            GameCatalog { games: vec![game] }
        } else {
            return Err(Error::Deserialization(
                "document contains neither \"games\" nor \"gameName\"".to_string(),
            ));
        };

        if catalog.games.is_empty() {
            return Err(Error::Deserialization("document contains no games".to_string()));
        }
        catalog.validate().map_err(into_deserialization)?;
        Ok(catalog)
    }

    /// Serialize to a JSON document.
    pub fn to_document(&self, pretty: bool) -> Result<String> {
        to_json(self, pretty)
    }

    /// Validate every variant and check names are unique ignoring case.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for game in &self.games {
            game.validate()?;
            if !seen.insert(game.game_name.to_lowercase()) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate game name {:?}",
                    game.game_name
                )));
            }
        }
        Ok(())
    }

    /// Find a variant by case-insensitive exact name.
    #[must_use]
    pub fn find_game(&self, name: &str) -> Option<&GameConfig> {
        let needle = name.to_lowercase();
        self.games.iter().find(|g| g.game_name.to_lowercase() == needle)
    }

    /// Variant names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|g| g.game_name.as_str())
    }
}

/// Parse text into a JSON object, splitting malformed from unusable input.
fn parse_object(text: &str) -> Result<serde_json::Value> {
    ensure_not_blank(text)?;
    let value: serde_json::Value = serde_json::from_str(text).map_err(from_json_error)?;
    match value {
        serde_json::Value::Object(_) => Ok(value),
        serde_json::Value::Null => Err(Error::Deserialization("document is null".to_string())),
        other => Err(Error::Deserialization(format!(
            "expected an object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(|e| Error::InvalidArgument(format!("value cannot be serialized: {e}")))
}
