//! Movement-rule policies.
//!
//! Variant documents describe rules as short phrases such as
//! `"descending, alternating colors"` or `"king only"`. Each rule family is
//! parsed into a closed enum so the engine dispatches on the variant rather
//! than matching strings. Phrases that are not recognized are kept verbatim
//! in a `Custom` variant and evaluated with the classic Klondike behavior
//! of their family.
//!
//! Matching ignores case, punctuation, and repeated whitespace, so
//! `"Descending; Alternating  Colors"` parses the same as the canonical
//! spelling.

use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Rank};

/// Lowercase, drop punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a card may be built onto a non-empty tableau column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildRule {
    /// One rank lower, opposite color (classic Klondike).
    #[default]
    AlternatingColors,
    /// One rank lower, same suit.
    SameSuit,
    /// One rank lower, any suit.
    AnySuit,
    /// One rank lower, same color.
    SameColor,
    /// No building allowed.
    Forbidden,
    /// Unrecognized phrase; evaluated as `AlternatingColors`.
    Custom(String),
}

impl BuildRule {
    /// Parse a rule phrase.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match normalize(text).as_str() {
            "descending alternating colors"
            | "descending alternating color"
            | "descending alternate colors"
            | "alternating colors"
            | "alternating color"
            | "alternate colors" => Self::AlternatingColors,
            "descending same suit" | "same suit" => Self::SameSuit,
            "descending any suit" | "descending" | "any suit" | "descending regardless of suit" => {
                Self::AnySuit
            }
            "descending same color" | "same color" => Self::SameColor,
            "none" | "not allowed" | "forbidden" | "no" => Self::Forbidden,
            _ => Self::Custom(text.to_string()),
        }
    }

    /// Canonical phrase for this rule.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::AlternatingColors => "descending, alternating colors",
            Self::SameSuit => "descending, same suit",
            Self::AnySuit => "descending, any suit",
            Self::SameColor => "descending, same color",
            Self::Forbidden => "none",
            Self::Custom(text) => text,
        }
    }

    /// Can `card` be placed on `top`?
    #[must_use]
    pub fn allows(&self, top: &Card, card: &Card) -> bool {
        if !card.is_one_below(top) {
            return false;
        }
        match self {
            Self::AlternatingColors | Self::Custom(_) => card.opposite_color(top),
            Self::SameSuit => card.same_suit(top),
            Self::AnySuit => true,
            Self::SameColor => !card.opposite_color(top),
            Self::Forbidden => false,
        }
    }

    /// Is `run` (bottom to top) a sequence built entirely by this rule?
    #[must_use]
    pub fn is_built_run(&self, run: &[Card]) -> bool {
        run.windows(2).all(|pair| self.allows(&pair[0], &pair[1]))
    }
}

/// How a card may be placed onto a non-empty foundation pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FoundationRule {
    /// One rank higher, same suit (classic Klondike).
    #[default]
    SameSuit,
    /// One rank higher, any suit.
    AnySuit,
    /// Cards may not be moved to foundations along this route.
    Forbidden,
    /// Unrecognized phrase; evaluated as `SameSuit`.
    Custom(String),
}

impl FoundationRule {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match normalize(text).as_str() {
            "ascending same suit" | "same suit" | "ascending by suit" => Self::SameSuit,
            "ascending any suit" | "ascending" | "any suit" => Self::AnySuit,
            "none" | "not allowed" | "forbidden" | "no" => Self::Forbidden,
            _ => Self::Custom(text.to_string()),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::SameSuit => "ascending, same suit",
            Self::AnySuit => "ascending, any suit",
            Self::Forbidden => "none",
            Self::Custom(text) => text,
        }
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }

    /// Can `card` be placed on `top`?
    #[must_use]
    pub fn allows(&self, top: &Card, card: &Card) -> bool {
        if !card.is_one_above(top) {
            return false;
        }
        match self {
            Self::SameSuit | Self::Custom(_) => card.same_suit(top),
            Self::AnySuit => true,
            Self::Forbidden => false,
        }
    }
}

/// Which cards an empty tableau column accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmptyTableauRule {
    #[default]
    KingOnly,
    AnyCard,
    Forbidden,
    /// Unrecognized phrase; evaluated as `KingOnly`.
    Custom(String),
}

impl EmptyTableauRule {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match normalize(text).as_str() {
            "king only" | "kings only" | "king" | "kings" | "only kings" => Self::KingOnly,
            "any card" | "any" | "any rank" => Self::AnyCard,
            "none" | "not allowed" | "forbidden" | "no" => Self::Forbidden,
            _ => Self::Custom(text.to_string()),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::KingOnly => "king only",
            Self::AnyCard => "any card",
            Self::Forbidden => "none",
            Self::Custom(text) => text,
        }
    }

    #[must_use]
    pub fn allows(&self, card: &Card) -> bool {
        match self {
            Self::KingOnly | Self::Custom(_) => card.rank == Rank::King,
            Self::AnyCard => true,
            Self::Forbidden => false,
        }
    }
}

/// Which cards an empty foundation pile accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmptyFoundationRule {
    #[default]
    AceOnly,
    AnyCard,
    /// Unrecognized phrase; evaluated as `AceOnly`.
    Custom(String),
}

impl EmptyFoundationRule {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match normalize(text).as_str() {
            "ace only" | "aces only" | "ace" | "aces" | "only aces" => Self::AceOnly,
            "any card" | "any" | "any rank" => Self::AnyCard,
            _ => Self::Custom(text.to_string()),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::AceOnly => "ace only",
            Self::AnyCard => "any card",
            Self::Custom(text) => text,
        }
    }

    #[must_use]
    pub fn allows(&self, card: &Card) -> bool {
        match self {
            Self::AceOnly | Self::Custom(_) => card.rank == Rank::Ace,
            Self::AnyCard => true,
        }
    }
}

/// Whether cards may be parked in, and played from, free cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FreeCellRule {
    #[default]
    AnyCard,
    Forbidden,
    /// Unrecognized phrase; evaluated as `AnyCard`.
    Custom(String),
}

impl FreeCellRule {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match normalize(text).as_str() {
            "any card" | "any" | "one card" | "single card" | "one card per cell" => Self::AnyCard,
            "none" | "not allowed" | "forbidden" | "no" => Self::Forbidden,
            _ => Self::Custom(text.to_string()),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::AnyCard => "any card",
            Self::Forbidden => "none",
            Self::Custom(text) => text,
        }
    }

    #[must_use]
    pub fn allows(&self) -> bool {
        !matches!(self, Self::Forbidden)
    }
}

/// When a game counts as won.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WinCondition {
    /// Every foundation pile holds a complete 13-card run.
    #[default]
    AllFoundationsComplete,
    /// Unrecognized phrase; evaluated as `AllFoundationsComplete`.
    Custom(String),
}

impl WinCondition {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match normalize(text).as_str() {
            "all cards to foundation"
            | "all cards to foundations"
            | "all cards on foundations"
            | "all foundations complete"
            | "foundations complete" => Self::AllFoundationsComplete,
            _ => Self::Custom(text.to_string()),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::AllFoundationsComplete => "all cards to foundation",
            Self::Custom(text) => text,
        }
    }
}

/// Generate the `String` conversions serde uses for each rule family.
macro_rules! rule_text_conversions {
    ($($rule:ty),* $(,)?) => {
        $(
            impl From<String> for $rule {
                fn from(text: String) -> Self {
                    Self::parse(&text)
                }
            }

            impl From<$rule> for String {
                fn from(rule: $rule) -> Self {
                    rule.as_text().to_string()
                }
            }

            impl std::fmt::Display for $rule {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_text())
                }
            }
        )*
    };
}

rule_text_conversions!(
    BuildRule,
    FoundationRule,
    EmptyTableauRule,
    EmptyFoundationRule,
    FreeCellRule,
    WinCondition,
);

/// How many times the waste may be recycled into the stock.
///
/// Serialized as `"unlimited"`, `"none"`, or a non-negative integer.
/// `Limited(0)` permits no redeals, like `None`, but keeps its own form so
/// documents round-trip exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RedealsRepr", into = "RedealsRepr")]
pub enum RedealPolicy {
    #[default]
    Unlimited,
    None,
    Limited(u32),
}

impl RedealPolicy {
    /// May another redeal happen after `used` redeals?
    #[must_use]
    pub fn permits(self, used: u32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::None => false,
            Self::Limited(max) => used < max,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RedealsRepr {
    Count(u32),
    Text(String),
}

impl TryFrom<RedealsRepr> for RedealPolicy {
    type Error = String;

    fn try_from(repr: RedealsRepr) -> Result<Self, Self::Error> {
        match repr {
            RedealsRepr::Count(n) => Ok(Self::Limited(n)),
            RedealsRepr::Text(text) => match normalize(&text).as_str() {
                "unlimited" | "infinite" | "any" => Ok(Self::Unlimited),
                "none" | "no" => Ok(Self::None),
                other => other
                    .parse::<u32>()
                    .map(Self::Limited)
                    .map_err(|_| format!("unrecognized redeal policy {text:?}")),
            },
        }
    }
}

impl From<RedealPolicy> for RedealsRepr {
    fn from(policy: RedealPolicy) -> Self {
        match policy {
            RedealPolicy::Unlimited => Self::Text("unlimited".to_string()),
            RedealPolicy::None => Self::Text("none".to_string()),
            RedealPolicy::Limited(n) => Self::Count(n),
        }
    }
}
