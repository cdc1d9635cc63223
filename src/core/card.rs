//! Playing cards: rank, suit, and color.
//!
//! A `Card` is a plain `Copy` value fully defined by its rank and suit.
//! Two cards with the same rank and suit are equal; there is no identity
//! beyond that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Card rank, Ace low.
///
/// Serialized as its short label (`"A"`, `"2"` .. `"10"`, `"J"`, `"Q"`, `"K"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value, 1 (Ace) through 13 (King).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Rank for a numeric value in 1..=13.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Short label used in documents and `Display`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|rank| rank.label().eq_ignore_ascii_case(label))
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Card suit.
///
/// The declaration order is canonical: it drives deck construction order
/// and the default foundation slot for each suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Heart,
    Club,
    Diamond,
    Spade,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Heart, Suit::Club, Suit::Diamond, Suit::Spade];

    /// Position in the canonical order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Heart | Suit::Diamond => Color::Red,
            Suit::Club | Suit::Spade => Color::Black,
        }
    }

    /// Single-letter label.
    #[must_use]
    pub const fn short(self) -> char {
        match self {
            Suit::Heart => 'H',
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Spade => 'S',
        }
    }

    fn from_short(c: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|suit| suit.short() == c.to_ascii_uppercase())
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Structural equality against a possibly-absent card.
    ///
    /// `false` when `other` is `None`.
    #[must_use]
    pub fn equals(&self, other: Option<&Card>) -> bool {
        other.is_some_and(|other| self == other)
    }

    /// Numeric rank value, 1-13.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.rank.value()
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[must_use]
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    /// True if this card's rank is exactly one less than `other`'s.
    ///
    /// No wraparound: an Ace is never one below a King.
    #[must_use]
    pub fn is_one_below(&self, other: &Card) -> bool {
        self.value() + 1 == other.value()
    }

    /// True if this card's rank is exactly one more than `other`'s.
    #[must_use]
    pub fn is_one_above(&self, other: &Card) -> bool {
        other.is_one_below(self)
    }

    #[must_use]
    pub fn same_suit(&self, other: &Card) -> bool {
        self.suit == other.suit
    }

    #[must_use]
    pub fn opposite_color(&self, other: &Card) -> bool {
        self.color() != other.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.short())
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parse a label such as `"QH"` or `"10s"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit_char = chars
            .next_back()
            .ok_or_else(|| Error::Parse("empty card label".to_string()))?;
        let suit = Suit::from_short(suit_char)
            .ok_or_else(|| Error::Parse(format!("unknown suit in card label {s:?}")))?;
        let rank = Rank::from_label(chars.as_str())
            .ok_or_else(|| Error::Parse(format!("unknown rank in card label {s:?}")))?;
        Ok(Card::new(rank, suit))
    }
}
