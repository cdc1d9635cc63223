//! The solitaire board and its rules.
//!
//! `SolitaireRules` owns the live board (tableau columns, foundations,
//! stock, waste, free cells) and enforces the variant's `GameConfig`.
//!
//! ## Implementation Notes
//!
//! - Legality queries (`can_*`, `find_*`) never fail; they return `false`
//!   or `None` for anything not applicable, including out-of-range indices
//! - Commands that are simply not applicable (`draw_from_stock` on an empty
//!   stock, an illegal `move_cards`) return `false` and change nothing
//! - Only `deal_cards` and `import` return errors, and both leave the board
//!   untouched when they do
//! - Cards are only ever relocated between piles, so `total_cards()` is
//!   constant between deals

use smallvec::SmallVec;

use crate::core::card::Card;
use crate::core::config::{GameConfig, MovementRules};
use crate::core::deck::Deck;
use crate::core::error::{Error, Result};
use crate::core::rng::RandomSource;
use crate::core::state::GameState;
use crate::rules::policy::{BuildRule, FoundationRule, WinCondition};
use crate::zones::{PileId, PileKind};

/// Cards in a complete foundation run, Ace through King.
pub const FOUNDATION_RUN: usize = 13;

/// Free-cell slots; `None` is an empty slot.
pub type FreeCells = SmallVec<[Option<Card>; 4]>;

/// The live board for one game.
///
/// ## Usage
///
/// ```
/// use klondike_rules::core::{Deck, GameRng};
/// use klondike_rules::rules::SolitaireRules;
///
/// let mut deck = Deck::with_rng(GameRng::new(7));
/// deck.shuffle();
///
/// let mut game = SolitaireRules::new();
/// game.deal_cards(&mut deck).unwrap();
///
/// assert_eq!(game.stock_pile().len(), 24);
/// assert!(game.draw_from_stock());
/// assert_eq!(game.waste_pile().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolitaireRules {
    config: GameConfig,
    tableau: Vec<Vec<Card>>,
    foundations: Vec<Vec<Card>>,
    /// Last element is the top (next card drawn).
    stock: Vec<Card>,
    /// Last element is the top (visible card).
    waste: Vec<Card>,
    free_cells: FreeCells,
    redeals_used: u32,
    /// Seed of the deck that dealt this board, when known.
    deal_seed: Option<u64>,
}

impl Default for SolitaireRules {
    fn default() -> Self {
        Self::new()
    }
}

impl SolitaireRules {
    /// Empty classic Klondike board: 7 columns, 4 foundations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::klondike())
    }

    /// Empty board shaped by `config`.
    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            tableau: vec![Vec::new(); config.piles.tableau],
            foundations: vec![Vec::new(); config.piles.foundation],
            stock: Vec::new(),
            waste: Vec::new(),
            free_cells: SmallVec::from_elem(None, config.piles.freecells),
            redeals_used: 0,
            deal_seed: None,
            config,
        }
    }

    // === Read access ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn tableau_columns(&self) -> &[Vec<Card>] {
        &self.tableau
    }

    #[must_use]
    pub fn foundation_piles(&self) -> &[Vec<Card>] {
        &self.foundations
    }

    #[must_use]
    pub fn stock_pile(&self) -> &[Card] {
        &self.stock
    }

    #[must_use]
    pub fn waste_pile(&self) -> &[Card] {
        &self.waste
    }

    #[must_use]
    pub fn free_cells(&self) -> &[Option<Card>] {
        &self.free_cells
    }

    /// Redeals performed since the last deal or import.
    #[must_use]
    pub fn redeals_used(&self) -> u32 {
        self.redeals_used
    }

    /// Seed of the shuffle behind the current deal.
    ///
    /// `None` when the deck's source had no seed or the board has not been
    /// dealt. Shuffling a fresh `Deck::with_rng(GameRng::new(seed))` once
    /// and dealing it reproduces the deal.
    #[must_use]
    pub fn deal_seed(&self) -> Option<u64> {
        self.deal_seed
    }

    /// Cards of a pile, bottom to top. `None` if the pile does not exist.
    #[must_use]
    pub fn pile(&self, pile: PileId) -> Option<&[Card]> {
        match pile {
            PileId::Tableau(i) => self.tableau.get(i).map(Vec::as_slice),
            PileId::Foundation(i) => self.foundations.get(i).map(Vec::as_slice),
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
            PileId::FreeCell(i) => self.free_cells.get(i).map(Option::as_slice),
        }
    }

    /// Top card of a pile, if the pile exists and is non-empty.
    #[must_use]
    pub fn top_card(&self, pile: PileId) -> Option<Card> {
        self.pile(pile)?.last().copied()
    }

    /// Cards currently on the board, across every pile.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let columns: usize = self.tableau.iter().map(Vec::len).sum();
        let foundations: usize = self.foundations.iter().map(Vec::len).sum();
        let cells = self.free_cells.iter().flatten().count();
        columns + foundations + cells + self.stock.len() + self.waste.len()
    }

    /// Has a game been dealt (or imported) onto this board?
    #[must_use]
    pub fn is_dealt(&self) -> bool {
        self.total_cards() > 0
    }

    // === Dealing ===

    /// Deal a new game from `deck`.
    ///
    /// The deck must hold exactly `config.total_cards()` cards. Columns are
    /// filled front of deck first, column 0 first, with the counts from the
    /// configured layout; the remaining cards become the stock in order, so
    /// the deck's last card is the stock's top. The deck is left empty.
    ///
    /// On error neither the board nor the deck is modified.
    pub fn deal_cards<R: RandomSource>(&mut self, deck: &mut Deck<R>) -> Result<()> {
        let expected = self.config.total_cards();
        if deck.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "deck must hold {} cards, found {}",
                expected,
                deck.len()
            )));
        }

        let layout = self.config.tableau_layout();
        if layout.len() != self.tableau.len() {
            return Err(Error::InvalidArgument(format!(
                "layout describes {} columns but the board has {}",
                layout.len(),
                self.tableau.len()
            )));
        }
        if !self.config.dealt_cards().is_some_and(|dealt| dealt <= expected) {
            return Err(Error::InvalidArgument(format!(
                "layout deals more cards than the deck's {}",
                expected
            )));
        }

        self.clear_piles();
        self.deal_seed = deck.seed();

        let mut cards = deck.take_cards().into_iter();
        for (column, &count) in self.tableau.iter_mut().zip(&layout) {
            column.extend(cards.by_ref().take(count));
        }
        self.stock.extend(cards);

        Ok(())
    }

    fn clear_piles(&mut self) {
        self.tableau.iter_mut().for_each(Vec::clear);
        self.foundations.iter_mut().for_each(Vec::clear);
        self.stock.clear();
        self.waste.clear();
        self.free_cells.iter_mut().for_each(|slot| *slot = None);
        self.redeals_used = 0;
        self.deal_seed = None;
    }

    // === Placement queries ===

    fn rules(&self) -> &MovementRules {
        &self.config.movement_rules
    }

    /// Can `card` be placed on tableau column `column_index`?
    ///
    /// Empty columns accept what the empty-tableau rule allows (Kings by
    /// default); otherwise the tableau build rule applies (one rank lower,
    /// opposite color by default).
    #[must_use]
    pub fn can_place_card_on_tableau(&self, card: &Card, column_index: usize) -> bool {
        self.tableau_accepts(card, column_index, &self.rules().tableau_to_tableau)
    }

    /// Can `card` be placed on foundation `foundation_index`?
    ///
    /// Empty foundations accept Aces by default; otherwise one rank higher,
    /// same suit.
    #[must_use]
    pub fn can_place_card_on_foundation(&self, card: &Card, foundation_index: usize) -> bool {
        self.foundation_accepts(card, foundation_index, &self.rules().tableau_to_foundation)
    }

    fn tableau_accepts(&self, card: &Card, column_index: usize, build: &BuildRule) -> bool {
        let Some(column) = self.tableau.get(column_index) else {
            return false;
        };
        match column.last() {
            None => self.rules().empty_tableau.allows(card),
            Some(top) => build.allows(top, card),
        }
    }

    fn foundation_accepts(&self, card: &Card, foundation_index: usize, rule: &FoundationRule) -> bool {
        if rule.is_forbidden() {
            return false;
        }
        let Some(pile) = self.foundations.get(foundation_index) else {
            return false;
        };
        match pile.last() {
            None => self.rules().empty_foundation.allows(card),
            Some(top) => rule.allows(top, card),
        }
    }

    /// The foundation slot for `card`'s suit, if the card can go there now.
    ///
    /// Each suit owns the slot at its canonical index; multi-deck boards
    /// repeat the pattern every four slots.
    #[must_use]
    pub fn find_available_foundation_pile(&self, card: &Card) -> Option<usize> {
        (card.suit.index()..self.foundations.len())
            .step_by(4)
            .find(|&slot| self.can_place_card_on_foundation(card, slot))
    }

    /// Is every foundation complete?
    #[must_use]
    pub fn is_game_won(&self) -> bool {
        match self.config.win_condition {
            WinCondition::AllFoundationsComplete | WinCondition::Custom(_) => {
                !self.foundations.is_empty()
                    && self.foundations.iter().all(|pile| pile.len() == FOUNDATION_RUN)
            }
        }
    }

    // === Stock ===

    /// Turn cards from the stock onto the waste.
    ///
    /// Moves up to `drawCount` cards, one at a time, from the stock top to
    /// the waste top. Returns `false` without effect if the stock is empty.
    pub fn draw_from_stock(&mut self) -> bool {
        if self.stock.is_empty() {
            return false;
        }
        for _ in 0..self.config.draw_rules.draw_count.max(1) {
            match self.stock.pop() {
                Some(card) => self.waste.push(card),
                None => break,
            }
        }
        true
    }

    /// Recycle the waste back into the stock.
    ///
    /// Only applies when the stock is empty, the waste is not, and the
    /// redeal policy allows another pass. The waste is reversed into the
    /// stock, so the next pass draws cards in the same order as the last.
    /// Returns whether a redeal happened.
    pub fn reset_stock(&mut self) -> bool {
        if !self.stock.is_empty()
            || self.waste.is_empty()
            || !self.config.draw_rules.redeals.permits(self.redeals_used)
        {
            return false;
        }
        self.stock = self.waste.drain(..).rev().collect();
        self.redeals_used += 1;
        true
    }

    // === Moves ===

    /// Would moving the top `count` cards of `from` onto `to` be legal?
    ///
    /// - Only tableau columns may move more than one card, and the moving
    ///   run must itself be built by the tableau build rule
    /// - The stock is never a source or target (use `draw_from_stock`)
    /// - The waste is never a target
    /// - Foundations accept one card at a time
    /// - Free cells accept one card into an empty slot
    #[must_use]
    pub fn can_move(&self, from: PileId, to: PileId, count: usize) -> bool {
        self.moving_run(from, count)
            .is_some_and(|run| self.accepts_run(from, to, run))
    }

    /// Move the top `count` cards of `from` onto `to` if legal.
    ///
    /// Returns whether the move happened.
    pub fn move_cards(&mut self, from: PileId, to: PileId, count: usize) -> bool {
        if !self.can_move(from, to, count) {
            return false;
        }
        let cards = self.take_top(from, count);
        self.put(to, cards);
        true
    }

    /// Move the top card of `from` to its suit's foundation, if legal.
    ///
    /// Returns the foundation index the card went to.
    pub fn auto_move_to_foundation(&mut self, from: PileId) -> Option<usize> {
        let card = self.top_card(from)?;
        let slot = self.find_available_foundation_pile(&card)?;
        self.move_cards(from, PileId::Foundation(slot), 1).then_some(slot)
    }

    /// The cards that would move, or `None` if `from` cannot give them.
    fn moving_run(&self, from: PileId, count: usize) -> Option<&[Card]> {
        if count == 0 {
            return None;
        }
        match from {
            PileId::Stock => None,
            PileId::Tableau(i) => {
                let column = self.tableau.get(i)?;
                let start = column.len().checked_sub(count)?;
                let run = &column[start..];
                self.rules().tableau_to_tableau.is_built_run(run).then_some(run)
            }
            PileId::Waste | PileId::Foundation(_) | PileId::FreeCell(_) => {
                if count != 1 {
                    return None;
                }
                let pile = self.pile(from)?;
                pile.last().map(std::slice::from_ref)
            }
        }
    }

    fn accepts_run(&self, from: PileId, to: PileId, run: &[Card]) -> bool {
        let Some(first) = run.first() else {
            return false;
        };
        let rules = self.rules();
        match to {
            PileId::Tableau(i) => {
                if from == to {
                    return false;
                }
                let build = match from.kind() {
                    PileKind::Waste => &rules.waste_to_tableau,
                    _ => &rules.tableau_to_tableau,
                };
                self.tableau_accepts(first, i, build)
            }
            PileId::Foundation(i) => {
                if run.len() != 1 || from.kind() == PileKind::Foundation {
                    return false;
                }
                let rule = match from.kind() {
                    PileKind::Waste => &rules.waste_to_foundation,
                    _ => &rules.tableau_to_foundation,
                };
                self.foundation_accepts(first, i, rule)
            }
            PileId::FreeCell(i) => {
                run.len() == 1
                    && from != to
                    && rules.free_cell.allows()
                    && matches!(self.free_cells.get(i), Some(None))
            }
            PileId::Stock | PileId::Waste => false,
        }
    }

    fn pile_mut(&mut self, pile: PileId) -> Option<&mut Vec<Card>> {
        match pile {
            PileId::Tableau(i) => self.tableau.get_mut(i),
            PileId::Foundation(i) => self.foundations.get_mut(i),
            PileId::Stock => Some(&mut self.stock),
            PileId::Waste => Some(&mut self.waste),
            PileId::FreeCell(_) => None,
        }
    }

    fn take_top(&mut self, from: PileId, count: usize) -> Vec<Card> {
        if let PileId::FreeCell(i) = from {
            return self
                .free_cells
                .get_mut(i)
                .and_then(Option::take)
                .into_iter()
                .collect();
        }
        match self.pile_mut(from) {
            Some(pile) => {
                let start = pile.len().saturating_sub(count);
                pile.split_off(start)
            }
            None => Vec::new(),
        }
    }

    fn put(&mut self, to: PileId, cards: Vec<Card>) {
        if let PileId::FreeCell(i) = to {
            if let Some(slot) = self.free_cells.get_mut(i) {
                *slot = cards.into_iter().next();
            }
            return;
        }
        if let Some(pile) = self.pile_mut(to) {
            pile.extend(cards);
        }
    }

    // === Snapshots ===

    /// Capture the board as a snapshot.
    ///
    /// Face-up lists are empty placeholders, one per column; orientation
    /// is supplied by the presentation layer.
    #[must_use]
    pub fn export(&self, note: Option<&str>) -> GameState {
        GameState {
            stock: self.stock.clone(),
            waste: self.waste.clone(),
            foundations: self.foundations.clone(),
            tableau: self.tableau.clone(),
            free_cells: self.free_cells.to_vec(),
            face_up: vec![Vec::new(); self.tableau.len()],
            game_name: Some(self.config.game_name.clone()),
            deal_seed: self.deal_seed,
            note: note.unwrap_or_default().to_string(),
        }
    }

    /// Replace the board's contents with a snapshot.
    ///
    /// Fails with `Error::NullState` if `state` is `None`. Every pile is
    /// cleared first; snapshot lists beyond the board's pile counts are
    /// ignored and missing ones leave their piles empty.
    pub fn import(&mut self, state: Option<&GameState>) -> Result<()> {
        let state = state.ok_or(Error::NullState)?;

        self.clear_piles();
        self.deal_seed = state.deal_seed;
        self.stock.extend_from_slice(&state.stock);
        self.waste.extend_from_slice(&state.waste);
        for (pile, cards) in self.foundations.iter_mut().zip(&state.foundations) {
            pile.extend_from_slice(cards);
        }
        for (column, cards) in self.tableau.iter_mut().zip(&state.tableau) {
            column.extend_from_slice(cards);
        }
        for (slot, card) in self.free_cells.iter_mut().zip(&state.free_cells) {
            *slot = *card;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::core::config::PileCounts;
    use crate::core::rng::GameRng;
    use crate::rules::policy::{EmptyTableauRule, RedealPolicy};

    fn card(label: &str) -> Card {
        label.parse().unwrap()
    }

    fn dealt_game(seed: u64) -> SolitaireRules {
        let mut deck = Deck::with_rng(GameRng::new(seed));
        deck.shuffle();
        let mut game = SolitaireRules::new();
        game.deal_cards(&mut deck).unwrap();
        game
    }

    /// Board with explicit tableau columns and nothing else.
    fn board_with_columns(columns: &[&[&str]]) -> SolitaireRules {
        let mut game = SolitaireRules::new();
        for (column, labels) in game.tableau.iter_mut().zip(columns) {
            column.extend(labels.iter().map(|l| card(l)));
        }
        game
    }

    #[test]
    fn test_new_board_is_empty() {
        let game = SolitaireRules::new();
        assert_eq!(game.tableau_columns().len(), 7);
        assert_eq!(game.foundation_piles().len(), 4);
        assert!(game.stock_pile().is_empty());
        assert!(game.waste_pile().is_empty());
        assert!(game.free_cells().is_empty());
        assert!(!game.is_dealt());
        assert!(!game.is_game_won());
    }

    #[test]
    fn test_deal_shape() {
        let game = dealt_game(42);
        let sizes: Vec<_> = game.tableau_columns().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(game.stock_pile().len(), 24);
        assert_eq!(game.total_cards(), 52);
        assert!(game.is_dealt());
    }

    #[test]
    fn test_deal_consumes_front_first() {
        let mut deck = Deck::with_rng(GameRng::new(1));
        let order = deck.cards().to_vec();

        let mut game = SolitaireRules::new();
        game.deal_cards(&mut deck).unwrap();

        assert!(deck.is_empty());
        assert_eq!(game.tableau_columns()[0], order[0..1]);
        assert_eq!(game.tableau_columns()[1], order[1..3]);
        assert_eq!(game.tableau_columns()[6], order[21..28]);
        assert_eq!(game.stock_pile(), &order[28..]);
        assert_eq!(game.top_card(PileId::Stock), Some(order[51]));
    }

    #[test]
    fn test_deal_wrong_size_leaves_board_untouched() {
        let before = dealt_game(3);
        let mut game = before.clone();

        let mut short = Deck::with_rng(GameRng::new(1));
        short.deal_card();

        let err = game.deal_cards(&mut short).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(game, before);
        assert_eq!(short.len(), 51);
    }

    #[test]
    fn test_deal_with_custom_layout() {
        let config = GameConfig::klondike()
            .with_piles(PileCounts { tableau: 4, foundation: 4, waste: 1, freecells: 2 })
            .with_layout(vec![5, 5, 5, 5]);
        let mut game = SolitaireRules::with_config(config);
        let mut deck = Deck::with_rng(GameRng::new(1));
        game.deal_cards(&mut deck).unwrap();

        assert!(game.tableau_columns().iter().all(|c| c.len() == 5));
        assert_eq!(game.stock_pile().len(), 32);
        assert_eq!(game.free_cells().len(), 2);
        assert!(game.free_cells().iter().all(Option::is_none));
    }

    #[test]
    fn test_deal_rejects_oversized_layout() {
        let config = GameConfig::klondike().with_layout(vec![10; 7]);
        let mut game = SolitaireRules::with_config(config);
        let mut deck = Deck::with_rng(GameRng::new(1));

        assert!(matches!(game.deal_cards(&mut deck), Err(Error::InvalidArgument(_))));
        assert_eq!(deck.len(), 52);
        assert!(!game.is_dealt());
    }

    #[test]
    fn test_deal_rejects_overflowing_layout() {
        let config = GameConfig::klondike().with_layout(vec![usize::MAX, 1, 1, 1, 1, 1, 1]);
        let mut game = SolitaireRules::with_config(config);
        let mut deck = Deck::with_rng(GameRng::new(1));

        assert!(matches!(game.deal_cards(&mut deck), Err(Error::InvalidArgument(_))));
        assert_eq!(deck.len(), 52);
        assert!(!game.is_dealt());
    }

    #[test]
    fn test_deal_records_seed() {
        let game = dealt_game(17);
        assert_eq!(game.deal_seed(), Some(17));

        let replay = dealt_game(17);
        assert_eq!(replay.tableau_columns(), game.tableau_columns());
        assert_eq!(replay.stock_pile(), game.stock_pile());

        let mut scripted = Deck::with_rng(|| 0.5);
        let mut unseeded = dealt_game(17);
        unseeded.deal_cards(&mut scripted).unwrap();
        assert_eq!(unseeded.deal_seed(), None);
    }

    #[test]
    fn test_tableau_placement() {
        let game = board_with_columns(&[&[], &["10S"], &["10H"]]);

        // Empty column: Kings only
        assert!(game.can_place_card_on_tableau(&card("KH"), 0));
        assert!(!game.can_place_card_on_tableau(&card("QH"), 0));

        // Red 9 on black 10 only
        assert!(game.can_place_card_on_tableau(&card("9H"), 1));
        assert!(!game.can_place_card_on_tableau(&card("9H"), 2));
        assert!(!game.can_place_card_on_tableau(&card("8H"), 1));
        assert!(!game.can_place_card_on_tableau(&card("JH"), 1));

        // Out of range
        assert!(!game.can_place_card_on_tableau(&card("KH"), 7));
        assert!(!game.can_place_card_on_tableau(&card("KH"), usize::MAX));
    }

    #[test]
    fn test_empty_tableau_rule_from_config() {
        let mut config = GameConfig::klondike();
        config.movement_rules.empty_tableau = EmptyTableauRule::AnyCard;
        let game = SolitaireRules::with_config(config);
        assert!(game.can_place_card_on_tableau(&card("QH"), 0));
    }

    #[test]
    fn test_foundation_placement() {
        let mut game = SolitaireRules::new();
        assert!(game.can_place_card_on_foundation(&card("AH"), 0));
        assert!(!game.can_place_card_on_foundation(&card("2H"), 0));
        assert!(!game.can_place_card_on_foundation(&card("AH"), 4));

        game.foundations[0].push(card("AH"));
        assert!(game.can_place_card_on_foundation(&card("2H"), 0));
        assert!(!game.can_place_card_on_foundation(&card("2D"), 0));
        assert!(!game.can_place_card_on_foundation(&card("3H"), 0));
    }

    #[test]
    fn test_find_available_foundation_pile() {
        let mut game = SolitaireRules::new();
        assert_eq!(game.find_available_foundation_pile(&card("AH")), Some(0));
        assert_eq!(game.find_available_foundation_pile(&card("AC")), Some(1));
        assert_eq!(game.find_available_foundation_pile(&card("AD")), Some(2));
        assert_eq!(game.find_available_foundation_pile(&card("AS")), Some(3));
        assert_eq!(game.find_available_foundation_pile(&card("2S")), None);

        game.foundations[3].push(card("AS"));
        assert_eq!(game.find_available_foundation_pile(&card("2S")), Some(3));
        assert_eq!(game.find_available_foundation_pile(&card("3S")), None);
    }

    #[test]
    fn test_is_game_won() {
        let mut game = SolitaireRules::new();
        for (i, suit) in Suit::ALL.iter().enumerate() {
            for rank in Rank::ALL {
                game.foundations[i].push(Card::new(rank, *suit));
            }
        }
        assert!(game.is_game_won());

        game.foundations[2].pop();
        assert!(!game.is_game_won());
    }

    #[test]
    fn test_draw_and_reset_round_trip() {
        let mut game = dealt_game(11);
        let original_stock = game.stock_pile().to_vec();

        while game.draw_from_stock() {}
        assert!(game.stock_pile().is_empty());
        assert_eq!(game.waste_pile().len(), 24);
        assert!(!game.draw_from_stock());

        assert!(game.reset_stock());
        assert!(game.waste_pile().is_empty());
        assert_eq!(game.stock_pile(), original_stock.as_slice());
        assert_eq!(game.total_cards(), 52);
    }

    #[test]
    fn test_reset_requires_empty_stock() {
        let mut game = dealt_game(11);
        game.draw_from_stock();
        assert!(!game.reset_stock());
        assert_eq!(game.waste_pile().len(), 1);

        let mut empty = SolitaireRules::new();
        assert!(!empty.reset_stock());
    }

    #[test]
    fn test_draw_three() {
        let mut deck = Deck::with_rng(GameRng::new(2));
        let mut game = SolitaireRules::with_config(GameConfig::klondike().with_draw_count(3));
        game.deal_cards(&mut deck).unwrap();

        let stock = game.stock_pile().to_vec();
        assert!(game.draw_from_stock());
        assert_eq!(game.waste_pile(), &[stock[23], stock[22], stock[21]]);
        assert_eq!(game.stock_pile().len(), 21);
    }

    #[test]
    fn test_redeal_limit() {
        let mut deck = Deck::with_rng(GameRng::new(2));
        let mut game =
            SolitaireRules::with_config(GameConfig::klondike().with_redeals(RedealPolicy::Limited(1)));
        game.deal_cards(&mut deck).unwrap();

        while game.draw_from_stock() {}
        assert!(game.reset_stock());
        assert_eq!(game.redeals_used(), 1);

        while game.draw_from_stock() {}
        assert!(!game.reset_stock());
        assert_eq!(game.waste_pile().len(), 24);
    }

    #[test]
    fn test_move_tableau_run() {
        let mut game = board_with_columns(&[&["5C", "KS", "QH", "JC"], &["2D"], &[]]);

        // Whole K-Q-J run to the empty column
        assert!(game.can_move(PileId::Tableau(0), PileId::Tableau(2), 3));
        // A run including the 5C is not built
        assert!(!game.can_move(PileId::Tableau(0), PileId::Tableau(2), 4));
        // Q-J cannot go to an empty column
        assert!(!game.can_move(PileId::Tableau(0), PileId::Tableau(2), 2));

        assert!(game.move_cards(PileId::Tableau(0), PileId::Tableau(2), 3));
        assert_eq!(game.tableau_columns()[0], vec![card("5C")]);
        assert_eq!(game.tableau_columns()[2], vec![card("KS"), card("QH"), card("JC")]);
    }

    #[test]
    fn test_illegal_moves_change_nothing() {
        let mut game = board_with_columns(&[&["9H"], &["9S"]]);
        let before = game.clone();

        assert!(!game.move_cards(PileId::Tableau(0), PileId::Tableau(1), 1));
        assert!(!game.move_cards(PileId::Tableau(0), PileId::Tableau(0), 1));
        assert!(!game.move_cards(PileId::Tableau(0), PileId::Tableau(1), 0));
        assert!(!game.move_cards(PileId::Tableau(0), PileId::Tableau(1), 2));
        assert!(!game.move_cards(PileId::Tableau(9), PileId::Tableau(1), 1));
        assert!(!game.move_cards(PileId::Stock, PileId::Tableau(1), 1));
        assert!(!game.move_cards(PileId::Tableau(0), PileId::Waste, 1));
        assert!(!game.move_cards(PileId::Tableau(0), PileId::Stock, 1));
        assert_eq!(game, before);
    }

    #[test]
    fn test_waste_moves() {
        let mut game = board_with_columns(&[&["10S"]]);
        game.waste.extend([card("AD"), card("9H")]);

        assert!(!game.can_move(PileId::Waste, PileId::Tableau(0), 2));
        assert!(game.move_cards(PileId::Waste, PileId::Tableau(0), 1));
        assert_eq!(game.auto_move_to_foundation(PileId::Waste), Some(2));
        assert!(game.waste_pile().is_empty());
        assert_eq!(game.foundation_piles()[2], vec![card("AD")]);
    }

    #[test]
    fn test_foundation_to_foundation_disallowed() {
        let mut game = SolitaireRules::new();
        game.foundations[0].push(card("AH"));
        assert!(!game.can_move(PileId::Foundation(0), PileId::Foundation(1), 1));
    }

    #[test]
    fn test_foundation_back_to_tableau() {
        let mut game = board_with_columns(&[&["3S"]]);
        game.foundations[0].extend([card("AH"), card("2H")]);

        assert!(game.move_cards(PileId::Foundation(0), PileId::Tableau(0), 1));
        assert_eq!(game.foundation_piles()[0], vec![card("AH")]);
    }

    #[test]
    fn test_free_cells() {
        let config = GameConfig::klondike()
            .with_piles(PileCounts { tableau: 7, foundation: 4, waste: 1, freecells: 2 });
        let mut game = SolitaireRules::with_config(config);
        game.tableau[0].extend([card("10S"), card("7H")]);
        game.tableau[1].push(card("8C"));

        assert!(game.move_cards(PileId::Tableau(0), PileId::FreeCell(0), 1));
        assert_eq!(game.free_cells(), &[Some(card("7H")), None]);
        assert_eq!(game.top_card(PileId::FreeCell(0)), Some(card("7H")));

        // Occupied slot
        assert!(!game.can_move(PileId::Tableau(0), PileId::FreeCell(0), 1));
        // Missing slot
        assert!(!game.can_move(PileId::Tableau(0), PileId::FreeCell(2), 1));

        assert!(game.move_cards(PileId::FreeCell(0), PileId::Tableau(1), 1));
        assert!(game.free_cells().iter().all(Option::is_none));
        assert_eq!(game.tableau_columns()[1], vec![card("8C"), card("7H")]);
        assert_eq!(game.total_cards(), 3);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut game = dealt_game(8);
        game.draw_from_stock();
        let snapshot = game.export(Some("mid-game"));

        assert_eq!(snapshot.note, "mid-game");
        assert_eq!(snapshot.game_name.as_deref(), Some("Klondike"));
        assert_eq!(snapshot.face_up.len(), 7);
        assert_eq!(snapshot.deal_seed, Some(8));
        assert!(snapshot.face_up.iter().all(Vec::is_empty));

        let mut restored = SolitaireRules::new();
        restored.import(Some(&snapshot)).unwrap();
        assert_eq!(restored.tableau_columns(), game.tableau_columns());
        assert_eq!(restored.stock_pile(), game.stock_pile());
        assert_eq!(restored.waste_pile(), game.waste_pile());
        assert_eq!(restored.deal_seed(), Some(8));
    }

    #[test]
    fn test_import_null_state() {
        let mut game = dealt_game(8);
        let before = game.clone();
        assert_eq!(game.import(None), Err(Error::NullState));
        assert_eq!(game, before);
    }

    #[test]
    fn test_import_truncates_and_pads() {
        let mut snapshot = SolitaireRules::new().export(None);
        snapshot.tableau = (0..9).map(|_| vec![card("KS")]).collect();
        snapshot.foundations = vec![vec![card("AH")]];
        snapshot.free_cells = vec![Some(card("2C"))];

        let mut game = dealt_game(1);
        game.import(Some(&snapshot)).unwrap();

        assert_eq!(game.tableau_columns().len(), 7);
        assert!(game.tableau_columns().iter().all(|c| c == &vec![card("KS")]));
        assert_eq!(game.foundation_piles()[0], vec![card("AH")]);
        assert!(game.foundation_piles()[1..].iter().all(Vec::is_empty));
        assert!(game.stock_pile().is_empty());
        // Board has no free cells, so the snapshot's cell is dropped
        assert!(game.free_cells().is_empty());
    }
}
