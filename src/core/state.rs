//! Session state: screen plus the reading in progress.
//!
//! ## SessionState
//!
//! - Selected deck and pull count (sticky across readings)
//! - Built deck, kept so a reshuffle does not rebuild
//! - Shuffled order shown face-down on the grid
//! - Drawn cards in pick order, which is also spread order
//! - View cursor for the card detail screen
//!
//! Uses `im` persistent vectors so each transition can return a new state
//! while sharing structure with the old one.
//!
//! ## Invariants
//!
//! - `drawn_cards.len() <= pull_count`
//! - origin slots are unique and index into `shuffled_order`
//! - `view_cursor < drawn_cards.len()` on the card screen

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{Result, SlotRejection, TarotError};
use crate::cards::{Card, DrawnCard};

/// Active screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Deck wheel of the picker.
    #[serde(rename = "picker.deck")]
    DeckPicker,
    /// Count wheel of the picker.
    #[serde(rename = "picker.count")]
    CountPicker,
    /// Shuffle animation; no input is accepted until it completes.
    #[serde(rename = "shuffling")]
    Shuffling,
    /// Face-down grid.
    #[serde(rename = "grid")]
    Grid,
    /// All drawn cards.
    #[serde(rename = "spread")]
    Spread,
    /// One drawn card.
    #[serde(rename = "card")]
    CardDetail,
}

impl Screen {
    /// True for both picker columns.
    #[must_use]
    pub fn is_picker(self) -> bool {
        matches!(self, Screen::DeckPicker | Screen::CountPicker)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::DeckPicker => "picker.deck",
            Screen::CountPicker => "picker.count",
            Screen::Shuffling => "shuffling",
            Screen::Grid => "grid",
            Screen::Spread => "spread",
            Screen::CardDetail => "card",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The whole mutable session.
///
/// Read access is public. Changes go through [`SessionState::pick`] or the
/// session reducer, both of which return a new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    selected_deck: String,
    pull_count: u32,
    deck: Vector<Card>,
    shuffled_order: Vector<Card>,
    drawn_cards: Vector<DrawnCard>,
    view_cursor: usize,
    screen: Screen,
}

impl SessionState {
    /// Fresh session on the deck picker.
    #[must_use]
    pub fn new(selected_deck: impl Into<String>, pull_count: u32) -> Self {
        Self {
            selected_deck: selected_deck.into(),
            pull_count,
            deck: Vector::new(),
            shuffled_order: Vector::new(),
            drawn_cards: Vector::new(),
            view_cursor: 0,
            screen: Screen::DeckPicker,
        }
    }

    /// Session resumed on the card screen.
    pub(crate) fn resumed(
        selected_deck: impl Into<String>,
        pull_count: u32,
        deck: Vector<Card>,
        shuffled_order: Vector<Card>,
        drawn_cards: Vector<DrawnCard>,
        view_cursor: usize,
    ) -> Self {
        Self {
            selected_deck: selected_deck.into(),
            pull_count,
            deck,
            shuffled_order,
            drawn_cards,
            view_cursor,
            screen: Screen::CardDetail,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn selected_deck(&self) -> &str {
        &self.selected_deck
    }

    #[must_use]
    pub fn pull_count(&self) -> u32 {
        self.pull_count
    }

    /// Built deck of the current reading, in canonical order.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    #[must_use]
    pub fn shuffled_order(&self) -> &Vector<Card> {
        &self.shuffled_order
    }

    #[must_use]
    pub fn drawn_cards(&self) -> &Vector<DrawnCard> {
        &self.drawn_cards
    }

    #[must_use]
    pub fn view_cursor(&self) -> usize {
        self.view_cursor
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    // === Derived ===

    /// All requested cards have been drawn.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.drawn_cards.len() >= self.pull_count as usize
    }

    /// Picks left before the grid is full.
    #[must_use]
    pub fn remaining_picks(&self) -> usize {
        (self.pull_count as usize).saturating_sub(self.drawn_cards.len())
    }

    /// Whether a grid tile has been taken.
    #[must_use]
    pub fn is_picked(&self, slot: usize) -> bool {
        self.drawn_cards.iter().any(|d| d.origin_slot == slot)
    }

    /// Card under the view cursor, on the card screen only.
    #[must_use]
    pub fn current_card(&self) -> Option<&DrawnCard> {
        if self.screen == Screen::CardDetail {
            self.drawn_cards.get(self.view_cursor)
        } else {
            None
        }
    }

    /// "2 / 3" style position on the card screen.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        self.current_card()
            .map(|_| format!("{} / {}", self.view_cursor + 1, self.drawn_cards.len()))
    }

    // === Grid ===

    /// Take the card at `slot` from the shuffled order.
    ///
    /// Fails with `InvalidSlot` when the slot is out of range, already
    /// taken, or the grid is full. The receiver is never changed.
    pub fn pick(&self, slot: usize) -> Result<Self> {
        if self.is_full() {
            return Err(TarotError::invalid_slot(slot, SlotRejection::GridFull));
        }
        let card = self
            .shuffled_order
            .get(slot)
            .ok_or(TarotError::invalid_slot(slot, SlotRejection::OutOfRange))?;
        if self.is_picked(slot) {
            return Err(TarotError::invalid_slot(slot, SlotRejection::AlreadyPicked));
        }

        let mut next = self.clone();
        next.drawn_cards.push_back(DrawnCard::new(card.clone(), slot));
        Ok(next)
    }

    // === Transitions (reducer only) ===

    pub(crate) fn with_screen(&self, screen: Screen) -> Self {
        Self {
            screen,
            ..self.clone()
        }
    }

    pub(crate) fn with_selected_deck(&self, deck_id: impl Into<String>) -> Self {
        Self {
            selected_deck: deck_id.into(),
            ..self.clone()
        }
    }

    pub(crate) fn with_pull_count(&self, pull_count: u32) -> Self {
        Self {
            pull_count,
            ..self.clone()
        }
    }

    pub(crate) fn viewing(&self, cursor: usize) -> Self {
        Self {
            view_cursor: cursor,
            screen: Screen::CardDetail,
            ..self.clone()
        }
    }

    /// Start a reading: new shuffle, nothing drawn, cursor reset.
    pub(crate) fn shuffling(&self, deck: Vector<Card>, shuffled_order: Vector<Card>) -> Self {
        Self {
            deck,
            shuffled_order,
            drawn_cards: Vector::new(),
            view_cursor: 0,
            screen: Screen::Shuffling,
            ..self.clone()
        }
    }

    /// Back to the deck picker keeping deck and count selections.
    pub(crate) fn cleared(&self) -> Self {
        Self::new(self.selected_deck.clone(), self.pull_count)
    }
}
