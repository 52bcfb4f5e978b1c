//! Persisted session snapshot.
//!
//! The snapshot carries just enough to resume a reading on the card
//! screen: deck id, pull count, the drawn cards with their grid tiles and
//! the view cursor. Restoring validates all of it against the catalog; any
//! inconsistency rejects the whole snapshot. A reading left mid-pick keeps
//! only its deck and count, since the grid it was drawn from is gone.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::assets::AssetResolver;
use crate::cards::{build_deck, ArcanaKind, Card, CardTemplate, DeckCatalog, DrawnCard};
use crate::core::config::SessionConfig;
use crate::core::error::{Result, TarotError};
use crate::core::state::SessionState;

/// One drawn card as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCard {
    pub name: String,
    pub kind: ArcanaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_number: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    pub reversed: bool,
    pub origin_grid_slot: usize,
}

impl SnapshotCard {
    #[must_use]
    pub fn from_drawn(drawn: &DrawnCard) -> Self {
        let template = &drawn.card.template;
        Self {
            name: template.name.clone(),
            kind: template.kind,
            major_number: template.major_number,
            suit: template.suit.clone(),
            image_ref: drawn.card.image.as_ref().map(|i| i.0.clone()),
            reversed: drawn.card.reversed,
            origin_grid_slot: drawn.origin_slot,
        }
    }

    /// Naming fields as a template.
    #[must_use]
    pub fn template(&self) -> CardTemplate {
        CardTemplate {
            name: self.name.clone(),
            kind: self.kind,
            major_number: self.major_number,
            suit: self.suit.clone(),
        }
    }
}

/// Snapshot of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub deck_id: String,
    pub pull_count: u32,
    #[serde(default)]
    pub drawn_cards: Vec<SnapshotCard>,
    #[serde(default)]
    pub view_cursor: usize,
    /// Epoch milliseconds when the snapshot was taken.
    #[serde(default)]
    pub timestamp: i64,
}

impl Snapshot {
    /// Capture a state, stamped with the current time.
    #[must_use]
    pub fn capture(state: &SessionState) -> Self {
        Self::capture_at(state, chrono::Utc::now().timestamp_millis())
    }

    /// Capture a state with an explicit timestamp.
    #[must_use]
    pub fn capture_at(state: &SessionState, timestamp: i64) -> Self {
        Self {
            deck_id: state.selected_deck().to_string(),
            pull_count: state.pull_count(),
            drawn_cards: state.drawn_cards().iter().map(SnapshotCard::from_drawn).collect(),
            view_cursor: state.view_cursor(),
            timestamp,
        }
    }

    /// Rebuild a session from this snapshot.
    ///
    /// With fewer drawn cards than the pull count (none, or a grid left
    /// mid-pick) the session lands on the deck picker with the saved deck
    /// and count. Otherwise it lands on the card screen at the
    /// saved cursor, with the deck rebuilt and a grid order that puts each
    /// drawn card back on its original tile. Images are re-resolved.
    pub fn restore<A: AssetResolver + ?Sized>(
        &self,
        catalog: &DeckCatalog,
        assets: &A,
        config: &SessionConfig,
    ) -> Result<SessionState> {
        let definition = catalog
            .get(&self.deck_id)
            .ok_or_else(|| TarotError::malformed(format!("deck '{}' not in catalog", self.deck_id)))?;

        if !config.accepts_pull_count(self.pull_count) {
            return Err(TarotError::malformed(format!(
                "pull count {} out of range",
                self.pull_count
            )));
        }

        if self.drawn_cards.len() < self.pull_count as usize {
            return Ok(SessionState::new(self.deck_id.clone(), self.pull_count));
        }

        if self.drawn_cards.len() > self.pull_count as usize {
            return Err(TarotError::malformed(format!(
                "{} drawn cards for a {}-card pull",
                self.drawn_cards.len(),
                self.pull_count
            )));
        }
        if self.view_cursor >= self.drawn_cards.len() {
            return Err(TarotError::malformed(format!(
                "view cursor {} past {} cards",
                self.view_cursor,
                self.drawn_cards.len()
            )));
        }

        let deck = build_deck(definition, assets);
        let mut grid: Vec<Option<Card>> = vec![None; deck.len()];
        let mut used = vec![false; deck.len()];
        let mut drawn = Vector::new();

        for entry in &self.drawn_cards {
            let slot = definition.slot_of(&entry.template()).ok_or_else(|| {
                TarotError::malformed(format!("'{}' is not a card of '{}'", entry.name, self.deck_id))
            })?;
            if used[slot] {
                return Err(TarotError::malformed(format!("'{}' drawn twice", entry.name)));
            }
            used[slot] = true;

            let origin = entry.origin_grid_slot;
            match grid.get(origin) {
                None => {
                    return Err(TarotError::malformed(format!("grid slot {} out of range", origin)))
                }
                Some(Some(_)) => {
                    return Err(TarotError::malformed(format!("grid slot {} picked twice", origin)))
                }
                Some(None) => {}
            }

            let card = deck[slot].oriented(entry.reversed);
            grid[origin] = Some(card.clone());
            drawn.push_back(DrawnCard::new(card, origin));
        }

        let mut rest = deck.iter().filter(|card| !used[card.slot]).cloned();
        let shuffled_order = grid
            .into_iter()
            .map(|tile| tile.or_else(|| rest.next()))
            .collect::<Option<Vector<Card>>>()
            .ok_or_else(|| TarotError::malformed("grid could not be rebuilt"))?;

        Ok(SessionState::resumed(
            self.deck_id.clone(),
            self.pull_count,
            deck.into_iter().collect(),
            shuffled_order,
            drawn,
            self.view_cursor,
        ))
    }
}
