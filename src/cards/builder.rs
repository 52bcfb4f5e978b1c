//! Deck builder: catalog entry to an ordered card sequence.
//!
//! Building is deterministic. The same definition always yields the same
//! cards in the same order; only the image lookup goes through the
//! resolver, and a missing image is a normal outcome (the card falls back
//! to its glyph downstream).

use super::definition::Card;
use super::registry::{DeckCatalog, DeckDefinition};
use crate::assets::AssetResolver;
use crate::core::error::{Result, TarotError};

/// Build the canonical, upright card sequence for a deck.
///
/// ```
/// use tarot_deck::assets::NoAssets;
/// use tarot_deck::cards::{build_deck, DeckDefinition, DeckSystem};
///
/// let deck = DeckDefinition::new("standard", "Standard", DeckSystem::Standard);
/// let cards = build_deck(&deck, &NoAssets);
///
/// assert_eq!(cards.len(), 78);
/// assert_eq!(cards[0].name(), "The Fool");
/// assert!(cards.iter().all(|c| c.image.is_none() && !c.reversed));
/// ```
#[must_use]
pub fn build_deck<A: AssetResolver + ?Sized>(deck: &DeckDefinition, assets: &A) -> Vec<Card> {
    deck.templates()
        .iter()
        .enumerate()
        .map(|(slot, template)| {
            let image = if deck.has_images {
                assets.card_image(&deck.id, slot)
            } else {
                None
            };
            Card::new(slot, template.clone(), image)
        })
        .collect()
}

impl DeckCatalog {
    /// Build a registered deck by id.
    pub fn build<A: AssetResolver + ?Sized>(&self, id: &str, assets: &A) -> Result<Vec<Card>> {
        let deck = self
            .get(id)
            .ok_or_else(|| TarotError::UnknownDeck(id.to_string()))?;
        Ok(build_deck(deck, assets))
    }
}
