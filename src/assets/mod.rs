//! Asset lookup seam.
//!
//! The core never loads images. It asks an `AssetResolver` for opaque
//! references and falls back to a glyph when none exists.
//!
//! ## Resolvers
//!
//! - `NoAssets`: resolves nothing; every card shows its glyph
//! - `StaticAssets`: in-memory table, handy for hosts that bundle assets
//! - `DirectoryAssets`: `decks/<id>/...` folder convention on disk

mod directory;
mod glyph;

pub use directory::DirectoryAssets;
pub use glyph::{fallback_glyph, Glyph};

use rustc_hash::FxHashMap;

use crate::cards::{AssetRef, Card, DeckSystem};

/// Resolves deck artwork. Any lookup may come back empty.
pub trait AssetResolver {
    /// Picker thumbnail for a deck.
    fn thumbnail(&self, deck_id: &str) -> Option<AssetRef>;

    /// Card back shown on the face-down grid.
    fn back(&self, deck_id: &str) -> Option<AssetRef>;

    /// Face image for the card at canonical `slot`.
    fn card_image(&self, deck_id: &str, slot: usize) -> Option<AssetRef>;

    /// Symbol shown in place of a missing image.
    fn fallback_glyph(&self, system: DeckSystem, card: &Card) -> Glyph {
        fallback_glyph(system, card)
    }
}

impl<A: AssetResolver + ?Sized> AssetResolver for Box<A> {
    fn thumbnail(&self, deck_id: &str) -> Option<AssetRef> {
        (**self).thumbnail(deck_id)
    }

    fn back(&self, deck_id: &str) -> Option<AssetRef> {
        (**self).back(deck_id)
    }

    fn card_image(&self, deck_id: &str, slot: usize) -> Option<AssetRef> {
        (**self).card_image(deck_id, slot)
    }

    fn fallback_glyph(&self, system: DeckSystem, card: &Card) -> Glyph {
        (**self).fallback_glyph(system, card)
    }
}

/// Resolver with no assets at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn thumbnail(&self, _deck_id: &str) -> Option<AssetRef> {
        None
    }

    fn back(&self, _deck_id: &str) -> Option<AssetRef> {
        None
    }

    fn card_image(&self, _deck_id: &str, _slot: usize) -> Option<AssetRef> {
        None
    }
}

/// In-memory asset table.
///
/// ```
/// use tarot_deck::assets::{AssetResolver, StaticAssets};
///
/// let assets = StaticAssets::new()
///     .with_back("crow", "crow/back.png")
///     .with_card_image("crow", 0, "crow/00.png");
///
/// assert_eq!(assets.back("crow").unwrap().as_str(), "crow/back.png");
/// assert!(assets.card_image("crow", 1).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticAssets {
    thumbnails: FxHashMap<String, AssetRef>,
    backs: FxHashMap<String, AssetRef>,
    images: FxHashMap<(String, usize), AssetRef>,
}

impl StaticAssets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thumbnail(mut self, deck_id: impl Into<String>, asset: impl Into<String>) -> Self {
        self.thumbnails.insert(deck_id.into(), AssetRef::new(asset));
        self
    }

    #[must_use]
    pub fn with_back(mut self, deck_id: impl Into<String>, asset: impl Into<String>) -> Self {
        self.backs.insert(deck_id.into(), AssetRef::new(asset));
        self
    }

    #[must_use]
    pub fn with_card_image(
        mut self,
        deck_id: impl Into<String>,
        slot: usize,
        asset: impl Into<String>,
    ) -> Self {
        self.images.insert((deck_id.into(), slot), AssetRef::new(asset));
        self
    }
}

impl AssetResolver for StaticAssets {
    fn thumbnail(&self, deck_id: &str) -> Option<AssetRef> {
        self.thumbnails.get(deck_id).cloned()
    }

    fn back(&self, deck_id: &str) -> Option<AssetRef> {
        self.backs.get(deck_id).cloned()
    }

    fn card_image(&self, deck_id: &str, slot: usize) -> Option<AssetRef> {
        self.images.get(&(deck_id.to_string(), slot)).cloned()
    }
}
