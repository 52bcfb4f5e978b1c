//! Deck catalog for definition lookup.
//!
//! The `DeckCatalog` stores every deck a session can pick from. It keeps
//! insertion order (the picker shows decks in that order) and provides
//! fast lookup by id.

use rustc_hash::FxHashMap;

use super::definition::CardTemplate;
use super::system::DeckSystem;

/// A pickable deck.
///
/// ## Example
///
/// ```
/// use tarot_deck::cards::{DeckDefinition, DeckSystem};
///
/// let deck = DeckDefinition::new("crow", "The Crow", DeckSystem::Standard).with_images();
/// assert_eq!(deck.templates().len(), 78);
/// assert!(deck.has_images);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckDefinition {
    /// Unique key, also the asset folder name.
    pub id: String,

    /// Name shown in the picker.
    pub display_name: String,

    /// Naming tradition; selects the glyph family too.
    pub system: DeckSystem,

    /// Whether card art exists for this deck.
    pub has_images: bool,

    templates: Vec<CardTemplate>,
}

impl DeckDefinition {
    /// Create a deck without card art.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, system: DeckSystem) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            system,
            has_images: false,
            templates: system.templates(),
        }
    }

    /// Mark the deck as illustrated.
    #[must_use]
    pub fn with_images(mut self) -> Self {
        self.has_images = true;
        self
    }

    /// Card templates in canonical order.
    #[must_use]
    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Canonical slot of a template, if it belongs to this deck.
    #[must_use]
    pub fn slot_of(&self, template: &CardTemplate) -> Option<usize> {
        self.templates.iter().position(|t| t == template)
    }
}

/// Illustrated decks using standard naming with numbered art.
const ILLUSTRATED_DECKS: [(&str, &str); 12] = [
    ("lightseer", "Light Seer's"),
    ("hermetic", "The Hermetic"),
    ("eightbit", "8-Bit"),
    ("crow", "The Crow"),
    ("goldenthread", "The Golden Thread"),
    ("darkexact", "Dark Exact"),
    ("etherealvisions", "Ethereal Visions"),
    ("fantasticalcreatures", "Fantastical Creatures"),
    ("fengshui", "Feng Shui"),
    ("loverspath", "Lovers' Path"),
    ("mysticalmoments", "Mystical Moments"),
    ("tapestry", "Tapestry"),
];

/// Registry of decks.
///
/// ## Example
///
/// ```
/// use tarot_deck::cards::{DeckCatalog, DeckDefinition, DeckSystem};
///
/// let mut catalog = DeckCatalog::new();
/// catalog.register(DeckDefinition::new("mine", "My Deck", DeckSystem::Thoth));
///
/// let found = catalog.get("mine").unwrap();
/// assert_eq!(found.display_name, "My Deck");
/// assert!(catalog.get("missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeckCatalog {
    decks: Vec<DeckDefinition>,
    index: FxHashMap<String, usize>,
}

impl DeckCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the four system decks and the illustrated decks.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        catalog.register(DeckDefinition::new("standard", "Standard", DeckSystem::Standard));
        catalog.register(DeckDefinition::new("thoth", "Thoth", DeckSystem::Thoth));
        catalog.register(DeckDefinition::new("marseille", "Marseille", DeckSystem::Marseille));
        catalog.register(
            DeckDefinition::new("primordial", "Primordial", DeckSystem::Primordial).with_images(),
        );

        for (id, name) in ILLUSTRATED_DECKS {
            catalog.register(DeckDefinition::new(id, name, DeckSystem::Standard).with_images());
        }

        catalog
    }

    /// Register a deck, replacing any deck with the same id in place.
    ///
    /// Returns true if the id was new.
    pub fn register(&mut self, deck: DeckDefinition) -> bool {
        match self.index.get(&deck.id) {
            Some(&pos) => {
                self.decks[pos] = deck;
                false
            }
            None => {
                self.index.insert(deck.id.clone(), self.decks.len());
                self.decks.push(deck);
                true
            }
        }
    }

    /// Get a deck by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DeckDefinition> {
        self.index.get(id).map(|&pos| &self.decks[pos])
    }

    /// Check if a deck id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// First deck in picker order.
    #[must_use]
    pub fn first(&self) -> Option<&DeckDefinition> {
        self.decks.first()
    }

    /// Picker position of a deck.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Iterate decks in picker order.
    pub fn iter(&self) -> impl Iterator<Item = &DeckDefinition> {
        self.decks.iter()
    }

    /// Decks of one naming system.
    pub fn find_by_system(&self, system: DeckSystem) -> impl Iterator<Item = &DeckDefinition> {
        self.decks.iter().filter(move |d| d.system == system)
    }
}
