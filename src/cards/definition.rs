//! Card data model.
//!
//! `CardTemplate` holds the immutable naming of a card inside its deck
//! system. A `Card` is a template placed at a canonical slot, with its
//! resolved image and orientation. `DrawnCard` remembers which grid tile
//! a card was picked from.
//!
//! Cards are never mutated in place: orientation is attached by building
//! a new `Card` at shuffle time.

use serde::{Deserialize, Serialize};

/// Major or minor arcana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcanaKind {
    Major,
    Minor,
}

/// Opaque reference to an image asset (URL or path).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static card naming.
///
/// `major_number` is present iff `kind` is major, `suit` iff minor.
/// Use the constructors to keep that pairing.
///
/// ```
/// use tarot_deck::cards::{ArcanaKind, CardTemplate};
///
/// let fool = CardTemplate::major(0, "The Fool");
/// assert_eq!(fool.kind, ArcanaKind::Major);
/// assert_eq!(fool.major_number, Some(0));
///
/// let ace = CardTemplate::minor("Cups", "Ace of Cups");
/// assert_eq!(ace.suit.as_deref(), Some("Cups"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub name: String,
    pub kind: ArcanaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_number: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<String>,
}

impl CardTemplate {
    /// A major arcana card numbered `0..=21`.
    #[must_use]
    pub fn major(number: u8, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ArcanaKind::Major,
            major_number: Some(number),
            suit: None,
        }
    }

    /// A minor arcana card of `suit`.
    #[must_use]
    pub fn minor(suit: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ArcanaKind::Minor,
            major_number: None,
            suit: Some(suit.into()),
        }
    }

    #[must_use]
    pub fn is_major(&self) -> bool {
        self.kind == ArcanaKind::Major
    }

    /// Check the kind/number/suit pairing.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            ArcanaKind::Major => {
                self.suit.is_none() && self.major_number.is_some_and(|n| n <= 21)
            }
            ArcanaKind::Minor => self.major_number.is_none() && self.suit.is_some(),
        }
    }
}

/// A built card: template at a canonical deck slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position in the deck's canonical ordering (also the image slot).
    pub slot: usize,

    /// Static naming.
    pub template: CardTemplate,

    /// Resolved image, `None` when the deck has no art for this slot.
    pub image: Option<AssetRef>,

    /// Orientation. Always false before the first shuffle.
    pub reversed: bool,
}

impl Card {
    /// Create an upright card.
    #[must_use]
    pub fn new(slot: usize, template: CardTemplate, image: Option<AssetRef>) -> Self {
        Self {
            slot,
            template,
            image,
            reversed: false,
        }
    }

    /// Copy of this card with the given orientation.
    #[must_use]
    pub fn oriented(&self, reversed: bool) -> Self {
        Self {
            reversed,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    #[must_use]
    pub fn kind(&self) -> ArcanaKind {
        self.template.kind
    }

    #[must_use]
    pub fn major_number(&self) -> Option<u8> {
        self.template.major_number
    }

    #[must_use]
    pub fn suit(&self) -> Option<&str> {
        self.template.suit.as_deref()
    }

    /// "Major · 13" or "Minor · Cups".
    #[must_use]
    pub fn arcana_label(&self) -> String {
        match self.template.kind {
            ArcanaKind::Major => {
                format!("Major · {}", self.template.major_number.unwrap_or_default())
            }
            ArcanaKind::Minor => format!("Minor · {}", self.suit().unwrap_or_default()),
        }
    }

    /// "Reversed" or "Upright".
    #[must_use]
    pub fn orientation_label(&self) -> &'static str {
        if self.reversed {
            "Reversed"
        } else {
            "Upright"
        }
    }
}

/// A card taken from the grid, remembering the tile it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawnCard {
    pub card: Card,
    /// Index into the shuffled order at the moment of the pick.
    pub origin_slot: usize,
}

impl DrawnCard {
    #[must_use]
    pub fn new(card: Card, origin_slot: usize) -> Self {
        Self { card, origin_slot }
    }
}
