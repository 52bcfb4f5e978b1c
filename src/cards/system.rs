//! Deck systems and their naming tables.
//!
//! Every system lays out 78 cards the same way: majors 0..=21, then for
//! each suit in declared order the pips 1..=10 followed by the four
//! courts in declared order.

use serde::{Deserialize, Serialize};

use super::definition::CardTemplate;

/// Number of major arcana.
pub const MAJOR_COUNT: usize = 22;

/// Cards per suit: ten pips and four courts.
pub const SUIT_SIZE: usize = 14;

/// Full deck size.
pub const DECK_SIZE: usize = MAJOR_COUNT + 4 * SUIT_SIZE;

/// A tarot naming tradition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckSystem {
    Primordial,
    /// Rider-Waite-Smith naming.
    Standard,
    Thoth,
    Marseille,
}

const STANDARD_MAJORS: [&str; MAJOR_COUNT] = [
    "The Fool", "The Magician", "The High Priestess", "The Empress", "The Emperor",
    "The Hierophant", "The Lovers", "The Chariot", "Strength", "The Hermit",
    "Wheel of Fortune", "Justice", "The Hanged Man", "Death", "Temperance",
    "The Devil", "The Tower", "The Star", "The Moon", "The Sun",
    "Judgement", "The World",
];

const THOTH_MAJORS: [&str; MAJOR_COUNT] = [
    "The Fool", "The Magus", "The Priestess", "The Empress", "The Emperor",
    "The Hierophant", "The Lovers", "The Chariot", "Adjustment", "The Hermit",
    "Fortune", "Lust", "The Hanged Man", "Death", "Art",
    "The Devil", "The Tower", "The Star", "The Moon", "The Sun",
    "The Aeon", "The Universe",
];

const MARSEILLE_MAJORS: [&str; MAJOR_COUNT] = [
    "Le Mat", "Le Bateleur", "La Papesse", "L'Impératrice", "L'Empereur",
    "Le Pape", "L'Amoureux", "Le Chariot", "La Justice", "L'Hermite",
    "La Roue de Fortune", "La Force", "Le Pendu", "L'Arcane sans Nom", "Tempérance",
    "Le Diable", "La Maison Dieu", "L'Étoile", "La Lune", "Le Soleil",
    "Le Jugement", "Le Monde",
];

const PRIMORDIAL_MAJORS: [&str; MAJOR_COUNT] = [
    "The Fool", "The Magician", "The Great Mother", "The Mother", "The Father",
    "The Shaman", "Union", "The Chariot", "Abundance", "The Hermit",
    "Time", "Creative Power", "Sacrifice", "Death", "Source",
    "Demon", "Menhir", "The Star", "The Moon", "The Sun",
    "The Prey", "The World",
];

const STANDARD_SUITS: [&str; 4] = ["Wands", "Cups", "Swords", "Pentacles"];
const THOTH_SUITS: [&str; 4] = ["Wands", "Cups", "Swords", "Disks"];
const MARSEILLE_SUITS: [&str; 4] = ["Bâtons", "Coupes", "Épées", "Deniers"];
const PRIMORDIAL_SUITS: [&str; 4] = ["Nature", "Soul", "Blood", "Jewels"];

const STANDARD_COURTS: [&str; 4] = ["Page", "Knight", "Queen", "King"];
const THOTH_COURTS: [&str; 4] = ["Princess", "Prince", "Queen", "Knight"];
const MARSEILLE_COURTS: [&str; 4] = ["Valet", "Cavalier", "Reine", "Roi"];
const PRIMORDIAL_COURTS: [&str; 4] = ["Child", "Animal", "Woman", "Man"];

const ENGLISH_PIPS: [&str; 10] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
];

impl DeckSystem {
    /// All systems in catalog order.
    pub const ALL: [DeckSystem; 4] = [
        DeckSystem::Standard,
        DeckSystem::Thoth,
        DeckSystem::Marseille,
        DeckSystem::Primordial,
    ];

    /// Major arcana names indexed by number.
    #[must_use]
    pub fn major_names(self) -> &'static [&'static str; MAJOR_COUNT] {
        match self {
            DeckSystem::Standard => &STANDARD_MAJORS,
            DeckSystem::Thoth => &THOTH_MAJORS,
            DeckSystem::Marseille => &MARSEILLE_MAJORS,
            DeckSystem::Primordial => &PRIMORDIAL_MAJORS,
        }
    }

    /// Suits in declared order.
    #[must_use]
    pub fn suits(self) -> &'static [&'static str; 4] {
        match self {
            DeckSystem::Standard => &STANDARD_SUITS,
            DeckSystem::Thoth => &THOTH_SUITS,
            DeckSystem::Marseille => &MARSEILLE_SUITS,
            DeckSystem::Primordial => &PRIMORDIAL_SUITS,
        }
    }

    /// Court ranks in declared order.
    #[must_use]
    pub fn courts(self) -> &'static [&'static str; 4] {
        match self {
            DeckSystem::Standard => &STANDARD_COURTS,
            DeckSystem::Thoth => &THOTH_COURTS,
            DeckSystem::Marseille => &MARSEILLE_COURTS,
            DeckSystem::Primordial => &PRIMORDIAL_COURTS,
        }
    }

    /// Name of the pip `rank` (1..=10) of `suit`.
    #[must_use]
    pub fn pip_name(self, rank: usize, suit: &str) -> String {
        match self {
            DeckSystem::Standard | DeckSystem::Thoth => {
                format!("{} of {}", ENGLISH_PIPS[rank - 1], suit)
            }
            DeckSystem::Marseille if rank == 1 => format!("As de {}", suit),
            DeckSystem::Marseille => format!("{} de {}", rank, suit),
            DeckSystem::Primordial => format!("{} of {}", rank, suit),
        }
    }

    /// Name of a court card of `suit`.
    #[must_use]
    pub fn court_name(self, court: &str, suit: &str) -> String {
        match self {
            DeckSystem::Marseille => format!("{} de {}", court, suit),
            _ => format!("{} of {}", court, suit),
        }
    }

    /// The 78 templates in canonical order.
    #[must_use]
    pub fn templates(self) -> Vec<CardTemplate> {
        let mut templates = Vec::with_capacity(DECK_SIZE);

        for (number, name) in self.major_names().iter().enumerate() {
            templates.push(CardTemplate::major(number as u8, *name));
        }

        for suit in self.suits() {
            for rank in 1..=10 {
                templates.push(CardTemplate::minor(*suit, self.pip_name(rank, suit)));
            }
            for court in self.courts() {
                templates.push(CardTemplate::minor(*suit, self.court_name(court, suit)));
            }
        }

        templates
    }
}

impl std::fmt::Display for DeckSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeckSystem::Primordial => "Primordial",
            DeckSystem::Standard => "Standard",
            DeckSystem::Thoth => "Thoth",
            DeckSystem::Marseille => "Marseille",
        };
        f.write_str(name)
    }
}
