//! Symbolic glyphs shown when a card has no image.

use serde::{Serialize, Serializer};

use crate::cards::{ArcanaKind, Card, DeckSystem};

/// A printable fallback symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph(pub &'static str);

impl Glyph {
    /// Generic glyph for majors outside the table.
    pub const MAJOR_FALLBACK: Glyph = Glyph("🔮");
    /// Generic glyph for unknown suits.
    pub const GENERIC: Glyph = Glyph("🃏");

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Glyph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

const PRIMORDIAL_MAJOR_GLYPHS: [&str; 22] = [
    "🥚", "✨", "🌍", "🤱", "👤", "🔮", "💞", "☸️", "🌾", "🏔️", "⏳",
    "⚡", "🗡️", "💀", "💧", "👹", "🪨", "⭐", "🌙", "☀️", "🦌", "🌎",
];

const STANDARD_MAJOR_GLYPHS: [&str; 22] = [
    "🃏", "✨", "🌙", "👑", "🏛️", "📿", "❤️", "⚔️", "🦁", "🏔️", "☸️",
    "⚖️", "🔄", "💀", "🏺", "😈", "🗼", "⭐", "🌙", "☀️", "📯", "🌎",
];

const SUIT_GLYPHS: [(&str, &str); 14] = [
    ("Wands", "🪄"),
    ("Cups", "🏆"),
    ("Swords", "⚔️"),
    ("Pentacles", "⭐"),
    ("Disks", "💿"),
    ("Nature", "🌿"),
    ("Soul", "👁️"),
    ("Blood", "🩸"),
    ("Jewels", "💎"),
    ("Bâtons", "🪵"),
    ("Coupes", "🏆"),
    ("Épées", "⚔️"),
    ("Deniers", "🪙"),
    ("Souls", "👁️"),
];

/// Deterministic glyph for a card of a deck system.
///
/// Majors map by number through the system's family table (primordial or
/// standard), minors map by suit.
#[must_use]
pub fn fallback_glyph(system: DeckSystem, card: &Card) -> Glyph {
    match card.kind() {
        ArcanaKind::Major => {
            let table = match system {
                DeckSystem::Primordial => &PRIMORDIAL_MAJOR_GLYPHS,
                _ => &STANDARD_MAJOR_GLYPHS,
            };
            card.major_number()
                .and_then(|n| table.get(usize::from(n)))
                .map_or(Glyph::MAJOR_FALLBACK, |g| Glyph(*g))
        }
        ArcanaKind::Minor => card
            .suit()
            .and_then(|suit| SUIT_GLYPHS.iter().find(|(name, _)| *name == suit))
            .map_or(Glyph::GENERIC, |(_, g)| Glyph(*g)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;

    fn major(n: u8) -> Card {
        Card::new(usize::from(n), CardTemplate::major(n, "x"), None)
    }

    fn minor(suit: &str) -> Card {
        Card::new(22, CardTemplate::minor(suit, "x"), None)
    }

    #[test]
    fn test_major_family_tables() {
        assert_eq!(fallback_glyph(DeckSystem::Primordial, &major(0)), Glyph("🥚"));
        assert_eq!(fallback_glyph(DeckSystem::Standard, &major(0)), Glyph("🃏"));
        assert_eq!(fallback_glyph(DeckSystem::Thoth, &major(13)), Glyph("💀"));
        assert_eq!(fallback_glyph(DeckSystem::Marseille, &major(21)), Glyph("🌎"));
    }

    #[test]
    fn test_unknown_major_falls_back() {
        assert_eq!(fallback_glyph(DeckSystem::Standard, &major(40)), Glyph::MAJOR_FALLBACK);

        let mut card = major(3);
        card.template.major_number = None;
        assert_eq!(fallback_glyph(DeckSystem::Standard, &card), Glyph::MAJOR_FALLBACK);
    }

    #[test]
    fn test_suits() {
        assert_eq!(fallback_glyph(DeckSystem::Standard, &minor("Cups")), Glyph("🏆"));
        assert_eq!(fallback_glyph(DeckSystem::Thoth, &minor("Disks")), Glyph("💿"));
        assert_eq!(fallback_glyph(DeckSystem::Marseille, &minor("Deniers")), Glyph("🪙"));
        assert_eq!(fallback_glyph(DeckSystem::Primordial, &minor("Soul")), Glyph("👁️"));
        assert_eq!(fallback_glyph(DeckSystem::Standard, &minor("Feathers")), Glyph::GENERIC);
    }

    #[test]
    fn test_every_builtin_suit_has_glyph() {
        for system in DeckSystem::ALL {
            for suit in system.suits() {
                assert_ne!(fallback_glyph(system, &minor(suit)), Glyph::GENERIC, "{}", suit);
            }
        }
    }
}
