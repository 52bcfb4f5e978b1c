//! Card system: templates, deck systems, catalog and builder.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Static naming (major number or suit)
//! - `DeckSystem`: Naming tradition with its 78-card tables
//! - `DeckDefinition`: A pickable deck (id, name, system, art flag)
//! - `DeckCatalog`: Ordered deck lookup
//! - `Card` / `DrawnCard`: Built cards and picked cards
//!
//! Card identity is positional: `Card::slot` is the index in the deck's
//! canonical order and doubles as the image slot.

pub mod builder;
pub mod definition;
pub mod registry;
pub mod system;

pub use builder::build_deck;
pub use definition::{ArcanaKind, AssetRef, Card, CardTemplate, DrawnCard};
pub use registry::{DeckCatalog, DeckDefinition};
pub use system::{DeckSystem, DECK_SIZE, MAJOR_COUNT, SUIT_SIZE};
