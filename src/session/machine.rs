//! Session state machine.
//!
//! ## Layers
//!
//! - [`reduce`]: pure transition function. Takes a state and an action,
//!   returns the next state plus the effects the host should run. A
//!   rejected action returns an error and the input state stays as it was.
//! - [`SessionMachine`]: owns the state and its collaborators (catalog,
//!   assets, randomness, snapshot store). Dispatches actions through
//!   `reduce`, persists when the reading changed, and hands timer effects
//!   back to the caller.
//!
//! ## Transitions
//!
//! | Screen         | Accepts                                            |
//! |----------------|----------------------------------------------------|
//! | `picker.deck`  | `selectDeck`, `advance`                            |
//! | `picker.count` | `selectCount`, `back`, `start`                     |
//! | `shuffling`    | `shuffleComplete`                                  |
//! | `grid`         | `pickSlot`, `viewSpread` (once full)               |
//! | `spread`       | `viewCard`, `newReading`                           |
//! | `card`         | `navPrev`, `navNext`, `reshuffle`, `viewSpread`    |

use im::Vector;
use smallvec::SmallVec;

use super::snapshot::Snapshot;
use crate::assets::{AssetResolver, Glyph, NoAssets};
use crate::cards::{AssetRef, Card, DeckCatalog, DeckDefinition, DeckSystem};
use crate::core::action::{Action, Effect};
use crate::core::config::SessionConfig;
use crate::core::error::{Result, TarotError};
use crate::core::rng::{OsRandom, RandomSource};
use crate::core::state::{Screen, SessionState};
use crate::persistence::{KeyValueStore, MemoryStore, SnapshotStore};
use crate::shuffle::shuffle;

/// Effects requested by one transition.
pub type Effects = SmallVec<[Effect; 2]>;

/// Collaborators the reducer reads from.
pub struct Context<'a, A: ?Sized, R: ?Sized> {
    pub catalog: &'a DeckCatalog,
    pub assets: &'a A,
    pub rng: &'a mut R,
    pub config: &'a SessionConfig,
}

/// Result of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Effects,
}

/// Apply one action to a state.
///
/// Hardware signals are resolved against the current screen first. The
/// returned effects contain `Persist` whenever the drawn cards or the view
/// cursor changed, and `ScheduleShuffleComplete` whenever a shuffle began.
pub fn reduce<A, R>(
    state: &SessionState,
    action: Action,
    ctx: &mut Context<'_, A, R>,
) -> Result<Transition>
where
    A: AssetResolver + ?Sized,
    R: RandomSource + ?Sized,
{
    let screen = state.screen();
    let requested = action.name();
    let action = action
        .resolve(screen)
        .ok_or_else(|| TarotError::invalid_transition(screen, requested))?;

    let mut effects = Effects::new();
    let next = match (screen, action) {
        // === Picker ===
        (Screen::DeckPicker, Action::SelectDeck(id)) => {
            if !ctx.catalog.contains(&id) {
                return Err(TarotError::UnknownDeck(id));
            }
            state.with_selected_deck(id)
        }
        (Screen::DeckPicker, Action::Advance) => state.with_screen(Screen::CountPicker),
        (Screen::CountPicker, Action::SelectCount(count)) => {
            if !ctx.config.accepts_pull_count(count) {
                return Err(TarotError::InvalidPullCount(count));
            }
            state.with_pull_count(count)
        }
        (Screen::CountPicker, Action::Back) => state.with_screen(Screen::DeckPicker),
        (Screen::CountPicker, Action::Start) => {
            let deck: Vector<Card> = ctx
                .catalog
                .build(state.selected_deck(), ctx.assets)?
                .into_iter()
                .collect();
            begin_shuffle(state, deck, ctx, &mut effects)
        }

        // === Shuffle and draw ===
        (Screen::Shuffling, Action::ShuffleComplete) => state.with_screen(Screen::Grid),
        (Screen::Grid, Action::PickSlot(slot)) => state.pick(slot)?,
        (Screen::Grid, Action::ViewSpread) if state.is_full() => state.with_screen(Screen::Spread),

        // === Spread ===
        (Screen::Spread, Action::ViewCard(index)) if index < state.drawn_cards().len() => {
            state.viewing(index)
        }
        (Screen::Spread, Action::NewReading) => state.cleared(),

        // === Card detail ===
        (Screen::CardDetail, Action::NavPrev) => state.viewing(state.view_cursor().saturating_sub(1)),
        (Screen::CardDetail, Action::NavNext) => {
            let last = state.drawn_cards().len().saturating_sub(1);
            state.viewing((state.view_cursor() + 1).min(last))
        }
        (Screen::CardDetail, Action::Reshuffle) => {
            let deck = if state.deck().is_empty() {
                ctx.catalog
                    .build(state.selected_deck(), ctx.assets)?
                    .into_iter()
                    .collect()
            } else {
                state.deck().clone()
            };
            begin_shuffle(state, deck, ctx, &mut effects)
        }
        (Screen::CardDetail, Action::ViewSpread) => state.with_screen(Screen::Spread),

        (_, action) => return Err(TarotError::invalid_transition(screen, action.name())),
    };

    if next.drawn_cards() != state.drawn_cards() || next.view_cursor() != state.view_cursor() {
        effects.push(Effect::Persist);
    }

    Ok(Transition {
        state: next,
        effects,
    })
}

fn begin_shuffle<A, R>(
    state: &SessionState,
    deck: Vector<Card>,
    ctx: &mut Context<'_, A, R>,
    effects: &mut Effects,
) -> SessionState
where
    A: AssetResolver + ?Sized,
    R: RandomSource + ?Sized,
{
    let cards: Vec<Card> = deck.iter().cloned().collect();
    let shuffled: Vector<Card> = shuffle(&cards, &mut *ctx.rng).into_iter().collect();
    effects.push(Effect::ScheduleShuffleComplete(ctx.config.shuffle_delay));
    state.shuffling(deck, shuffled)
}

/// Session controller.
///
/// One instance owns one session. Inputs are processed one at a time; a
/// rejected input leaves the session exactly as it was.
///
/// ```
/// use tarot_deck::core::{Action, Screen, SeededRandom};
/// use tarot_deck::session::SessionMachine;
///
/// let mut session = SessionMachine::builder()
///     .rng(SeededRandom::new(1))
///     .build()
///     .unwrap();
///
/// session.dispatch(Action::Advance).unwrap();
/// session.dispatch(Action::Start).unwrap();
/// assert_eq!(session.screen(), Screen::Shuffling);
///
/// // the host fires this once the animation time box elapses
/// session.dispatch(Action::ShuffleComplete).unwrap();
/// assert_eq!(session.screen(), Screen::Grid);
/// ```
pub struct SessionMachine {
    catalog: DeckCatalog,
    assets: Box<dyn AssetResolver>,
    rng: Box<dyn RandomSource>,
    store: SnapshotStore,
    config: SessionConfig,
    state: SessionState,
}

impl SessionMachine {
    #[must_use]
    pub fn builder() -> SessionMachineBuilder {
        SessionMachineBuilder::new()
    }

    /// Process one input.
    ///
    /// On success the new state is stored, a snapshot is written if the
    /// reading changed, and the effects are returned. `Persist` is already
    /// handled; `ScheduleShuffleComplete` is for the caller.
    pub fn dispatch(&mut self, action: Action) -> Result<Effects> {
        let requested = action.name();
        let mut ctx = Context {
            catalog: &self.catalog,
            assets: &*self.assets,
            rng: &mut *self.rng,
            config: &self.config,
        };

        let transition = match reduce(&self.state, action, &mut ctx) {
            Ok(transition) => transition,
            Err(err) => {
                tracing::debug!(screen = %self.state.screen(), action = requested, error = %err, "action rejected");
                return Err(err);
            }
        };

        tracing::debug!(
            from = %self.state.screen(),
            to = %transition.state.screen(),
            action = requested,
            drawn = transition.state.drawn_cards().len(),
            "transition"
        );
        self.state = transition.state;

        if transition.effects.contains(&Effect::Persist) {
            self.store.save_snapshot(&Snapshot::capture(&self.state));
        }

        Ok(transition.effects)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &DeckCatalog {
        &self.catalog
    }

    /// Whether input is accepted right now. False while shuffling.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.state.screen() != Screen::Shuffling
    }

    /// Definition of the selected deck.
    #[must_use]
    pub fn selected_deck(&self) -> Option<&DeckDefinition> {
        self.catalog.get(self.state.selected_deck())
    }

    /// Snapshot of the current session, as it would be persisted.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    // === Presentation helpers ===

    /// Picker thumbnail for a deck.
    #[must_use]
    pub fn thumbnail(&self, deck_id: &str) -> Option<AssetRef> {
        self.assets.thumbnail(deck_id)
    }

    /// Card back for the selected deck.
    #[must_use]
    pub fn card_back(&self) -> Option<AssetRef> {
        self.assets.back(self.state.selected_deck())
    }

    /// Symbol shown for a card without an image.
    #[must_use]
    pub fn glyph(&self, card: &Card) -> Glyph {
        let system = self
            .selected_deck()
            .map_or(DeckSystem::Standard, |deck| deck.system);
        self.assets.fallback_glyph(system, card)
    }
}

impl std::fmt::Debug for SessionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMachine")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SessionMachine`].
///
/// Defaults: built-in catalog, no assets, in-memory store, OS randomness,
/// default config.
pub struct SessionMachineBuilder {
    catalog: Option<DeckCatalog>,
    assets: Box<dyn AssetResolver>,
    rng: Box<dyn RandomSource>,
    backend: Box<dyn KeyValueStore>,
    config: SessionConfig,
}

impl Default for SessionMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachineBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            assets: Box::new(NoAssets),
            rng: Box::new(OsRandom::new()),
            backend: Box::new(MemoryStore::new()),
            config: SessionConfig::default(),
        }
    }

    pub fn catalog(mut self, catalog: DeckCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn assets(mut self, assets: impl AssetResolver + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn store(mut self, backend: impl KeyValueStore + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the machine, resuming a stored session when one is valid.
    ///
    /// A missing, unreadable or inconsistent snapshot starts a fresh
    /// session on the deck picker. Fails only on bad configuration.
    pub fn build(self) -> Result<SessionMachine> {
        self.config.validate()?;
        let catalog = self.catalog.unwrap_or_else(DeckCatalog::builtin);

        let default_deck = match &self.config.default_deck {
            Some(id) if catalog.contains(id) => id.clone(),
            Some(id) => {
                return Err(TarotError::Config(format!("default deck '{}' not in catalog", id)))
            }
            None => catalog
                .first()
                .map(|deck| deck.id.clone())
                .ok_or_else(|| TarotError::Config("deck catalog is empty".into()))?,
        };
        let fresh = SessionState::new(default_deck, self.config.default_pull_count);

        let store = SnapshotStore::new(self.backend, self.config.storage_key.clone());
        let state = match store.load_snapshot() {
            Some(snapshot) => match snapshot.restore(&catalog, &*self.assets, &self.config) {
                Ok(state) => {
                    tracing::info!(
                        deck = state.selected_deck(),
                        screen = %state.screen(),
                        drawn = state.drawn_cards().len(),
                        "session restored"
                    );
                    state
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored session rejected, starting fresh");
                    fresh
                }
            },
            None => {
                tracing::info!(deck = fresh.selected_deck(), "starting fresh session");
                fresh
            }
        };

        Ok(SessionMachine {
            catalog,
            assets: self.assets,
            rng: self.rng,
            store,
            config: self.config,
            state,
        })
    }
}
