//! Input events and reducer effects.
//!
//! Actions are what the presentation layer sends in: logical actions
//! (`Start`, `PickSlot`, ...) and three hardware signals that mean
//! different things depending on the screen. `Action::resolve` maps a
//! signal to the logical action it stands for.
//!
//! Effects are what the reducer asks the host to do after a transition.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::Screen;

/// A user or timer input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Action {
    /// Choose a deck on the deck wheel.
    SelectDeck(String),
    /// Choose how many cards to draw.
    SelectCount(u32),
    /// Deck wheel to count wheel.
    Advance,
    /// Count wheel to deck wheel.
    Back,
    /// Build, shuffle and begin drawing.
    Start,
    /// Shuffle animation time box elapsed.
    ShuffleComplete,
    /// Take a face-down card.
    PickSlot(usize),
    /// Open the spread (from a full grid, or back from a card).
    ViewSpread,
    /// Open one drawn card.
    ViewCard(usize),
    NavPrev,
    NavNext,
    /// Shuffle the same deck again and start a new draw.
    Reshuffle,
    /// Back to the picker for another reading.
    NewReading,

    // === Hardware signals ===
    /// Side button.
    PrimaryPress,
    /// Wheel or arrow forward.
    ScrollNext,
    /// Wheel or arrow back.
    ScrollPrev,
}

impl Action {
    /// Stable camelCase name, used in errors and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectDeck(_) => "selectDeck",
            Action::SelectCount(_) => "selectCount",
            Action::Advance => "advance",
            Action::Back => "back",
            Action::Start => "start",
            Action::ShuffleComplete => "shuffleComplete",
            Action::PickSlot(_) => "pickSlot",
            Action::ViewSpread => "viewSpread",
            Action::ViewCard(_) => "viewCard",
            Action::NavPrev => "navPrev",
            Action::NavNext => "navNext",
            Action::Reshuffle => "reshuffle",
            Action::NewReading => "newReading",
            Action::PrimaryPress => "primaryPress",
            Action::ScrollNext => "scrollNext",
            Action::ScrollPrev => "scrollPrev",
        }
    }

    /// Whether this is a context-sensitive hardware signal.
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(
            self,
            Action::PrimaryPress | Action::ScrollNext | Action::ScrollPrev
        )
    }

    /// Map a signal to its logical action on `screen`.
    ///
    /// Logical actions pass through unchanged. Returns `None` when the
    /// signal means nothing on that screen.
    ///
    /// A press on the deck picker only advances to the count picker, so a
    /// single-button host starts a reading with two presses: the second
    /// one, on the count picker, starts the shuffle.
    ///
    /// ```
    /// use tarot_deck::core::{Action, Screen};
    ///
    /// assert_eq!(Action::PrimaryPress.resolve(Screen::DeckPicker), Some(Action::Advance));
    /// assert_eq!(Action::PrimaryPress.resolve(Screen::CountPicker), Some(Action::Start));
    /// assert_eq!(Action::PrimaryPress.resolve(Screen::Spread), Some(Action::ViewCard(0)));
    /// assert_eq!(Action::ScrollNext.resolve(Screen::CardDetail), Some(Action::NavNext));
    /// assert_eq!(Action::ScrollNext.resolve(Screen::Grid), None);
    /// assert_eq!(Action::Start.resolve(Screen::Grid), Some(Action::Start));
    /// ```
    #[must_use]
    pub fn resolve(self, screen: Screen) -> Option<Action> {
        match (self, screen) {
            (Action::PrimaryPress, Screen::DeckPicker) => Some(Action::Advance),
            (Action::PrimaryPress, Screen::CountPicker) => Some(Action::Start),
            (Action::PrimaryPress, Screen::Spread) => Some(Action::ViewCard(0)),
            (Action::PrimaryPress, Screen::CardDetail) => Some(Action::Reshuffle),
            (Action::ScrollNext, Screen::CardDetail) => Some(Action::NavNext),
            (Action::ScrollPrev, Screen::CardDetail) => Some(Action::NavPrev),
            (signal, _) if signal.is_signal() => None,
            (action, _) => Some(action),
        }
    }
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Write a snapshot of the new state. The session controller performs
    /// this itself; it is reported for observability.
    Persist,
    /// Send `Action::ShuffleComplete` after the delay.
    ScheduleShuffleComplete(Duration),
}
