//! Selected/omni/desired screen bookkeeping.
//!
//! The transition state machine compares the externally-declared desire
//! against the current selection every Idling tick; a mismatch (including an
//! explicit desire for no screen) begins an Outgoing transition. The omni
//! screen is always active, layered beneath the selected screen, and exempt
//! from transition logic.

use bevy_ecs::prelude::{Entity, Resource};

/// The single Game simulant at the root of the world hierarchy. Input
/// signals are addressed to it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct GameRoot(pub Entity);

/// What the host wants the selected screen to become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesiredScreen {
    /// Leave the current selection alone.
    #[default]
    Ignore,
    /// Transition toward this screen.
    Screen(Entity),
    /// Transition to no screen at all.
    None,
}

/// Screen selection state consumed by the transition machine and the gather
/// steps of the pipeline.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScreenSelection {
    /// Currently selected screen, if any.
    pub selected: Option<Entity>,
    /// Always-active screen gathered before the selected one.
    pub omni: Option<Entity>,
    pub desired: DesiredScreen,
}

impl ScreenSelection {
    /// Destination the Outgoing state should resolve to, if the desire
    /// differs from the current selection.
    pub fn desired_destination(&self) -> Option<Option<Entity>> {
        match self.desired {
            DesiredScreen::Ignore => None,
            DesiredScreen::Screen(screen) => {
                if self.selected == Some(screen) {
                    None
                } else {
                    Some(Some(screen))
                }
            }
            DesiredScreen::None => {
                if self.selected.is_none() {
                    None
                } else {
                    Some(None)
                }
            }
        }
    }
}
