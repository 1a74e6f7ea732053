//! Independently toggleable coverings with a two-phase hide.
//!
//! Hiding first marks a layer `removing` (still visible, fading) and only
//! commits `visible = false` after a delay. Showing is immediate. Every
//! toggle bumps the layer's generation, and a commit only lands when its
//! generation still matches and the layer is still removing, so a stale
//! commit can never hide a layer that was shown again in the meantime.

use crate::error::ParseIntentError;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::task::Task;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerId {
    Outer,
    Inner,
    Base,
}

impl LayerId {
    pub const ALL: [LayerId; 3] = [LayerId::Outer, LayerId::Inner, LayerId::Base];

    pub fn name(self) -> &'static str {
        match self {
            LayerId::Outer => "outer",
            LayerId::Inner => "inner",
            LayerId::Base => "base",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl FromStr for LayerId {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerId::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIntentError::UnknownLayer(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerPhase {
    Shown,
    Removing,
    Hidden,
}

/// Observable layer state. `removing` implies `visible`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer {
    pub id: LayerId,
    visible: bool,
    removing: bool,
}

impl Layer {
    fn shown(id: LayerId) -> Self {
        Self {
            id,
            visible: true,
            removing: false,
        }
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn removing(&self) -> bool {
        self.removing
    }

    pub fn phase(&self) -> LayerPhase {
        match (self.visible, self.removing) {
            (true, false) => LayerPhase::Shown,
            (true, true) => LayerPhase::Removing,
            _ => LayerPhase::Hidden,
        }
    }
}

/// What a toggle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerToggle {
    /// Shown layer entered its removing window.
    HideStarted,
    /// Toggled again inside the removing window; the layer stays shown.
    HideCancelled,
    /// Hidden layer became visible.
    Shown,
}

#[derive(Debug)]
struct Slot {
    layer: Layer,
    generation: u64,
    commit: Option<TimerHandle>,
}

#[derive(Debug)]
pub struct LayerController {
    slots: [Slot; 3],
    commit_delay: Duration,
}

impl LayerController {
    pub fn new(commit_delay: Duration) -> Self {
        Self {
            slots: LayerId::ALL.map(|id| Slot {
                layer: Layer::shown(id),
                generation: 0,
                commit: None,
            }),
            commit_delay,
        }
    }

    #[inline]
    pub fn layer(&self, id: LayerId) -> Layer {
        self.slots[id.slot()].layer
    }

    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.slots.iter().map(|s| s.layer)
    }

    pub fn toggle(&mut self, id: LayerId, scheduler: &mut Scheduler<Task>) -> LayerToggle {
        let delay = self.commit_delay;
        let slot = &mut self.slots[id.slot()];
        slot.generation += 1;
        if let Some(handle) = slot.commit.take() {
            scheduler.cancel(handle);
        }
        match slot.layer.phase() {
            LayerPhase::Shown => {
                slot.layer.removing = true;
                slot.commit = Some(scheduler.after(
                    delay,
                    Task::CommitHide {
                        layer: id,
                        generation: slot.generation,
                    },
                ));
                LayerToggle::HideStarted
            }
            LayerPhase::Removing => {
                slot.layer.removing = false;
                LayerToggle::HideCancelled
            }
            LayerPhase::Hidden => {
                slot.layer = Layer::shown(id);
                LayerToggle::Shown
            }
        }
    }

    /// Timer callback finishing a hide. Returns true if the layer was hidden.
    pub fn commit_hide(&mut self, id: LayerId, generation: u64) -> bool {
        let slot = &mut self.slots[id.slot()];
        if slot.generation != generation || !slot.layer.removing {
            return false;
        }
        slot.commit = None;
        slot.layer.visible = false;
        slot.layer.removing = false;
        true
    }

    /// Show every layer and drop pending commits.
    pub fn reset_all(&mut self, scheduler: &mut Scheduler<Task>) {
        for slot in &mut self.slots {
            if let Some(handle) = slot.commit.take() {
                scheduler.cancel(handle);
            }
            slot.generation += 1;
            slot.layer = Layer::shown(slot.layer.id);
        }
    }
}
