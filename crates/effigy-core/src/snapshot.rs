//! Read-only view handed to renderers.

use crate::cue::CueFlags;
use crate::layers::Layer;
use crate::particles::{ChannelId, Particle};
use crate::reaction::TouchReaction;
use crate::sequence::{SequenceRun, Stage};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubjectState {
    pub dead: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelView {
    pub id: ChannelId,
    pub active: bool,
    pub particles: Vec<Particle>,
}

/// Everything a renderer may show. A renderer displays this and nothing
/// else; `revision` changes whenever any field does.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub revision: u64,
    pub now: Duration,
    pub channels: Vec<ChannelView>,
    pub reactions: Vec<TouchReaction>,
    pub layers: Vec<Layer>,
    pub run: SequenceRun,
    /// Definition of the stage most recently reached in the current run.
    pub stage: Option<Stage>,
    pub stage_count: usize,
    pub subject: SubjectState,
    pub cues: CueFlags,
    pub intensity: u8,
    /// Submersion channel is on, so runs start by themselves and the manual
    /// trigger is ignored.
    pub submerging: bool,
}

impl Snapshot {
    pub fn channel(&self, id: ChannelId) -> Option<&ChannelView> {
        self.channels.iter().find(|c| c.id == id)
    }
}
