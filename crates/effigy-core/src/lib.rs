//! Core state machines for the effigy figure.
//!
//! A [`Session`] owns a timer [`Scheduler`], the reaction classifier's result
//! set, the particle field, the layer controller and the stage sequencer.
//! Front-ends translate input into [`Intent`]s, advance the session clock,
//! and render [`Snapshot`]s. No platform APIs live here.

pub mod config;
pub mod constants;
pub mod cue;
pub mod error;
pub mod intent;
pub mod layers;
pub mod particles;
pub mod reaction;
pub mod scheduler;
pub mod script;
pub mod sequence;
pub mod session;
pub mod snapshot;
pub mod task;

pub use config::SessionConfig;
pub use cue::{Cue, CueFlags};
pub use error::{ConfigError, ParseIntentError, ScriptError};
pub use intent::Intent;
pub use layers::{Layer, LayerId, LayerPhase, LayerToggle};
pub use particles::{ChannelId, EffectChannel, Particle, ParticleSettings};
pub use reaction::{classify, region_at, ReactionKind, Region, TouchReaction};
pub use scheduler::{Scheduler, TimerHandle};
pub use script::{Script, ScriptStep};
pub use sequence::{SequencePhase, SequenceRun, Stage, StageSequence};
pub use session::Session;
pub use snapshot::{ChannelView, Snapshot, SubjectState};
