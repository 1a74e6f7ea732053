use crate::cue::Cue;
use crate::layers::LayerId;

/// Payload of every timer a session arms.
///
/// Ids embedded in a payload (`run`, `generation`) let the receiving
/// component recognise a timer that outlived the state it was armed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    ParticleTick,
    SweepReactions,
    AdvanceStage { run: u64, stage: usize },
    SettleRun { run: u64 },
    CommitHide { layer: LayerId, generation: u64 },
    AutoStart,
    EndCue(Cue),
}
