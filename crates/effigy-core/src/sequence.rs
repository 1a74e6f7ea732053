//! Scripted stage progression ending in a terminal state.
//!
//! `start` arms one timer per stage at the stage's cumulative offset from
//! the start instant (stage k at `duration[1] + .. + duration[k]`), all at
//! once. Timers are never chained off each other, so a reset only has to
//! cancel what is still pending; any timer that slips through carries a run
//! id that no longer matches and is ignored.

use crate::error::ConfigError;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::task::Task;
use smallvec::SmallVec;
use std::time::Duration;

/// One timed phase. `index` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub duration: Duration,
    pub effects: Vec<String>,
}

impl Stage {
    pub fn new(
        index: usize,
        name: &str,
        description: &str,
        duration: Duration,
        effects: &[&str],
    ) -> Self {
        Self {
            index,
            name: name.to_string(),
            description: description.to_string(),
            duration,
            effects: effects.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Ordered, immutable list of stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageSequence {
    stages: Vec<Stage>,
}

impl StageSequence {
    /// Stages must be non-empty and indexed 1..=N in order.
    pub fn new(stages: Vec<Stage>) -> Result<Self, ConfigError> {
        if stages.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        for (position, stage) in stages.iter().enumerate() {
            if stage.index != position + 1 {
                return Err(ConfigError::StageIndex {
                    position,
                    expected: position + 1,
                    found: stage.index,
                });
            }
        }
        Ok(Self { stages })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[inline]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage by 1-based index.
    pub fn get(&self, index: usize) -> Option<&Stage> {
        index.checked_sub(1).and_then(|i| self.stages.get(i))
    }

    /// `(index, offset from start)` for every stage.
    pub fn offsets(&self) -> impl Iterator<Item = (usize, Duration)> + '_ {
        self.stages.iter().scan(Duration::ZERO, |total, stage| {
            *total += stage.duration;
            Some((stage.index, *total))
        })
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }
}

impl Default for StageSequence {
    fn default() -> Self {
        let minutes = |m: u64| Duration::from_secs(m * 60);
        Self {
            stages: vec![
                Stage::new(
                    1,
                    "Initial Submersion",
                    "Water begins to rise, initial panic response",
                    minutes(10),
                    &["water-rise-20", "mild-struggle"],
                ),
                Stage::new(
                    2,
                    "Breath Holding",
                    "Attempting to hold breath, anxiety builds",
                    minutes(12),
                    &["water-rise-40", "chest-tension", "eye-widening"],
                ),
                Stage::new(
                    3,
                    "Involuntary Breathing",
                    "Breathing reflex takes over",
                    minutes(10),
                    &["water-rise-60", "violent-struggle", "color-change"],
                ),
                Stage::new(
                    4,
                    "Hypoxia",
                    "Movements weaken",
                    minutes(8),
                    &["water-rise-80", "weak-movements", "consciousness-fade"],
                ),
                Stage::new(
                    5,
                    "Unconsciousness",
                    "Body goes limp",
                    minutes(5),
                    &["water-rise-100", "complete-stillness", "death-state"],
                ),
            ],
        }
    }
}

/// Observable progress of the current (or last) run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequenceRun {
    /// 0 before the first stage fires, then 1..=N.
    pub current_stage: usize,
    /// `current_stage / N`.
    pub progress: f32,
    pub running: bool,
    /// Final stage reached; cleared only by `reset`.
    pub terminal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencePhase {
    Idle,
    /// Started, no stage reached yet.
    Armed,
    InStage(usize),
    Terminal,
}

/// Result of a stage timer firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageEvent {
    /// Timer from a run that was reset or superseded.
    Stale,
    Advanced(usize),
    /// Final stage reached.
    Completed,
}

#[derive(Debug)]
pub struct StageSequencer {
    sequence: StageSequence,
    linger: Duration,
    run: SequenceRun,
    run_id: u64,
    pending: SmallVec<[TimerHandle; 8]>,
}

impl StageSequencer {
    pub fn new(sequence: StageSequence, linger: Duration) -> Self {
        Self {
            sequence,
            linger,
            run: SequenceRun::default(),
            run_id: 0,
            pending: SmallVec::new(),
        }
    }

    #[inline]
    pub fn sequence(&self) -> &StageSequence {
        &self.sequence
    }

    #[inline]
    pub fn run(&self) -> SequenceRun {
        self.run
    }

    /// Definition of the stage most recently reached.
    pub fn current_stage(&self) -> Option<&Stage> {
        self.sequence.get(self.run.current_stage)
    }

    pub fn phase(&self) -> SequencePhase {
        match self.run {
            SequenceRun { terminal: true, .. } => SequencePhase::Terminal,
            SequenceRun { running: false, .. } => SequencePhase::Idle,
            SequenceRun {
                current_stage: 0, ..
            } => SequencePhase::Armed,
            SequenceRun { current_stage, .. } => SequencePhase::InStage(current_stage),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase() == SequencePhase::Idle
    }

    /// Begin a run, arming every stage timer up front. Only legal from idle.
    pub fn start(&mut self, scheduler: &mut Scheduler<Task>) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.run_id += 1;
        self.run = SequenceRun {
            running: true,
            ..SequenceRun::default()
        };
        let run = self.run_id;
        self.pending = self
            .sequence
            .offsets()
            .map(|(stage, at)| scheduler.after(at, Task::AdvanceStage { run, stage }))
            .collect();
        log::info!(
            "[sequence] run {} started, {} stages over {:?}",
            run,
            self.sequence.len(),
            self.sequence.total_duration()
        );
        true
    }

    /// Stage timer callback.
    pub fn on_stage(
        &mut self,
        run: u64,
        stage: usize,
        scheduler: &mut Scheduler<Task>,
    ) -> StageEvent {
        if run != self.run_id || !self.run.running || self.run.terminal {
            log::debug!("[sequence] ignoring stale stage {} of run {}", stage, run);
            return StageEvent::Stale;
        }
        let total = self.sequence.len();
        // monotonic within a run
        self.run.current_stage = self.run.current_stage.max(stage);
        self.run.progress = self.run.current_stage as f32 / total as f32;
        if self.run.current_stage < total {
            log::info!("[sequence] stage {}/{} reached", self.run.current_stage, total);
            return StageEvent::Advanced(self.run.current_stage);
        }
        self.run.terminal = true;
        self.pending.clear();
        self.pending
            .push(scheduler.after(self.linger, Task::SettleRun { run }));
        log::info!("[sequence] final stage {} reached", total);
        StageEvent::Completed
    }

    /// Linger timer callback: the terminal run stops running.
    pub fn on_settle(&mut self, run: u64) -> bool {
        if run != self.run_id || !self.run.terminal || !self.run.running {
            return false;
        }
        self.run.running = false;
        self.pending.clear();
        true
    }

    /// Back to idle from any state, cancelling every pending timer.
    pub fn reset(&mut self, scheduler: &mut Scheduler<Task>) {
        for handle in self.pending.drain(..) {
            scheduler.cancel(handle);
        }
        // orphan anything that was already popped but not yet dispatched
        self.run_id += 1;
        self.run = SequenceRun::default();
    }
}
