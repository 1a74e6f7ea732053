//! The session: sole owner of every piece of figure state.
//!
//! All mutation funnels through `&mut Session`, either from an intent or from
//! a timer the session drains in [`Session::advance`]. Nothing runs
//! concurrently, so components hold plain fields and no locks.
//!
//! Typical host loop:
//! - `Session::new(SessionConfig::default())`
//! - feed input with `apply(intent)` or the named intent methods
//! - call `advance(dt)` every frame
//! - when `revision()` changed, hand `snapshot()` to the renderer

use crate::config::SessionConfig;
use crate::cue::{Cue, CueFlags, Cues};
use crate::error::ConfigError;
use crate::intent::Intent;
use crate::layers::{Layer, LayerController, LayerId};
use crate::particles::{ChannelId, EffectChannel, ParticleField};
use crate::reaction::{classify, ReactionBoard, ReactionKind, TouchReaction};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::sequence::{SequenceRun, StageEvent, StageSequencer};
use crate::snapshot::{ChannelView, Snapshot, SubjectState};
use crate::task::Task;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::time::Duration;

pub struct Session {
    config: SessionConfig,
    scheduler: Scheduler<Task>,
    rng: StdRng,
    field: ParticleField,
    reactions: ReactionBoard,
    layers: LayerController,
    sequencer: StageSequencer,
    subject: SubjectState,
    cues: Cues,
    auto_start: Option<TimerHandle>,
    ticks: SmallVec<[TimerHandle; 2]>,
    intensity: u8,
    revision: u64,
    torn_down: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let mut scheduler = Scheduler::new();
        let ticks = SmallVec::from_iter([
            scheduler.every(config.particle_tick, Task::ParticleTick),
            scheduler.every(config.reaction_sweep, Task::SweepReactions),
        ]);
        log::info!(
            "[session] created seed={} stages={} total={:?}",
            config.seed,
            config.stages.len(),
            config.stages.total_duration()
        );
        Ok(Self {
            field: ParticleField::new(config.particles),
            reactions: ReactionBoard::new(),
            layers: LayerController::new(config.hide_commit),
            sequencer: StageSequencer::new(config.stages.clone(), config.terminal_linger),
            subject: SubjectState::default(),
            cues: Cues::default(),
            auto_start: None,
            ticks,
            intensity: config.intensity.min(crate::constants::INTENSITY_MAX),
            revision: 0,
            torn_down: false,
            scheduler,
            rng,
            config,
        })
    }

    // ---------------- Observation ----------------

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Bumped on every state change.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.subject.dead
    }

    #[inline]
    pub fn run(&self) -> SequenceRun {
        self.sequencer.run()
    }

    #[inline]
    pub fn sequencer(&self) -> &StageSequencer {
        &self.sequencer
    }

    #[inline]
    pub fn layer(&self, id: LayerId) -> Layer {
        self.layers.layer(id)
    }

    #[inline]
    pub fn channel(&self, id: ChannelId) -> &EffectChannel {
        self.field.channel(id)
    }

    #[inline]
    pub fn reactions(&self) -> &[TouchReaction] {
        self.reactions.as_slice()
    }

    #[inline]
    pub fn cues(&self) -> CueFlags {
        self.cues.flags()
    }

    #[inline]
    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    #[inline]
    pub fn auto_start_pending(&self) -> bool {
        self.auto_start.is_some()
    }

    /// Number of armed timers, periodic ticks included.
    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            now: self.scheduler.now(),
            channels: self
                .field
                .channels()
                .iter()
                .map(|c| ChannelView {
                    id: c.id,
                    active: c.is_active(),
                    particles: c.particles().copied().collect(),
                })
                .collect(),
            reactions: self.reactions.as_slice().to_vec(),
            layers: self.layers.layers().collect(),
            run: self.sequencer.run(),
            stage: self.sequencer.current_stage().cloned(),
            stage_count: self.sequencer.sequence().len(),
            subject: self.subject,
            cues: self.cues.flags(),
            intensity: self.intensity,
            submerging: self.field.channel(self.config.submersion).is_active(),
        }
    }

    // ---------------- Intents ----------------

    /// Apply an intent. Returns false when it was rejected, which is never an
    /// error: a dead subject ignores every input but respawn and reset, a
    /// running sequence ignores another trigger.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::ToggleLayer(id) => self.toggle_layer(id),
            Intent::ToggleChannel(id) => self.toggle_channel(id),
            Intent::Pointer { point, bounds } => self.pointer(point, bounds).is_some(),
            Intent::TriggerSequence => self.trigger_sequence(),
            Intent::TriggerPain => self.trigger_pain(),
            Intent::TriggerDeath => self.trigger_death(),
            Intent::Respawn => self.respawn(),
            Intent::ResetAll => self.reset_all(),
            Intent::SetIntensity(value) => self.set_intensity(value),
        }
    }

    pub fn toggle_layer(&mut self, id: LayerId) -> bool {
        if !self.accepts_input("toggle-layer") {
            return false;
        }
        let outcome = self.layers.toggle(id, &mut self.scheduler);
        log::info!("[layers] {} {:?}", id.name(), outcome);
        self.touch();
        true
    }

    /// Flip a channel. Switching the submersion channel on while the
    /// sequencer is idle arms a delayed sequence start.
    pub fn toggle_channel(&mut self, id: ChannelId) -> bool {
        if !self.accepts_input("toggle-channel") {
            return false;
        }
        let active = self.field.toggle(id);
        log::info!(
            "[channels] {} {}",
            id.name(),
            if active { "on" } else { "off" }
        );
        if active
            && id == self.config.submersion
            && self.sequencer.is_idle()
            && self.auto_start.is_none()
        {
            let delay = self.config.auto_start_delay;
            self.auto_start = Some(self.scheduler.after(delay, Task::AutoStart));
            log::info!("[sequence] auto-start armed in {:?}", delay);
        }
        self.touch();
        true
    }

    /// Classify a pointer press and record the reaction.
    pub fn pointer(&mut self, point: Vec2, bounds: Vec2) -> Option<ReactionKind> {
        if !self.accepts_input("pointer") {
            return None;
        }
        let kind = classify(point, bounds, &mut self.rng);
        let now = self.scheduler.now();
        let id = self.reactions.push(point, kind, now).id;
        self.cues
            .raise(Cue::Press, self.config.press_pulse, &mut self.scheduler);
        log::debug!(
            "[pointer] reaction {} {} at ({:.0},{:.0})",
            id,
            kind.name(),
            point.x,
            point.y
        );
        self.touch();
        Some(kind)
    }

    /// Start a run by hand. Ignored while the submersion channel is on,
    /// since that channel starts runs itself.
    pub fn trigger_sequence(&mut self) -> bool {
        if !self.accepts_input("trigger") {
            return false;
        }
        if self.field.channel(self.config.submersion).is_active() {
            log::debug!("[sequence] trigger ignored: submersion channel drives the run");
            return false;
        }
        if !self.sequencer.start(&mut self.scheduler) {
            log::debug!("[sequence] trigger ignored: {:?}", self.sequencer.phase());
            return false;
        }
        self.cancel_auto_start();
        self.touch();
        true
    }

    pub fn trigger_pain(&mut self) -> bool {
        if !self.accepts_input("pain") {
            return false;
        }
        if self.cues.flags().pain {
            log::debug!("[session] pain ignored: cue still showing");
            return false;
        }
        self.cues
            .raise(Cue::Pain, self.config.pain_cue, &mut self.scheduler);
        self.touch();
        true
    }

    /// Terminal state without going through the stages.
    pub fn trigger_death(&mut self) -> bool {
        if !self.accepts_input("death") {
            return false;
        }
        self.subject.dead = true;
        self.cues
            .raise(Cue::Death, self.config.death_cue, &mut self.scheduler);
        log::info!("[session] subject died (direct trigger)");
        self.touch();
        true
    }

    /// Clear death and return the sequencer to idle, cancelling every stage
    /// timer of the previous run.
    pub fn respawn(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.sequencer.reset(&mut self.scheduler);
        self.cancel_auto_start();
        self.cues.clear(&mut self.scheduler);
        self.reactions.clear();
        self.subject = SubjectState::default();
        log::info!("[session] respawn");
        self.touch();
        true
    }

    /// Respawn, then show every layer and switch every channel off.
    pub fn reset_all(&mut self) -> bool {
        if !self.respawn() {
            return false;
        }
        self.layers.reset_all(&mut self.scheduler);
        self.field.clear_all();
        log::info!("[session] reset all");
        self.touch();
        true
    }

    /// Set the intensity slider, clamped to 0..=100.
    pub fn set_intensity(&mut self, value: u8) -> bool {
        if !self.accepts_input("intensity") {
            return false;
        }
        let value = value.min(crate::constants::INTENSITY_MAX);
        if value != self.intensity {
            self.intensity = value;
            self.touch();
        }
        true
    }

    // ---------------- Time ----------------

    /// Advance the session clock by `dt`, running every timer that falls due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        self.advance_to(until);
    }

    /// Advance the session clock to `until` (no-op if already past it).
    pub fn advance_to(&mut self, until: Duration) {
        if self.torn_down {
            return;
        }
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.dispatch(task);
        }
        self.scheduler.settle(until);
    }

    /// Cancel every timer, periodic ticks included. The session is inert
    /// afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for handle in self.ticks.drain(..) {
            self.scheduler.cancel(handle);
        }
        self.scheduler.cancel_all();
        self.auto_start = None;
        self.torn_down = true;
        log::info!("[session] torn down at {:?}", self.scheduler.now());
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::ParticleTick => {
                let refreshed = self.field.tick(&mut self.rng);
                if refreshed > 0 {
                    log::debug!("[channels] refreshed {} channel(s)", refreshed);
                    self.touch();
                }
            }
            Task::SweepReactions => {
                let now = self.scheduler.now();
                let removed = self.reactions.sweep(now, self.config.reaction_ttl);
                if removed > 0 {
                    log::debug!("[pointer] expired {} reaction(s)", removed);
                    self.touch();
                }
            }
            Task::AdvanceStage { run, stage } => {
                match self.sequencer.on_stage(run, stage, &mut self.scheduler) {
                    StageEvent::Stale => {}
                    StageEvent::Advanced(_) => self.touch(),
                    StageEvent::Completed => {
                        self.subject.dead = true;
                        log::info!("[session] subject died at final stage");
                        self.touch();
                    }
                }
            }
            Task::SettleRun { run } => {
                if self.sequencer.on_settle(run) {
                    log::info!("[sequence] run {} settled", run);
                    self.touch();
                }
            }
            Task::CommitHide { layer, generation } => {
                if self.layers.commit_hide(layer, generation) {
                    log::info!("[layers] {} hidden", layer.name());
                    self.touch();
                }
            }
            Task::AutoStart => {
                self.auto_start = None;
                if self.subject.dead {
                    log::debug!("[sequence] auto-start skipped: subject is dead");
                    return;
                }
                if self.sequencer.start(&mut self.scheduler) {
                    self.touch();
                }
            }
            Task::EndCue(cue) => {
                if self.cues.end(cue) {
                    self.touch();
                }
            }
        }
    }

    fn accepts_input(&self, what: &str) -> bool {
        if self.torn_down {
            log::debug!("[session] {} ignored: torn down", what);
            return false;
        }
        if self.subject.dead {
            log::debug!("[session] {} rejected: subject is dead", what);
            return false;
        }
        true
    }

    fn cancel_auto_start(&mut self) {
        if let Some(handle) = self.auto_start.take() {
            self.scheduler.cancel(handle);
        }
    }

    #[inline]
    fn touch(&mut self) {
        self.revision += 1;
    }
}
