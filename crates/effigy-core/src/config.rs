use crate::constants::*;
use crate::error::ConfigError;
use crate::particles::{ChannelId, ParticleSettings};
use crate::sequence::StageSequence;
use std::time::Duration;

/// Tunables for one session.
///
/// - `seed` seeds the session RNG (classification draws, particle spawns)
/// - `particles` shapes every channel's particle stream
/// - `submersion` is the channel whose activation arms the stage sequence
/// - the remaining durations are the fixed delays of each timed behavior
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub seed: u64,
    pub particles: ParticleSettings,
    pub particle_tick: Duration,
    pub reaction_ttl: Duration,
    pub reaction_sweep: Duration,
    pub press_pulse: Duration,
    pub hide_commit: Duration,
    pub auto_start_delay: Duration,
    pub terminal_linger: Duration,
    pub pain_cue: Duration,
    pub death_cue: Duration,
    pub submersion: ChannelId,
    pub stages: StageSequence,
    pub intensity: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            particles: ParticleSettings::default(),
            particle_tick: PARTICLE_TICK,
            reaction_ttl: REACTION_TTL,
            reaction_sweep: REACTION_SWEEP,
            press_pulse: PRESS_PULSE,
            hide_commit: HIDE_COMMIT_DELAY,
            auto_start_delay: AUTO_START_DELAY,
            terminal_linger: TERMINAL_LINGER,
            pain_cue: PAIN_CUE,
            death_cue: DEATH_CUE,
            submersion: ChannelId::Water,
            stages: StageSequence::default(),
            intensity: INTENSITY_DEFAULT,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_stages(mut self, stages: StageSequence) -> Self {
        self.stages = stages;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_tick.is_zero() {
            return Err(ConfigError::ZeroInterval {
                what: "particle tick",
            });
        }
        if self.reaction_sweep.is_zero() {
            return Err(ConfigError::ZeroInterval {
                what: "reaction sweep",
            });
        }
        let canvas = self.particles.canvas;
        if !(canvas.x.is_finite() && canvas.y.is_finite() && canvas.x > 0.0 && canvas.y > 0.0) {
            return Err(ConfigError::Canvas {
                width: canvas.x,
                height: canvas.y,
            });
        }
        let (min, max) = (self.particles.size_min, self.particles.size_max);
        if !(min < max) {
            return Err(ConfigError::ParticleSize { min, max });
        }
        if self.particles.batch == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        if self.stages.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        Ok(())
    }
}
