use std::time::Duration;

// Shared timing and sizing constants for a figure session.

// Virtual canvas the particle field lives in
pub const CANVAS_WIDTH: f32 = 300.0;
pub const CANVAS_HEIGHT: f32 = 400.0;

// Particle engine
pub const PARTICLE_TICK: Duration = Duration::from_millis(500);
pub const PARTICLES_PER_TICK: usize = 3;
pub const PARTICLES_RETAINED: usize = 20; // old particles kept ahead of each new batch
pub const PARTICLE_CAPACITY: usize = PARTICLES_RETAINED + PARTICLES_PER_TICK;
pub const PARTICLE_SIZE_MIN: f32 = 4.0;
pub const PARTICLE_SIZE_MAX: f32 = 12.0;

// Touch reactions
pub const REACTION_TTL: Duration = Duration::from_millis(2000);
pub const REACTION_SWEEP: Duration = Duration::from_millis(100);
pub const PRESS_PULSE: Duration = Duration::from_millis(150);

// Hit regions, as fractions of the pointer bounds
pub const HEAD_BAND_END: f32 = 0.25;
pub const TORSO_BAND_END: f32 = 0.45;
pub const TORSO_X_START: f32 = 0.3;
pub const TORSO_X_END: f32 = 0.7;

// Reaction draws
pub const TORSO_SECONDARY_CHANCE: f64 = 0.5; // otherwise tertiary
pub const BODY_SECONDARY_CHANCE: f64 = 0.3; // otherwise primary

// Layers
pub const HIDE_COMMIT_DELAY: Duration = Duration::from_millis(500);

// Stage sequence
pub const AUTO_START_DELAY: Duration = Duration::from_millis(1500);
pub const TERMINAL_LINGER: Duration = Duration::from_millis(1000);

// One-shot cues
pub const PAIN_CUE: Duration = Duration::from_millis(1000);
pub const DEATH_CUE: Duration = Duration::from_millis(3000);

// Intensity slider
pub const INTENSITY_DEFAULT: u8 = 50;
pub const INTENSITY_MAX: u8 = 100;

pub const DEFAULT_SEED: u64 = 42;
