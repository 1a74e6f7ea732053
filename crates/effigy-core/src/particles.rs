//! Elemental effect channels and their bounded particle streams.
//!
//! Each channel keeps a ring of particles. A refresh tick appends a fresh
//! batch to every active channel after trimming the ring to its retained
//! length, so an active channel never holds more than `retained + batch`
//! particles. Inactive channels are never touched by the tick; toggling a
//! channel in either direction empties it.

use crate::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, PARTICLES_PER_TICK, PARTICLES_RETAINED, PARTICLE_SIZE_MAX,
    PARTICLE_SIZE_MIN,
};
use crate::error::ParseIntentError;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Water,
    Fire,
    Earth,
    Air,
}

impl ChannelId {
    pub const ALL: [ChannelId; 4] = [
        ChannelId::Water,
        ChannelId::Fire,
        ChannelId::Earth,
        ChannelId::Air,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChannelId::Water => "water",
            ChannelId::Fire => "fire",
            ChannelId::Earth => "earth",
            ChannelId::Air => "air",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl FromStr for ChannelId {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelId::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIntentError::UnknownChannel(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub position: Vec2,
    pub size: f32,
}

/// Shape of the particle stream shared by every channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSettings {
    pub canvas: Vec2,
    pub batch: usize,
    pub retained: usize,
    pub size_min: f32,
    pub size_max: f32,
}

impl ParticleSettings {
    /// Upper bound on a channel's particle count right after a tick.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.retained + self.batch
    }
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            canvas: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            batch: PARTICLES_PER_TICK,
            retained: PARTICLES_RETAINED,
            size_min: PARTICLE_SIZE_MIN,
            size_max: PARTICLE_SIZE_MAX,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectChannel {
    pub id: ChannelId,
    active: bool,
    particles: VecDeque<Particle>,
}

impl EffectChannel {
    pub fn new(id: ChannelId) -> Self {
        Self {
            id,
            active: false,
            particles: VecDeque::new(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Particles oldest first.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.particles.clear();
    }

    fn refresh(&mut self, retained: usize, batch: impl IntoIterator<Item = Particle>) {
        while self.particles.len() > retained {
            self.particles.pop_front();
        }
        self.particles.extend(batch);
    }
}

/// The fixed set of channels, one per known element.
#[derive(Clone, Debug)]
pub struct ParticleField {
    settings: ParticleSettings,
    channels: [EffectChannel; 4],
    next_id: u64,
}

impl ParticleField {
    pub fn new(settings: ParticleSettings) -> Self {
        Self {
            settings,
            channels: ChannelId::ALL.map(EffectChannel::new),
            next_id: 0,
        }
    }

    #[inline]
    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    #[inline]
    pub fn channel(&self, id: ChannelId) -> &EffectChannel {
        &self.channels[id.slot()]
    }

    #[inline]
    pub fn channels(&self) -> &[EffectChannel] {
        &self.channels
    }

    /// Flip a channel and empty its particles. Returns the new active flag.
    pub fn toggle(&mut self, id: ChannelId) -> bool {
        let channel = &mut self.channels[id.slot()];
        let active = !channel.active;
        channel.set_active(active);
        active
    }

    /// Deactivate and empty every channel.
    pub fn clear_all(&mut self) {
        for channel in &mut self.channels {
            channel.set_active(false);
        }
    }

    /// Append a fresh batch to every active channel. Returns how many
    /// channels were refreshed.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut refreshed = 0;
        for slot in 0..self.channels.len() {
            if !self.channels[slot].active {
                continue;
            }
            let batch = self.spawn_batch(rng);
            self.channels[slot].refresh(self.settings.retained, batch);
            refreshed += 1;
        }
        refreshed
    }

    fn spawn_batch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SmallVec<[Particle; 4]> {
        let s = self.settings;
        (0..s.batch)
            .map(|_| {
                let id = self.next_id;
                self.next_id += 1;
                Particle {
                    id,
                    position: Vec2::new(
                        rng.gen_range(0.0..s.canvas.x),
                        rng.gen_range(0.0..s.canvas.y),
                    ),
                    size: rng.gen_range(s.size_min..s.size_max),
                }
            })
            .collect()
    }
}
