//! Pointer reaction classification and the short-lived reaction set.

use crate::constants::{
    BODY_SECONDARY_CHANCE, HEAD_BAND_END, TORSO_BAND_END, TORSO_SECONDARY_CHANCE, TORSO_X_END,
    TORSO_X_START,
};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Primary,
    Secondary,
    Alert,
    Tertiary,
}

impl ReactionKind {
    pub fn name(self) -> &'static str {
        match self {
            ReactionKind::Primary => "primary",
            ReactionKind::Secondary => "secondary",
            ReactionKind::Alert => "alert",
            ReactionKind::Tertiary => "tertiary",
        }
    }
}

/// Hit region of the figure, the deterministic half of classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Top band, `y < 0.25·H`.
    Head,
    /// Central box, `0.25·H ≤ y < 0.45·H` and `0.3·W ≤ x < 0.7·W`.
    Torso,
    /// Everything else.
    Body,
}

#[inline]
pub fn region_at(point: Vec2, bounds: Vec2) -> Region {
    let in_torso_band = point.y >= bounds.y * HEAD_BAND_END && point.y < bounds.y * TORSO_BAND_END;
    let in_torso_span = point.x >= bounds.x * TORSO_X_START && point.x < bounds.x * TORSO_X_END;
    if in_torso_band && in_torso_span {
        Region::Torso
    } else if point.y < bounds.y * HEAD_BAND_END {
        Region::Head
    } else {
        Region::Body
    }
}

/// Map a pointer position inside `bounds` to a reaction.
///
/// Torso hits draw secondary/tertiary 50/50 and body hits draw secondary 30%
/// of the time, so identical coordinates may classify differently between
/// calls. Pass a seeded or mock `rng` to pin the outcome.
pub fn classify<R: Rng + ?Sized>(point: Vec2, bounds: Vec2, rng: &mut R) -> ReactionKind {
    match region_at(point, bounds) {
        Region::Head => ReactionKind::Alert,
        Region::Torso => {
            if rng.gen_bool(TORSO_SECONDARY_CHANCE) {
                ReactionKind::Secondary
            } else {
                ReactionKind::Tertiary
            }
        }
        Region::Body => {
            if rng.gen_bool(BODY_SECONDARY_CHANCE) {
                ReactionKind::Secondary
            } else {
                ReactionKind::Primary
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TouchReaction {
    pub id: u64,
    pub position: Vec2,
    pub kind: ReactionKind,
    pub created_at: Duration,
}

impl TouchReaction {
    #[inline]
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }
}

/// Live reactions in creation order. Ids are unique within one board.
#[derive(Clone, Debug, Default)]
pub struct ReactionBoard {
    reactions: Vec<TouchReaction>,
    next_id: u64,
}

impl ReactionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Vec2, kind: ReactionKind, now: Duration) -> &TouchReaction {
        let id = self.next_id;
        self.next_id += 1;
        self.reactions.push(TouchReaction {
            id,
            position,
            kind,
            created_at: now,
        });
        &self.reactions[self.reactions.len() - 1]
    }

    /// Drop every reaction whose age reached `ttl`. Returns how many went.
    pub fn sweep(&mut self, now: Duration, ttl: Duration) -> usize {
        let before = self.reactions.len();
        self.reactions.retain(|r| r.age(now) < ttl);
        before - self.reactions.len()
    }

    pub fn clear(&mut self) {
        self.reactions.clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[TouchReaction] {
        &self.reactions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}
