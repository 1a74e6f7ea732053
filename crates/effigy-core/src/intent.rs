//! Discrete intents from the input layer, as data.

use crate::constants::INTENSITY_MAX;
use crate::error::ParseIntentError;
use crate::layers::LayerId;
use crate::particles::ChannelId;
use glam::Vec2;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    ToggleLayer(LayerId),
    ToggleChannel(ChannelId),
    /// Pointer press at `point`, relative to the top-left of `bounds`.
    Pointer { point: Vec2, bounds: Vec2 },
    TriggerSequence,
    TriggerPain,
    TriggerDeath,
    Respawn,
    ResetAll,
    SetIntensity(u8),
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::ToggleLayer(id) => write!(f, "toggle-layer {}", id.name()),
            Intent::ToggleChannel(id) => write!(f, "toggle-channel {}", id.name()),
            Intent::Pointer { point, bounds } => write!(
                f,
                "pointer {} {} {} {}",
                point.x, point.y, bounds.x, bounds.y
            ),
            Intent::TriggerSequence => f.write_str("trigger"),
            Intent::TriggerPain => f.write_str("pain"),
            Intent::TriggerDeath => f.write_str("death"),
            Intent::Respawn => f.write_str("respawn"),
            Intent::ResetAll => f.write_str("reset"),
            Intent::SetIntensity(v) => write!(f, "intensity {}", v),
        }
    }
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    /// Parses `toggle-layer outer`, `toggle-channel water`,
    /// `pointer 150 140 300 400`, `trigger`, `pain`, `death`, `respawn`,
    /// `reset` and `intensity 80` (clamped to 100).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ParseIntentError::Empty)?;
        let intent = match verb {
            "toggle-layer" => {
                Intent::ToggleLayer(arg(&mut words, "toggle-layer", "layer")?.parse()?)
            }
            "toggle-channel" => {
                Intent::ToggleChannel(arg(&mut words, "toggle-channel", "channel")?.parse()?)
            }
            "pointer" => {
                let x = number(arg(&mut words, "pointer", "x")?)?;
                let y = number(arg(&mut words, "pointer", "y")?)?;
                let w = number(arg(&mut words, "pointer", "width")?)?;
                let h = number(arg(&mut words, "pointer", "height")?)?;
                Intent::Pointer {
                    point: Vec2::new(x, y),
                    bounds: Vec2::new(w, h),
                }
            }
            "trigger" => Intent::TriggerSequence,
            "pain" => Intent::TriggerPain,
            "death" => Intent::TriggerDeath,
            "respawn" => Intent::Respawn,
            "reset" => Intent::ResetAll,
            "intensity" => {
                let text = arg(&mut words, "intensity", "value")?;
                let value: u32 = text
                    .parse()
                    .map_err(|_| ParseIntentError::InvalidNumber(text.to_string()))?;
                Intent::SetIntensity(value.min(INTENSITY_MAX as u32) as u8)
            }
            other => return Err(ParseIntentError::UnknownVerb(other.to_string())),
        };
        if words.next().is_some() {
            return Err(ParseIntentError::TrailingArgument {
                verb: intent.verb(),
                expected: intent.arity(),
            });
        }
        Ok(intent)
    }
}

impl Intent {
    fn verb(&self) -> &'static str {
        match self {
            Intent::ToggleLayer(_) => "toggle-layer",
            Intent::ToggleChannel(_) => "toggle-channel",
            Intent::Pointer { .. } => "pointer",
            Intent::TriggerSequence => "trigger",
            Intent::TriggerPain => "pain",
            Intent::TriggerDeath => "death",
            Intent::Respawn => "respawn",
            Intent::ResetAll => "reset",
            Intent::SetIntensity(_) => "intensity",
        }
    }

    fn arity(&self) -> usize {
        match self {
            Intent::ToggleLayer(_) | Intent::ToggleChannel(_) | Intent::SetIntensity(_) => 1,
            Intent::Pointer { .. } => 4,
            _ => 0,
        }
    }
}

fn arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseIntentError> {
    words
        .next()
        .ok_or(ParseIntentError::MissingArgument { verb, what })
}

fn number(text: &str) -> Result<f32, ParseIntentError> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseIntentError::InvalidNumber(text.to_string()))
}
