//! Construction-time errors.
//!
//! Runtime intents never fail; they report acceptance as a `bool`. Only
//! building a session (or parsing textual intents) can produce an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stage sequence must contain at least one stage")]
    EmptySequence,
    #[error("stage at position {position} has index {found}, expected {expected}")]
    StageIndex {
        position: usize,
        expected: usize,
        found: usize,
    },
    #[error("{what} interval must be non-zero")]
    ZeroInterval { what: &'static str },
    #[error("canvas must have a positive finite size, got {width}x{height}")]
    Canvas { width: f32, height: f32 },
    #[error("particle size range is empty: min {min} >= max {max}")]
    ParticleSize { min: f32, max: f32 },
    #[error("particle batch size must be at least one")]
    EmptyBatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntentError {
    #[error("empty intent")]
    Empty,
    #[error("unknown intent `{0}`")]
    UnknownVerb(String),
    #[error("`{verb}` is missing its {what}")]
    MissingArgument {
        verb: &'static str,
        what: &'static str,
    },
    #[error("`{verb}` takes {expected} argument(s)")]
    TrailingArgument { verb: &'static str, expected: usize },
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),
    #[error("unknown channel `{0}`")]
    UnknownChannel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: missing timestamp")]
    MissingTimestamp { line: usize },
    #[error("line {line}: invalid timestamp `{text}`")]
    InvalidTimestamp { line: usize, text: String },
    #[error("line {line}: timestamp {at_ms}ms is earlier than the previous step ({previous_ms}ms)")]
    OutOfOrder {
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },
    #[error("line {line}: {source}")]
    Intent {
        line: usize,
        #[source]
        source: ParseIntentError,
    },
}
