//! Timed intent scripts for headless replay.
//!
//! One step per line: `<at_ms> <intent>`, where `at_ms` is milliseconds
//! since the session started and never decreases. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! # submerge, then respawn once the run is over
//! 0        toggle-channel water
//! 2701500  respawn
//! ```

use crate::error::ScriptError;
use crate::intent::Intent;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct ScriptStep {
    pub line: usize,
    pub at: Duration,
    pub intent: Intent,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    #[inline]
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Timestamp of the last step.
    pub fn end(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |s| s.at)
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        let mut previous_ms = 0u64;
        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let (stamp, rest) = text
                .split_once(char::is_whitespace)
                .unwrap_or((text, ""));
            let at_ms: u64 = stamp.parse().map_err(|_| {
                if stamp.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
                    ScriptError::MissingTimestamp { line }
                } else {
                    ScriptError::InvalidTimestamp {
                        line,
                        text: stamp.to_string(),
                    }
                }
            })?;
            if at_ms < previous_ms {
                return Err(ScriptError::OutOfOrder {
                    line,
                    at_ms,
                    previous_ms,
                });
            }
            let intent = rest
                .parse::<Intent>()
                .map_err(|source| ScriptError::Intent { line, source })?;
            previous_ms = at_ms;
            steps.push(ScriptStep {
                line,
                at: Duration::from_millis(at_ms),
                intent,
            });
        }
        Ok(Script { steps })
    }
}
