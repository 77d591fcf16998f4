//! Scenario scripts: line-oriented input for driving the engine
//!
//! ```text
//! # three quick taps
//! tap
//! wait 100
//! tap
//! accel 30 0 0
//! orient - 10 20
//! shake
//! sensing off
//! ```
//!
//! `-` stands for a missing sensor value.

use lazy_static::lazy_static;
use regex::Regex;
use crate::core::engine::FaceEngine;
use crate::types::{Acceleration, Rotation, ScriptError};

lazy_static! {
    static ref RE_TAP: Regex = Regex::new(r"(?i)^tap(?:\s+(\d+))?$").unwrap();
    static ref RE_WAIT: Regex = Regex::new(r"(?i)^wait\s+(\S+)$").unwrap();
    static ref RE_ACCEL: Regex = Regex::new(r"(?i)^accel\s+(\S+)\s+(\S+)\s+(\S+)$").unwrap();
    static ref RE_ORIENT: Regex = Regex::new(r"(?i)^orient\s+(\S+)\s+(\S+)\s+(\S+)$").unwrap();
    static ref RE_SHAKE: Regex = Regex::new(r"(?i)^shake$").unwrap();
    static ref RE_SENSING: Regex = Regex::new(r"(?i)^sensing\s+(on|off)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `tap [n]`: n taps in the same tick
    Tap(u32),
    Wait(u64),
    Accel(Acceleration),
    Orient(Rotation),
    /// One acceleration sample jumping past the shake threshold
    Shake,
    Sensing(bool),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Command>, ScriptError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let bad = || ScriptError::BadArgument { line, text: trimmed.to_string() };

    if let Some(caps) = RE_TAP.captures(trimmed) {
        let count = match caps.get(1) {
            Some(n) => n.as_str().parse::<u32>().map_err(|_| bad())?,
            None => 1,
        };
        return Ok(Some(Command::Tap(count)));
    }
    if let Some(caps) = RE_WAIT.captures(trimmed) {
        let ms = caps[1].parse::<u64>().map_err(|_| bad())?;
        return Ok(Some(Command::Wait(ms)));
    }
    if let Some(caps) = RE_ACCEL.captures(trimmed) {
        let x = parse_axis(&caps[1]).ok_or_else(bad)?;
        let y = parse_axis(&caps[2]).ok_or_else(bad)?;
        let z = parse_axis(&caps[3]).ok_or_else(bad)?;
        return Ok(Some(Command::Accel(Acceleration { x, y, z })));
    }
    if let Some(caps) = RE_ORIENT.captures(trimmed) {
        let alpha = parse_axis(&caps[1]).ok_or_else(bad)?;
        let beta = parse_axis(&caps[2]).ok_or_else(bad)?;
        let gamma = parse_axis(&caps[3]).ok_or_else(bad)?;
        return Ok(Some(Command::Orient(Rotation::new(alpha, beta, gamma))));
    }
    if RE_SHAKE.is_match(trimmed) {
        return Ok(Some(Command::Shake));
    }
    if let Some(caps) = RE_SENSING.captures(trimmed) {
        return Ok(Some(Command::Sensing(caps[1].eq_ignore_ascii_case("on"))));
    }

    Err(ScriptError::UnknownCommand { line, text: trimmed.to_string() })
}

/// Parse a whole script; line numbers start at 1
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(cmd) = parse_line(line, idx + 1)? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

/// `-` is a missing value; anything else must be a number.
/// Outer None = unparseable.
fn parse_axis(token: &str) -> Option<Option<f64>> {
    if token == "-" {
        return Some(None);
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}

/// Feed one non-time command into the engine. `Wait` is left to the driver.
pub fn apply(engine: &mut FaceEngine, command: Command) {
    match command {
        Command::Tap(count) => {
            for _ in 0..count {
                engine.tap();
            }
        }
        Command::Wait(_) => {}
        Command::Accel(accel) => {
            engine.push_acceleration(accel);
        }
        Command::Orient(rotation) => engine.push_rotation(rotation),
        Command::Shake => {
            let [x, y, z] = engine.last_acceleration();
            let jump = engine.config().motion.shake_threshold + 5.0;
            engine.push_acceleration(Acceleration::new(x + jump, y, z));
        }
        Command::Sensing(true) => {
            engine.enable_sensing();
        }
        Command::Sensing(false) => engine.disable_sensing(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
