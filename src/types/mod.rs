//! Core types for Gomoji

mod expression;
mod idle;
mod pupil;
mod sensor;
mod sound;
mod output;
mod reason;
mod error;

pub use expression::Expression;
pub use idle::IdleMode;
pub use pupil::PupilPosition;
pub use sensor::{Rotation, Acceleration, SensorSample, MotionReading};
pub use sound::SoundKey;
pub use output::FaceFrame;
pub use reason::ReasonCode;
pub use error::{ConfigError, ScriptError, AudioError, SensorError};
