//! Core modules for Gomoji

pub mod scheduler;
pub mod random;
pub mod expression;
pub mod loops;
pub mod interaction;
pub mod motion;
pub mod audio;
pub mod sensors;
pub mod engine;
pub mod startup;
pub mod script;
pub mod render;

pub use scheduler::{Scheduler, TimerEvent, TimerHandle};
pub use random::{RandomSource, StdRandom, ScriptedRandom};
pub use expression::ExpressionState;
pub use loops::{BlinkLoop, AutonomousLoop, AutonomousAction, IdleState};
pub use interaction::{InteractionSequencer, TapOutcome, Resolution};
pub use motion::{MotionClassifier, pupil_from_rotation};
pub use audio::{AudioBank, SoundPlayer, BankPlayer, SilentPlayer, RecordingPlayer, PreloadReport};
pub use sensors::{Permission, PermissionGate, GrantedGate, DeniedGate};
pub use engine::FaceEngine;
pub use startup::{launch, LaunchReport};
pub use script::{Command, parse_line, parse_script};
pub use render::TerminalRenderer;
