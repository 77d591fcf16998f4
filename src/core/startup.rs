//! One-shot start: permission, audio preload, then the engine goes live

use log::{info, warn};
use crate::core::audio::{self, PreloadReport};
use crate::core::engine::FaceEngine;
use crate::core::sensors::{self, Permission, PermissionGate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub permission: Permission,
    pub audio: PreloadReport,
}

/// Request motion permission, preload sounds, start the engine.
/// Each step is tried once; failures degrade instead of aborting.
/// Returns `None` if the engine was already started.
pub async fn launch(engine: &mut FaceEngine, gate: &mut dyn PermissionGate) -> Option<LaunchReport> {
    if engine.is_started() {
        return None;
    }
    let permission = sensors::request_once(gate).await;
    let audio = audio::preload().await;
    if !audio.failed.is_empty() {
        warn!("{} sound(s) unavailable", audio.failed.len());
    }
    engine.start(permission);
    info!("launched: motion {:?}, {} sound(s) ready", permission, audio.loaded.len());
    Some(LaunchReport { permission, audio })
}
