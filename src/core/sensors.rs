//! Sensor permission: the one-time, platform-gated grant for motion data

use async_trait::async_trait;
use log::warn;
use crate::types::SensorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    Unrequested,
    Granted,
    Denied,
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        *self == Permission::Granted
    }
}

/// Asks the platform for motion data
#[async_trait]
pub trait PermissionGate: Send {
    async fn request_permission(&mut self) -> Result<bool, SensorError>;
}

/// Platforms without an explicit prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantedGate;

#[async_trait]
impl PermissionGate for GrantedGate {
    async fn request_permission(&mut self) -> Result<bool, SensorError> {
        Ok(true)
    }
}

/// The user said no
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGate;

#[async_trait]
impl PermissionGate for DeniedGate {
    async fn request_permission(&mut self) -> Result<bool, SensorError> {
        Ok(false)
    }
}

/// Ask once; a failed request counts as a denial
pub async fn request_once(gate: &mut dyn PermissionGate) -> Permission {
    match gate.request_permission().await {
        Ok(true) => Permission::Granted,
        Ok(false) => {
            warn!("motion permission denied, sensing stays off");
            Permission::Denied
        }
        Err(e) => {
            warn!("motion permission request failed: {}", e);
            Permission::Denied
        }
    }
}
