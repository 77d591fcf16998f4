//! Sound cues the engine asks the audio collaborator to play

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKey {
    Blink,
    Angry,
}

impl SoundKey {
    pub const ALL: [SoundKey; 2] = [SoundKey::Blink, SoundKey::Angry];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKey::Blink => "blink",
            SoundKey::Angry => "angry",
        }
    }
}

impl std::fmt::Display for SoundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
