//! Idle modes: full-screen alternates that temporarily replace the face

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdleMode {
    /// Face is shown
    #[default]
    None,
    Thinking,
    Coding,
    Bored,
}

impl IdleMode {
    pub fn is_active(&self) -> bool {
        *self != IdleMode::None
    }

    /// Number of visual variants the renderer offers for this mode
    pub fn variant_count(&self) -> usize {
        match self {
            IdleMode::Coding | IdleMode::Bored => 3,
            IdleMode::None | IdleMode::Thinking => 0,
        }
    }
}

impl std::fmt::Display for IdleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IdleMode::None => "NONE",
            IdleMode::Thinking => "THINKING",
            IdleMode::Coding => "CODING",
            IdleMode::Bored => "BORED",
        };
        write!(f, "{}", name)
    }
}
