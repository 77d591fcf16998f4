//! Audio: process-wide sound bank and the players the engine talks to
//!
//! The bank is initialized lazily on first use and decodes the embedded
//! WAV data URIs at preload. A key that fails to decode is logged and its
//! `play` becomes a no-op; the other keys are unaffected.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use crate::types::{AudioError, SoundKey};

/// Short 8-bit "coin" blip
const BLINK_WAV: &str = "data:audio/wav;base64,UklGRjQAAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YRAAAACAyP/IgDgAOIDI/8iAOAA4";

/// Square-wave buzz
const ANGRY_WAV: &str = "data:audio/wav;base64,UklGRjwAAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YRgAAACA/4AAgP+AAID/gACA/4AAgP+AAID/gAA=";

/// Embedded source for each key
pub fn default_source(key: SoundKey) -> &'static str {
    match key {
        SoundKey::Blink => BLINK_WAV,
        SoundKey::Angry => ANGRY_WAV,
    }
}

/// Decode a `data:audio/wav;base64,...` URI into WAV bytes
pub fn decode_wav_data_uri(uri: &str) -> Result<Vec<u8>, AudioError> {
    let (header, payload) = uri.split_once(',').ok_or(AudioError::NotDataUri)?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(AudioError::NotDataUri);
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AudioError::Base64(e.to_string()))?;
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(AudioError::NotWav);
    }
    Ok(bytes)
}

/// Outcome of a preload pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub loaded: Vec<SoundKey>,
    pub failed: Vec<(SoundKey, String)>,
}

/// Decoded sounds, keyed by cue
#[derive(Debug, Default)]
pub struct AudioBank {
    initialized: bool,
    buffers: HashMap<SoundKey, Vec<u8>>,
    plays: HashMap<SoundKey, u64>,
}

impl AudioBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the bank up once. Returns true only on the call that did the work.
    pub fn ensure_initialized(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        info!("audio bank initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Decode every source not loaded yet
    pub fn preload_sources(&mut self, sources: &[(SoundKey, &str)]) -> PreloadReport {
        self.ensure_initialized();
        let mut report = PreloadReport::default();
        for (key, uri) in sources {
            if self.buffers.contains_key(key) {
                continue;
            }
            match decode_wav_data_uri(uri) {
                Ok(bytes) => {
                    debug!("decoded {} ({} bytes)", key, bytes.len());
                    self.buffers.insert(*key, bytes);
                    report.loaded.push(*key);
                }
                Err(e) => {
                    warn!("failed to decode audio for key {}: {}", key, e);
                    report.failed.push((*key, e.code().to_string()));
                }
            }
        }
        report
    }

    pub fn is_loaded(&self, key: SoundKey) -> bool {
        self.buffers.contains_key(&key)
    }

    /// Play `key` if it decoded. Returns whether anything played.
    pub fn play(&mut self, key: SoundKey) -> bool {
        self.ensure_initialized();
        if !self.buffers.contains_key(&key) {
            return false;
        }
        *self.plays.entry(key).or_insert(0) += 1;
        true
    }

    pub fn play_count(&self, key: SoundKey) -> u64 {
        self.plays.get(&key).copied().unwrap_or(0)
    }

    /// Release everything; a later call to `ensure_initialized` starts over
    pub fn shutdown(&mut self) {
        if self.initialized {
            info!("audio bank shut down");
        }
        *self = Self::new();
    }
}

lazy_static! {
    static ref AUDIO_BANK: Mutex<AudioBank> = Mutex::new(AudioBank::new());
}

fn bank() -> MutexGuard<'static, AudioBank> {
    // A panic while holding the lock leaves the bank usable
    AUDIO_BANK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Initialize the process-wide bank if it is not up yet
pub fn ensure_initialized() -> bool {
    bank().ensure_initialized()
}

/// Decode the embedded sounds into the process-wide bank
pub async fn preload() -> PreloadReport {
    let sources: Vec<(SoundKey, &str)> = SoundKey::ALL
        .iter()
        .map(|key| (*key, default_source(*key)))
        .collect();
    bank().preload_sources(&sources)
}

/// Play through the process-wide bank
pub fn play(key: SoundKey) -> bool {
    bank().play(key)
}

pub fn shutdown() {
    bank().shutdown()
}

// =============================================================================
// PLAYERS
// =============================================================================

/// Fire-and-forget sound output used by the engine
pub trait SoundPlayer: Send {
    fn play(&mut self, key: SoundKey);
}

/// Plays through the process-wide bank, ringing the terminal bell
#[derive(Debug, Clone, Default)]
pub struct BankPlayer {
    bell: bool,
}

impl BankPlayer {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl SoundPlayer for BankPlayer {
    fn play(&mut self, key: SoundKey) {
        if play(key) && self.bell {
            print!("\x07");
            let _ = std::io::stdout().flush();
        }
    }
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, _key: SoundKey) {}
}

/// Records cues in order; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    log: Arc<Mutex<Vec<SoundKey>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundKey> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn count(&self, key: SoundKey) -> usize {
        self.played().iter().filter(|k| **k == key).count()
    }
}

impl SoundPlayer for RecordingPlayer {
    fn play(&mut self, key: SoundKey) {
        if let Ok(mut log) = self.log.lock() {
            log.push(key);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
