use crate::assets;
use log::warn;
use macroquad::audio::{Sound, load_sound_from_bytes, play_sound_once};

/// Owns the audio cues for one race session. Every cue is optional; a
/// missing or undecodable file just mutes that cue.
#[derive(Default)]
pub struct AudioManager {
    crash_sound: Option<Sound>,
    spike_sound: Option<Sound>,
    gate_sound: Option<Sound>,
}

impl AudioManager {
    /// Silent manager for headless use.
    pub fn muted() -> Self {
        Default::default()
    }

    // Load all required sound assets
    pub async fn load() -> Self {
        AudioManager {
            crash_sound: load_cue("car_crash.ogg").await,
            spike_sound: load_cue("spike_hit.ogg").await,
            gate_sound: load_cue("start_gate.ogg").await,
        }
    }

    // Play the crash cue if loaded
    pub fn play_crash(&self) {
        if let Some(ref sound) = self.crash_sound {
            play_sound_once(sound);
        }
    }

    // Play the spike-hit cue if loaded
    pub fn play_spike(&self) {
        if let Some(ref sound) = self.spike_sound {
            play_sound_once(sound);
        }
    }

    // Play the start-gate cue if loaded
    pub fn play_gate(&self) {
        if let Some(ref sound) = self.gate_sound {
            play_sound_once(sound);
        }
    }
}

async fn load_cue(name: &str) -> Option<Sound> {
    let Some(bytes) = assets::get_asset_bytes(name) else {
        warn!("Missing embedded sound '{}'", name);
        return None;
    };
    match load_sound_from_bytes(&bytes).await {
        Ok(sound) => Some(sound),
        Err(e) => {
            warn!("Failed to load sound '{}': {}", name, e);
            None
        }
    }
}
