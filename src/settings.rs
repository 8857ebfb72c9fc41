//! Host settings and preferences
//!
//! Read from LocalStorage on the web. Gameplay tuning lives in
//! `crate::consts` and is deliberately not part of this.

use serde::{Deserialize, Serialize};

use crate::sim::InputAction;

/// Host preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === Input ===
    /// `KeyboardEvent.code` values that jump (and start a run)
    pub jump_keys: Vec<String>,
    /// `KeyboardEvent.code` values that restart from the game-over screen
    pub restart_keys: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            jump_keys: vec!["Space".to_string(), "ArrowUp".to_string()],
            restart_keys: vec!["KeyR".to_string()],
        }
    }
}

impl Settings {
    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Map a `KeyboardEvent.code` to a game action
    pub fn action_for_key(&self, code: &str) -> Option<InputAction> {
        if self.jump_keys.iter().any(|k| k == code) {
            Some(InputAction::Jump)
        } else if self.restart_keys.iter().any(|k| k == code) {
            Some(InputAction::Restart)
        } else {
            None
        }
    }

    /// Seed for a new session: the configured one, else `fallback`
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dino_dash_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: read JSON from `DINO_DASH_SETTINGS` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("DINO_DASH_SETTINGS") {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring DINO_DASH_SETTINGS: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
