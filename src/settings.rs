//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Grid size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Number-row shortcut: `1`, `2`, `3`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Difficulty::Easy),
            "2" => Some(Difficulty::Medium),
            "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// (rows, columns) for this preset
    pub fn grid(&self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (DEFAULT_ROWS, DEFAULT_COLUMNS),
            Difficulty::Medium => (10, 10),
            Difficulty::Hard => (16, 16),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset last applied
    pub difficulty: Difficulty,

    // === Maze ===
    pub rows: usize,
    pub columns: usize,
    /// Fixed maze seed; `None` picks a fresh one per game
    pub seed: Option<u64>,

    // === Arena ===
    pub width: f32,
    pub height: f32,
    /// Render bodies as outlines
    pub wireframes: bool,

    // === Feel ===
    /// Velocity added per arrow key press
    pub nudge_speed: f32,
    /// Gravity applied when the maze collapses
    pub win_gravity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,

            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            seed: None,

            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            wireframes: true,

            nudge_speed: NUDGE_SPEED,
            win_gravity: WIN_GRAVITY,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates grid size)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        (self.rows, self.columns) = preset.grid();
    }

    /// Reject settings no maze or arena can be built from
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 || self.rows.checked_mul(self.columns).is_none() {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let (w, h) = (self.width, self.height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(Error::InvalidArena {
                width: w,
                height: h,
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "maze_roll_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) if settings.validate().is_ok() => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Ok(_) => log::warn!("Stored settings are invalid, ignoring"),
                    Err(e) => log::warn!("Could not parse stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
