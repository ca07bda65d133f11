//! Maze settings and presets
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::maze::Traversal;

/// Grid size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MazePreset {
    Small,
    #[default]
    Classic,
    Large,
}

impl MazePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            MazePreset::Small => "Small",
            MazePreset::Classic => "Classic",
            MazePreset::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" | "easy" => Some(MazePreset::Small),
            "classic" | "medium" => Some(MazePreset::Classic),
            "large" | "hard" => Some(MazePreset::Large),
            _ => None,
        }
    }

    /// Cells across, cells down
    pub fn cells(&self) -> (usize, usize) {
        match self {
            MazePreset::Small => (6, 4),
            MazePreset::Classic => (10, 7),
            MazePreset::Large => (20, 14),
        }
    }

    /// Wall and border thickness in pixels
    pub fn wall_thickness(&self) -> f32 {
        match self {
            MazePreset::Small => 10.0,
            MazePreset::Classic => 10.0,
            MazePreset::Large => 6.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Preset the grid values came from
    pub preset: MazePreset,

    // === Maze ===
    /// Columns in the grid
    pub cells_horizontal: usize,
    /// Rows in the grid
    pub cells_vertical: usize,
    /// Wall and border thickness (pixels)
    pub wall_thickness: f32,
    /// Carving strategy
    #[serde(default)]
    pub traversal: Traversal,
    /// Fixed seed for a reproducible maze; random when unset
    #[serde(default)]
    pub seed: Option<u64>,

    // === Colors (CSS) ===
    pub wall_color: String,
    pub goal_color: String,
    pub ball_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(MazePreset::Classic)
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: MazePreset) -> Self {
        let (cells_horizontal, cells_vertical) = preset.cells();
        Self {
            preset,
            cells_horizontal,
            cells_vertical,
            wall_thickness: preset.wall_thickness(),
            traversal: Traversal::default(),
            seed: None,
            wall_color: "red".to_string(),
            goal_color: "green".to_string(),
            ball_color: "blue".to_string(),
        }
    }

    /// Apply a preset (grid size and thickness only; colors and seed are kept)
    pub fn apply_preset(&mut self, preset: MazePreset) {
        let (cells_horizontal, cells_vertical) = preset.cells();
        self.preset = preset;
        self.cells_horizontal = cells_horizontal;
        self.cells_vertical = cells_vertical;
        self.wall_thickness = preset.wall_thickness();
    }

    /// Check that these settings can produce a maze
    pub fn validate(&self) -> Result<()> {
        if self.cells_horizontal == 0 || self.cells_vertical == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: self.cells_vertical,
                cols: self.cells_horizontal,
            });
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness >= 0.0) {
            return Err(MazeError::InvalidSettings(format!(
                "wall thickness must be non-negative, got {}",
                self.wall_thickness
            )));
        }
        Ok(())
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "maze_ball_settings";

    /// Parse and validate a stored settings blob
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Encode for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

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

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not save settings: {}", e),
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
