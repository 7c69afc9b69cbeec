//! Plugin configuration
//!
//! All widget settings live in one JSON file. Each section falls back to its
//! defaults, so a file only needs the values it changes.

use crate::face::{DisplaySide, FacePlacementPolicy, FaceSheetLayout, FlipMode};
use crate::gui::Alignment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bundled config shipped next to the assets
pub const BUNDLED_CONFIG_PATH: &str = "assets/config/plugins.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub face: FaceConfig,
    pub message: MessageConfig,
    pub currency: CurrencyConfig,
    pub variable_display: VariableDisplayConfig,
    pub title: TitleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub initial_side: DisplaySide,
    /// Kept as text so unrecognised modes fall through to the default
    pub initial_flip_mode: String,
    pub reserved_width: i32,
    pub face_width: u32,
    pub face_height: u32,
    pub sheet_columns: u32,
    pub face_directory: String,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            initial_side: DisplaySide::Left,
            initial_flip_mode: FlipMode::AutoLeft.as_param().to_string(),
            reserved_width: 168,
            face_width: 144,
            face_height: 144,
            sheet_columns: 4,
            face_directory: "assets/faces".to_string(),
        }
    }
}

impl FaceConfig {
    /// Builds the startup policy
    pub fn policy(&self) -> FacePlacementPolicy {
        let mut policy = FacePlacementPolicy::with_reserved_width(
            self.initial_side,
            FlipMode::default(),
            self.reserved_width,
        );
        policy.set_flip_mode_param(&self.initial_flip_mode);
        policy
    }

    pub fn sheet_layout(&self) -> FaceSheetLayout {
        FaceSheetLayout {
            face_width: self.face_width,
            face_height: self.face_height,
            columns: self.sheet_columns,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub line_height: u32,
    pub text_scale: u32,
    pub chars_per_tick: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        MessageConfig {
            width: 816,
            height: 180,
            padding: 18,
            line_height: 36,
            text_scale: 3,
            chars_per_tick: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub gold_icon: u32,
    pub token_icon: u32,
    pub token_variable: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// 0 hides the frame entirely
    pub opacity: u8,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            gold_icon: 313,
            token_icon: 314,
            token_variable: 1,
            window_width: 400,
            window_height: 300,
            opacity: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableDisplayConfig {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub variable_id: u32,
    pub draw_icon: bool,
    pub icon_index: u32,
    pub alignment: Alignment,
}

impl Default for VariableDisplayConfig {
    fn default() -> Self {
        VariableDisplayConfig {
            x: 576,
            y: 0,
            width: 240,
            variable_id: 1,
            draw_icon: false,
            icon_index: 0,
            alignment: Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub map_id: u32,
}

impl Default for TitleConfig {
    fn default() -> Self {
        TitleConfig { map_id: 1 }
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl PluginConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Per-user config location, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("facehud").join("plugins.json"))
    }

    /// Loads the first config that exists: user config, then bundled config
    ///
    /// Falls back to defaults when neither exists. A file that exists but
    /// fails to parse is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let candidates = Self::user_config_path()
            .into_iter()
            .chain(std::iter::once(PathBuf::from(BUNDLED_CONFIG_PATH)));

        for path in candidates {
            if path.exists() {
                log::info!("Loading plugin config from {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        log::info!("No plugin config found, using defaults");
        Ok(Self::default())
    }
}
