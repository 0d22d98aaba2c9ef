// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves layout, editor, and terminal settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Color, Orientation};

/// Split pane settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Which way the two panes are arranged
    pub orientation: Orientation,

    /// Fraction of the container given to the first pane at startup
    pub initial_ratio: f32,

    /// Smallest fraction either side of the divider may shrink to
    pub min_ratio: f32,
    pub max_ratio: f32,

    /// Width of the divider's grab zone in pixels
    pub divider_thickness: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            initial_ratio: 0.5,
            min_ratio: 0.05,
            max_ratio: 0.95,
            divider_thickness: 6.0,
        }
    }
}

/// Code editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Language id used for highlighting
    pub language: String,

    /// Editor theme name
    pub theme: String,

    /// Font size in pixels
    pub font_size: f32,

    /// Height of one text line in pixels
    pub line_height: f32,

    /// Inner padding around the text area in pixels
    pub padding: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            language: "javascript".to_string(),
            theme: "vs-dark".to_string(),
            font_size: 14.0,
            line_height: 19.0,
            padding: 4.0,
        }
    }
}

/// Terminal emulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    pub cursor_blink: bool,
    pub background: Color,
    pub foreground: Color,

    /// Cell size in pixels
    pub cell_width: f32,
    pub cell_height: f32,

    /// Inner padding around the grid in pixels
    pub padding: f32,

    /// Lines of scrollback history
    pub scrollback: usize,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            cursor_blink: true,
            background: Color::EDITOR_BACKGROUND,
            foreground: Color::EDITOR_FOREGROUND,
            cell_width: 9.0,
            cell_height: 17.0,
            padding: 4.0,
            scrollback: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Split pane settings
    pub layout: LayoutSettings,

    /// Editor pane settings
    pub editor: EditorSettings,

    /// Terminal pane settings
    pub terminal: TerminalSettings,

    /// Window dimensions
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            editor: EditorSettings::default(),
            terminal: TerminalSettings::default(),
            window_width: 1200,
            window_height: 800,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigPath,
}

impl Config {
    /// Get the default config file path (~/.config/workbench/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("workbench").join("config.toml"))
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigPath)?;
        self.save(&path)?;
        Ok(path)
    }
}
