// ABOUTME: Shared types and configuration for the workbench.
// ABOUTME: Defines colors, pixel geometry, and config file handling.

pub mod color;
pub mod config;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use config::{Config, ConfigError, EditorSettings, LayoutSettings, TerminalSettings};
pub use geometry::{Orientation, Point, Size};
