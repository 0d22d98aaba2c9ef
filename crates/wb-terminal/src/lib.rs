// ABOUTME: Terminal emulator pane.
// ABOUTME: Wraps alacritty_terminal and fits its cell grid to the pane's pixel size.

pub mod terminal;

pub use terminal::{TerminalError, TerminalOptions, TerminalPane, MIN_COLUMNS, MIN_ROWS};
