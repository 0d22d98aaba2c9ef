// ABOUTME: Terminal pane wrapping alacritty_terminal's grid and ANSI parser.
// ABOUTME: Converts slot pixels to columns/rows and resizes the grid without dropping output.

use alacritty_terminal::event::VoidListener;
use alacritty_terminal::grid::Dimensions;
use alacritty_terminal::index::{Column, Line};
use alacritty_terminal::term::{Config as TermConfig, Term};
use alacritty_terminal::vte::ansi::Processor;
use wb_core::{Color, TerminalSettings};
use wb_layout::{check_dimensions, Remeasure, RemeasureError};

/// Smallest grid a fitted terminal shrinks to
pub const MIN_COLUMNS: u16 = 2;
pub const MIN_ROWS: u16 = 1;

const INITIAL_COLUMNS: u16 = 80;
const INITIAL_ROWS: u16 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalOptions {
    pub cursor_blink: bool,
    pub background: Color,
    pub foreground: Color,
    pub cell_width: f32,
    pub cell_height: f32,
    pub padding: f32,
    pub scrollback: usize,
}

impl From<&TerminalSettings> for TerminalOptions {
    fn from(settings: &TerminalSettings) -> Self {
        Self {
            cursor_blink: settings.cursor_blink,
            background: settings.background,
            foreground: settings.foreground,
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            padding: settings.padding,
            scrollback: settings.scrollback,
        }
    }
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self::from(&TerminalSettings::default())
    }
}

/// Simple size type that implements Dimensions
struct TermSize {
    columns: usize,
    lines: usize,
}

impl TermSize {
    fn new(columns: usize, lines: usize) -> Self {
        Self { columns, lines }
    }
}

impl Dimensions for TermSize {
    fn columns(&self) -> usize {
        self.columns
    }

    fn screen_lines(&self) -> usize {
        self.lines
    }

    fn total_lines(&self) -> usize {
        self.lines
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerminalError {
    #[error("Invalid cell size {width}x{height}")]
    InvalidCellSize { width: f32, height: f32 },
}

/// Terminal emulator living in a split slot
pub struct TerminalPane {
    term: Term<VoidListener>,
    parser: Processor,
    options: TerminalOptions,
}

impl TerminalPane {
    pub fn new(options: TerminalOptions) -> Result<Self, TerminalError> {
        let cell_ok = |v: f32| v.is_finite() && v > 0.0;
        if !cell_ok(options.cell_width) || !cell_ok(options.cell_height) {
            return Err(TerminalError::InvalidCellSize {
                width: options.cell_width,
                height: options.cell_height,
            });
        }

        let mut term_config = TermConfig::default();
        term_config.scrolling_history = options.scrollback;
        term_config.default_cursor_style.blinking = options.cursor_blink;

        let term_size = TermSize::new(INITIAL_COLUMNS as usize, INITIAL_ROWS as usize);
        let term = Term::new(term_config, &term_size, VoidListener);

        Ok(Self {
            term,
            parser: Processor::new(),
            options,
        })
    }

    pub fn options(&self) -> &TerminalOptions {
        &self.options
    }

    /// Feed program output (text and escape sequences) to the emulator
    pub fn write(&mut self, bytes: &[u8]) {
        self.parser.advance(&mut self.term, bytes);
    }

    /// Get terminal dimensions (columns, rows)
    pub fn size(&self) -> (u16, u16) {
        let grid = self.term.grid();
        (grid.columns() as u16, grid.screen_lines() as u16)
    }

    /// Get cursor position (column, line)
    pub fn cursor_position(&self) -> (usize, usize) {
        let cursor = self.term.grid().cursor.point;
        (cursor.column.0, cursor.line.0.max(0) as usize)
    }

    /// Visible text of one screen row, trailing blanks trimmed
    pub fn line_text(&self, row: usize) -> Option<String> {
        let grid = self.term.grid();
        if row >= grid.screen_lines() {
            return None;
        }
        let line = &grid[Line(row as i32)];
        let text: String = (0..grid.columns()).map(|col| line[Column(col)].c).collect();
        Some(text.trim_end().to_string())
    }

    /// Grid size that fits a slot of the given pixel size
    pub fn fit(&self, width: f32, height: f32) -> (u16, u16) {
        let inner_width = (width - self.options.padding * 2.0).max(0.0);
        let inner_height = (height - self.options.padding * 2.0).max(0.0);
        let cells = |length: f32, unit: f32, min: u16| {
            (length / unit).floor().clamp(min as f32, u16::MAX as f32) as u16
        };
        (
            cells(inner_width, self.options.cell_width, MIN_COLUMNS),
            cells(inner_height, self.options.cell_height, MIN_ROWS),
        )
    }

    /// Resize the grid, reflowing existing content
    pub fn resize(&mut self, columns: u16, rows: u16) {
        let columns = columns.max(MIN_COLUMNS);
        let rows = rows.max(MIN_ROWS);
        self.term
            .resize(TermSize::new(columns as usize, rows as usize));
    }
}

impl Remeasure for TerminalPane {
    fn remeasure(&mut self, width: f32, height: f32) -> Result<(), RemeasureError> {
        check_dimensions(width, height)?;
        let (columns, rows) = self.fit(width, height);
        if (columns, rows) == self.size() {
            return Ok(());
        }
        tracing::trace!("Terminal fitted to {}x{} cells", columns, rows);
        self.resize(columns, rows);
        Ok(())
    }
}
