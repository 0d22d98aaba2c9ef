// ABOUTME: Editor state: rope-backed document, cursor line, and viewport.
// ABOUTME: Re-measuring recomputes visible rows/columns without touching the document.

use ropey::Rope;
use unicode_width::UnicodeWidthChar;
use wb_core::EditorSettings;
use wb_layout::{check_dimensions, Remeasure, RemeasureError};

/// Monospace glyph advance as a fraction of the font size
const ADVANCE_RATIO: f32 = 0.6;
const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Initial document text
    pub value: String,
    pub language: String,
    pub theme: String,
    pub font_size: f32,
    pub line_height: f32,
    pub padding: f32,
}

impl EditorOptions {
    pub fn from_settings(settings: &EditorSettings, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: settings.language.clone(),
            theme: settings.theme.clone(),
            font_size: settings.font_size,
            line_height: settings.line_height,
            padding: settings.padding,
        }
    }

    /// Width of one monospace cell in pixels
    pub fn char_width(&self) -> f32 {
        self.font_size * ADVANCE_RATIO
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default(), "")
    }
}

/// Portion of the document that fits in the editor's slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub visible_lines: usize,
    pub visible_columns: usize,
    pub first_line: usize,
}

impl Viewport {
    pub fn shows_line(&self, line: usize) -> bool {
        line >= self.first_line && line < self.first_line + self.visible_lines
    }
}

pub struct Editor {
    text: Rope,
    options: EditorOptions,
    viewport: Viewport,
    cursor_line: usize,
    measured: Option<(f32, f32)>,
    layouts: usize,
}

impl Editor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            text: Rope::from_str(&options.value),
            options,
            viewport: Viewport::default(),
            cursor_line: 0,
            measured: None,
            layouts: 0,
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn language(&self) -> &str {
        &self.options.language
    }

    pub fn theme(&self) -> &str {
        &self.options.theme
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        self.cursor_line = 0;
        self.viewport.first_line = 0;
    }

    /// Insert at a char index; indices past the end append
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.text.len_chars());
        self.text.insert(idx, text);
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Line content without its line ending
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.text.len_lines() {
            return None;
        }
        let line = self.text.line(idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Display width of the widest line, in cells
    pub fn longest_line_width(&self) -> usize {
        self.text
            .lines()
            .map(|line| display_width(line.chars()))
            .max()
            .unwrap_or(0)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Move the cursor, scrolling just enough to keep it visible
    pub fn set_cursor_line(&mut self, line: usize) {
        self.cursor_line = line.min(self.line_count().saturating_sub(1));
        self.reveal_cursor();
    }

    pub fn scroll_to_line(&mut self, line: usize) {
        self.viewport.first_line = line.min(self.max_first_line());
    }

    /// How many times the viewport has actually been recomputed
    pub fn layout_count(&self) -> usize {
        self.layouts
    }

    fn max_first_line(&self) -> usize {
        self.line_count()
            .saturating_sub(self.viewport.visible_lines.max(1))
    }

    fn reveal_cursor(&mut self) {
        let visible = self.viewport.visible_lines.max(1);
        if self.cursor_line < self.viewport.first_line {
            self.viewport.first_line = self.cursor_line;
        } else if self.cursor_line >= self.viewport.first_line + visible {
            self.viewport.first_line = self.cursor_line + 1 - visible;
        }
    }
}

impl Remeasure for Editor {
    fn remeasure(&mut self, width: f32, height: f32) -> Result<(), RemeasureError> {
        check_dimensions(width, height)?;
        if self.measured == Some((width, height)) {
            return Ok(());
        }

        let inner_width = (width - self.options.padding * 2.0).max(0.0);
        let inner_height = (height - self.options.padding * 2.0).max(0.0);

        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.visible_columns = cells(inner_width, self.options.char_width());
        self.viewport.visible_lines = cells(inner_height, self.options.line_height);

        let first_line = self.viewport.first_line;
        self.scroll_to_line(first_line);

        self.measured = Some((width, height));
        self.layouts += 1;
        tracing::trace!(
            "Editor laid out at {}x{}: {} lines x {} columns",
            width,
            height,
            self.viewport.visible_lines,
            self.viewport.visible_columns
        );
        Ok(())
    }
}

fn cells(length: f32, unit: f32) -> usize {
    if unit.is_finite() && unit > 0.0 {
        (length / unit).floor() as usize
    } else {
        0
    }
}

fn display_width(chars: impl Iterator<Item = char>) -> usize {
    chars
        .filter(|c| *c != '\n' && *c != '\r')
        .fold(0, |col, c| match c {
            '\t' => (col / TAB_WIDTH + 1) * TAB_WIDTH,
            c => col + c.width().unwrap_or(0),
        })
}
