// ABOUTME: Builds the editor/terminal split from configuration.
// ABOUTME: Owns the split and both widget adapters so they live and die together.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use wb_core::Config;
use wb_editor::{Editor, EditorOptions};
use wb_layout::{SlotId, SplitPane, WidgetAdapter};
use wb_terminal::{TerminalOptions, TerminalPane};

/// Document the editor opens with
pub const SAMPLE_CODE: &str = "function hello() {\n\talert('Hello world!');\n}";

const GREETING_LINES: usize = 500;

pub struct Workbench {
    split: SplitPane,
    editor: WidgetAdapter<Editor>,
    terminal: WidgetAdapter<TerminalPane>,
}

impl Workbench {
    pub fn new(config: &Config) -> Result<Self> {
        let split = SplitPane::from_settings(&config.layout).context("Invalid layout settings")?;

        let editor = Editor::new(EditorOptions::from_settings(&config.editor, SAMPLE_CODE));

        let mut terminal = TerminalPane::new(TerminalOptions::from(&config.terminal))
            .context("Failed to create terminal")?;
        for i in 0..GREETING_LINES {
            terminal.write(format!("\r\n{}. Hello from the workbench terminal $", i).as_bytes());
        }

        let editor = WidgetAdapter::attach(&split, SlotId::First, Rc::new(RefCell::new(editor)));
        let terminal =
            WidgetAdapter::attach(&split, SlotId::Second, Rc::new(RefCell::new(terminal)));

        tracing::info!(
            "Workbench ready: {:?} split at ratio {}",
            split.orientation(),
            split.ratio()
        );

        Ok(Self {
            split,
            editor,
            terminal,
        })
    }

    pub fn split(&self) -> &SplitPane {
        &self.split
    }

    pub fn split_mut(&mut self) -> &mut SplitPane {
        &mut self.split
    }

    pub fn editor(&self) -> Ref<'_, Editor> {
        self.editor.widget().borrow()
    }

    pub fn terminal(&self) -> Ref<'_, TerminalPane> {
        self.terminal.widget().borrow()
    }
}
