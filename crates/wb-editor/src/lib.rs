// ABOUTME: Code editor pane.
// ABOUTME: Holds document text in a rope and recomputes its visible viewport on re-measure.

mod editor;

pub use editor::{Editor, EditorOptions, Viewport};
