// ABOUTME: Main application entry point.
// ABOUTME: Opens the window and routes resize, pointer, and focus events into the split layout.

mod host;
mod workbench;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use wb_core::Config;
use wb_layout::{Point, PointerEvent, Size, Subscription};
use workbench::Workbench;

struct App {
    window: Option<Arc<Window>>,
    config: Config,
    workbench: Workbench,
    cursor: Point,
    captured: bool,
    layout_dirty: Rc<Cell<bool>>,
    _layout_watch: Subscription,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let workbench = Workbench::new(&config)?;

        let layout_dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&layout_dirty);
        let layout_watch = workbench.split().subscribe_scoped(move |_| flag.set(true));

        Ok(Self {
            window: None,
            config,
            workbench,
            cursor: Point::default(),
            captured: false,
            layout_dirty,
            _layout_watch: layout_watch,
        })
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let transition = self.workbench.split_mut().handle_pointer(event);
        if transition.acquires_capture() {
            self.capture_pointer(true);
        } else if transition.releases_capture() {
            self.capture_pointer(false);
        }
    }

    /// Confine the cursor while dragging so release events are not lost
    fn capture_pointer(&mut self, capture: bool) {
        let Some(window) = &self.window else {
            return;
        };
        let mode = if capture {
            CursorGrabMode::Confined
        } else {
            CursorGrabMode::None
        };
        match window.set_cursor_grab(mode) {
            Ok(()) => self.captured = capture,
            Err(e) => {
                tracing::debug!("Cursor grab {:?} unavailable: {}", mode, e);
                self.captured = false;
            }
        }
    }

    fn update_cursor_icon(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let split = self.workbench.split();
        window.set_cursor(host::cursor_icon(
            split.orientation(),
            split.hit_test(self.cursor),
            split.is_dragging(),
        ));
    }

    fn flush_layout(&self) {
        let Some(window) = &self.window else {
            return;
        };
        if self.layout_dirty.replace(false) {
            window.set_title(&host::window_title(self.workbench.split()));
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("workbench")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        tracing::info!(
            "Window created: {}x{} physical pixels, scale factor: {}",
            size.width,
            size.height,
            window.scale_factor()
        );

        self.window = Some(window);
        self.workbench
            .split_mut()
            .resize(Size::new(size.width as f32, size.height as f32));
        self.flush_layout();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.workbench
                    .split_mut()
                    .resize(Size::new(new_size.width as f32, new_size.height as f32));
            }
            WindowEvent::Focused(false) => {
                self.handle_pointer(PointerEvent::Cancel);
            }
            WindowEvent::CursorLeft { .. } if !self.captured => {
                self.handle_pointer(PointerEvent::Cancel);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = host::to_point(position);
                if self.workbench.split().is_dragging() {
                    self.handle_pointer(PointerEvent::Move {
                        pointer_id: host::MOUSE_POINTER,
                        position: self.cursor,
                    });
                }
                self.update_cursor_icon();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let position = self.cursor;
                let event = match state {
                    ElementState::Pressed => PointerEvent::Down {
                        pointer_id: host::MOUSE_POINTER,
                        position,
                        target: self.workbench.split().hit_test(position),
                    },
                    ElementState::Released => PointerEvent::Up {
                        pointer_id: host::MOUSE_POINTER,
                        position,
                    },
                };
                self.handle_pointer(event);
                self.update_cursor_icon();
            }
            WindowEvent::Touch(touch) => {
                let event = host::touch_event(
                    self.workbench.split(),
                    touch.phase,
                    touch.id,
                    host::to_point(touch.location),
                );
                self.handle_pointer(event);
            }
            _ => {}
        }

        self.flush_layout();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting workbench");

    let config = Config::load_or_default();
    tracing::info!(
        "Loaded config: {:?} split, initial ratio {}",
        config.layout.orientation,
        config.layout.initial_ratio
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
