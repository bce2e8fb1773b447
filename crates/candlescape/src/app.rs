//! Application handler for winit events.

use std::path::PathBuf;
use std::sync::Arc;

use candlescape_config::Config;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::state::{select_data_source, State};

pub struct App {
    config: Config,
    csv_path: Option<PathBuf>,
    state: Option<State>,
    startup_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config, csv_path: Option<PathBuf>) -> Self {
        Self {
            config,
            csv_path,
            state: None,
            startup_error: None,
        }
    }

    /// The error that stopped the window from opening, if any.
    pub fn take_startup_error(&mut self) -> Option<anyhow::Error> {
        self.startup_error.take()
    }

    fn startup_failed(&mut self, error: anyhow::Error) {
        log::error!("Failed to start: {error:#}");
        self.startup_error = Some(error);
    }

    fn create_state(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<State> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let source = select_data_source(self.csv_path.clone(), &self.config);
        pollster::block_on(State::new(window, &self.config, source.as_ref()))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_state(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                self.startup_failed(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::Focused(false) => state.input.release_all(),
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.reconfigure();
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => state.handle_key(event_loop, code, key_state.is_pressed()),
            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => state.handle_mouse_input(event_loop, btn_state, button),
            WindowEvent::CursorMoved { position, .. } => {
                state.handle_cursor_moved(event_loop, (position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => state.input.handle_cursor_left(),
            WindowEvent::MouseWheel { delta, .. } => {
                state.handle_mouse_wheel(event_loop, delta);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_error_is_kept_for_main() {
        let mut app = App::new(Config::default(), Some(PathBuf::from("missing.csv")));
        assert!(app.take_startup_error().is_none());

        app.startup_failed(anyhow::anyhow!("Failed to load candles from missing.csv"));
        let error = app.take_startup_error().unwrap();
        assert!(error.to_string().contains("missing.csv"));
        assert!(app.take_startup_error().is_none());
    }
}
