use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::error::EngineError;
use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::{Surface, SurfaceSize};

pub struct AppConfig {
    pub title: String,
    pub size: SurfaceSize,
    pub resizable: bool,
}

/// Whether the game wants another frame scheduled after this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    Continue,
    Idle,
}

impl FrameRequest {
    pub fn wants_frame(self) -> bool {
        matches!(self, FrameRequest::Continue)
    }
}

/// A game driven by `run_game`.
///
/// All callbacks run on the event-loop thread, one at a time: key presses and file drops arrive
/// between frames, never while `frame` is executing.
pub trait GameApp {
    fn handle_key(&mut self, key: VirtualKeyCode) -> FrameRequest;

    fn handle_file_drop(&mut self, _path: PathBuf) -> FrameRequest {
        FrameRequest::Idle
    }

    /// Advance and render one frame. `now` is monotonic time since the loop started.
    fn frame(&mut self, now: Duration, gfx: &mut dyn Renderer2d) -> FrameRequest;
}

/// Monotonic clock handed to `GameApp::frame`.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Extracts the key of a key-down event; releases and unmapped keys yield `None`.
pub fn pressed_key(input: &KeyboardInput) -> Option<VirtualKeyCode> {
    match input.state {
        ElementState::Pressed => input.virtual_keycode,
        ElementState::Released => None,
    }
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), EngineError> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(PhysicalSize::new(config.size.width, config.size.height))
        .with_resizable(config.resizable)
        .build(&event_loop)?;

    let inner = window.inner_size();
    let surface_size = SurfaceSize::new(inner.width, inner.height);
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = Pixels::new(surface_size.width, surface_size.height, surface_texture)?;
    let mut renderer = PixelsRenderer2d::new(pixels, surface_size)?;
    info!(
        "window ready at {}x{}",
        surface_size.width, surface_size.height
    );

    let clock = FrameClock::start();
    window.request_redraw();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = renderer.resize(SurfaceSize::new(size.width, size.height)) {
                        warn!("resize failed: {err}");
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if let Some(key) = pressed_key(&input) {
                        if game.handle_key(key).wants_frame() {
                            window.request_redraw();
                        }
                    }
                }
                WindowEvent::DroppedFile(path) => {
                    if game.handle_file_drop(path).wants_frame() {
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = clock.now();
                let request = renderer.draw_frame(|gfx| game.frame(now, gfx));
                if let Err(err) = renderer.present() {
                    warn!("present failed: {err}");
                }
                if request.wants_frame() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(deprecated)]
    fn key_event(state: ElementState, key: Option<VirtualKeyCode>) -> KeyboardInput {
        KeyboardInput {
            scancode: 0,
            state,
            virtual_keycode: key,
            modifiers: Default::default(),
        }
    }

    #[test]
    fn only_presses_with_a_keycode_are_reported() {
        assert_eq!(
            pressed_key(&key_event(ElementState::Pressed, Some(VirtualKeyCode::Left))),
            Some(VirtualKeyCode::Left)
        );
        assert_eq!(
            pressed_key(&key_event(ElementState::Released, Some(VirtualKeyCode::Left))),
            None
        );
        assert_eq!(pressed_key(&key_event(ElementState::Pressed, None)), None);
    }

    #[test]
    fn frame_clock_is_monotonic() {
        let clock = FrameClock::start();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
