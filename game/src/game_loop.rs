use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::app::{FrameRequest, GameApp};
use engine::graphics::Renderer2d;
use log::info;
use winit::event::VirtualKeyCode;

use crate::images::ImageRegistry;
use crate::input::{ControlKey, InputQueue, map_key_to_action, map_key_to_control};
use crate::random::RandomSource;
use crate::render::{Scene, draw_scene};
use crate::session::{Session, TickOutcome};
use crate::settings::GameSettings;
use crate::view::{GameView, ViewEffect, ViewEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub drop_interval: Duration,
    pub cell_size: u32,
}

impl From<&GameSettings> for LoopConfig {
    fn from(settings: &GameSettings) -> Self {
        Self {
            drop_interval: settings.drop_interval,
            cell_size: settings.cell_size,
        }
    }
}

/// Owns everything that outlives a single game: the screen state, the image registry and the
/// pending input, plus the session itself once the player has pressed start.
pub struct GameLoop<R: RandomSource> {
    config: LoopConfig,
    view: GameView,
    session: Option<Session<R>>,
    // Held until the first start builds the session.
    rng: Option<R>,
    queue: InputQueue,
    images: ImageRegistry,
}

impl<R: RandomSource> GameLoop<R> {
    pub fn new(rng: R, config: LoopConfig) -> Self {
        Self {
            config,
            view: GameView::default(),
            session: None,
            rng: Some(rng),
            queue: InputQueue::new(),
            images: ImageRegistry::new(),
        }
    }

    pub fn with_images(mut self, images: ImageRegistry) -> Self {
        self.images = images;
        self
    }

    pub fn view(&self) -> GameView {
        self.view
    }

    pub fn session(&self) -> Option<&Session<R>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session<R>> {
        self.session.as_mut()
    }

    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageRegistry {
        &mut self.images
    }

    pub fn queued_inputs(&self) -> usize {
        self.queue.len()
    }

    pub fn add_image_path(&mut self, path: impl AsRef<Path>) -> usize {
        self.images.add_path(path)
    }

    fn is_session_active(&self) -> bool {
        self.view.is_playing() && self.session.as_ref().is_some_and(Session::is_active)
    }

    fn dispatch(&mut self, event: ViewEvent) -> ViewEffect {
        let (next, effect) = self.view.handle(event);
        self.view = next;
        match effect {
            ViewEffect::ResetSession => self.reset_session(),
            ViewEffect::ShowRetry => {
                self.queue.clear();
                info!("showing retry prompt");
            }
            ViewEffect::None => {}
        }
        effect
    }

    fn reset_session(&mut self) {
        self.queue.clear();
        let image_count = self.images.len();
        if let Some(session) = self.session.as_mut() {
            session.restart(image_count);
        } else if let Some(rng) = self.rng.take() {
            info!(
                "starting session (drop interval {:?}, {} image(s))",
                self.config.drop_interval, image_count
            );
            self.session = Some(Session::start(rng, self.config.drop_interval, image_count));
        } else {
            return;
        }
        if self.session.as_ref().is_some_and(Session::is_game_over) {
            self.dispatch(ViewEvent::GameOver);
        }
    }
}

impl<R: RandomSource> GameApp for GameLoop<R> {
    fn handle_key(&mut self, key: VirtualKeyCode) -> FrameRequest {
        if let Some(control) = map_key_to_control(key) {
            let event = match control {
                ControlKey::Start => ViewEvent::Start,
                ControlKey::Retry => ViewEvent::Retry,
            };
            return match self.dispatch(event) {
                ViewEffect::ResetSession => FrameRequest::Continue,
                _ => FrameRequest::Idle,
            };
        }

        match map_key_to_action(key) {
            Some(action) if self.is_session_active() => {
                self.queue.push(action);
                FrameRequest::Continue
            }
            _ => FrameRequest::Idle,
        }
    }

    fn handle_file_drop(&mut self, path: PathBuf) -> FrameRequest {
        self.add_image_path(path);
        FrameRequest::Idle
    }

    fn frame(&mut self, now: Duration, gfx: &mut dyn Renderer2d) -> FrameRequest {
        let mut request = FrameRequest::Idle;

        if self.view.is_playing() {
            if let Some(session) = self.session.as_mut().filter(|s| s.is_active()) {
                for action in self.queue.drain() {
                    session.apply(action);
                }
                match session.tick(now, self.images.len()) {
                    TickOutcome::GameOver { .. } => {
                        self.dispatch(ViewEvent::GameOver);
                    }
                    _ => request = FrameRequest::Continue,
                }
            }
        }

        let scene = Scene {
            board: self.session.as_ref().map(Session::board),
            piece: self
                .session
                .as_ref()
                .and_then(|s| s.current().map(|p| (p, s.anchor()))),
            images: &self.images,
            view: self.view,
            cell_size: self.config.cell_size,
        };
        draw_scene(gfx, &scene);

        request
    }
}
