//! Window, drawing-surface and input plumbing shared by the game.

pub mod app;
pub mod error;
pub mod font;
pub mod graphics;
pub mod image;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;

pub use error::EngineError;
