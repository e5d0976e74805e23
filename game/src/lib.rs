pub mod board;
pub mod game_loop;
pub mod images;
pub mod input;
pub mod piece;
pub mod random;
pub mod render;
pub mod serde_duration;
pub mod session;
pub mod settings;
pub mod view;
