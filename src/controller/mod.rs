pub mod game_controller;
pub mod opponent;

pub use game_controller::*;
pub use opponent::*;
