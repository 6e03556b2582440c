//! Two-player chess rules engine built on a king-adjacency graph of the
//! board, with incrementally maintained threat and pin tracking.

pub mod controller;
pub mod game;
pub mod utils;


pub use crate::controller::*;
pub use crate::game::*;
