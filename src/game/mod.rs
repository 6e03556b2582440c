pub mod board;
pub mod error;
pub mod executor;
pub mod fen;
pub mod filter;
pub mod graph;
pub mod history;
pub mod movegen;
pub mod pieces;
pub mod registry;
pub mod square;
pub mod state;
pub mod tracker;

pub use board::*;
pub use error::*;
pub use executor::*;
pub use fen::*;
pub use graph::*;
pub use history::*;
pub use pieces::*;
pub use registry::*;
pub use square::*;
pub use state::*;
