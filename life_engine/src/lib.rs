//! Conway's Game of Life engine.
//!
//! [`Simulation`] owns the grid and all its mutation. [`GridLayout`] maps
//! between surface pixels and cell indices, and [`Ticker`] / [`run_steps`]
//! drive repeated stepping. The engine itself knows nothing about either.

pub mod engine;
pub mod error;
pub mod grid;
pub mod layout;
pub mod patterns;
pub mod ticker;

pub use engine::Simulation;
pub use error::{EngineError, Result};
pub use grid::Grid;
pub use layout::{CellPitch, CellRect, GridLayout};
pub use patterns::{find_pattern, Pattern, PATTERNS};
pub use ticker::{run_steps, Ticker};
