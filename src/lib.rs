//! Grid snake that eats apples.
//!
//! The simulation core lives in [`snake`], [`apple`] and [`game`]; everything
//! else is the terminal front end that feeds it input and draws snapshots.

pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod runtime;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
