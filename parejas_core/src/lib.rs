//! Game logic for the 3x3 pair-matching square game.
//!
//! Everything in this crate is deterministic and UI-free: boards come
//! from a seeded generator, and time only advances through explicit
//! [`GameEngine::tick`] calls, so the whole state machine can be
//! driven from native tests.

pub use board::*;
pub use engine::*;
pub use error::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod tile;
mod types;
