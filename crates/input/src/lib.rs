//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`] and routes them
//! to the engine as key-down / key-up calls. The engine itself never sees a
//! terminal event.

pub mod map;
pub mod router;

pub use lumines_types as types;

pub use map::{map_key, should_quit};
pub use router::{dispatch, KeyRouter, DEFAULT_RELEASE_TIMEOUT};
