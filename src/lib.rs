//! Lumines-style falling-block rules engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `lumines::{core, input, types}`.

pub use lumines_core as core;
pub use lumines_input as input;
pub use lumines_types as types;
