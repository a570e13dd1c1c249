//! Stack tower game core (workspace facade crate).
//!
//! This package re-exports the `stack_tower::{core,types}` public API while
//! the implementation lives in dedicated crates under `crates/`.

pub use stack_tower_core as core;
pub use stack_tower_types as types;
