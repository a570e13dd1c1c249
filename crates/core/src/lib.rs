//! Core module - pure game logic with no UI or I/O dependencies
//!
//! Owns the stacking/scoring engine, colour progression, the session state
//! machine, tower persistence and the camera target planner. Rendering,
//! input polling and real storage sit behind the traits in `store`,
//! `factory` and `camera`.

pub mod camera;
pub mod color;
pub mod events;
pub mod factory;
pub mod persist;
pub mod rng;
pub mod session;
pub mod store;
pub mod tower;

pub use camera::{CameraTargetPlanner, FrustumProbe};
pub use color::ColorProgression;
pub use events::GameEvent;
pub use factory::{BlockHandle, NullFactory, PieceFactory, TrashHandle};
pub use persist::PersistError;
pub use rng::SimpleRng;
pub use session::{GameSession, ProcessGuard, SessionError};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tower::{Block, CubeStack, DropOutcome, FallingBlock, TrashPiece};
