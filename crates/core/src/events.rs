//! Typed notifications published by the session, consumed by the
//! presentation layer. The session queues events as state changes and the
//! caller drains them once per tick, keeping the core free of any UI
//! knowledge.

use stack_tower_types::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    ScoreChanged(i32),
    TopScoreChanged(i32),
}
