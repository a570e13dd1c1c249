//! Headless demo runner (default binary).
//!
//! Plays one scripted game against the real session: oscillation timing is
//! drawn from the session RNG so placements degrade from near-perfect to a
//! miss, then the persisted tower and top score are reloaded to show the
//! save round trip.

use anyhow::Result;
use tracing::info;

use stack_tower::core::{FileStore, FrustumProbe, GameEvent, GameSession, NullFactory, SimpleRng};
use stack_tower::types::{GameConfig, GamePhase, Vec3};

/// The demo has no renderer, so the whole scene counts as visible.
struct OpenSky;

impl FrustumProbe for OpenSky {
    fn is_visible(&self, _point: Vec3) -> bool {
        true
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let save_path = std::env::temp_dir().join("stack-tower-save.json");
    info!(path = %save_path.display(), "using save file");

    let config = GameConfig::default();
    let store = FileStore::open(&save_path);
    let mut session = GameSession::new_exclusive(config.clone(), store, NullFactory, 0xC0FFEE)?;
    report(session.drain_events());

    session.set_phase(GamePhase::Playing);
    report(session.drain_events());

    // Drop timing wobbles more each round until the tower is missed.
    let mut rng = SimpleRng::new(42);
    let mut wobble = 0.02f32;
    while session.phase() == GamePhase::Playing {
        let travel = config.oscillation_range / session.cube_speed();
        let jitter = rng.next_range(2001) as f32 / 1000.0 - 1.0;
        session.tick(travel * (1.0 + wobble * jitter), &OpenSky);
        session.drop_cube();
        report(session.drain_events());
        wobble *= 1.6;
    }

    // Let the end-of-game camera framing settle.
    for _ in 0..3 {
        session.tick(0.016, &OpenSky);
    }
    info!(
        score = session.score(),
        top_score = session.top_score(),
        tower_blocks = session.stack().len(),
        camera_fov = session.camera().fov(),
        "game over"
    );

    // Reload: the tower and top score survive the session.
    drop(session);
    let store = FileStore::open(&save_path);
    let mut revived = GameSession::new_exclusive(config, store, NullFactory, 1)?;
    report(revived.drain_events());
    info!(rebuilt_blocks = revived.stack().len(), "tower rebuilt from save");

    Ok(())
}

fn report(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::PhaseChanged(phase) => info!(phase = phase.as_str(), "phase"),
            GameEvent::ScoreChanged(score) => info!(score, "score"),
            GameEvent::TopScoreChanged(top) => info!(top_score = top, "top score"),
        }
    }
}
