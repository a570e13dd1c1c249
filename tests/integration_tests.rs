//! Integration tests for a full game lifecycle through the facade crate.

use stack_tower::core::{
    persist, FrustumProbe, GameEvent, GameSession, KeyValueStore, MemoryStore, NullFactory,
};
use stack_tower::types::{GameConfig, GamePhase, Vec3, BUILD_JSON_KEY, TOP_SCORE_KEY};

struct OpenSky;

impl FrustumProbe for OpenSky {
    fn is_visible(&self, _point: Vec3) -> bool {
        true
    }
}

fn new_session() -> GameSession<MemoryStore, NullFactory> {
    GameSession::new(GameConfig::default(), MemoryStore::new(), NullFactory, 12345)
}

/// Ride the falling block back to the tower centre and drop it there.
fn perfect_drop(session: &mut GameSession<MemoryStore, NullFactory>) {
    let travel = GameConfig::default().oscillation_range / session.cube_speed();
    session.tick(travel, &OpenSky);
    assert!(session.drop_cube());
}

/// Park the falling block at the far end of its travel and drop it clear of
/// the tower.
fn missed_drop(session: &mut GameSession<MemoryStore, NullFactory>) {
    session.tick(1000.0, &OpenSky);
    assert!(session.drop_cube());
}

#[test]
fn test_game_lifecycle() {
    let mut session = new_session();
    assert_eq!(session.phase(), GamePhase::Menu);

    session.set_phase(GamePhase::Playing);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.stack().len(), 1);
    assert!(session.stack().falling().is_some());

    for expected in 1..=3 {
        perfect_drop(&mut session);
        assert_eq!(session.score(), expected);
    }

    missed_drop(&mut session);
    assert_eq!(session.phase(), GamePhase::Death);
    assert!(session.stack().falling().is_none());

    session.set_phase(GamePhase::Menu);
    assert_eq!(session.phase(), GamePhase::Menu);
}

#[test]
fn test_restart_resets_score_and_tower() {
    let mut session = new_session();
    session.set_phase(GamePhase::Playing);
    for _ in 0..4 {
        perfect_drop(&mut session);
    }
    missed_drop(&mut session);
    session.set_phase(GamePhase::Menu);

    session.set_phase(GamePhase::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.stack().len(), 1);
    assert_eq!(
        session.cube_speed(),
        GameConfig::default().initial_cube_speed
    );
}

#[test]
fn test_illegal_transitions_are_ignored() {
    let mut session = new_session();
    session.drain_events();

    assert!(!session.set_phase(GamePhase::Death));
    session.set_phase(GamePhase::Playing);
    assert!(!session.set_phase(GamePhase::Menu));
    assert!(!session.set_phase(GamePhase::Playing));
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn test_speed_levels_up_every_sixth_increment() {
    let mut session = new_session();
    session.set_phase(GamePhase::Playing);
    let initial = session.cube_speed();

    for _ in 0..5 {
        perfect_drop(&mut session);
    }
    assert_eq!(session.score(), 5);
    assert!((session.cube_speed() - initial * 1.03).abs() < 1e-6);
}

#[test]
fn test_top_score_persists_and_notifies() {
    let mut store = MemoryStore::new();
    store.set_int(TOP_SCORE_KEY, 9);
    let mut session = GameSession::new(GameConfig::default(), store, NullFactory, 7);
    session.set_phase(GamePhase::Playing);
    session.drain_events();

    for _ in 0..12 {
        perfect_drop(&mut session);
    }
    missed_drop(&mut session);

    assert!(session
        .drain_events()
        .contains(&GameEvent::TopScoreChanged(12)));
    assert_eq!(session.store().get_int(TOP_SCORE_KEY, 0), 12);
}

#[test]
fn test_tower_survives_session_restart() {
    let mut session = new_session();
    session.set_phase(GamePhase::Playing);
    for _ in 0..5 {
        perfect_drop(&mut session);
    }
    missed_drop(&mut session);
    let saved_len = session.stack().len();

    let json = session.store().get_string(BUILD_JSON_KEY, "");
    let mut store = MemoryStore::new();
    store.set_string(BUILD_JSON_KEY, &json);

    let revived = GameSession::new(GameConfig::default(), store, NullFactory, 1);
    assert_eq!(revived.phase(), GamePhase::Menu);
    assert_eq!(revived.stack().len(), saved_len);
}

#[test]
fn test_persisted_json_decodes_standalone() {
    let mut session = new_session();
    session.set_phase(GamePhase::Playing);
    for _ in 0..2 {
        perfect_drop(&mut session);
    }
    missed_drop(&mut session);

    let json = session.store().get_string(BUILD_JSON_KEY, "");
    let blocks = persist::decode(&json).expect("saved tower decodes");
    assert_eq!(blocks.len(), session.stack().len());
    for block in &blocks {
        assert!(block.scored.is_none());
    }

    // Wire format: array of {position, scale, color} with hex colour strings.
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert!(first["position"]["y"].is_number());
    assert!(first["scale"]["x"].is_number());
    let color = first["color"].as_str().unwrap();
    assert!(color.starts_with('#') && color.len() == 7);
}

#[test]
fn test_end_of_game_camera_framing() {
    let mut session = new_session();
    session.set_phase(GamePhase::Playing);
    for _ in 0..3 {
        perfect_drop(&mut session);
    }
    missed_drop(&mut session);

    let fov_before = session.camera().fov();
    session.tick(0.016, &OpenSky);
    assert_eq!(session.camera().fov(), fov_before + 10.0);

    // One-shot: further idle ticks leave the camera alone.
    session.tick(0.016, &OpenSky);
    assert_eq!(session.camera().fov(), fov_before + 10.0);
}
