//! File-backed snapshot persistence through the agent lifecycle.

use std::path::Path;

use snake_q::{
    AgentConfig, App, Heading, QLearningAgent, QTable, SnapshotFormat, State,
    adapters::{JsonRepository, MsgPackRepository},
    ports::SnapshotRepository,
};
use tempfile::tempdir;

fn config_at(path: &Path) -> AgentConfig {
    AgentConfig::default()
        .with_snapshot_path(path)
        .with_epsilon(0.0)
        .with_seed(7)
}

fn train_a_little(agent: &mut QLearningAgent) {
    let origin = State::new(0, 0);
    let right = State::new(20, 0);
    agent.update(&origin, 3, 10.0, &right).unwrap();
    agent.update(&right, 3, -100.0, &right).unwrap();
    agent.update(&origin, 0, 10.0, &origin).unwrap();
    agent.update_terminal(&State::new(-280, 140), 2, -100.0).unwrap();
}

#[test]
fn msgpack_snapshot_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("q_table.msgpack");
    let app = App::new();

    let mut agent = app.create_agent(config_at(&path)).unwrap();
    train_a_little(&mut agent);
    let trained = agent.q_table().clone();
    assert!(agent.close());
    assert!(path.is_file());

    let restored = app.create_agent(config_at(&path)).unwrap();
    assert_eq!(restored.q_table(), &trained);
}

#[test]
fn json_snapshot_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("q_table.json");
    let app = App::new();

    let mut agent = app.create_agent(config_at(&path)).unwrap();
    assert_eq!(agent.config().snapshot_format(), SnapshotFormat::Json);
    train_a_little(&mut agent);
    // repeated updates leave values with long decimal expansions
    for i in 0..400 {
        let state = State::new(20 * (i % 29) - 280, 20 * (i / 29) - 280);
        let origin = State::new(0, 0);
        agent.update(&origin, 0, 10.0, &origin).unwrap();
        agent.update(&state, i as usize % 4, -100.0 / 3.0, &origin).unwrap();
        agent.update(&state, 3 - i as usize % 4, 10.0, &state).unwrap();
    }
    let trained = agent.q_table().clone();
    assert!(agent.close());

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["entries"].as_array().unwrap().len(), trained.len());

    let restored = app.create_agent(config_at(&path)).unwrap();
    assert_eq!(restored.q_table(), &trained);
}

#[test]
fn missing_snapshot_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never_written.msgpack");

    let agent = App::new().create_agent(config_at(&path)).unwrap();
    assert!(agent.q_table().is_empty());
    assert!(!path.exists());
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let dir = tempdir().unwrap();
    for name in ["broken.msgpack", "broken.json"] {
        let path = dir.path().join(name);
        std::fs::write(&path, b"\x00not a snapshot{").unwrap();

        let mut agent = App::new().create_agent(config_at(&path)).unwrap();
        assert!(agent.q_table().is_empty(), "{name} should load empty");

        // the next save replaces the corrupt file with a valid one
        train_a_little(&mut agent);
        assert!(agent.save());
        let repaired = App::new().create_agent(config_at(&path)).unwrap();
        assert_eq!(repaired.q_table().len(), 4);
    }
}

#[test]
fn failed_save_keeps_table_in_memory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing_dir").join("q_table.msgpack");

    let mut agent = App::new().create_agent(config_at(&path)).unwrap();
    train_a_little(&mut agent);
    let before = agent.q_table().clone();

    assert!(!agent.save());
    assert_eq!(agent.q_table(), &before);
    assert!(!path.exists());

    // learning continues after the failure
    agent.update(&State::new(0, 0), 1, 10.0, &State::new(0, 0)).unwrap();
    assert_eq!(agent.q_table().len(), before.len() + 1);
}

#[test]
fn second_save_overwrites_first() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("q_table.msgpack");
    let app = App::new();

    let mut agent = app.create_agent(config_at(&path)).unwrap();
    train_a_little(&mut agent);
    assert!(agent.save());
    agent.update(&State::new(0, 0), 3, 10.0, &State::new(20, 0)).unwrap();
    agent.update(&State::new(500, 500), 1, 1.0, &State::new(0, 0)).unwrap();
    assert!(agent.save());
    assert!(agent.save());

    let restored = app.create_agent(config_at(&path)).unwrap();
    assert_eq!(restored.q_table(), agent.q_table());
}

#[test]
fn repositories_write_atomically_over_existing_files() {
    let dir = tempdir().unwrap();
    let mut table = QTable::new();
    table.set(State::new(1, 2), Heading::Down, -3.25);

    for (repo, name) in [
        (&MsgPackRepository as &dyn SnapshotRepository, "t.msgpack"),
        (&JsonRepository as &dyn SnapshotRepository, "t.json"),
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, b"old contents").unwrap();

        repo.save(&table.to_snapshot(), &path).unwrap();
        let loaded = QTable::from_snapshot(repo.load(&path).unwrap());
        assert_eq!(loaded, table);
    }

    // no temporary files left behind
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
