//! Tests for the training session driving the Snake game

use std::sync::Arc;

use snake_q::{
    AgentConfig, QLearningAgent,
    adapters::InMemoryRepository,
    pipeline::{MetricsObserver, SessionConfig, SharedObserver, TerminalMode, TrainingSession},
    ports::Environment,
    snake::{SnakeConfig, SnakeGame},
};

fn agent(seed: u64, repo: &InMemoryRepository) -> QLearningAgent {
    QLearningAgent::new(
        AgentConfig::default().with_seed(seed),
        Arc::new(repo.clone()),
    )
    .unwrap()
}

fn game(seed: u64) -> SnakeGame {
    SnakeGame::new(SnakeConfig::default().with_seed(seed))
}

#[test]
fn test_session_runs_requested_ticks() {
    let repo = InMemoryRepository::new();
    let mut agent = agent(1, &repo);
    let mut game = game(2);

    let result = TrainingSession::new(SessionConfig {
        max_ticks: 500,
        ..SessionConfig::default()
    })
    .run(&mut agent, &mut game)
    .unwrap();

    assert_eq!(result.ticks, 500);
    assert_eq!(result.episodes, game.episodes());
    assert!(result.episodes > 0, "a random-ish snake should crash in 500 ticks");
    assert_eq!(result.updates, result.episodes + result.food_eaten);
    assert_eq!(result.table_size, agent.q_table().len());
    // the session never persists on its own
    assert_eq!(repo.write_count(), 0);
}

#[test]
fn test_session_is_reproducible_with_seeds() {
    let run = || {
        let repo = InMemoryRepository::new();
        let mut agent = agent(9, &repo);
        let mut game = game(10);
        let result = TrainingSession::new(SessionConfig {
            max_ticks: 300,
            ..SessionConfig::default()
        })
        .run(&mut agent, &mut game)
        .unwrap();
        (result, agent.q_table().clone())
    };

    let (result_a, table_a) = run();
    let (result_b, table_b) = run();
    assert_eq!(result_a, result_b);
    assert_eq!(table_a, table_b);
}

#[test]
fn test_collisions_are_penalised() {
    let repo = InMemoryRepository::new();
    let mut agent = agent(3, &repo);
    let mut game = game(4);

    let result = TrainingSession::new(SessionConfig {
        max_ticks: 1_000,
        max_episodes: Some(5),
        ..SessionConfig::default()
    })
    .run(&mut agent, &mut game)
    .unwrap();

    assert_eq!(result.episodes, 5);
    assert!(
        agent.q_table().iter().any(|(_, &value)| value < 0.0),
        "collisions should leave negative values behind"
    );
}

#[test]
fn test_metrics_observer_matches_result() {
    let repo = InMemoryRepository::new();
    let mut agent = agent(5, &repo);
    let mut game = game(6);
    let metrics = SharedObserver::new(MetricsObserver::new());

    let result = TrainingSession::new(SessionConfig {
        max_ticks: 400,
        terminal_mode: TerminalMode::Absorbing,
        ..SessionConfig::default()
    })
    .with_observer(Box::new(metrics.clone()))
    .run(&mut agent, &mut game)
    .unwrap();

    let summary = metrics.lock().summary();
    assert_eq!(summary.ticks, result.ticks);
    assert_eq!(summary.episodes, result.episodes);
    assert_eq!(summary.food_events, result.food_eaten);
    assert_eq!(summary.wall_hits + summary.self_hits, result.episodes);
    assert!(summary.best_episode_score <= game.high_score());
}

#[test]
fn test_training_resumes_from_snapshot() {
    let repo = InMemoryRepository::new();
    let config = SessionConfig {
        max_ticks: 200,
        ..SessionConfig::default()
    };

    let mut first = agent(11, &repo);
    TrainingSession::new(config.clone())
        .run(&mut first, &mut game(12))
        .unwrap();
    let after_first = first.q_table().len();
    assert!(first.close());

    let mut second = agent(13, &repo);
    assert_eq!(second.q_table().len(), after_first);
    TrainingSession::new(config)
        .run(&mut second, &mut game(14))
        .unwrap();
    assert!(second.q_table().len() >= after_first);
}
