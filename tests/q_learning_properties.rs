//! Behavioural properties of the value table, policy and learner.

use std::sync::Arc;

use snake_q::{
    AgentConfig, Heading, QLearningAgent, QTable, State, adapters::InMemoryRepository,
};

fn agent(config: AgentConfig) -> QLearningAgent {
    QLearningAgent::new(config, Arc::new(InMemoryRepository::new())).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn unseen_pairs_read_as_zero() {
    let mut table = QTable::new();
    table.set(State::new(20, 40), Heading::Left, 3.5);

    for state in [State::new(0, 0), State::new(-280, 280), State::new(20, 40)] {
        for action in Heading::ALL {
            if state == State::new(20, 40) && action == Heading::Left {
                continue;
            }
            assert_eq!(table.get(&state, action), 0.0);
        }
    }
    // reads never create entries
    assert_eq!(table.len(), 1);
}

#[test]
fn fresh_greedy_agent_picks_first_action() {
    let mut agent = agent(AgentConfig::default().with_epsilon(0.0));
    assert_eq!(agent.choose_action(&State::new(0, 0)), 0);
    assert_eq!(agent.action(0).unwrap(), Heading::Up);
}

#[test]
fn first_update_from_empty_table() {
    let mut agent = agent(AgentConfig::default().with_epsilon(0.0));
    let origin = State::new(0, 0);

    let value = agent.update(&origin, 0, 10.0, &origin).unwrap();
    assert_close(value, 1.0);
    assert_close(agent.value(&origin, Heading::Up), 1.0);
}

#[test]
fn repeated_update_bootstraps_from_itself() {
    let mut agent = agent(AgentConfig::default().with_epsilon(0.0));
    let origin = State::new(0, 0);

    agent.update(&origin, 0, 10.0, &origin).unwrap();
    let value = agent.update(&origin, 0, 10.0, &origin).unwrap();
    assert_close(value, 1.99);
}

#[test]
fn update_matches_formula_across_parameters() {
    let cases = [
        (0.1, 0.9, 10.0, 0.0, 0.0),
        (0.5, 0.0, -100.0, 3.0, 7.0),
        (1.0, 1.0, 2.5, -4.0, 6.0),
        (0.25, 0.5, 0.0, 8.0, -2.0),
    ];
    let state = State::new(40, -20);
    let next_state = State::new(60, -20);

    for (alpha, gamma, reward, current, next_best) in cases {
        let mut agent = agent(
            AgentConfig::default()
                .with_learning_rate(alpha)
                .with_discount_factor(gamma)
                .with_epsilon(0.0),
        );
        seed_value(&mut agent, &state, 2, current, alpha);
        seed_value(&mut agent, &next_state, 1, next_best, alpha);
        assert_close(agent.value(&state, Heading::Left), current);

        let next_max = agent.q_table().max_value(&next_state, agent.actions());
        let value = agent.update(&state, 2, reward, &next_state).unwrap();
        assert_close(
            value,
            current + alpha * (reward + gamma * next_max - current),
        );
    }
}

/// Drive Q(state, index) to `target` with a terminal update.
fn seed_value(agent: &mut QLearningAgent, state: &State, index: usize, target: f64, alpha: f64) {
    // Q' = Q + alpha * (r - Q) with Q = 0 gives alpha * r
    agent.update_terminal(state, index, target / alpha).unwrap();
}

#[test]
fn zero_epsilon_always_exploits() {
    let mut agent = agent(AgentConfig::default().with_epsilon(0.0).with_seed(3));
    let state = State::new(100, 100);
    agent.update_terminal(&state, 2, 5.0).unwrap();
    agent.update_terminal(&state, 3, 1.0).unwrap();

    for _ in 0..500 {
        assert_eq!(agent.choose_action(&state), 2);
    }
}

#[test]
fn full_epsilon_is_roughly_uniform() {
    let mut agent = agent(AgentConfig::default().with_epsilon(1.0).with_seed(42));
    let state = State::new(0, 0);
    // a strong preference must not matter when every choice explores
    agent.update_terminal(&state, 1, 100.0).unwrap();

    let trials = 10_000;
    let mut counts = [0usize; 4];
    for _ in 0..trials {
        counts[agent.choose_action(&state)] += 1;
    }

    for (index, &count) in counts.iter().enumerate() {
        assert!(
            (2_000..=3_000).contains(&count),
            "action {index} chosen {count} times out of {trials}"
        );
    }
}

#[test]
fn custom_action_order_drives_tie_break() {
    let mut agent = agent(
        AgentConfig::default()
            .with_epsilon(0.0)
            .with_actions(vec![Heading::Right, Heading::Up]),
    );
    let index = agent.choose_action(&State::new(0, 0));
    assert_eq!(index, 0);
    assert_eq!(agent.action(index).unwrap(), Heading::Right);
    assert!(agent.action(2).is_err());
}
