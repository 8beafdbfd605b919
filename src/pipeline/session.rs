//! Tick-driven training session
//!
//! Each tick the environment reports its state, the agent picks a heading,
//! the environment applies it, and every reward-carrying event of the tick
//! becomes one value-table update for the pre-transition (state, action).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::{Environment, Observer, StepEvent},
    q_learning::QLearningAgent,
};

/// How collisions bootstrap their update.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TerminalMode {
    /// Bootstrap from the pre-collision state itself
    #[default]
    SelfBootstrap,
    /// Treat the collision as an absorbing state worth 0
    Absorbing,
}

impl fmt::Display for TerminalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalMode::SelfBootstrap => write!(f, "self-bootstrap"),
            TerminalMode::Absorbing => write!(f, "absorbing"),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of ticks to run
    pub max_ticks: usize,
    /// Stop early after this many completed episodes
    pub max_episodes: Option<usize>,
    /// Reward for reaching the food
    pub food_reward: f64,
    /// Reward for hitting a wall or the body
    pub collision_penalty: f64,
    /// Reward for a tick with no events; zero means no update on such ticks
    pub step_reward: f64,
    pub terminal_mode: TerminalMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_ticks: 10_000,
            max_episodes: None,
            food_reward: 10.0,
            collision_penalty: -100.0,
            step_reward: 0.0,
            terminal_mode: TerminalMode::default(),
        }
    }
}

impl SessionConfig {
    fn reward_for(&self, event: StepEvent) -> f64 {
        match event {
            StepEvent::AteFood => self.food_reward,
            StepEvent::HitWall | StepEvent::HitSelf => self.collision_penalty,
        }
    }
}

/// Result of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Ticks executed
    pub ticks: usize,
    /// Completed episodes (collisions)
    pub episodes: usize,
    /// Food eaten across all episodes
    pub food_eaten: usize,
    /// Value-table updates applied
    pub updates: usize,
    /// Best episode score seen by the environment
    pub high_score: u32,
    /// Value-table entries at the end of the session
    pub table_size: usize,
}

/// Drives one agent against one environment
pub struct TrainingSession {
    config: SessionConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run until `max_ticks` or `max_episodes` is reached.
    ///
    /// The agent is not saved; the caller decides when to persist.
    pub fn run<E: Environment + ?Sized>(
        &mut self,
        agent: &mut QLearningAgent,
        env: &mut E,
    ) -> Result<SessionResult> {
        let mut result = SessionResult::default();

        for observer in &mut self.observers {
            observer.on_session_start(self.config.max_ticks)?;
        }

        for tick in 0..self.config.max_ticks {
            if self
                .config
                .max_episodes
                .is_some_and(|limit| result.episodes >= limit)
            {
                break;
            }

            let state = env.current_state();
            let action_index = agent.choose_action(&state);
            let heading = agent.action(action_index)?;

            for observer in &mut self.observers {
                observer.on_tick(tick, &state, heading)?;
            }

            let transition = env.step(heading);
            result.ticks += 1;

            if transition.events.is_empty() && self.config.step_reward != 0.0 {
                agent.update(
                    &state,
                    action_index,
                    self.config.step_reward,
                    &transition.next_state,
                )?;
                result.updates += 1;
            }

            for &event in &transition.events {
                let reward = self.config.reward_for(event);
                let new_value = if event.is_terminal()
                    && self.config.terminal_mode == TerminalMode::Absorbing
                {
                    agent.update_terminal(&state, action_index, reward)?
                } else {
                    // food and self-bootstrapped collisions reuse the pre-transition state
                    agent.update(&state, action_index, reward, &state)?
                };
                result.updates += 1;

                for observer in &mut self.observers {
                    observer.on_update(tick, event, reward, new_value)?;
                }

                if event == StepEvent::AteFood {
                    result.food_eaten += 1;
                }
                if event.is_terminal() {
                    for observer in &mut self.observers {
                        observer.on_episode_end(result.episodes, transition.score)?;
                    }
                    result.episodes += 1;
                    debug!(
                        tick,
                        episode = result.episodes,
                        score = transition.score,
                        "Episode finished"
                    );
                }
            }
        }

        for observer in &mut self.observers {
            observer.on_session_end()?;
        }

        result.high_score = env.high_score();
        result.table_size = agent.q_table().len();
        info!(
            ticks = result.ticks,
            episodes = result.episodes,
            food = result.food_eaten,
            high_score = result.high_score,
            table_size = result.table_size,
            "Session finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        app::AgentConfig,
        ports::Transition,
        types::{Heading, State},
    };

    /// Every `period`-th step is a wall hit; the state never changes.
    struct ScriptedEnv {
        steps: usize,
        period: usize,
    }

    impl Environment for ScriptedEnv {
        fn current_state(&self) -> State {
            State::new(0, 0)
        }

        fn step(&mut self, _heading: Heading) -> Transition {
            self.steps += 1;
            let events = if self.steps % self.period == 0 {
                vec![StepEvent::HitWall]
            } else {
                Vec::new()
            };
            Transition {
                events,
                next_state: State::new(0, 0),
                score: 0,
            }
        }
    }

    fn greedy_agent() -> QLearningAgent {
        QLearningAgent::new(
            AgentConfig::default().with_epsilon(0.0),
            Arc::new(InMemoryRepository::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_quiet_ticks_do_not_update() {
        let mut agent = greedy_agent();
        let mut env = ScriptedEnv {
            steps: 0,
            period: 1000,
        };
        let result = TrainingSession::new(SessionConfig {
            max_ticks: 10,
            ..SessionConfig::default()
        })
        .run(&mut agent, &mut env)
        .unwrap();

        assert_eq!(result.ticks, 10);
        assert_eq!(result.updates, 0);
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_step_reward_updates_every_quiet_tick() {
        let mut agent = greedy_agent();
        let mut env = ScriptedEnv {
            steps: 0,
            period: 1000,
        };
        let result = TrainingSession::new(SessionConfig {
            max_ticks: 5,
            step_reward: -1.0,
            ..SessionConfig::default()
        })
        .run(&mut agent, &mut env)
        .unwrap();

        assert_eq!(result.updates, 5);
    }

    #[test]
    fn test_collisions_self_bootstrap() {
        let mut agent = greedy_agent();
        let mut env = ScriptedEnv { steps: 0, period: 1 };
        let result = TrainingSession::new(SessionConfig {
            max_ticks: 1,
            ..SessionConfig::default()
        })
        .run(&mut agent, &mut env)
        .unwrap();

        assert_eq!(result.episodes, 1);
        // 0 + 0.1 * (-100 + 0.9 * 0 - 0)
        let value = agent.value(&State::new(0, 0), Heading::Up);
        assert!((value - -10.0).abs() < 1e-12);
    }

    #[test]
    fn test_absorbing_and_self_bootstrap_diverge() {
        let state = State::new(0, 0);
        let run = |mode: TerminalMode| {
            let mut agent = greedy_agent();
            // Down already looks good in the start state
            agent.update(&state, 1, 50.0, &state).unwrap();
            let mut env = ScriptedEnv { steps: 0, period: 1 };
            TrainingSession::new(SessionConfig {
                max_ticks: 1,
                terminal_mode: mode,
                ..SessionConfig::default()
            })
            .run(&mut agent, &mut env)
            .unwrap();
            agent.value(&state, Heading::Down)
        };

        // Q(Down) = 5.0 before the collision
        let bootstrapped = run(TerminalMode::SelfBootstrap);
        let absorbed = run(TerminalMode::Absorbing);
        assert!((bootstrapped - (5.0 + 0.1 * (-100.0 + 0.9 * 5.0 - 5.0))).abs() < 1e-12);
        assert!((absorbed - (5.0 + 0.1 * (-100.0 - 5.0))).abs() < 1e-12);
    }

    #[test]
    fn test_max_episodes_stops_early() {
        let mut agent = greedy_agent();
        let mut env = ScriptedEnv { steps: 0, period: 2 };
        let result = TrainingSession::new(SessionConfig {
            max_ticks: 100,
            max_episodes: Some(3),
            ..SessionConfig::default()
        })
        .run(&mut agent, &mut env)
        .unwrap();

        assert_eq!(result.episodes, 3);
        assert_eq!(result.ticks, 6);
    }
}
