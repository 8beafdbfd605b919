//! Train command - Run the agent against the headless Snake game

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::{AgentConfig, App},
    cli::output::{format_number, print_kv, print_section},
    pipeline::{
        MetricsObserver, MetricsSummary, ProgressObserver, SessionConfig, SessionResult,
        SharedObserver, TerminalMode, TrainingSession,
    },
    q_learning::SnapshotFormat,
    snake::{SnakeConfig, SnakeGame},
    types::Heading,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    session: &'a SessionResult,
    metrics: &'a MetricsSummary,
    agent: &'a AgentConfig,
    terminal_mode: TerminalMode,
    snapshot_saved: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Train the agent on the Snake game", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// JSON file with agent settings; flags below override it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Learning rate α (0.0-1.0]
    #[arg(long, alias = "alpha")]
    pub learning_rate: Option<f64>,

    /// Discount factor γ [0.0-1.0]
    #[arg(long, alias = "gamma")]
    pub discount: Option<f64>,

    /// Exploration rate ε [0.0-1.0]
    #[arg(long, short = 'e')]
    pub epsilon: Option<f64>,

    /// Snapshot file the value table is loaded from and saved to
    #[arg(long, short = 's')]
    pub snapshot: Option<PathBuf>,

    /// Snapshot encoding (inferred from the file extension by default)
    #[arg(long, value_enum)]
    pub format: Option<SnapshotFormat>,

    /// Ordered action set, comma separated
    #[arg(long, value_enum, value_delimiter = ',')]
    pub actions: Option<Vec<Heading>>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, short = 't', default_value_t = 10_000)]
    pub ticks: usize,

    /// Stop after this many episodes
    #[arg(long)]
    pub episodes: Option<usize>,

    /// How collisions bootstrap their update
    #[arg(long, value_enum, default_value_t = TerminalMode::SelfBootstrap)]
    pub terminal_mode: TerminalMode,

    /// Reward for eating food
    #[arg(long, default_value_t = 10.0)]
    pub food_reward: f64,

    /// Reward for hitting a wall or the snake itself
    #[arg(long, default_value_t = -100.0)]
    pub collision_penalty: f64,

    /// Reward for uneventful ticks (0 disables those updates)
    #[arg(long, default_value_t = 0.0)]
    pub step_reward: f64,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, short = 'q', default_value_t = false)]
    pub quiet: bool,
}

impl TrainArgs {
    fn agent_config(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_json_file(path)
                .with_context(|| format!("Failed to read agent config {}", path.display()))?,
            None => AgentConfig::default(),
        };

        if let Some(rate) = self.learning_rate {
            config.learning_rate = rate;
        }
        if let Some(discount) = self.discount {
            config.discount_factor = discount;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(path) = &self.snapshot {
            config.snapshot_path = path.clone();
        }
        if let Some(format) = self.format {
            config.format = Some(format);
        }
        if let Some(actions) = &self.actions {
            config.actions = actions.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_ticks: self.ticks,
            max_episodes: self.episodes,
            food_reward: self.food_reward,
            collision_penalty: self.collision_penalty,
            step_reward: self.step_reward,
            terminal_mode: self.terminal_mode,
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.agent_config()?;
    let app = App::new();
    execute_with_app(&app, config, &args)
}

/// Run training with an explicit container (lets tests inject storage).
pub fn execute_with_app(app: &App, config: AgentConfig, args: &TrainArgs) -> Result<()> {
    let mut agent = app
        .create_agent(config)
        .context("Invalid agent configuration")?;

    let mut snake_config = SnakeConfig::default();
    if let Some(seed) = agent.config().seed {
        // keep food placement independent of the policy's random stream
        snake_config = snake_config.with_seed(seed.wrapping_add(1));
    }
    let mut game = SnakeGame::new(snake_config);

    let metrics = SharedObserver::new(MetricsObserver::new());
    let mut session = TrainingSession::new(args.session_config())
        .with_observer(Box::new(metrics.clone()));
    if !args.quiet {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }

    let outcome = session.run(&mut agent, &mut game);
    let agent_config = agent.config().clone();
    // persist whatever was learned, even if the session stopped on an error
    let saved = agent.close();
    let result = outcome.context("Training session failed")?;
    let summary = metrics.lock().summary();

    print_section("Training Results");
    print_kv("Ticks", &format_number(result.ticks));
    print_kv("Episodes", &format_number(result.episodes));
    print_kv("Food eaten", &format_number(result.food_eaten));
    print_kv("High score", &result.high_score.to_string());
    print_kv(
        "Mean score",
        &format!("{:.2}", summary.mean_episode_score),
    );
    print_kv("Table entries", &format_number(result.table_size));
    print_kv(
        "Snapshot",
        &format!(
            "{} ({})",
            agent_config.snapshot_path.display(),
            if saved { "saved" } else { "NOT saved" }
        ),
    );

    if let Some(path) = &args.summary {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        serde_json::to_writer_pretty(
            file,
            &TrainingSummaryFile {
                session: &result,
                metrics: &summary,
                agent: &agent_config,
                terminal_mode: args.terminal_mode,
                snapshot_saved: saved,
            },
        )
        .context("Failed to write summary")?;
        print_kv("Summary", &path.display().to_string());
    }

    Ok(())
}
