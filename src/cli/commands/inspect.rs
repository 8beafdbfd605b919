//! Inspect command - Summarize a saved value table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, DEFAULT_SNAPSHOT_PATH},
    cli::output::{format_number, format_value, print_kv, print_section, print_subsection},
    q_learning::{QTable, SnapshotFormat},
};

#[derive(Parser, Debug)]
#[command(about = "Summarize a saved value table")]
pub struct InspectArgs {
    /// Snapshot file to read
    #[arg(default_value = DEFAULT_SNAPSHOT_PATH)]
    pub snapshot: PathBuf,

    /// Snapshot encoding (inferred from the file extension by default)
    #[arg(long, value_enum)]
    pub format: Option<SnapshotFormat>,

    /// Number of highest-valued entries to list
    #[arg(long, short = 'n', default_value_t = 10)]
    pub top: usize,
}

/// Aggregate figures over a value table
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub entries: usize,
    pub states: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl TableStats {
    pub fn from_table(table: &QTable) -> Self {
        let values: Vec<f64> = table.iter().map(|(_, &value)| value).collect();
        if values.is_empty() {
            return Self {
                entries: 0,
                states: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }

        let mut states: Vec<_> = table.iter().map(|(key, _)| key.state).collect();
        states.sort_unstable();
        states.dedup();

        Self {
            entries: values.len(),
            states: states.len(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: values.iter().sum::<f64>() / values.len() as f64,
        }
    }
}

pub fn execute(args: InspectArgs) -> Result<()> {
    execute_with_app(&App::new(), &args)
}

pub fn execute_with_app(app: &App, args: &InspectArgs) -> Result<()> {
    let format = args
        .format
        .unwrap_or_else(|| SnapshotFormat::from_path(&args.snapshot));
    let table = app
        .read_table(&args.snapshot, format)
        .with_context(|| format!("Failed to read snapshot {}", args.snapshot.display()))?;
    let stats = TableStats::from_table(&table);

    print_section(&format!("Value table: {}", args.snapshot.display()));
    print_kv("Entries", &format_number(stats.entries));
    print_kv("States", &format_number(stats.states));
    print_kv("Min value", &format_value(stats.min));
    print_kv("Max value", &format_value(stats.max));
    print_kv("Mean value", &format_value(stats.mean));

    if args.top > 0 && !table.is_empty() {
        let mut entries: Vec<_> = table.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

        print_subsection(&format!("Top {} entries", args.top.min(entries.len())));
        for (key, value) in entries.into_iter().take(args.top) {
            print_kv(
                &format!("{} {}", key.state, key.action),
                &format_value(*value),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Heading, State};

    #[test]
    fn test_stats_of_empty_table() {
        let stats = TableStats::from_table(&QTable::new());
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.states, 0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn test_stats_counts_distinct_states() {
        let mut table = QTable::new();
        table.set(State::new(0, 0), Heading::Up, 1.0);
        table.set(State::new(0, 0), Heading::Down, -3.0);
        table.set(State::new(20, 0), Heading::Up, 5.0);

        let stats = TableStats::from_table(&table);
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.states, 2);
        assert_eq!(stats.min, -3.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.mean - 1.0).abs() < 1e-12);
    }
}
