// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab benchmark.
//!
//! Enumerates all the boards for each preflop hand class against an opponent
//! hand and prints the time it took.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use std::{path::PathBuf, thread, time::Duration};

use equilab_core::{
    CancelToken, Config, Hand, HandClass, HoldemEvaluator, Partition, Report, Ruleset, run,
};

#[derive(Debug, Parser)]
struct Cli {
    /// The ACPC game definition file.
    #[clap(long, short, default_value = "games/holdem.nolimit.2p.reverse_blinds.game")]
    game: PathBuf,
    /// The opponent hole cards.
    #[clap(long, short, default_value = "QdTd")]
    opponent: Hand,
    /// Comma separated hand classes to enumerate (e.g. AA,AKs,T9o), all if empty.
    #[clap(long, value_delimiter = ',')]
    classes: Vec<HandClass>,
    /// Number of worker threads, 0 uses all cores.
    #[clap(long, short, default_value_t = 1)]
    threads: usize,
    /// How the work is split between threads.
    #[clap(long, value_enum, default_value_t = PartitionArg::Classes)]
    partition: PartitionArg,
    /// Keep every board result in memory.
    #[clap(long)]
    retain: bool,
    /// Stop dispatching work after this many seconds.
    #[clap(long)]
    deadline: Option<f64>,
    /// Print wins, losses, and ties counters.
    #[clap(long, short)]
    stats: bool,
    /// Print the counters for each hand class.
    #[clap(long)]
    per_class: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PartitionArg {
    /// Each thread enumerates whole hand classes.
    Classes,
    /// Threads split the boards of each hand class.
    Boards,
}

impl From<PartitionArg> for Partition {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::Classes => Partition::Classes,
            PartitionArg::Boards => Partition::Boards,
        }
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let ruleset = Ruleset::load(&cli.game).context("Cannot load game definition")?;
    info!(
        "Loaded {:?} game with {} rounds from {}",
        ruleset.betting(),
        ruleset.num_rounds(),
        cli.game.display()
    );

    let mut config = Config::new(ruleset, cli.opponent);
    if !cli.classes.is_empty() {
        config.classes = cli.classes;
    }

    config.threads = match cli.threads {
        0 => thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    };
    config.partition = cli.partition.into();
    config.retain = cli.retain;

    let cancel = match cli.deadline {
        Some(secs) if !(secs.is_finite() && secs > 0.0) => {
            bail!("Invalid deadline {secs}, must be a positive number of seconds")
        }
        Some(secs) => CancelToken::with_deadline(Duration::from_secs_f64(secs)),
        None => CancelToken::new(),
    };

    let report = run(&config, &HoldemEvaluator, &cancel)?;

    println!("Calc took: {:.10}", report.elapsed.as_secs_f64());

    if cli.stats {
        print_stats(&report);
    }

    if cli.per_class {
        print_classes(&report);
    }

    Ok(())
}

fn print_stats(report: &Report) {
    let t = &report.totals;
    println!("Wins:        {:>12}", t.wins);
    println!("Losses:      {:>12}", t.losses);
    println!("Ties:        {:>12}", t.ties);
    println!("Comparisons: {:>12}", t.comparisons);
    println!("Equity:      {:>12.6}", t.equity());

    if let Some(results) = &report.results {
        println!("Retained:    {:>12}", results.len());
    }

    if !report.skipped.is_empty() {
        let skipped = report
            .skipped
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        println!("Skipped:     {}", skipped.join(","));
    }

    if report.cancelled {
        println!("Cancelled after {} classes", report.classes.len());
    }
}

fn print_classes(report: &Report) {
    println!(
        "{:<6} {:>10} {:>10} {:>10} {:>8}",
        "Class", "Wins", "Losses", "Ties", "Equity"
    );

    for c in &report.classes {
        println!(
            "{:<6} {:>10} {:>10} {:>10} {:>8.4}",
            c.class.to_string(),
            c.totals.wins,
            c.totals.losses,
            c.totals.ties,
            c.totals.equity()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let cli = Cli::try_parse_from([
            "equilab",
            "--opponent",
            "9h8h",
            "--classes",
            "AA,AKs,T9o",
            "--threads",
            "4",
            "--partition",
            "boards",
            "--retain",
        ])
        .unwrap();

        assert_eq!(cli.opponent, "8h9h".parse::<Hand>().unwrap());
        let labels = cli.classes.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["AA", "AKs", "T9o"]);
        assert_eq!(cli.threads, 4);
        assert!(matches!(cli.partition, PartitionArg::Boards));
        assert!(cli.retain);
        assert!(cli.deadline.is_none());
    }

    #[test]
    fn default_args() {
        let cli = Cli::try_parse_from(["equilab"]).unwrap();
        assert_eq!(cli.opponent, "QdTd".parse::<Hand>().unwrap());
        assert!(cli.classes.is_empty());
        assert_eq!(cli.threads, 1);
        assert!(matches!(cli.partition, PartitionArg::Classes));
    }

    #[test]
    fn bad_args() {
        assert!(Cli::try_parse_from(["equilab", "--opponent", "QdQd"]).is_err());
        assert!(Cli::try_parse_from(["equilab", "--classes", "AAx"]).is_err());
        assert!(Cli::try_parse_from(["equilab", "--partition", "rows"]).is_err());
    }
}
