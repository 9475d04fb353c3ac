//! Headless capture-the-flag match
//!
//! Runs one match to completion (or up to `--ticks`) and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ctf_simulation::{
    create_match_app, load_config, log_info, set_log_level, LogLevel, MatchConfig, MatchState, Scenario, Team,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    /// 4v4, zones on each flank
    Default,
    /// Split `--agents` between the teams
    AgentCount,
    /// Zones in opposite corners
    CornerZones,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevelArg {
    Debug,
    Info,
    #[value(alias = "warn")]
    Warning,
    Error,
}

impl From<LogLevelArg> for LogLevel {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Warning => LogLevel::Warning,
            LogLevelArg::Error => LogLevel::Error,
        }
    }
}

#[derive(Parser)]
#[command(name = "ctf_simulation")]
#[command(about = "Headless capture-the-flag match", long_about = None)]
struct Cli {
    /// JSON match config (defaults for anything missing)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "default")]
    scenario: ScenarioArg,

    /// Total agents for the agent-count scenario
    #[arg(long, default_value_t = 8)]
    agents: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks even if the match clock has time left
    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevelArg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    set_log_level(cli.log_level.into());

    let mut config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => MatchConfig::default(),
    };
    let scenario = match cli.scenario {
        ScenarioArg::Default => Scenario::Default,
        ScenarioArg::AgentCount => Scenario::AgentCount(cli.agents),
        ScenarioArg::CornerZones => Scenario::CornerZones,
    };
    scenario.apply(&mut config);
    config.validate().context("scenario produced an invalid config")?;

    let tick_limit = cli.ticks.unwrap_or(u64::MAX);
    println!(
        "Starting capture-the-flag match (seed: {}, scenario: {:?}, {} ms)",
        cli.seed, cli.scenario, config.match_duration_ms
    );

    let mut app = create_match_app(config, cli.seed);
    let mut ticks = 0u64;
    while ticks < tick_limit {
        app.update();
        ticks += 1;

        let state = app.world().resource::<MatchState>();
        if ticks % 300 == 0 {
            log_info(&format!(
                "tick {}: blue {} - red {} ({} ms left)",
                state.tick,
                state.score(Team::Blue),
                state.score(Team::Red),
                state.remaining_ms
            ));
        }
        if !state.is_running() {
            break;
        }
    }

    let state = app.world().resource::<MatchState>();
    let result = state.outcome.map_or("unfinished", |outcome| outcome.as_str());
    println!(
        "Match {} after {} ticks: blue {} - red {}",
        result,
        state.tick,
        state.score(Team::Blue),
        state.score(Team::Red)
    );

    Ok(())
}
