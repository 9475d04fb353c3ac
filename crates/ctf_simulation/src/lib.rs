//! Capture-the-flag simulation core
//!
//! Headless Bevy 0.16 ECS. Two teams of agents on a grid field: A* routing
//! around other agents, a rule-based brain per agent, tagging under side and
//! cooldown rules, scoring through a single `MatchState`.
//!
//! Rendering is not part of this crate. Presentation reads `Agent`
//! components and `MatchEffect` events.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod components;
pub mod config;
pub mod controller;
pub mod flag;
pub mod logger;
pub mod match_loop;
pub mod navigation;

pub use ai::{apply_grab_override, Brain, Decision, Intent, Perception};
pub use components::*;
pub use config::{load_config, ConfigError, MatchConfig, Scenario, TeamOrder};
pub use flag::{Flag, FlagRegistry};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use match_loop::{MatchEffect, MatchLoopPlugin, MatchOutcome, MatchPhase, MatchState};
pub use navigation::GridPathfinder;

/// Main simulation plugin: match resources + match loop systems
pub struct CtfSimulationPlugin {
    pub config: MatchConfig,
}

impl Plugin for CtfSimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        app.insert_resource(config.field_geometry())
            .insert_resource(FlagRegistry::from_config(&config))
            .insert_resource(GridPathfinder::from_config(&config))
            .insert_resource(MatchState::new(config.match_duration_ms))
            .insert_resource(config)
            .add_plugins(MatchLoopPlugin);
    }
}

/// Deterministic RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal headless Bevy App (no match yet)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Headless App running one match. Each `app.update()` is one tick.
pub fn create_match_app(config: MatchConfig, seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(CtfSimulationPlugin { config });
    app
}

/// Byte snapshot of every agent, ordered by id, for determinism checks.
pub fn agent_snapshot(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<&Agent>();
    let mut agents: Vec<&Agent> = query.iter(world).collect();
    agents.sort_by_key(|agent| agent.id);

    let mut snapshot = Vec::new();
    for agent in agents {
        snapshot.extend_from_slice(&agent.id.0.to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", agent).as_bytes());
    }
    snapshot
}
