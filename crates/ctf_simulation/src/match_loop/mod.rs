//! Match loop: spawn, tick, end
//!
//! One `App::update` is one tick of `tick_interval_ms`. Systems are chained
//! so a tick always finishes before the end-of-match check reads the clock.

use bevy::prelude::*;

pub mod events;
pub mod state;
pub mod systems;

pub use events::MatchEffect;
pub use state::{MatchOutcome, MatchPhase, MatchState};
pub use systems::{check_match_end, leading_team, run_match_tick, run_tick, spawn_agents};

pub struct MatchLoopPlugin;

impl Plugin for MatchLoopPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MatchEffect>()
            .add_systems(Startup, spawn_agents)
            .add_systems(Update, (run_match_tick, check_match_end).chain());
    }
}
