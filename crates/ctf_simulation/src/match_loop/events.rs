//! Match effects: what the presentation layer observes
//!
//! Queued during the agent sweep and written as Bevy events afterwards.

use bevy::prelude::*;

use crate::components::{AgentId, Team, VisualState};
use crate::match_loop::MatchOutcome;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum MatchEffect {
    /// Published only when the state actually changes
    AgentVisualChanged { agent: AgentId, state: VisualState },

    /// Flag `team` shown at rest (true) or hidden while carried (false)
    FlagVisibilityChanged { team: Team, visible: bool },

    FlagMoved { team: Team, position: Vec2 },

    /// `score` is the team's new total
    ScoreIncremented { team: Team, score: u32 },

    /// `team` is the flag's owner, not the carrier's team
    FlagPickedUp { agent: AgentId, team: Team },

    AgentTagged {
        tagger: AgentId,
        target: AgentId,
        dropped_flag: bool,
    },

    MatchEnded {
        outcome: MatchOutcome,
        blue_score: u32,
        red_score: u32,
    },
}
