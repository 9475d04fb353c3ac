//! Agent components: Team, AgentId, Agent

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{Brain, Intent};
use crate::components::NavPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }
}

/// Stable agent identity (assigned at spawn, never reused during a match)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

/// Control state: Free → Carrying → Free, any → Tagged → Free
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Free,
    Carrying,
    Tagged,
}

/// What the presentation layer should draw for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    #[default]
    Normal,
    Tagged,
    Carrying,
}

impl From<AgentStatus> for VisualState {
    fn from(status: AgentStatus) -> Self {
        match status {
            AgentStatus::Free => VisualState::Normal,
            AgentStatus::Carrying => VisualState::Carrying,
            AgentStatus::Tagged => VisualState::Tagged,
        }
    }
}

/// One capture-the-flag agent
///
/// Plain data + brain latch. Behaviour lives in `crate::controller`; the
/// presentation layer reads this component (and `MatchEffect` events) each
/// frame instead of the agent being a drawable item itself.
///
/// Invariants:
/// - `tagged` ⇒ `!carrying_flag`
/// - `carrying_flag` refers to the opponent's flag
#[derive(Component, Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub team: Team,
    pub position: Vec2,
    pub base_position: Vec2,
    /// Units per second
    pub speed: f32,
    pub carrying_flag: bool,
    pub tagged: bool,
    pub tagging: bool,
    /// Match time (ms) of this agent's last successful tag
    pub last_tag_ms: Option<u64>,
    /// Continuous time spent near the field center
    pub middle_dwell_ms: u64,
    pub path: NavPath,
    pub explore_target: Option<IVec2>,
    pub brain: Brain,
    pub last_intent: Option<Intent>,
    pub visual: VisualState,
    /// Cleared at match end
    pub active: bool,
}

impl Agent {
    pub fn new(id: AgentId, team: Team, position: Vec2, base_position: Vec2, speed: f32) -> Self {
        Self {
            id,
            team,
            position,
            base_position,
            speed,
            carrying_flag: false,
            tagged: false,
            tagging: false,
            last_tag_ms: None,
            middle_dwell_ms: 0,
            path: NavPath::default(),
            explore_target: None,
            brain: Brain::default(),
            last_intent: None,
            visual: VisualState::Normal,
            active: true,
        }
    }

    pub fn status(&self) -> AgentStatus {
        if self.tagged {
            AgentStatus::Tagged
        } else if self.carrying_flag {
            AgentStatus::Carrying
        } else {
            AgentStatus::Free
        }
    }

    pub fn cooldown_elapsed(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        self.last_tag_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= cooldown_ms)
    }
}
