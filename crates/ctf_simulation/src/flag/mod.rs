//! Flags: one per team, carried by at most one enemy agent

use bevy::prelude::*;

use crate::components::{AgentId, Team};
use crate::config::MatchConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    pub team: Team,
    pub rest_position: Vec2,
    /// Carrier's position while carried, else `rest_position`
    pub position: Vec2,
    pub carried_by: Option<AgentId>,
}

impl Flag {
    pub fn new(team: Team, rest_position: Vec2) -> Self {
        Self {
            team,
            rest_position,
            position: rest_position,
            carried_by: None,
        }
    }

    pub fn is_carried(&self) -> bool {
        self.carried_by.is_some()
    }

    pub fn pick_up(&mut self, carrier: AgentId, at: Vec2) {
        self.carried_by = Some(carrier);
        self.position = at;
    }

    pub fn restore(&mut self) {
        self.carried_by = None;
        self.position = self.rest_position;
    }
}

/// Both flags of the match
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlagRegistry {
    blue: Flag,
    red: Flag,
}

impl FlagRegistry {
    pub fn new(blue_rest: Vec2, red_rest: Vec2) -> Self {
        Self {
            blue: Flag::new(Team::Blue, blue_rest),
            red: Flag::new(Team::Red, red_rest),
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(
            config.flag_rest_position(Team::Blue),
            config.flag_rest_position(Team::Red),
        )
    }

    pub fn get(&self, team: Team) -> &Flag {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut Flag {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        [&self.blue, &self.red].into_iter()
    }
}
