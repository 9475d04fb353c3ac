//! Match configuration
//!
//! Every gameplay constant is a tunable here (JSON via serde). Missing
//! sections fall back to the defaults of the classic 800×600 layout.
//! Scenario presets only rewrite agent counts and zone placement.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{FieldGeometry, Team, Zone};

mod scenario;

pub use scenario::Scenario;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamOrder {
    /// Blue agents then red agents, every tick
    #[default]
    BlueFirst,
    /// Swap which team moves first on every tick
    AlternateEachTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Rectangle agents are spawned in (uniformly, from the match RNG)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub x: (f32, f32),
    pub y: (f32, f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub agents: u32,
    /// Flag rest position = home zone center
    pub flag_position: (f32, f32),
    pub base_position: (f32, f32),
    pub spawn: SpawnRegion,
}

impl TeamConfig {
    pub fn blue_default() -> Self {
        Self {
            agents: 4,
            flag_position: (90.0, 300.0),
            base_position: (50.0, 280.0),
            spawn: SpawnRegion {
                x: (0.0, 100.0),
                y: (0.0, 500.0),
            },
        }
    }

    pub fn red_default() -> Self {
        Self {
            agents: 4,
            flag_position: (730.0, 300.0),
            base_position: (750.0, 280.0),
            spawn: SpawnRegion {
                x: (700.0, 800.0),
                y: (0.0, 500.0),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Units per second
    pub movement_speed: f32,
    /// Pickup distance to the enemy flag
    pub capture_radius: f32,
    /// Distance at which the base counts as reached
    pub arrival_tolerance: f32,
    /// How far an AvoidEnemy step aims away from the threat
    pub flee_distance: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            movement_speed: 60.0,
            capture_radius: 20.0,
            arrival_tolerance: 1.0,
            flee_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub grab_radius: f32,
    pub tag_avoidance_radius: f32,
    /// GrabFlag override fires when no enemy is closer than this
    pub grab_override_clearance: f32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            grab_radius: 250.0,
            tag_avoidance_radius: 200.0,
            grab_override_clearance: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    pub tag_range: f32,
    pub cooldown_ms: u64,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            tag_range: 200.0,
            cooldown_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StuckConfig {
    pub radius: f32,
    pub duration_ms: u64,
}

impl Default for StuckConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            duration_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    pub enemy_penalty: f32,
    pub peer_penalty: f32,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            enemy_penalty: 10.0,
            peer_penalty: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field: FieldConfig,
    pub blue: TeamConfig,
    pub red: TeamConfig,
    pub agent: AgentConfig,
    pub policy: PolicyConfig,
    pub tagging: TaggingConfig,
    pub zone_radius: f32,
    pub stuck: StuckConfig,
    pub pathfinding: PathfindingConfig,
    pub tick_interval_ms: u64,
    pub match_duration_ms: u64,
    pub team_order: TeamOrder,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            blue: TeamConfig::blue_default(),
            red: TeamConfig::red_default(),
            agent: AgentConfig::default(),
            policy: PolicyConfig::default(),
            tagging: TaggingConfig::default(),
            zone_radius: 40.0,
            stuck: StuckConfig::default(),
            pathfinding: PathfindingConfig::default(),
            tick_interval_ms: 33,
            match_duration_ms: 120_000,
            team_order: TeamOrder::BlueFirst,
        }
    }
}

impl MatchConfig {
    pub fn for_scenario(scenario: Scenario) -> Self {
        let mut config = Self::default();
        scenario.apply(&mut config);
        config
    }

    pub fn field_geometry(&self) -> FieldGeometry {
        FieldGeometry::new(self.field.width, self.field.height)
    }

    pub fn team(&self, team: Team) -> &TeamConfig {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut TeamConfig {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    pub fn flag_rest_position(&self, team: Team) -> Vec2 {
        let (x, y) = self.team(team).flag_position;
        Vec2::new(x, y)
    }

    pub fn base_position(&self, team: Team) -> Vec2 {
        let (x, y) = self.team(team).base_position;
        Vec2::new(x, y)
    }

    pub fn home_zone(&self, team: Team) -> Zone {
        Zone::new(self.flag_rest_position(team), self.zone_radius)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.width <= 0 || self.field.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "field must be non-empty, got {}x{}",
                self.field.width, self.field.height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.agent.movement_speed <= 0.0 {
            return Err(ConfigError::Invalid("movement_speed must be positive".into()));
        }

        let radii = [
            ("zone_radius", self.zone_radius),
            ("capture_radius", self.agent.capture_radius),
            ("arrival_tolerance", self.agent.arrival_tolerance),
            ("flee_distance", self.agent.flee_distance),
            ("grab_radius", self.policy.grab_radius),
            ("tag_avoidance_radius", self.policy.tag_avoidance_radius),
            ("grab_override_clearance", self.policy.grab_override_clearance),
            ("tag_range", self.tagging.tag_range),
            ("stuck.radius", self.stuck.radius),
            ("enemy_penalty", self.pathfinding.enemy_penalty),
            ("peer_penalty", self.pathfinding.peer_penalty),
        ];
        if let Some((name, value)) = radii.iter().find(|(_, value)| value.is_nan() || *value < 0.0) {
            return Err(ConfigError::Invalid(format!("{} must be >= 0, got {}", name, value)));
        }

        let field = self.field_geometry();
        for team in [Team::Blue, Team::Red] {
            let setup = self.team(team);
            for (what, position) in [
                ("flag_position", self.flag_rest_position(team)),
                ("base_position", self.base_position(team)),
            ] {
                if !field.contains_cell(field.cell_of(position)) {
                    return Err(ConfigError::Invalid(format!(
                        "{} {} {:?} is outside the field",
                        team.as_str(),
                        what,
                        (position.x, position.y)
                    )));
                }
            }
            if !field.is_on_home_side(team, self.flag_rest_position(team)) {
                return Err(ConfigError::Invalid(format!(
                    "{} flag must sit on its own half",
                    team.as_str()
                )));
            }
            let spawn = setup.spawn;
            if spawn.x.0 >= spawn.x.1 || spawn.y.0 >= spawn.y.1 {
                return Err(ConfigError::Invalid(format!(
                    "{} spawn region is empty",
                    team.as_str()
                )));
            }
        }

        Ok(())
    }
}

pub fn parse_config(json: &str) -> Result<MatchConfig, ConfigError> {
    let config: MatchConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<MatchConfig, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    parse_config(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_layout() {
        let config = MatchConfig::default();

        assert_eq!((config.field.width, config.field.height), (800, 600));
        assert_eq!(config.blue.agents, 4);
        assert_eq!(config.red.agents, 4);
        assert_eq!(config.policy.grab_radius, 250.0);
        assert_eq!(config.policy.tag_avoidance_radius, 200.0);
        assert_eq!(config.tagging.tag_range, 200.0);
        assert_eq!(config.tagging.cooldown_ms, 30_000);
        assert_eq!(config.zone_radius, 40.0);
        assert_eq!(config.stuck.radius, 100.0);
        assert_eq!(config.stuck.duration_ms, 5_000);
        assert_eq!(config.pathfinding.enemy_penalty, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = parse_config(r#"{ "zone_radius": 55.0, "tagging": { "cooldown_ms": 1000 } }"#)
            .expect("valid config");

        assert_eq!(config.zone_radius, 55.0);
        assert_eq!(config.tagging.cooldown_ms, 1000);
        assert_eq!(config.tagging.tag_range, 200.0);
        assert_eq!(config.field.width, 800);
    }

    #[test]
    fn test_team_order_spelling() {
        let config = parse_config(r#"{ "team_order": "alternate_each_tick" }"#).expect("valid config");
        assert_eq!(config.team_order, TeamOrder::AlternateEachTick);
    }

    #[test]
    fn test_rejects_flag_outside_field() {
        let mut config = MatchConfig::default();
        config.red.flag_position = (900.0, 300.0);

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_flag_on_enemy_half() {
        let mut config = MatchConfig::default();
        config.blue.flag_position = (600.0, 300.0);

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(parse_config("{ not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("/definitely/not/here/ctf.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
