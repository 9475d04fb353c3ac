//! Match loop systems

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Agent, AgentId, FieldGeometry, Team};
use crate::config::{MatchConfig, TeamOrder};
use crate::controller::{update_agent, PeerSnapshot, TickContext};
use crate::flag::FlagRegistry;
use crate::logger;
use crate::navigation::GridPathfinder;
use crate::DeterministicRng;

use super::{MatchEffect, MatchState};

/// Spawns every agent at a random point of its team's spawn region.
/// Ids are handed out blue first, then red.
pub fn spawn_agents(mut commands: Commands, config: Res<MatchConfig>, field: Res<FieldGeometry>, mut rng: ResMut<DeterministicRng>) {
    let mut next_id = 0u32;
    for team in [Team::Blue, Team::Red] {
        let setup = config.team(team);
        for _ in 0..setup.agents {
            let position = Vec2::new(
                rng.rng.gen_range(setup.spawn.x.0..setup.spawn.x.1),
                rng.rng.gen_range(setup.spawn.y.0..setup.spawn.y.1),
            );
            commands.spawn(Agent::new(
                AgentId(next_id),
                team,
                field.clamp_position(position),
                config.base_position(team),
                config.agent.movement_speed,
            ));
            next_id += 1;
        }
    }

    logger::log_info(&format!(
        "match setup: {} blue vs {} red on {}x{}",
        config.blue.agents, config.red.agents, config.field.width, config.field.height
    ));
}

/// Team that moves first on `tick` (1-based).
pub fn leading_team(order: TeamOrder, tick: u64) -> Team {
    match order {
        TeamOrder::BlueFirst => Team::Blue,
        TeamOrder::AlternateEachTick if tick % 2 == 1 => Team::Blue,
        TeamOrder::AlternateEachTick => Team::Red,
    }
}

/// Sorts the arena into tick order, snapshots positions and updates every
/// agent in turn.
pub fn run_tick(agents: &mut [&mut Agent], ctx: &mut TickContext, first: Team) {
    agents.sort_by_key(|agent| (agent.team != first, agent.id));
    let snapshot: Vec<PeerSnapshot> = agents.iter().map(|agent| PeerSnapshot::of(agent)).collect();

    for me in 0..agents.len() {
        update_agent(agents, me, &snapshot, ctx);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_match_tick(
    mut agents: Query<&mut Agent>,
    config: Res<MatchConfig>,
    field: Res<FieldGeometry>,
    pathfinder: Res<GridPathfinder>,
    mut flags: ResMut<FlagRegistry>,
    mut state: ResMut<MatchState>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<MatchEffect>,
) {
    if !state.is_running() {
        return;
    }

    state.advance_clock(config.tick_interval_ms);
    let first = leading_team(config.team_order, state.tick);
    let now_ms = state.elapsed_ms;

    let mut arena: Vec<&mut Agent> = agents.iter_mut().map(|agent| agent.into_inner()).collect();
    let mut queued = Vec::new();
    {
        let mut ctx = TickContext {
            config: &*config,
            field: &*field,
            pathfinder: &*pathfinder,
            flags: &mut *flags,
            scoreboard: &mut *state,
            rng: &mut rng.rng,
            now_ms,
            dt_ms: config.tick_interval_ms,
            effects: &mut queued,
        };
        run_tick(&mut arena, &mut ctx, first);
    }

    for effect in queued {
        effects.write(effect);
    }
}

/// Ends the match when the clock runs out: agents are deactivated and the
/// outcome is published.
pub fn check_match_end(mut state: ResMut<MatchState>, mut agents: Query<&mut Agent>, mut effects: EventWriter<MatchEffect>) {
    if !state.is_running() || state.remaining_ms > 0 {
        return;
    }

    let outcome = state.finish();
    for mut agent in agents.iter_mut() {
        agent.active = false;
        agent.tagging = false;
        agent.path.clear();
    }

    let blue_score = state.score(Team::Blue);
    let red_score = state.score(Team::Red);
    effects.write(MatchEffect::MatchEnded {
        outcome,
        blue_score,
        red_score,
    });
    logger::log_info(&format!(
        "match over after {} ticks: {} ({} - {})",
        state.tick,
        outcome.as_str(),
        blue_score,
        red_score
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_team() {
        assert_eq!(leading_team(TeamOrder::BlueFirst, 1), Team::Blue);
        assert_eq!(leading_team(TeamOrder::BlueFirst, 2), Team::Blue);
        assert_eq!(leading_team(TeamOrder::AlternateEachTick, 1), Team::Blue);
        assert_eq!(leading_team(TeamOrder::AlternateEachTick, 2), Team::Red);
    }

    #[test]
    fn test_tick_order_sorts_team_then_id() {
        let mut agents = vec![
            Agent::new(AgentId(5), Team::Red, Vec2::new(700.0, 10.0), Vec2::ZERO, 60.0),
            Agent::new(AgentId(2), Team::Blue, Vec2::new(10.0, 10.0), Vec2::ZERO, 60.0),
            Agent::new(AgentId(4), Team::Red, Vec2::new(710.0, 10.0), Vec2::ZERO, 60.0),
            Agent::new(AgentId(1), Team::Blue, Vec2::new(20.0, 10.0), Vec2::ZERO, 60.0),
        ];
        for agent in agents.iter_mut() {
            agent.active = false;
        }

        let config = MatchConfig::default();
        let field = config.field_geometry();
        let pathfinder = GridPathfinder::from_config(&config);
        let mut flags = FlagRegistry::from_config(&config);
        let mut scoreboard = MatchState::new(config.match_duration_ms);
        let mut rng = DeterministicRng::new(1);
        let mut queued = Vec::new();
        let mut ctx = TickContext {
            config: &config,
            field: &field,
            pathfinder: &pathfinder,
            flags: &mut flags,
            scoreboard: &mut scoreboard,
            rng: &mut rng.rng,
            now_ms: 33,
            dt_ms: 33,
            effects: &mut queued,
        };

        let mut arena: Vec<&mut Agent> = agents.iter_mut().collect();
        run_tick(&mut arena, &mut ctx, Team::Red);
        let order: Vec<u32> = arena.iter().map(|agent| agent.id.0).collect();
        assert_eq!(order, vec![4, 5, 1, 2]);

        run_tick(&mut arena, &mut ctx, Team::Blue);
        let order: Vec<u32> = arena.iter().map(|agent| agent.id.0).collect();
        assert_eq!(order, vec![1, 2, 4, 5]);
        assert!(queued.is_empty());
    }
}
