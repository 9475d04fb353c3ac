//! Perception: what the brain sees this tick

use bevy::prelude::*;

use crate::ai::Perception;
use crate::components::Agent;

use super::{enemy_indices, PeerSnapshot, TickContext};

/// Grows while the agent stays within `stuck.radius` of the field center,
/// resets as soon as it leaves.
pub fn update_middle_dwell(agent: &mut Agent, ctx: &TickContext) {
    let center = ctx.field.center();
    if agent.position.distance(center) <= ctx.config.stuck.radius {
        agent.middle_dwell_ms += ctx.dt_ms;
    } else {
        agent.middle_dwell_ms = 0;
    }
}

/// Nearest opponent in the snapshot: `(index, distance)`.
pub fn nearest_enemy(agent: &Agent, snapshot: &[PeerSnapshot]) -> Option<(usize, f32)> {
    enemy_indices(snapshot, agent.team)
        .map(|index| (index, agent.position.distance(snapshot[index].position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

pub fn perceive(
    agents: &[&mut Agent],
    me: usize,
    snapshot: &[PeerSnapshot],
    ctx: &TickContext,
) -> Perception {
    let agent = &*agents[me];
    let position: Vec2 = agent.position;

    let enemy_flag = ctx.flags.get(agent.team.opponent());
    let own_flag = ctx.flags.get(agent.team);

    // A carried flag always sits on its single carrier, so matching
    // `carried_by` to an opponent id is the same test as matching the flag
    // position to an opponent position.
    let enemy_has_flag = own_flag.carried_by.is_some_and(|carrier| {
        snapshot
            .iter()
            .any(|peer| peer.id == carrier && peer.team != agent.team)
    });

    let distance_to_nearest_enemy = nearest_enemy(agent, snapshot)
        .map(|(_, distance)| distance)
        .unwrap_or(f32::INFINITY);

    Perception {
        has_flag: agent.carrying_flag,
        in_home_zone: ctx.config.home_zone(agent.team).contains(position),
        distance_to_enemy_flag: position.distance(enemy_flag.rest_position),
        is_tagged: agent.tagged,
        enemy_has_flag,
        distance_to_nearest_enemy,
        is_tagging: agent.tagging,
        is_stuck_in_middle: agent.middle_dwell_ms > ctx.config.stuck.duration_ms,
        is_on_own_side: ctx.field.is_on_home_side(agent.team, position),
    }
}
