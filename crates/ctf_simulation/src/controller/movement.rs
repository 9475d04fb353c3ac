//! Path planning and kinematic stepping

use bevy::prelude::*;
use rand::Rng;

use crate::components::{cell_to_position, Agent, NavPath};

use super::perception::nearest_enemy;
use super::{PeerSnapshot, TickContext};

/// Opponent cells and teammate cells, excluding `me`.
fn occupancy(me: usize, snapshot: &[PeerSnapshot], ctx: &TickContext) -> (Vec<IVec2>, Vec<IVec2>) {
    let team = snapshot[me].team;
    let mut enemies = Vec::new();
    let mut peers = Vec::new();
    for (index, peer) in snapshot.iter().enumerate() {
        if index == me {
            continue;
        }
        let cell = ctx.field.clamped_cell_of(peer.position);
        if peer.team == team {
            peers.push(cell);
        } else {
            enemies.push(cell);
        }
    }
    (enemies, peers)
}

/// Plans towards `target` when there is no live path to it, then steps.
///
/// The target is not clamped: an off-grid target yields an empty path and
/// the agent holds position.
pub fn navigate_to(
    agents: &mut [&mut Agent],
    me: usize,
    snapshot: &[PeerSnapshot],
    ctx: &mut TickContext,
    target: Vec2,
) {
    let goal = ctx.field.cell_of(target);
    if !agents[me].path.leads_to(goal) {
        let start = ctx.field.clamped_cell_of(agents[me].position);
        let (enemies, peers) = occupancy(me, snapshot, ctx);
        let waypoints = ctx.pathfinder.find_path(start, goal, &enemies, &peers);
        agents[me].path = NavPath::new(goal, waypoints);
    }
    advance_along_path(&mut *agents[me], ctx.dt_ms);
}

/// Moves up to `speed * dt` along the waypoints, snapping onto each waypoint
/// reached. A completed path is cleared.
pub fn advance_along_path(agent: &mut Agent, dt_ms: u64) {
    if agent.path.is_exhausted() {
        return;
    }

    let mut budget = agent.speed * dt_ms as f32 / 1000.0;
    while budget > 0.0 {
        let Some(cell) = agent.path.next_waypoint() else {
            break;
        };
        let waypoint = cell_to_position(cell);
        let distance = agent.position.distance(waypoint);
        if distance <= budget {
            agent.position = waypoint;
            budget -= distance;
            agent.path.advance();
        } else {
            agent.position += (waypoint - agent.position) / distance * budget;
            budget = 0.0;
        }
    }

    if agent.path.is_exhausted() {
        agent.path.clear();
    }
}

/// Wanders to a random cell, keeping the target until the path to it ends.
pub fn explore(agents: &mut [&mut Agent], me: usize, snapshot: &[PeerSnapshot], ctx: &mut TickContext) {
    let current = agents[me]
        .explore_target
        .filter(|target| agents[me].path.leads_to(*target));

    let target = match current {
        Some(target) => target,
        None => {
            let target = IVec2::new(
                ctx.rng.gen_range(0..ctx.field.width),
                ctx.rng.gen_range(0..ctx.field.height),
            );
            agents[me].explore_target = Some(target);
            target
        }
    };

    navigate_to(agents, me, snapshot, ctx, cell_to_position(target));
}

/// Heads `flee_distance` straight away from the nearest enemy.
pub fn flee(agents: &mut [&mut Agent], me: usize, snapshot: &[PeerSnapshot], ctx: &mut TickContext) {
    let Some((enemy, _)) = nearest_enemy(&*agents[me], snapshot) else {
        return;
    };

    let position = agents[me].position;
    let away = (position - snapshot[enemy].position).normalize_or_zero();
    let direction = if away == Vec2::ZERO {
        (agents[me].base_position - position).normalize_or_zero()
    } else {
        away
    };
    let target = ctx
        .field
        .clamp_position(position + direction * ctx.config.agent.flee_distance);

    navigate_to(agents, me, snapshot, ctx, target);
}
