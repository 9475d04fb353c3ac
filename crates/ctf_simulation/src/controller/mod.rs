//! Agent controller: one agent, one tick
//!
//! The match loop sweeps an arena of `&mut Agent` in tick order and calls
//! `update_agent` for each index. Positions of others come from the snapshot
//! taken at tick start; their tagged/carrying flags are read live, so an
//! agent updated later sees what earlier agents did this tick. Peer
//! mutation (tagging) goes through `pair_mut` split borrows.
//!
//! Per tick, in order:
//! 1. middle-dwell clock
//! 2. passive tag check
//! 3. perception
//! 4. decide + GrabFlag override
//! 5. dispatch on intent (movement, tagging, capture)
//! 6. flag pickup
//! 7. home arrival (tag cleared / capture)
//! 8. carried flag follows the carrier, visual state published on change

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::{apply_grab_override, Intent};
use crate::components::{Agent, AgentId, FieldGeometry, Team, VisualState};
use crate::config::MatchConfig;
use crate::flag::FlagRegistry;
use crate::logger;
use crate::match_loop::{MatchEffect, MatchState};
use crate::navigation::GridPathfinder;

pub mod flags;
pub mod movement;
pub mod perception;
pub mod tagging;


pub use flags::{complete_capture, resolve_home_arrival, sync_carried_flag, try_pickup};
pub use movement::{advance_along_path, explore, flee, navigate_to};
pub use perception::{perceive, update_middle_dwell};
pub use tagging::{apply_tag, can_tag, defend, passive_tag_check, pursue_and_tag};

/// Position of one agent at tick start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerSnapshot {
    pub id: AgentId,
    pub team: Team,
    pub position: Vec2,
}

impl PeerSnapshot {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            team: agent.team,
            position: agent.position,
        }
    }
}

/// Everything an agent update may read or mutate besides the agent table
pub struct TickContext<'a> {
    pub config: &'a MatchConfig,
    pub field: &'a FieldGeometry,
    pub pathfinder: &'a GridPathfinder,
    pub flags: &'a mut FlagRegistry,
    pub scoreboard: &'a mut MatchState,
    pub rng: &'a mut ChaCha8Rng,
    /// Match time of this tick
    pub now_ms: u64,
    pub dt_ms: u64,
    pub effects: &'a mut Vec<MatchEffect>,
}

/// Runs one tick for `agents[me]`. `snapshot[i]` describes `agents[i]`.
pub fn update_agent(
    agents: &mut [&mut Agent],
    me: usize,
    snapshot: &[PeerSnapshot],
    ctx: &mut TickContext,
) {
    if !agents[me].active {
        return;
    }

    update_middle_dwell(&mut *agents[me], ctx);
    passive_tag_check(agents, me, snapshot, ctx);

    let perception = perceive(agents, me, snapshot, ctx);
    let decision = agents[me].brain.decide(&perception, &ctx.config.policy);
    let intent = apply_grab_override(decision.intent, &perception, &ctx.config.policy);

    if agents[me].last_intent != Some(intent) {
        logger::log(&format!(
            "agent {} ({}): {}",
            agents[me].id.0,
            agents[me].team.as_str(),
            intent.as_str()
        ));
        agents[me].last_intent = Some(intent);
    }
    if intent != Intent::TagEnemy {
        agents[me].tagging = false;
    }

    match intent {
        Intent::Explore => explore(agents, me, snapshot, ctx),
        Intent::GrabFlag => {
            let target = ctx.flags.get(agents[me].team.opponent()).rest_position;
            navigate_to(agents, me, snapshot, ctx, target);
        }
        Intent::CaptureFlag => complete_capture(&mut *agents[me], ctx, decision.capture_scored),
        Intent::ReturnToHomeZone | Intent::RecoverFlag => {
            let target = agents[me].base_position;
            navigate_to(agents, me, snapshot, ctx, target);
        }
        Intent::TagEnemy => pursue_and_tag(agents, me, snapshot, ctx),
        Intent::AvoidEnemy => flee(agents, me, snapshot, ctx),
        Intent::DefendFlag => defend(agents, me, snapshot, ctx),
    }
    if intent != Intent::Explore {
        agents[me].explore_target = None;
    }

    try_pickup(&mut *agents[me], ctx);
    resolve_home_arrival(&mut *agents[me], ctx);
    sync_carried_flag(&*agents[me], ctx);
    refresh_visual(&mut *agents[me], ctx.effects);
}

/// Publishes the agent's visual state if it changed since last published.
pub fn refresh_visual(agent: &mut Agent, effects: &mut Vec<MatchEffect>) {
    let state = VisualState::from(agent.status());
    if state != agent.visual {
        agent.visual = state;
        effects.push(MatchEffect::AgentVisualChanged {
            agent: agent.id,
            state,
        });
    }
}

/// Two distinct agents of the arena, mutably.
pub fn pair_mut<'a>(agents: &'a mut [&mut Agent], a: usize, b: usize) -> (&'a mut Agent, &'a mut Agent) {
    debug_assert_ne!(a, b, "pair_mut needs two distinct agents");
    if a < b {
        let (low, high) = agents.split_at_mut(b);
        (&mut *low[a], &mut *high[0])
    } else {
        let (low, high) = agents.split_at_mut(a);
        (&mut *high[0], &mut *low[b])
    }
}

/// Indices of `snapshot` belonging to `team`'s opponents.
pub(crate) fn enemy_indices(snapshot: &[PeerSnapshot], team: Team) -> impl Iterator<Item = usize> + '_ {
    snapshot
        .iter()
        .enumerate()
        .filter(move |(_, peer)| peer.team != team)
        .map(|(index, _)| index)
}
