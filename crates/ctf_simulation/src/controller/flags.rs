//! Flag pickup, capture and carry

use crate::components::Agent;
use crate::logger;
use crate::match_loop::MatchEffect;

use super::TickContext;

/// Picks up the enemy flag when within `capture_radius` of its rest position.
/// Rejected while anyone already carries it.
pub fn try_pickup(agent: &mut Agent, ctx: &mut TickContext) {
    if agent.tagged || agent.carrying_flag {
        return;
    }

    let team = agent.team.opponent();
    let flag = ctx.flags.get_mut(team);
    if agent.position.distance(flag.rest_position) > ctx.config.agent.capture_radius {
        return;
    }
    if let Some(carrier) = flag.carried_by {
        logger::log(&format!(
            "agent {}: pickup rejected, {} flag already carried by agent {}",
            agent.id.0,
            team.as_str(),
            carrier.0
        ));
        return;
    }

    flag.pick_up(agent.id, agent.position);
    agent.carrying_flag = true;
    agent.path.clear();
    agent.explore_target = None;
    agent.brain.rearm();

    ctx.effects.push(MatchEffect::FlagPickedUp {
        agent: agent.id,
        team,
    });
    ctx.effects.push(MatchEffect::FlagVisibilityChanged { team, visible: false });
    logger::log_info(&format!(
        "{} agent {} picked up the {} flag",
        agent.team.as_str(),
        agent.id.0,
        team.as_str()
    ));
}

/// Drops the carried flag back at rest; counts a point when `score` is set.
pub fn complete_capture(agent: &mut Agent, ctx: &mut TickContext, score: bool) {
    if !agent.carrying_flag {
        return;
    }

    agent.carrying_flag = false;
    agent.path.clear();

    let team = agent.team.opponent();
    let flag = ctx.flags.get_mut(team);
    flag.restore();
    ctx.effects.push(MatchEffect::FlagMoved {
        team,
        position: flag.rest_position,
    });
    ctx.effects.push(MatchEffect::FlagVisibilityChanged { team, visible: true });

    if score {
        let total = ctx.scoreboard.increment_score(agent.team);
        ctx.effects.push(MatchEffect::ScoreIncremented {
            team: agent.team,
            score: total,
        });
        logger::log_info(&format!(
            "{} agent {} captured the {} flag ({} total)",
            agent.team.as_str(),
            agent.id.0,
            team.as_str(),
            total
        ));
    }
}

/// Own zone or base reached: a tag is lifted, a carried flag is captured.
pub fn resolve_home_arrival(agent: &mut Agent, ctx: &mut TickContext) {
    let at_zone = ctx.config.home_zone(agent.team).contains(agent.position);
    let at_base = agent.position.distance(agent.base_position) <= ctx.config.agent.arrival_tolerance;
    if !at_zone && !at_base {
        return;
    }

    if agent.tagged {
        agent.tagged = false;
        agent.path.clear();
        logger::log(&format!("agent {}: back home, tag cleared", agent.id.0));
    } else if agent.carrying_flag {
        let score = agent.brain.claim_capture();
        complete_capture(agent, ctx, score);
    }
}

/// Keeps a carried flag on its carrier.
pub fn sync_carried_flag(agent: &Agent, ctx: &mut TickContext) {
    if !agent.carrying_flag {
        return;
    }

    let team = agent.team.opponent();
    let flag = ctx.flags.get_mut(team);
    if flag.position != agent.position {
        flag.position = agent.position;
        ctx.effects.push(MatchEffect::FlagMoved {
            team,
            position: agent.position,
        });
    }
}
