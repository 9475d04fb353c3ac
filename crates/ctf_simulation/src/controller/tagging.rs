//! Tagging rules
//!
//! A tag is legal when the tagger stands on its own half and the target is an
//! intruder on that same half, both untagged and within `tag_range`. A tagger
//! must also be out of cooldown; the cooldown restarts on success only.

use bevy::prelude::*;

use crate::components::{Agent, FieldGeometry};
use crate::logger;
use crate::match_loop::MatchEffect;

use super::movement::navigate_to;
use super::{enemy_indices, pair_mut, refresh_visual, PeerSnapshot, TickContext};

pub fn can_tag(
    field: &FieldGeometry,
    tag_range: f32,
    tagger: &Agent,
    tagger_position: Vec2,
    target: &Agent,
    target_position: Vec2,
) -> bool {
    tagger.active
        && target.active
        && tagger.team != target.team
        && !tagger.tagged
        && !target.tagged
        && field.is_on_home_side(tagger.team, tagger_position)
        && field.is_on_home_side(tagger.team, target_position)
        && tagger_position.distance(target_position) <= tag_range
}

/// Tags `agents[target]`. Drops and restores any flag it carried.
pub fn apply_tag(agents: &mut [&mut Agent], tagger: usize, target: usize, ctx: &mut TickContext) {
    let now_ms = ctx.now_ms;
    let (tagger, target) = pair_mut(agents, tagger, target);

    target.tagged = true;
    target.tagging = false;
    target.path.clear();
    target.explore_target = None;

    let dropped_flag = target.carrying_flag;
    if dropped_flag {
        target.carrying_flag = false;
        let team = target.team.opponent();
        let flag = ctx.flags.get_mut(team);
        flag.restore();
        ctx.effects.push(MatchEffect::FlagMoved {
            team,
            position: flag.rest_position,
        });
        ctx.effects.push(MatchEffect::FlagVisibilityChanged { team, visible: true });
    }

    tagger.last_tag_ms = Some(now_ms);
    tagger.tagging = false;

    ctx.effects.push(MatchEffect::AgentTagged {
        tagger: tagger.id,
        target: target.id,
        dropped_flag,
    });
    refresh_visual(target, ctx.effects);

    logger::log_info(&format!(
        "{} agent {} tagged {} agent {}{}",
        tagger.team.as_str(),
        tagger.id.0,
        target.team.as_str(),
        target.id.0,
        if dropped_flag { " (flag returned)" } else { "" }
    ));
}

/// An intruder gets tagged by the nearest enemy able to tag it.
pub fn passive_tag_check(
    agents: &mut [&mut Agent],
    me: usize,
    snapshot: &[PeerSnapshot],
    ctx: &mut TickContext,
) {
    let team = agents[me].team;
    let position = agents[me].position;
    if agents[me].tagged || ctx.field.is_on_home_side(team, position) {
        return;
    }

    let tagger = enemy_indices(snapshot, team)
        .filter(|&index| {
            agents[index].cooldown_elapsed(ctx.now_ms, ctx.config.tagging.cooldown_ms)
                && can_tag(
                    ctx.field,
                    ctx.config.tagging.tag_range,
                    &*agents[index],
                    snapshot[index].position,
                    &*agents[me],
                    position,
                )
        })
        .min_by(|&a, &b| {
            let da = snapshot[a].position.distance(position);
            let db = snapshot[b].position.distance(position);
            da.total_cmp(&db)
        });

    if let Some(tagger) = tagger {
        apply_tag(agents, tagger, me, ctx);
    }
}

/// Nearest untagged intruder on `me`'s half.
fn nearest_intruder(agents: &[&mut Agent], me: usize, snapshot: &[PeerSnapshot], ctx: &TickContext) -> Option<usize> {
    let team = agents[me].team;
    let position = agents[me].position;
    enemy_indices(snapshot, team)
        .filter(|&index| {
            agents[index].active
                && !agents[index].tagged
                && ctx.field.is_on_home_side(team, snapshot[index].position)
        })
        .min_by(|&a, &b| {
            let da = snapshot[a].position.distance(position);
            let db = snapshot[b].position.distance(position);
            da.total_cmp(&db)
        })
}

fn try_tag(agents: &mut [&mut Agent], me: usize, target: usize, snapshot: &[PeerSnapshot], ctx: &mut TickContext) -> bool {
    let legal = can_tag(
        ctx.field,
        ctx.config.tagging.tag_range,
        &*agents[me],
        agents[me].position,
        &*agents[target],
        snapshot[target].position,
    );
    if legal {
        apply_tag(agents, me, target, ctx);
    }
    legal
}

/// Chases the nearest intruder and tags it once in range. Without a candidate,
/// off its own half, or during cooldown the agent heads for the enemy flag.
pub fn pursue_and_tag(
    agents: &mut [&mut Agent],
    me: usize,
    snapshot: &[PeerSnapshot],
    ctx: &mut TickContext,
) {
    let ready = agents[me].cooldown_elapsed(ctx.now_ms, ctx.config.tagging.cooldown_ms)
        && ctx.field.is_on_home_side(agents[me].team, agents[me].position);
    let target = if ready {
        nearest_intruder(agents, me, snapshot, ctx)
    } else {
        None
    };

    let Some(target) = target else {
        agents[me].tagging = false;
        let flag = ctx.flags.get(agents[me].team.opponent()).rest_position;
        navigate_to(agents, me, snapshot, ctx, flag);
        return;
    };

    if try_tag(agents, me, target, snapshot, ctx) {
        return;
    }

    agents[me].tagging = true;
    navigate_to(agents, me, snapshot, ctx, snapshot[target].position);
    try_tag(agents, me, target, snapshot, ctx);
}

/// Holds position; tags the nearest eligible intruder in range.
pub fn defend(agents: &mut [&mut Agent], me: usize, snapshot: &[PeerSnapshot], ctx: &mut TickContext) {
    agents[me].path.clear();
    if !agents[me].cooldown_elapsed(ctx.now_ms, ctx.config.tagging.cooldown_ms) {
        return;
    }

    let position = agents[me].position;
    let target = enemy_indices(snapshot, agents[me].team)
        .filter(|&index| {
            can_tag(
                ctx.field,
                ctx.config.tagging.tag_range,
                &*agents[me],
                position,
                &*agents[index],
                snapshot[index].position,
            )
        })
        .min_by(|&a, &b| {
            let da = snapshot[a].position.distance(position);
            let db = snapshot[b].position.distance(position);
            da.total_cmp(&db)
        });

    if let Some(target) = target {
        apply_tag(agents, me, target, ctx);
    }
}
