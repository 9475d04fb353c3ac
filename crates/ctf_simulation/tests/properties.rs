//! Property tests for the pathfinder and the decision policy

use bevy::prelude::*;
use ctf_simulation::config::PolicyConfig;
use ctf_simulation::*;
use proptest::prelude::*;

const WIDTH: i32 = 24;
const HEIGHT: i32 = 18;

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

fn cell() -> impl Strategy<Value = IVec2> {
    (0..WIDTH, 0..HEIGHT).prop_map(|(x, y)| IVec2::new(x, y))
}

fn path_cost(path: &[IVec2], enemies: &[IVec2], penalty: f32) -> f32 {
    path.iter()
        .map(|cell| if enemies.contains(cell) { 1.0 + penalty } else { 1.0 })
        .sum()
}

/// Horizontal leg first, then vertical
fn l_shaped(start: IVec2, goal: IVec2) -> Vec<IVec2> {
    let mut path = Vec::new();
    let mut at = start;
    while at.x != goal.x {
        at.x += (goal.x - at.x).signum();
        path.push(at);
    }
    while at.y != goal.y {
        at.y += (goal.y - at.y).signum();
        path.push(at);
    }
    path
}

fn perception() -> impl Strategy<Value = Perception> {
    (
        any::<[bool; 7]>(),
        0.0f32..800.0,
        prop_oneof![Just(f32::INFINITY), 0.0f32..800.0],
    )
        .prop_map(|(flags, flag_distance, enemy_distance)| Perception {
            has_flag: flags[0],
            in_home_zone: flags[1],
            distance_to_enemy_flag: flag_distance,
            is_tagged: flags[2],
            enemy_has_flag: flags[3],
            distance_to_nearest_enemy: enemy_distance,
            is_tagging: flags[4],
            is_stuck_in_middle: flags[5],
            is_on_own_side: flags[6],
        })
}

proptest! {
    /// Empty grid: shortest path, every step one closer to the goal
    #[test]
    fn prop_empty_grid_path_is_manhattan(start in cell(), goal in cell()) {
        let pathfinder = GridPathfinder::new(WIDTH, HEIGHT);
        let path = pathfinder.find_path(start, goal, &[], &[]);

        if start == goal {
            prop_assert!(path.is_empty());
        } else {
            prop_assert_eq!(path.len() as i32, manhattan(start, goal));
            prop_assert_eq!(path.last().copied(), Some(goal));
            let mut remaining = manhattan(start, goal);
            for step in &path {
                prop_assert_eq!(manhattan(*step, goal), remaining - 1);
                remaining -= 1;
            }
        }
    }

    /// Enemies never make a reachable goal unreachable, and the route is
    /// never worse than the plain L-shaped one
    #[test]
    fn prop_enemies_discourage_but_never_block(
        start in cell(),
        goal in cell(),
        enemies in prop::collection::vec(cell(), 0..60),
    ) {
        prop_assume!(start != goal);
        let pathfinder = GridPathfinder::new(WIDTH, HEIGHT);
        let path = pathfinder.find_path(start, goal, &enemies, &[]);

        prop_assert!(!path.is_empty());
        prop_assert_eq!(path.last().copied(), Some(goal));
        prop_assert!(!path.contains(&start));

        let mut previous = start;
        for step in &path {
            prop_assert!(pathfinder.in_bounds(*step));
            prop_assert_eq!(manhattan(previous, *step), 1);
            previous = *step;
        }

        let found = path_cost(&path, &enemies, pathfinder.enemy_penalty);
        let baseline = path_cost(&l_shaped(start, goal), &enemies, pathfinder.enemy_penalty);
        prop_assert!(found <= baseline + 1e-3);
    }

    /// Tagged agents always head home; untagged carriers in the zone capture
    #[test]
    fn prop_policy_top_rules(perception in perception()) {
        let policy = PolicyConfig::default();
        let mut brain = Brain::default();
        let decision = brain.decide(&perception, &policy);

        if perception.is_tagged {
            prop_assert_eq!(decision.intent, Intent::ReturnToHomeZone);
            prop_assert!(!brain.capture_counted);
        } else if perception.has_flag && perception.in_home_zone {
            prop_assert_eq!(decision.intent, Intent::CaptureFlag);
            prop_assert!(decision.capture_scored);
        } else {
            prop_assert!(!decision.capture_scored);
        }

        // Only the home-zone capture can score
        let again = brain.decide(&perception, &policy);
        prop_assert!(!again.capture_scored);
    }

    /// The override never touches carriers or tagged agents
    #[test]
    fn prop_override_leaves_carriers_alone(perception in perception()) {
        let policy = PolicyConfig::default();
        let intent = Brain::default().decide(&perception, &policy).intent;
        let overridden = apply_grab_override(intent, &perception, &policy);

        if perception.has_flag || perception.is_tagged {
            prop_assert_eq!(overridden, intent);
        } else {
            prop_assert!(overridden == intent || overridden == Intent::GrabFlag);
        }
    }
}
