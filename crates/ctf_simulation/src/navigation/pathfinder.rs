//! A* over the field's integer cells
//!
//! 4-directional, unit step cost. Enemy-occupied destination cells add
//! `enemy_penalty`, peer-occupied ones `peer_penalty`: agents are soft
//! obstacles, never walls. The goal itself is never penalised, since every
//! route enters it once; an agent chasing an enemy plans onto that enemy's
//! cell. Manhattan distance stays admissible because every
//! step costs at least 1.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use bevy::prelude::*;

use crate::config::MatchConfig;

const NEIGHBOURS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Open-set entry. Min-heap on `f`, then `h`, then discovery order.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    h: i32,
    seq: u64,
    cell: IVec2,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for BinaryHeap (max-heap)
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Result of one A* run; `expanded` counts closed cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SearchOutcome {
    pub path: Vec<IVec2>,
    pub expanded: usize,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GridPathfinder {
    pub width: i32,
    pub height: i32,
    pub enemy_penalty: f32,
    pub peer_penalty: f32,
}

impl GridPathfinder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            enemy_penalty: 10.0,
            peer_penalty: 0.0,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            width: config.field.width,
            height: config.field.height,
            enemy_penalty: config.pathfinding.enemy_penalty,
            peer_penalty: config.pathfinding.peer_penalty,
        }
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Cells from (excluding) `start` to (including) `goal`.
    ///
    /// Empty when either end is off-grid, when `start == goal`, or when the
    /// goal cannot be reached. Callers treat empty as a stall.
    pub fn find_path(
        &self,
        start: IVec2,
        goal: IVec2,
        enemy_cells: &[IVec2],
        peer_cells: &[IVec2],
    ) -> Vec<IVec2> {
        self.search(start, goal, enemy_cells, peer_cells).path
    }

    pub(crate) fn search(
        &self,
        start: IVec2,
        goal: IVec2,
        enemy_cells: &[IVec2],
        peer_cells: &[IVec2],
    ) -> SearchOutcome {
        if start == goal || !self.in_bounds(start) || !self.in_bounds(goal) {
            return SearchOutcome::default();
        }

        let enemies: HashSet<IVec2> = enemy_cells.iter().copied().collect();
        let peers: HashSet<IVec2> = peer_cells.iter().copied().collect();

        let mut open = BinaryHeap::new();
        let mut closed: HashSet<IVec2> = HashSet::new();
        let mut best_g: HashMap<IVec2, f32> = HashMap::new();
        let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();
        let mut seq = 0u64;

        let start_h = manhattan(start, goal);
        best_g.insert(start, 0.0);
        open.push(OpenEntry {
            f: start_h as f32,
            h: start_h,
            seq,
            cell: start,
        });

        while let Some(current) = open.pop() {
            if current.cell == goal {
                return SearchOutcome {
                    path: reconstruct(&came_from, start, goal),
                    expanded: closed.len(),
                };
            }
            if !closed.insert(current.cell) {
                continue;
            }

            let g = best_g.get(&current.cell).copied().unwrap_or(f32::INFINITY);

            for offset in NEIGHBOURS {
                let next = current.cell + offset;
                if !self.in_bounds(next) || closed.contains(&next) {
                    continue;
                }

                let tentative = g + self.step_cost(next, goal, &enemies, &peers);
                let known = best_g.get(&next).copied().unwrap_or(f32::INFINITY);
                if tentative >= known {
                    continue;
                }

                best_g.insert(next, tentative);
                came_from.insert(next, current.cell);
                seq += 1;
                let h = manhattan(next, goal);
                open.push(OpenEntry {
                    f: tentative + h as f32,
                    h,
                    seq,
                    cell: next,
                });
            }
        }

        SearchOutcome {
            path: Vec::new(),
            expanded: closed.len(),
        }
    }

    /// The goal costs a plain step even when occupied.
    fn step_cost(&self, cell: IVec2, goal: IVec2, enemies: &HashSet<IVec2>, peers: &HashSet<IVec2>) -> f32 {
        if cell == goal {
            1.0
        } else if enemies.contains(&cell) {
            1.0 + self.enemy_penalty
        } else if peers.contains(&cell) {
            1.0 + self.peer_penalty
        } else {
            1.0
        }
    }
}

fn reconstruct(came_from: &HashMap<IVec2, IVec2>, start: IVec2, goal: IVec2) -> Vec<IVec2> {
    let mut path = vec![goal];
    let mut cell = goal;
    while let Some(&parent) = came_from.get(&cell) {
        if parent == start {
            break;
        }
        path.push(parent);
        cell = parent;
    }
    path.reverse();
    path
}
