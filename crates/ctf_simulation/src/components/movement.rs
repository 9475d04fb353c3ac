//! Navigation path held by each agent

use bevy::prelude::*;

/// Grid path being followed
///
/// `waypoints` excludes the cell the path was planned from and ends at
/// `goal`. An exhausted path means "no active navigation": the next movement
/// request plans a fresh one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavPath {
    pub waypoints: Vec<IVec2>,
    pub cursor: usize,
    pub goal: Option<IVec2>,
}

impl NavPath {
    pub fn new(goal: IVec2, waypoints: Vec<IVec2>) -> Self {
        Self {
            waypoints,
            cursor: 0,
            goal: Some(goal),
        }
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = 0;
        self.goal = None;
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    pub fn next_waypoint(&self) -> Option<IVec2> {
        self.waypoints.get(self.cursor).copied()
    }

    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// True while the path still has steps left towards `goal`.
    pub fn leads_to(&self, goal: IVec2) -> bool {
        self.goal == Some(goal) && !self.is_exhausted()
    }

    pub fn remaining(&self) -> &[IVec2] {
        &self.waypoints[self.cursor.min(self.waypoints.len())..]
    }
}
