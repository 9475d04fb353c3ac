//! Field geometry: halves, cells, zones

use bevy::prelude::*;

use crate::components::Team;

/// Playing field (integer cell grid, continuous agent positions)
///
/// Split at `width / 2`: Blue owns `x < mid`, Red owns `x >= mid`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FieldGeometry {
    pub width: i32,
    pub height: i32,
}

impl FieldGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn midpoint_x(&self) -> f32 {
        (self.width / 2) as f32
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    pub fn is_on_home_side(&self, team: Team, position: Vec2) -> bool {
        match team {
            Team::Blue => position.x < self.midpoint_x(),
            Team::Red => position.x >= self.midpoint_x(),
        }
    }

    pub fn contains_cell(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Nearest cell to a continuous position. Not clamped: callers that
    /// request paths to the result get an empty path when it is off-grid.
    pub fn cell_of(&self, position: Vec2) -> IVec2 {
        IVec2::new(position.x.round() as i32, position.y.round() as i32)
    }

    /// Nearest in-bounds cell to a continuous position.
    pub fn clamped_cell_of(&self, position: Vec2) -> IVec2 {
        let cell = self.cell_of(position);
        IVec2::new(
            cell.x.clamp(0, (self.width - 1).max(0)),
            cell.y.clamp(0, (self.height - 1).max(0)),
        )
    }

    pub fn clamp_position(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(0.0, (self.width - 1).max(0) as f32),
            position.y.clamp(0.0, (self.height - 1).max(0) as f32),
        )
    }
}

/// Circular home zone around a flag's rest position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub center: Vec2,
    pub radius: f32,
}

impl Zone {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, position: Vec2) -> bool {
        position.distance(self.center) <= self.radius
    }
}

pub fn cell_to_position(cell: IVec2) -> Vec2 {
    Vec2::new(cell.x as f32, cell.y as f32)
}
