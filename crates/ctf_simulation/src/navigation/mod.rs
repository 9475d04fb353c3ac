//! Grid navigation

pub mod pathfinder;


pub use pathfinder::GridPathfinder;
