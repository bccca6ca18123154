//! A small 2D rigid-body core: convex polygon bodies, a scene that steps them,
//! and a library of force creators (gravity, springs, drag, friction and
//! separating-axis collision responses).

pub mod collision;
pub mod common;
pub mod config;
pub mod error;
pub mod forces;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{find_collision, CollisionInfo};
pub use common::Color;
pub use config::SimulationConfig;
pub use error::{PhysicsError, Result};
pub use forces::{CollisionResponse, ForceCreator};
pub use math::vec2::Vec2;
pub use objects::{Body, BodyInfo};
pub use shapes::Polygon;
pub use world::{BodyId, BodySet, Scene};
