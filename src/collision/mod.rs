pub mod detection;
pub mod manifold;

// Re-export key types
pub use detection::find_collision;
pub use manifold::CollisionInfo;
