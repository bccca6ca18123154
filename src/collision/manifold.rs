use crate::math::vec2::Vec2;

/// Outcome of a separating-axis test between two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionInfo {
    /// Whether the shapes overlap.
    pub collided: bool,
    /// Unit axis of minimum overlap when `collided`, otherwise `Vec2::ZERO`.
    /// Its sign is not meaningful.
    pub axis: Vec2,
}

impl CollisionInfo {
    pub const NONE: CollisionInfo = CollisionInfo {
        collided: false,
        axis: Vec2::ZERO,
    };

    pub fn hit(axis: Vec2) -> Self {
        Self {
            collided: true,
            axis,
        }
    }
}
