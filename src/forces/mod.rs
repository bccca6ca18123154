use crate::world::{BodyId, BodySet};

pub mod collision;
pub mod drag;
pub mod friction;
pub mod gravity;
pub mod spring;

pub use collision::{
    create_breaking_collision, create_collision, create_collision_with_hook,
    create_destructive_collision, create_physics_collision, create_physics_collision_with_hook,
    Collision, CollisionResponse,
};
pub use drag::{create_drag, Drag};
pub use friction::{create_friction, KineticFriction};
pub use gravity::{create_newtonian_gravity, NewtonianGravity};
pub use spring::{create_spring, Spring};

/// Something that contributes forces or impulses to a fixed set of bodies once per tick.
pub trait ForceCreator {
    /// Accumulates forces/impulses on the bound bodies.
    ///
    /// Only called while every body in [`ForceCreator::bodies`] is in the set and
    /// has force application enabled.
    fn apply(&mut self, bodies: &mut BodySet);

    /// Bodies this creator reads or writes. The scene prunes the creator as soon
    /// as any of them is removed. An empty list means the creator is never pruned.
    fn bodies(&self) -> &[BodyId];
}

/// A force creator backed by a closure.
pub struct FnForce<F> {
    bodies: Vec<BodyId>,
    apply: F,
}

impl<F> FnForce<F>
where
    F: FnMut(&mut BodySet, &[BodyId]),
{
    pub fn new(bodies: Vec<BodyId>, apply: F) -> Self {
        Self { bodies, apply }
    }
}

impl<F> ForceCreator for FnForce<F>
where
    F: FnMut(&mut BodySet, &[BodyId]),
{
    fn apply(&mut self, bodies: &mut BodySet) {
        (self.apply)(bodies, &self.bodies);
    }

    fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}
