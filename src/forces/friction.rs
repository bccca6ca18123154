use log::trace;

use super::ForceCreator;
use crate::math::vec2::Vec2;
use crate::world::{BodyId, BodySet, Scene};

/// Kinetic friction against a surface.
///
/// Above `threshold` speed the body feels `mu_g * mass` against its velocity;
/// below it the velocity is snapped to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticFriction {
    pub mu_g: f64,
    pub threshold: f64,
    bodies: [BodyId; 1],
}

impl KineticFriction {
    pub fn new(mu_g: f64, threshold: f64, body: BodyId) -> Self {
        Self {
            mu_g,
            threshold,
            bodies: [body],
        }
    }
}

impl ForceCreator for KineticFriction {
    fn apply(&mut self, bodies: &mut BodySet) {
        let id = self.bodies[0];
        let body = &mut bodies[id];
        let velocity = body.velocity();

        if velocity.magnitude() < self.threshold {
            if velocity != Vec2::ZERO {
                trace!("friction stopped {:?}", id);
            }
            body.set_velocity(Vec2::ZERO);
        } else {
            let force = -velocity.normalize() * (self.mu_g * body.mass());
            body.add_force(force);
        }
    }

    fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}

/// Registers friction on `body`, using the scene's `friction_threshold`.
pub fn create_friction(scene: &mut Scene, mu_g: f64, body: BodyId) {
    let threshold = scene.config().friction_threshold;
    scene.add_boxed_force_creator(Box::new(KineticFriction::new(mu_g, threshold, body)));
}
