use super::ForceCreator;
use crate::world::{BodyId, BodySet, Scene};

/// Quadratic drag: a force of magnitude `gamma * |v|^2` against the velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub gamma: f64,
    bodies: [BodyId; 1],
}

impl Drag {
    pub fn new(gamma: f64, body: BodyId) -> Self {
        Self {
            gamma,
            bodies: [body],
        }
    }
}

impl ForceCreator for Drag {
    fn apply(&mut self, bodies: &mut BodySet) {
        let body = &mut bodies[self.bodies[0]];
        let velocity = body.velocity();
        let force = -velocity.normalize() * (self.gamma * velocity.magnitude_squared());
        body.add_force(force);
    }

    fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}

pub fn create_drag(scene: &mut Scene, gamma: f64, body: BodyId) {
    scene.add_boxed_force_creator(Box::new(Drag::new(gamma, body)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;
    use crate::math::Vec2;
    use crate::objects::Body;
    use crate::shapes::rectangle;

    const EPSILON: f64 = 1e-9;

    fn moving_body(scene: &mut Scene, velocity: Vec2) -> BodyId {
        let id = scene.add_body(Body::new(rectangle(Vec2::ZERO, 1.0, 1.0), 1.0, Color::WHITE));
        scene.body_mut(id).set_velocity(velocity);
        id
    }

    #[test]
    fn test_drag_opposes_velocity_quadratically() {
        let mut scene = Scene::new();
        let slow = moving_body(&mut scene, Vec2::new(2.0, 0.0));
        let fast = moving_body(&mut scene, Vec2::new(4.0, 0.0));

        Drag::new(0.5, slow).apply(scene.bodies_mut());
        Drag::new(0.5, fast).apply(scene.bodies_mut());

        let slow_force = scene.body(slow).force();
        let fast_force = scene.body(fast).force();
        assert!(slow_force.x < 0.0);
        assert_eq!(slow_force.y, 0.0);
        assert!((slow_force.x + 2.0).abs() < EPSILON);
        // doubling speed quadruples drag
        assert!((fast_force.x - 4.0 * slow_force.x).abs() < EPSILON);
    }

    #[test]
    fn test_drag_at_rest_is_zero() {
        let mut scene = Scene::new();
        let id = moving_body(&mut scene, Vec2::ZERO);
        Drag::new(3.0, id).apply(scene.bodies_mut());
        assert_eq!(scene.body(id).force(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_slows_body_over_time() {
        let mut scene = Scene::new();
        let id = moving_body(&mut scene, Vec2::new(0.0, -10.0));
        create_drag(&mut scene, 0.1, id);
        for _ in 0..50 {
            scene.tick(0.01);
        }
        let speed = scene.body(id).velocity().magnitude();
        assert!(speed < 10.0 && speed > 0.0);
    }
}
