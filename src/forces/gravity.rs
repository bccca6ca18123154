use super::ForceCreator;
use crate::world::{BodyId, BodySet, Scene};

/// Newtonian attraction between two bodies.
///
/// Force magnitude is `G * m_a * m_b / d^2` along the line between the
/// centroids, with `d` never smaller than `min_distance`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,
    pub min_distance: f64,
    bodies: [BodyId; 2],
}

impl NewtonianGravity {
    pub fn new(g: f64, min_distance: f64, body_a: BodyId, body_b: BodyId) -> Self {
        assert_ne!(body_a, body_b, "a body cannot be paired with itself");
        Self {
            g,
            min_distance,
            bodies: [body_a, body_b],
        }
    }
}

impl ForceCreator for NewtonianGravity {
    fn apply(&mut self, bodies: &mut BodySet) {
        let (body_a, body_b) = bodies.pair_mut(self.bodies[0], self.bodies[1]);

        let difference = body_b.centroid() - body_a.centroid();
        let distance = difference.magnitude().max(self.min_distance);
        let magnitude = self.g * body_a.mass() * body_b.mass() / (distance * distance);
        // Coincident centroids have no direction and so no force.
        let force = difference.normalize() * magnitude;

        body_a.add_force(force);
        body_b.add_force(-force);
    }

    fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}

/// Registers mutual gravity between `body_a` and `body_b`, using the scene's
/// `gravity_min_distance`.
pub fn create_newtonian_gravity(scene: &mut Scene, g: f64, body_a: BodyId, body_b: BodyId) {
    let min_distance = scene.config().gravity_min_distance;
    scene.add_boxed_force_creator(Box::new(NewtonianGravity::new(g, min_distance, body_a, body_b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;
    use crate::math::Vec2;
    use crate::objects::Body;
    use crate::shapes::rectangle;

    const EPSILON: f64 = 1e-9;

    fn scene_with_pair(separation: f64, mass_a: f64, mass_b: f64) -> (Scene, BodyId, BodyId) {
        let mut scene = Scene::new();
        let a = scene.add_body(Body::new(rectangle(Vec2::ZERO, 1.0, 1.0), mass_a, Color::WHITE));
        let b = scene.add_body(Body::new(
            rectangle(Vec2::new(separation, 0.0), 1.0, 1.0),
            mass_b,
            Color::WHITE,
        ));
        (scene, a, b)
    }

    #[test]
    fn test_attraction_is_equal_and_opposite() {
        let (mut scene, a, b) = scene_with_pair(10.0, 2.0, 3.0);
        let mut gravity = NewtonianGravity::new(100.0, 5.0, a, b);
        gravity.apply(scene.bodies_mut());

        // 100 * 2 * 3 / 10^2 = 6
        assert!(scene.body(a).force().is_within(EPSILON, Vec2::new(6.0, 0.0)));
        assert!(scene.body(b).force().is_within(EPSILON, Vec2::new(-6.0, 0.0)));
    }

    #[test]
    fn test_distance_floor() {
        let (mut scene, a, b) = scene_with_pair(1.0, 1.0, 1.0);
        let mut gravity = NewtonianGravity::new(25.0, 5.0, a, b);
        gravity.apply(scene.bodies_mut());

        // d = max(1, 5) = 5, so 25 / 25 = 1
        assert!(scene.body(a).force().is_within(EPSILON, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_coincident_bodies_feel_nothing() {
        let (mut scene, a, b) = scene_with_pair(0.0, 1.0, 1.0);
        let mut gravity = NewtonianGravity::new(25.0, 5.0, a, b);
        gravity.apply(scene.bodies_mut());
        assert_eq!(scene.body(a).force(), Vec2::ZERO);
        assert_eq!(scene.body(b).force(), Vec2::ZERO);
    }

    #[test]
    fn test_factory_uses_scene_config() {
        let (mut scene, a, b) = scene_with_pair(10.0, 1.0, 1.0);
        create_newtonian_gravity(&mut scene, 100.0, a, b);
        assert_eq!(scene.force_creator_count(), 1);

        scene.tick(1.0);
        // F = 1 on both, so each gains unit speed towards the other
        assert!(scene.body(a).velocity().is_within(EPSILON, Vec2::new(1.0, 0.0)));
        assert!(scene.body(b).velocity().is_within(EPSILON, Vec2::new(-1.0, 0.0)));
    }
}
