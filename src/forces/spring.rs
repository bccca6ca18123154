use super::ForceCreator;
use crate::world::{BodyId, BodySet, Scene};

/// Zero-length Hooke spring between two centroids: `F = k * (c_b - c_a)` on A.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    pub k: f64,
    bodies: [BodyId; 2],
}

impl Spring {
    pub fn new(k: f64, body_a: BodyId, body_b: BodyId) -> Self {
        assert_ne!(body_a, body_b, "a body cannot be paired with itself");
        Self {
            k,
            bodies: [body_a, body_b],
        }
    }
}

impl ForceCreator for Spring {
    fn apply(&mut self, bodies: &mut BodySet) {
        let (body_a, body_b) = bodies.pair_mut(self.bodies[0], self.bodies[1]);
        let force = (body_b.centroid() - body_a.centroid()) * self.k;
        body_a.add_force(force);
        body_b.add_force(-force);
    }

    fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}

pub fn create_spring(scene: &mut Scene, k: f64, body_a: BodyId, body_b: BodyId) {
    scene.add_boxed_force_creator(Box::new(Spring::new(k, body_a, body_b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;
    use crate::math::Vec2;
    use crate::objects::Body;
    use crate::shapes::rectangle;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_spring_pulls_along_displacement() {
        let mut scene = Scene::new();
        let a = scene.add_body(Body::new(rectangle(Vec2::ZERO, 1.0, 1.0), 1.0, Color::WHITE));
        let b = scene.add_body(Body::new(rectangle(Vec2::new(3.0, 4.0), 1.0, 1.0), 1.0, Color::WHITE));

        let mut spring = Spring::new(2.0, a, b);
        spring.apply(scene.bodies_mut());

        assert!(scene.body(a).force().is_within(EPSILON, Vec2::new(6.0, 8.0)));
        assert!(scene.body(b).force().is_within(EPSILON, Vec2::new(-6.0, -8.0)));
        assert!((scene.body(a).force().magnitude() - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_spring_to_anchor_oscillates() {
        let mut scene = Scene::new();
        let anchor = scene.add_body(Body::new(rectangle(Vec2::ZERO, 1.0, 1.0), f64::INFINITY, Color::WHITE));
        let bob = scene.add_body(Body::new(rectangle(Vec2::new(1.0, 0.0), 1.0, 1.0), 1.0, Color::WHITE));
        create_spring(&mut scene, 1.0, anchor, bob);

        let mut crossed = false;
        for _ in 0..400 {
            scene.tick(0.01);
            crossed |= scene.body(bob).centroid().x < 0.0;
        }
        assert!(crossed);
        assert!(scene.body(anchor).centroid().is_within(EPSILON, Vec2::ZERO));
    }
}
