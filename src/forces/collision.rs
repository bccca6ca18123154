use std::fmt;

use log::trace;

use super::ForceCreator;
use crate::collision::find_collision;
use crate::math::vec2::Vec2;
use crate::objects::Body;
use crate::world::{BodyId, BodySet, Scene};

pub type CollisionHandler = Box<dyn FnMut(&mut Body, &mut Body, Vec2)>;
pub type CollisionHook = Box<dyn FnMut(&Body, &Body)>;

/// What happens to the two bodies when they start overlapping.
pub enum CollisionResponse {
    /// Both bodies are removed.
    Destructive,
    /// The first body bounces off the second as if it had infinite mass; the
    /// second is removed.
    Breaking { elasticity: f64 },
    /// Momentum-exchanging impulse along the collision axis.
    Physics { elasticity: f64 },
    /// Caller-defined reaction, given both bodies and the collision axis.
    Custom(CollisionHandler),
}

impl CollisionResponse {
    pub fn custom<F>(handler: F) -> Self
    where
        F: FnMut(&mut Body, &mut Body, Vec2) + 'static,
    {
        Self::Custom(Box::new(handler))
    }

    fn respond(&mut self, body_a: &mut Body, body_b: &mut Body, axis: Vec2) {
        match self {
            Self::Destructive => {
                body_a.remove();
                body_b.remove();
            }
            Self::Breaking { elasticity } => {
                if !body_a.is_immovable() {
                    let j = -body_a.mass() * (1.0 + *elasticity) * body_a.velocity().dot(axis);
                    body_a.add_impulse(axis * j);
                }
                body_b.remove();
            }
            Self::Physics { elasticity } => {
                let Some(mass) = reduced_mass(body_a.mass(), body_b.mass()) else {
                    return;
                };
                let j = mass * (1.0 + *elasticity) * (body_b.velocity() - body_a.velocity()).dot(axis);
                let impulse = axis * j;
                body_a.add_impulse(impulse);
                body_b.add_impulse(-impulse);
            }
            Self::Custom(handler) => handler(body_a, body_b, axis),
        }
    }
}

impl fmt::Debug for CollisionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destructive => f.write_str("Destructive"),
            Self::Breaking { elasticity } => f.debug_struct("Breaking").field("elasticity", elasticity).finish(),
            Self::Physics { elasticity } => f.debug_struct("Physics").field("elasticity", elasticity).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Effective mass of a two-body exchange. `None` when both are immovable.
fn reduced_mass(mass_a: f64, mass_b: f64) -> Option<f64> {
    match (mass_a.is_infinite(), mass_b.is_infinite()) {
        (true, true) => None,
        (true, false) => Some(mass_b),
        (false, true) => Some(mass_a),
        (false, false) => Some(mass_a * mass_b / (mass_a + mass_b)),
    }
}

/// Edge-triggered collision between two bodies.
///
/// Every tick the current shapes are tested. The response (then the optional
/// hook) fires on the first tick of an overlap and not again until a tick
/// measures the bodies apart.
pub struct Collision {
    response: CollisionResponse,
    hook: Option<CollisionHook>,
    colliding: bool,
    bodies: [BodyId; 2],
}

impl Collision {
    /// Panics if `body_a == body_b`.
    pub fn new(response: CollisionResponse, body_a: BodyId, body_b: BodyId) -> Self {
        assert_ne!(body_a, body_b, "a body cannot collide with itself");
        Self {
            response,
            hook: None,
            colliding: false,
            bodies: [body_a, body_b],
        }
    }

    /// Adds a side effect (a sound, a score bump) run after the response.
    pub fn with_hook<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&Body, &Body) + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Whether the last check found the bodies overlapping.
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }
}

impl ForceCreator for Collision {
    fn apply(&mut self, bodies: &mut BodySet) {
        let (body_a, body_b) = bodies.pair_mut(self.bodies[0], self.bodies[1]);
        let info = find_collision(body_a.polygon(), body_b.polygon());

        if !info.collided {
            self.colliding = false;
            return;
        }
        if self.colliding {
            return;
        }

        trace!("collision {:?} between {:?} and {:?}", self.response, self.bodies[0], self.bodies[1]);
        self.response.respond(body_a, body_b, info.axis);
        if let Some(hook) = self.hook.as_mut() {
            hook(&*body_a, &*body_b);
        }
        self.colliding = true;
    }

    fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }
}

impl fmt::Debug for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collision")
            .field("response", &self.response)
            .field("has_hook", &self.hook.is_some())
            .field("colliding", &self.colliding)
            .field("bodies", &self.bodies)
            .finish()
    }
}

pub fn create_collision(scene: &mut Scene, body_a: BodyId, body_b: BodyId, response: CollisionResponse) {
    scene.add_boxed_force_creator(Box::new(Collision::new(response, body_a, body_b)));
}

pub fn create_collision_with_hook<H>(
    scene: &mut Scene,
    body_a: BodyId,
    body_b: BodyId,
    response: CollisionResponse,
    hook: H,
) where
    H: FnMut(&Body, &Body) + 'static,
{
    scene.add_boxed_force_creator(Box::new(Collision::new(response, body_a, body_b).with_hook(hook)));
}

/// Removes both bodies on contact.
pub fn create_destructive_collision(scene: &mut Scene, body_a: BodyId, body_b: BodyId) {
    create_collision(scene, body_a, body_b, CollisionResponse::Destructive);
}

/// Bounces `body_a` off `body_b`, then removes `body_b`.
pub fn create_breaking_collision(scene: &mut Scene, elasticity: f64, body_a: BodyId, body_b: BodyId) {
    create_collision(scene, body_a, body_b, CollisionResponse::Breaking { elasticity });
}

/// Elastic (`elasticity = 1`) to perfectly inelastic (`0`) impulse exchange.
pub fn create_physics_collision(scene: &mut Scene, elasticity: f64, body_a: BodyId, body_b: BodyId) {
    create_collision(scene, body_a, body_b, CollisionResponse::Physics { elasticity });
}

pub fn create_physics_collision_with_hook<H>(
    scene: &mut Scene,
    elasticity: f64,
    body_a: BodyId,
    body_b: BodyId,
    hook: H,
) where
    H: FnMut(&Body, &Body) + 'static,
{
    create_collision_with_hook(scene, body_a, body_b, CollisionResponse::Physics { elasticity }, hook);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;
    use crate::shapes::rectangle;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const EPSILON: f64 = 1e-9;

    fn square(scene: &mut Scene, center: Vec2, mass: f64, velocity: Vec2) -> BodyId {
        let id = scene.add_body(Body::new(rectangle(center, 1.0, 1.0), mass, Color::WHITE));
        scene.body_mut(id).set_velocity(velocity);
        id
    }

    fn counting_response(count: &Rc<Cell<u32>>) -> CollisionResponse {
        let count = Rc::clone(count);
        CollisionResponse::custom(move |_, _, _| count.set(count.get() + 1))
    }

    #[test]
    fn test_reduced_mass() {
        assert_eq!(reduced_mass(2.0, 2.0), Some(1.0));
        assert_eq!(reduced_mass(f64::INFINITY, 3.0), Some(3.0));
        assert_eq!(reduced_mass(3.0, f64::INFINITY), Some(3.0));
        assert_eq!(reduced_mass(f64::INFINITY, f64::INFINITY), None);
    }

    #[test]
    fn test_physics_equal_masses_swap_velocities() {
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 2.0, Vec2::new(3.0, 0.0));
        let b = square(&mut scene, Vec2::new(0.5, 0.0), 2.0, Vec2::new(-3.0, 0.0));

        let mut collision = Collision::new(CollisionResponse::Physics { elasticity: 1.0 }, a, b);
        collision.apply(scene.bodies_mut());
        let momentum_before = scene.body(a).velocity() * 2.0 + scene.body(b).velocity() * 2.0;

        scene.tick(0.0);
        let va = scene.body(a).velocity();
        let vb = scene.body(b).velocity();
        assert!(va.is_within(EPSILON, Vec2::new(-3.0, 0.0)));
        assert!(vb.is_within(EPSILON, Vec2::new(3.0, 0.0)));
        assert!((va * 2.0 + vb * 2.0).is_within(EPSILON, momentum_before));
    }

    #[test]
    fn test_physics_against_immovable_wall_reflects() {
        let mut scene = Scene::new();
        let ball = square(&mut scene, Vec2::ZERO, 1.0, Vec2::new(4.0, 1.0));
        let wall = square(&mut scene, Vec2::new(0.5, 0.0), f64::INFINITY, Vec2::ZERO);

        Collision::new(CollisionResponse::Physics { elasticity: 1.0 }, ball, wall).apply(scene.bodies_mut());
        scene.tick(0.0);

        assert!(scene.body(ball).velocity().is_within(EPSILON, Vec2::new(-4.0, 1.0)));
        assert_eq!(scene.body(wall).velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_physics_between_immovable_bodies_does_nothing() {
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, f64::INFINITY, Vec2::new(1.0, 0.0));
        let b = square(&mut scene, Vec2::new(0.5, 0.0), f64::INFINITY, Vec2::ZERO);

        Collision::new(CollisionResponse::Physics { elasticity: 1.0 }, a, b).apply(scene.bodies_mut());
        assert_eq!(scene.body(a).impulse(), Vec2::ZERO);
        assert_eq!(scene.body(b).impulse(), Vec2::ZERO);
    }

    #[test]
    fn test_destructive_removes_both() {
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::ZERO);
        let b = square(&mut scene, Vec2::new(0.5, 0.5), 1.0, Vec2::ZERO);
        square(&mut scene, Vec2::new(10.0, 0.0), 1.0, Vec2::ZERO);
        create_destructive_collision(&mut scene, a, b);

        scene.tick(0.1);
        assert_eq!(scene.body_count(), 1);
        assert_eq!(scene.force_creator_count(), 0);
    }

    #[test]
    fn test_breaking_bounces_first_and_removes_second() {
        let mut scene = Scene::new();
        let ball = square(&mut scene, Vec2::ZERO, 1.0, Vec2::new(0.0, 5.0));
        let brick = square(&mut scene, Vec2::new(0.0, 0.8), 1.0, Vec2::ZERO);
        create_breaking_collision(&mut scene, 1.0, ball, brick);

        scene.tick(0.0);
        assert!(scene.bodies().get(brick).is_none());
        assert!(scene.body(ball).velocity().is_within(EPSILON, Vec2::new(0.0, -5.0)));
    }

    #[test]
    #[should_panic]
    fn test_self_collision_rejected_at_registration() {
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::ZERO);
        create_physics_collision(&mut scene, 1.0, a, a);
    }

    #[test]
    fn test_no_response_while_apart() {
        let count = Rc::new(Cell::new(0));
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::ZERO);
        let b = square(&mut scene, Vec2::new(3.0, 0.0), 1.0, Vec2::ZERO);
        create_collision(&mut scene, a, b, counting_response(&count));

        scene.tick(0.1);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_latch_fires_once_and_rearms_after_separation() {
        let count = Rc::new(Cell::new(0));
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::ZERO);
        let b = square(&mut scene, Vec2::new(0.5, 0.0), 1.0, Vec2::ZERO);
        create_collision(&mut scene, a, b, counting_response(&count));

        for _ in 0..5 {
            scene.tick(0.1);
        }
        assert_eq!(count.get(), 1);

        scene.body_mut(b).set_centroid(Vec2::new(5.0, 0.0));
        scene.tick(0.1);
        assert_eq!(count.get(), 1);

        scene.body_mut(b).set_centroid(Vec2::new(0.5, 0.0));
        scene.tick(0.1);
        scene.tick(0.1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_hook_runs_after_response() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::new(1.0, 0.0));
        let b = square(&mut scene, Vec2::new(0.5, 0.0), 1.0, Vec2::new(-1.0, 0.0));

        let response_log = Rc::clone(&events);
        let response = CollisionResponse::custom(move |_, _, axis| {
            response_log.borrow_mut().push(format!("response {:.0}", axis.x.abs()));
        });
        let hook_log = Rc::clone(&events);
        create_collision_with_hook(&mut scene, a, b, response, move |body_a, _| {
            hook_log.borrow_mut().push(format!("hook {:.0}", body_a.velocity().x));
        });

        scene.tick(0.0);
        assert_eq!(*events.borrow(), vec!["response 1".to_string(), "hook 1".to_string()]);
    }

    #[test]
    fn test_physics_hook_sees_post_impulse_bodies() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::new(1.0, 0.0));
        let b = square(&mut scene, Vec2::new(0.5, 0.0), 1.0, Vec2::ZERO);
        create_physics_collision_with_hook(&mut scene, 1.0, a, b, move |body_a, body_b| {
            // impulses are pending until the bodies tick
            assert!(body_a.impulse().x < 0.0);
            assert!(body_b.impulse().x > 0.0);
            counter.set(counter.get() + 1);
        });

        scene.tick(0.0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_collision_skipped_when_forces_disabled() {
        let count = Rc::new(Cell::new(0));
        let mut scene = Scene::new();
        let a = square(&mut scene, Vec2::ZERO, 1.0, Vec2::ZERO);
        let b = square(&mut scene, Vec2::new(0.5, 0.0), 1.0, Vec2::ZERO);
        create_collision(&mut scene, a, b, counting_response(&count));

        scene.body_mut(a).set_applies_forces(false);
        scene.tick(0.1);
        assert_eq!(count.get(), 0);
    }
}
