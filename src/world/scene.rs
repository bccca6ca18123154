use std::any::Any;

use log::debug;

use super::body_set::{BodyId, BodySet};
use crate::config::SimulationConfig;
use crate::forces::{FnForce, ForceCreator};
use crate::math::vec2::Vec2;
use crate::objects::Body;

/// Owns bodies and force creators and advances them one tick at a time.
pub struct Scene {
    bodies: BodySet,
    force_creators: Vec<Box<dyn ForceCreator>>,
    config: SimulationConfig,
    time: f64,
    side_channel: Option<Box<dyn Any>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodySet::new(),
            force_creators: Vec::new(),
            config,
            time: 0.0,
            side_channel: None,
        }
    }

    /// Attaches an opaque handle (an audio mixer, for instance) that callers can
    /// fetch back later. The scene never looks inside it.
    pub fn with_side_channel<T: Any>(mut self, handle: T) -> Self {
        self.side_channel = Some(Box::new(handle));
        self
    }

    pub fn side_channel<T: Any>(&self) -> Option<&T> {
        self.side_channel.as_ref().and_then(|handle| handle.downcast_ref::<T>())
    }

    pub fn side_channel_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.side_channel.as_mut().and_then(|handle| handle.downcast_mut::<T>())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = self.bodies.insert(body);
        debug!("added {:?} ({} bodies)", id, self.bodies.len());
        id
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Panics if `id` no longer resolves.
    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id]
    }

    /// Panics if `id` no longer resolves.
    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id]
    }

    /// Body at `index` in insertion order. Panics when out of range.
    pub fn get_body(&self, index: usize) -> &Body {
        self.bodies.at(index)
    }

    /// Panics when out of range.
    pub fn get_body_mut(&mut self, index: usize) -> &mut Body {
        self.bodies.at_mut(index)
    }

    pub fn body_id(&self, index: usize) -> Option<BodyId> {
        self.bodies.id_at(index)
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.index_of(id)
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodySet {
        &mut self.bodies
    }

    /// Flags the body at `index` for removal. Panics when out of range.
    #[deprecated(note = "call `Body::remove` on the body instead")]
    pub fn remove_body(&mut self, index: usize) {
        self.bodies.at_mut(index).remove();
    }

    /// Registers a closure force creator bound to `bodies`.
    ///
    /// The closure receives the whole body set plus the bound handles, in the
    /// order given here. Panics if any handle is not in the scene.
    pub fn add_force_creator<F>(&mut self, bodies: Vec<BodyId>, apply: F)
    where
        F: FnMut(&mut BodySet, &[BodyId]) + 'static,
    {
        self.add_boxed_force_creator(Box::new(FnForce::new(bodies, apply)));
    }

    /// Registers any [`ForceCreator`]. Panics if a bound body is not in the scene.
    pub fn add_boxed_force_creator(&mut self, creator: Box<dyn ForceCreator>) {
        for id in creator.bodies() {
            assert!(self.bodies.contains(*id), "force creator bound to {id:?}, which is not in the scene");
        }
        self.force_creators.push(creator);
        debug!("added force creator ({} total)", self.force_creators.len());
    }

    pub fn force_creator_count(&self) -> usize {
        self.force_creators.len()
    }

    /// Advances the scene by `dt` seconds.
    ///
    /// 1. Runs every force creator whose bodies all have forces enabled, in
    ///    insertion order.
    /// 2. Drops force creators bound to a removed body.
    /// 3. Destroys removed bodies and integrates the rest.
    pub fn tick(&mut self, dt: f64) {
        self.time += dt;

        for creator in &mut self.force_creators {
            let enabled = creator
                .bodies()
                .iter()
                .all(|id| self.bodies.get(*id).is_some_and(Body::applies_forces));
            if enabled {
                creator.apply(&mut self.bodies);
            }
        }

        let creators_before = self.force_creators.len();
        self.force_creators.retain(|creator| {
            creator
                .bodies()
                .iter()
                .all(|id| self.bodies.get(*id).is_some_and(|body| !body.is_removed()))
        });
        let pruned_creators = creators_before - self.force_creators.len();

        let pruned_bodies = self.bodies.destroy_removed();
        for (_, body) in self.bodies.iter_mut() {
            body.tick(dt);
        }

        if pruned_creators > 0 || pruned_bodies > 0 {
            debug!(
                "t={:.3}: pruned {} force creators and {} bodies",
                self.time, pruned_creators, pruned_bodies
            );
        }
    }

    /// Total simulated time since creation or the last [`Scene::reset_time`].
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn reset_time(&mut self) {
        self.time = 0.0;
    }

    /// True when every body's velocity is within `rest_epsilon` of zero, per component.
    pub fn is_still(&self) -> bool {
        let epsilon = self.config.rest_epsilon;
        self.bodies
            .iter()
            .all(|(_, body)| body.velocity().is_within(epsilon, Vec2::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;
    use crate::objects::BodyInfo;
    use crate::shapes::rectangle;
    use std::cell::Cell;
    use std::rc::Rc;

    const EPSILON: f64 = 1e-9;

    fn body_at(x: f64, y: f64) -> Body {
        Body::new(rectangle(Vec2::new(x, y), 1.0, 1.0), 1.0, Color::WHITE)
    }

    #[test]
    fn test_add_body_and_index() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(3.0, 0.0));

        assert_eq!(scene.body_count(), 2);
        assert_eq!(scene.index_of(b), Some(1));
        assert_eq!(scene.body_id(0), Some(a));
        assert!(scene.get_body(1).centroid().is_within(EPSILON, Vec2::new(3.0, 0.0)));
    }

    #[test]
    #[should_panic]
    fn test_get_body_out_of_range_panics() {
        let scene = Scene::new();
        scene.get_body(0);
    }

    #[test]
    fn test_tick_integrates_bodies_and_advances_time() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        scene.body_mut(a).set_velocity(Vec2::new(2.0, 0.0));

        scene.tick(0.5);
        scene.tick(0.5);

        assert!(scene.body(a).centroid().is_within(EPSILON, Vec2::new(2.0, 0.0)));
        assert!((scene.time() - 1.0).abs() < EPSILON);
        scene.reset_time();
        assert_eq!(scene.time(), 0.0);
    }

    #[test]
    fn test_force_creator_runs_each_tick() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        scene.add_force_creator(vec![a], |bodies, ids| {
            bodies[ids[0]].add_force(Vec2::new(1.0, 0.0));
        });

        scene.tick(1.0);
        scene.tick(1.0);
        assert!(scene.body(a).velocity().is_within(EPSILON, Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_disabled_body_skips_its_creators() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let b = scene.add_body(body_at(5.0, 0.0));
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        scene.add_force_creator(vec![a, b], move |_, _| counter.set(counter.get() + 1));

        scene.body_mut(b).set_applies_forces(false);
        scene.tick(0.1);
        assert_eq!(runs.get(), 0);

        scene.body_mut(b).set_applies_forces(true);
        scene.tick(0.1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_removed_body_prunes_creator_after_last_apply() {
        let mut scene = Scene::new();
        let keep = scene.add_body(body_at(0.0, 0.0));
        let doomed = scene.add_body(body_at(5.0, 0.0));
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        scene.add_force_creator(vec![doomed], move |_, _| counter.set(counter.get() + 1));

        scene.body_mut(doomed).remove();
        scene.tick(0.1);

        // the creator still gets the tick in which its body is removed
        assert_eq!(runs.get(), 1);
        assert_eq!(scene.body_count(), 1);
        assert_eq!(scene.force_creator_count(), 0);
        assert_eq!(scene.body_id(0), Some(keep));
        assert!(scene.bodies().get(doomed).is_none());

        scene.tick(0.1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_unbound_creator_is_never_pruned() {
        let mut scene = Scene::new();
        let a = scene.add_body(body_at(0.0, 0.0));
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        scene.add_force_creator(Vec::new(), move |_, _| counter.set(counter.get() + 1));

        scene.body_mut(a).remove();
        scene.tick(0.1);
        scene.tick(0.1);
        assert_eq!(runs.get(), 2);
        assert_eq!(scene.force_creator_count(), 1);
    }

    #[test]
    #[should_panic]
    fn test_creator_with_foreign_body_panics() {
        let mut other = Scene::new();
        other.add_body(body_at(0.0, 0.0));
        let foreign = other.add_body(body_at(1.0, 0.0));

        let mut scene = Scene::new();
        scene.add_body(body_at(0.0, 0.0));
        scene.add_force_creator(vec![foreign], |_, _| {});
    }

    #[test]
    #[allow(deprecated)]
    fn test_remove_body_by_index_only_flags() {
        let mut scene = Scene::new();
        scene.add_body(body_at(0.0, 0.0));
        scene.remove_body(0);
        assert_eq!(scene.body_count(), 1);
        assert!(scene.get_body(0).is_removed());
        scene.tick(0.1);
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn test_pruned_body_releases_info() {
        let released = Rc::new(Cell::new(false));
        let flag = Rc::clone(&released);
        let info = BodyInfo::with_release("ball", move |_| flag.set(true));

        let mut scene = Scene::new();
        let id = scene.add_body(Body::with_info(rectangle(Vec2::ZERO, 1.0, 1.0), 1.0, Color::RED, info));
        scene.tick(0.1);
        assert!(!released.get());

        scene.body_mut(id).remove();
        scene.tick(0.1);
        assert!(released.get());
    }

    #[test]
    fn test_is_still_uses_rest_epsilon() {
        let config = SimulationConfig {
            rest_epsilon: 0.5,
            ..SimulationConfig::default()
        };
        let mut scene = Scene::with_config(config);
        let a = scene.add_body(body_at(0.0, 0.0));
        assert!(scene.is_still());

        scene.body_mut(a).set_velocity(Vec2::new(0.4, -0.4));
        assert!(scene.is_still());

        scene.body_mut(a).set_velocity(Vec2::new(0.0, 0.6));
        assert!(!scene.is_still());
    }

    #[test]
    fn test_side_channel_downcast() {
        #[derive(Debug, PartialEq)]
        struct Mixer {
            muted: bool,
        }

        let mut scene = Scene::new().with_side_channel(Mixer { muted: false });
        scene.side_channel_mut::<Mixer>().unwrap().muted = true;
        assert_eq!(scene.side_channel::<Mixer>(), Some(&Mixer { muted: true }));
        assert!(scene.side_channel::<u32>().is_none());
        assert!(Scene::new().side_channel::<Mixer>().is_none());
    }
}
