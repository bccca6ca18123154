use std::any::Any;
use std::fmt;

use super::info::BodyInfo;
use crate::common::Color;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::shapes::polygon::DEGENERATE_AREA;
use crate::shapes::Polygon;

/// A convex polygon body moving in the plane.
///
/// The shape is stored in world coordinates and moved in place; the centroid is
/// computed once at construction and then updated alongside every translation
/// or rotation. Angular dynamics are not simulated: `angle` only records the
/// rotations applied through this API.
pub struct Body {
    pub(crate) shape: Polygon,
    pub(crate) centroid: Vec2,
    pub(crate) velocity: Vec2,
    // Accumulators, cleared by every tick
    pub(crate) force: Vec2,
    pub(crate) impulse: Vec2,

    pub(crate) mass: f64,
    angle: f64,
    color: Color,
    alpha: f64,
    info: Option<BodyInfo>,

    removed: bool,
    to_respawn: bool,
    respawnable: bool,
    hidden: bool,
    applies_forces: bool,
}

impl Body {
    /// Creates a body at rest. `mass` may be `f64::INFINITY` for an immovable body.
    ///
    /// Panics if `mass` is not strictly positive or the shape has no area.
    pub fn new(shape: Polygon, mass: f64, color: Color) -> Self {
        Self::build(shape, mass, color, None)
    }

    /// Creates a body carrying a caller-defined tag.
    pub fn with_info(shape: Polygon, mass: f64, color: Color, info: BodyInfo) -> Self {
        Self::build(shape, mass, color, Some(info))
    }

    fn build(shape: Polygon, mass: f64, color: Color, info: Option<BodyInfo>) -> Self {
        assert!(mass > 0.0, "body mass must be positive, got {mass}");
        let area = shape.area();
        assert!(
            area.abs() >= DEGENERATE_AREA,
            "body shape has no area (signed area {area})"
        );
        let centroid = shape.centroid();
        Self {
            shape,
            centroid,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            impulse: Vec2::ZERO,
            mass,
            angle: 0.0,
            color,
            alpha: 1.0,
            info,
            removed: false,
            to_respawn: false,
            respawnable: false,
            hidden: false,
            applies_forces: true,
        }
    }

    /// Returns a copy of the current shape.
    pub fn shape(&self) -> Polygon {
        self.shape.clone()
    }

    /// Borrowed view of the current shape.
    pub fn polygon(&self) -> &Polygon {
        &self.shape
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Mean of the vertices, see [`Polygon::center`].
    pub fn center(&self) -> Vec2 {
        self.shape.center()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// True for infinite-mass bodies.
    pub fn is_immovable(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Force accumulated since the last tick.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Impulse accumulated since the last tick.
    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Panics unless `alpha` is in `0.0..=1.0`.
    pub fn set_alpha(&mut self, alpha: f64) {
        assert!((0.0..=1.0).contains(&alpha), "alpha must be in [0, 1], got {alpha}");
        self.alpha = alpha;
    }

    pub fn info(&self) -> Option<&BodyInfo> {
        self.info.as_ref()
    }

    /// Downcasts the tag payload.
    pub fn info_as<T: Any>(&self) -> Option<&T> {
        self.info.as_ref().and_then(|info| info.get::<T>())
    }

    pub fn info_as_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.info.as_mut().and_then(|info| info.get_mut::<T>())
    }

    /// Moves the body by `displacement`.
    pub fn translate(&mut self, displacement: Vec2) {
        self.shape.translate(displacement);
        self.centroid += displacement;
    }

    /// Moves the body so its centroid lands on `centroid`.
    pub fn set_centroid(&mut self, centroid: Vec2) {
        self.translate(centroid - self.centroid);
    }

    /// Rotates about the centroid by `angle` radians (relative, counterclockwise).
    pub fn rotate(&mut self, angle: f64) {
        self.shape.rotate_about(angle, self.centroid);
        self.angle += angle;
    }

    /// Rotates to an absolute orientation.
    pub fn set_rotation(&mut self, angle: f64) {
        self.rotate(angle - self.angle);
    }

    /// Rotates the whole body, centroid included, about `pivot`.
    pub fn rotate_about_point(&mut self, angle: f64, pivot: Vec2) {
        self.shape.rotate_about(angle, pivot);
        self.centroid = (self.centroid - pivot).rotate(angle) + pivot;
        self.angle += angle;
    }

    /// Scales the shape along x, keeping the centroid where it was.
    ///
    /// Panics on a zero or non-finite factor.
    pub fn stretch_x(&mut self, factor: f64) {
        assert!(
            factor != 0.0 && factor.is_finite(),
            "stretch factor must be finite and nonzero, got {factor}"
        );
        let anchor = self.centroid;
        self.shape.stretch_x(factor);
        self.centroid = self.shape.centroid();
        self.set_centroid(anchor);
    }

    /// Accumulates a force for the current tick.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Accumulates an impulse for the current tick.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.impulse += impulse;
    }

    /// Advances the body by `dt` seconds. See [`integrator::integrate`].
    pub fn tick(&mut self, dt: f64) {
        integrator::integrate(self, dt);
    }

    /// Marks the body for removal; the owning scene destroys it on its next tick.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn set_respawnable(&mut self, respawnable: bool) {
        self.respawnable = respawnable;
    }

    pub fn is_respawnable(&self) -> bool {
        self.respawnable
    }

    pub fn set_to_respawn(&mut self, to_respawn: bool) {
        self.to_respawn = to_respawn;
    }

    pub fn to_respawn(&self) -> bool {
        self.to_respawn
    }

    pub fn hide(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Enables or disables every force creator that references this body.
    pub fn set_applies_forces(&mut self, applies_forces: bool) {
        self.applies_forces = applies_forces;
    }

    pub fn applies_forces(&self) -> bool {
        self.applies_forces
    }

    /// Destroys the body, running the tag's release hook.
    pub fn destroy(mut self) {
        self.release_info();
    }

    fn release_info(&mut self) {
        if let Some(info) = self.info.take() {
            info.release();
        }
    }
}

impl Drop for Body {
    fn drop(&mut self) {
        self.release_info();
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("centroid", &self.centroid)
            .field("velocity", &self.velocity)
            .field("mass", &self.mass)
            .field("angle", &self.angle)
            .field("vertices", &self.shape.len())
            .field("removed", &self.removed)
            .field("info", &self.info)
            .finish()
    }
}
