use crate::math::Vec2;
use crate::objects::Body;

/// Advances a body by `dt` seconds.
///
/// Velocity takes the accumulated force (over `dt`) and impulse (instantaneous),
/// then the body moves by the average of its old and new velocity. Both
/// accumulators are cleared. Infinite-mass bodies ignore both accumulators and
/// keep their velocity, even when a force generator hands them an infinite force.
pub fn integrate(body: &mut Body, dt: f64) {
    if body.is_immovable() {
        // Static object, only drifts at its set velocity
        body.force = Vec2::ZERO;
        body.impulse = Vec2::ZERO;
        body.translate(body.velocity * dt);
        return;
    }

    let inv_mass = 1.0 / body.mass;
    let old_velocity = body.velocity;

    // --- Velocity --- //
    body.velocity += body.force * (dt * inv_mass) + body.impulse * inv_mass;

    body.force = Vec2::ZERO;
    body.impulse = Vec2::ZERO;

    // --- Position --- //
    let average_velocity = (old_velocity + body.velocity) * 0.5;
    body.translate(average_velocity * dt);
}
