use super::manifold::CollisionInfo;
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

/// Length of the overlap between two projection intervals; `<= 0` when disjoint.
fn interval_overlap((min_a, max_a): (f64, f64), (min_b, max_b): (f64, f64)) -> f64 {
    max_a.min(max_b) - min_a.max(min_b)
}

/// Runs the edge normals of `edges_of` as candidate axes.
///
/// Returns `None` as soon as a separating axis is found, otherwise updates the
/// running minimum. Strict `<` keeps the first axis on ties.
fn scan_axes(
    edges_of: &Polygon,
    shape_a: &Polygon,
    shape_b: &Polygon,
    best: &mut (f64, Vec2),
) -> Option<()> {
    for axis in edges_of.edge_normals() {
        // Zero-length edge, no usable axis.
        if axis.magnitude_squared() < 1e-20 {
            continue;
        }

        let overlap = interval_overlap(shape_a.project(axis), shape_b.project(axis));
        if overlap <= 0.0 {
            return None;
        }
        if overlap < best.0 {
            *best = (overlap, axis);
        }
    }
    Some(())
}

/// Separating-axis test between two convex polygons.
///
/// Every edge normal of `shape_a`, then of `shape_b`, is tried as a separating
/// axis. Touching shapes (zero overlap) count as disjoint. When no separating
/// axis exists, the axis with the smallest overlap is reported.
pub fn find_collision(shape_a: &Polygon, shape_b: &Polygon) -> CollisionInfo {
    let mut best = (f64::INFINITY, Vec2::ZERO);

    if scan_axes(shape_a, shape_a, shape_b, &mut best).is_none()
        || scan_axes(shape_b, shape_a, shape_b, &mut best).is_none()
    {
        return CollisionInfo::NONE;
    }

    CollisionInfo::hit(best.1)
}
