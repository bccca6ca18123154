use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

/// Below this absolute signed area a polygon has no usable centroid.
pub const DEGENERATE_AREA: f64 = 1e-12;

/// A closed convex polygon given by its vertices in world coordinates.
/// Vertices should be ordered counter-clockwise (or clockwise, consistently);
/// the winding shows up as the sign of [`Polygon::area`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from a vector of vertices.
    ///
    /// Panics if fewer than 3 vertices are provided or the area is zero.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        match Self::try_new(vertices) {
            Ok(polygon) => polygon,
            Err(err) => panic!("invalid polygon: {err}"),
        }
    }

    /// Fallible constructor: rejects fewer than 3 vertices and zero-area loops.
    pub fn try_new(vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices {
                count: vertices.len(),
            });
        }
        let polygon = Polygon { vertices };
        let area = polygon.area();
        if !(area.abs() >= DEGENERATE_AREA) {
            return Err(PhysicsError::DegeneratePolygon { area });
        }
        Ok(polygon)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the edges as `(start, end)` pairs, closing the loop.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area using the Shoelace formula: positive for counter-clockwise winding.
    pub fn area(&self) -> f64 {
        self.edges().map(|(v1, v2)| v1.cross(v2)).sum::<f64>() / 2.0
    }

    /// Area-weighted centroid (center of mass for uniform density).
    ///
    /// Divides by the signed area; [`Polygon::try_new`] guarantees it is nonzero
    /// at construction.
    pub fn centroid(&self) -> Vec2 {
        let mut sum = Vec2::ZERO;
        for (v1, v2) in self.edges() {
            let cross = v1.cross(v2);
            sum += (v1 + v2) * cross;
        }
        sum / (6.0 * self.area())
    }

    /// Arithmetic mean of the vertices. Differs from the centroid for irregular shapes.
    pub fn center(&self) -> Vec2 {
        let mut sum = Vec2::ZERO;
        for v in &self.vertices {
            sum += *v;
        }
        sum / self.vertices.len() as f64
    }

    pub fn translate(&mut self, translation: Vec2) {
        for v in self.vertices.iter_mut() {
            *v += translation;
        }
    }

    /// Rotates every vertex counterclockwise by `angle` radians about `pivot`.
    pub fn rotate_about(&mut self, angle: f64, pivot: Vec2) {
        let (sin_a, cos_a) = angle.sin_cos();
        for v in self.vertices.iter_mut() {
            let r = *v - pivot;
            *v = Vec2::new(r.x * cos_a - r.y * sin_a, r.x * sin_a + r.y * cos_a) + pivot;
        }
    }

    /// Scales the x component of every vertex (about the y axis).
    pub fn stretch_x(&mut self, factor: f64) {
        for v in self.vertices.iter_mut() {
            *v = v.scale_x(factor);
        }
    }

    /// Mirrors across the vertical line `x = x0`.
    pub fn reflect_across_vertical(&mut self, x0: f64) {
        for v in self.vertices.iter_mut() {
            v.x = 2.0 * x0 - v.x;
        }
    }

    /// Mirrors across the horizontal line `y = y0`.
    pub fn reflect_across_horizontal(&mut self, y0: f64) {
        for v in self.vertices.iter_mut() {
            v.y = 2.0 * y0 - v.y;
        }
    }

    /// Returns the unit normal of each edge. Zero-length edges yield `Vec2::ZERO`.
    pub fn edge_normals(&self) -> Vec<Vec2> {
        self.edges()
            .map(|(v1, v2)| (v2 - v1).perpendicular().normalize())
            .collect()
    }

    /// Projects every vertex onto `axis` and returns the `(min, max)` interval.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        let mut min_proj = f64::INFINITY;
        let mut max_proj = f64::NEG_INFINITY;
        for v in &self.vertices {
            let projection = v.dot(axis);
            min_proj = min_proj.min(projection);
            max_proj = max_proj.max(projection);
        }
        (min_proj, max_proj)
    }
}
