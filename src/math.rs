use core::ops::{Add, AddAssign, Div, Mul, Sub};

use macroquad::math::Mat4;

use crate::errors::{contract_violation, ErrorType};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<Dimensions> for Vector2 {
    fn from(value: Dimensions) -> Self {
        Self::new(value.width, value.height)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;
    fn div(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<(f32, f32)> for Dimensions {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Vector2, size: Vector2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }
    pub fn min_y(&self) -> f32 {
        self.y
    }
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Half-open: the top and left edges belong to the box, the bottom and right edges do not,
    /// so boxes sharing an edge never both contain a point on it.
    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    pub fn contains_rect(&self, other: &BoundingBox) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        other.min_x() <= self.max_x()
            && other.max_x() >= self.min_x()
            && other.min_y() <= self.max_y()
            && other.max_y() >= self.min_y()
    }
}

// ============================================================================
// Geometry helpers
// ============================================================================

fn orientation(p: Vector2, q: Vector2, r: Vector2) -> u8 {
    let val = (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
    if val.abs() < f32::EPSILON {
        0
    } else if val > 0.0 {
        1
    } else {
        2
    }
}

fn on_segment(p: Vector2, q: Vector2, r: Vector2) -> bool {
    q.x >= p.x.min(r.x) - f32::EPSILON
        && q.x <= p.x.max(r.x) + f32::EPSILON
        && q.y >= p.y.min(r.y) - f32::EPSILON
        && q.y <= p.y.max(r.y) + f32::EPSILON
}

/// Whether segment `p1`-`q1` intersects segment `p2`-`q2`, touching and colinear overlap included.
pub fn lines_intersect(p1: Vector2, q1: Vector2, p2: Vector2, q2: Vector2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

/// Even-odd ray cast. Polygons with fewer than three vertices contain nothing.
pub fn point_in_polygon(point: Vector2, polygon: &[Vector2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let vi = polygon[i];
        let vj = polygon[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let intersection_x = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < intersection_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub fn point_in_circle(point: Vector2, center: Vector2, radius: f32) -> bool {
    (center - point).length() <= radius
}

/// Barycentric containment test.
///
/// Panics unless `triangle` has exactly three points with a non-zero area.
pub fn point_in_triangle(triangle: &[Vector2], point: Vector2) -> bool {
    if triangle.len() != 3 {
        contract_violation(
            ErrorType::MalformedTriangle,
            &format!("a triangle needs exactly 3 points, got {}", triangle.len()),
        );
    }

    let p0 = triangle[0];
    let v0 = triangle[2] - p0;
    let v1 = triangle[1] - p0;
    let v2 = point - p0;

    let dot00 = v0.x * v0.x + v0.y * v0.y;
    let dot01 = v0.x * v1.x + v0.y * v1.y;
    let dot02 = v0.x * v2.x + v0.y * v2.y;
    let dot11 = v1.x * v1.x + v1.y * v1.y;
    let dot12 = v1.x * v2.x + v1.y * v2.y;

    let denominator = dot00 * dot11 - dot01 * dot01;
    if denominator == 0.0 {
        contract_violation(
            ErrorType::DegenerateTriangle,
            &format!("triangle {:?} has no area", triangle),
        );
    }

    let u = (dot11 * dot02 - dot01 * dot12) / denominator;
    let v = (dot00 * dot12 - dot01 * dot02) / denominator;
    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}

/// Axis-aligned bounds of a vertex list. An empty list yields a zero box.
pub fn bounds(vertices: &[Vector2]) -> BoundingBox {
    if vertices.is_empty() {
        return BoundingBox::default();
    }
    let mut min = Vector2::new(f32::MAX, f32::MAX);
    let mut max = Vector2::new(f32::MIN, f32::MIN);
    for v in vertices {
        min.x = min.x.min(v.x);
        min.y = min.y.min(v.y);
        max.x = max.x.max(v.x);
        max.y = max.y.max(v.y);
    }
    BoundingBox::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

pub fn distance(a: Vector2, b: Vector2) -> f32 {
    (b - a).length()
}

pub fn midpoint(a: Vector2, b: Vector2) -> Vector2 {
    Vector2::new(
        a.x.min(b.x) + (a.x - b.x).abs() / 2.0,
        a.y.min(b.y) + (a.y - b.y).abs() / 2.0,
    )
}

/// Moves every vertex `pixels` further away from the path's centroid.
pub fn expand_path(vertices: &[Vector2], pixels: f32) -> Vec<Vector2> {
    if vertices.is_empty() {
        return Vec::new();
    }
    let centroid = vertices
        .iter()
        .fold(Vector2::ZERO, |acc, v| acc + *v)
        / vertices.len() as f32;

    vertices
        .iter()
        .map(|vertex| {
            let offset = *vertex - centroid;
            let length = offset.length();
            if length == 0.0 {
                return *vertex;
            }
            centroid + offset * ((length + pixels) / length)
        })
        .collect()
}

/// Orthographic projection with the origin at the top-left corner and y growing downwards,
/// matching the screen space instances are emitted in.
pub fn orthographic_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, height, 0.0, -1.0, 1.0)
}
