use nalgebra::Complex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D coordinate in a view's local canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    fn to_complex(self) -> Complex<f64> {
        Complex::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("points ({a:?}), ({b:?}), ({c:?}) are collinear or coincident; no circle passes through them")]
    Degenerate { a: Point, b: Point, c: Point },
}

/// Circle through three points, computed in the complex plane.
///
/// With x, y, z the points as complex numbers and `w = (z - x) / (y - x)`,
/// the center is `-c` and the radius `|c + x|` where
/// `c = (x - y)(w - |w|²) / (2i·Im(w)) - x`.
///
/// Returns [`GeometryError::Degenerate`] when the points are collinear,
/// when the first two coincide, or when the result is not finite.
pub fn circle_from_three_points(
    p1: Point,
    p2: Point,
    p3: Point,
) -> Result<Circle, GeometryError> {
    let degenerate = GeometryError::Degenerate {
        a: p1,
        b: p2,
        c: p3,
    };

    let x = p1.to_complex();
    let y = p2.to_complex();
    let z = p3.to_complex();

    if y == x {
        return Err(degenerate);
    }
    let w = (z - x) / (y - x);
    if w.im == 0.0 || !w.im.is_finite() {
        return Err(degenerate);
    }

    let two_i_im = Complex::new(0.0, 2.0 * w.im);
    let c = (x - y) * (w - Complex::new(w.norm_sqr(), 0.0)) / two_i_im - x;

    let center = Point::new(-c.re, -c.im);
    let radius = (c + x).norm();
    if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
        return Err(degenerate);
    }

    Ok(Circle::new(center, radius))
}

/// Circle around `center` whose outline passes through `p`.
pub fn circle_from_center_and_point(center: Point, p: Point) -> Circle {
    Circle::new(center, center.distance_to(&p))
}
