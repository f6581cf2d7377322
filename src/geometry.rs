use rand::Rng;

use crate::mode::DOT_SPAWN_MARGIN;

/// A dot on the unit plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Uniform draw from `[margin, 1 - margin)`
pub fn generate_coordinate<R: Rng + ?Sized>(rng: &mut R, margin: f64) -> f64 {
    rng.gen::<f64>() * (1.0 - 2.0 * margin) + margin
}

pub fn generate_point<R: Rng + ?Sized>(rng: &mut R) -> Point {
    Point::new(
        generate_coordinate(rng, DOT_SPAWN_MARGIN),
        generate_coordinate(rng, DOT_SPAWN_MARGIN),
    )
}

pub fn distance(p1: Point, p2: Point) -> f64 {
    ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt()
}
