pub mod consts;

pub mod vector;
pub mod ray;
pub mod light;

pub mod geometry;
pub mod intersect;
pub mod world;
pub mod camera;
pub mod scene;

pub mod color;
pub mod canvas;

pub mod parallel;

use consts::FEQ_EPSILON;

/// Compares two floats for approximate equality.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
