use std::ops::{ Add, Sub, Neg, Mul };

use crate::feq;

/// A three-component vector.
///
/// Used for both points and directions; the renderer never needs to tell
/// them apart, so there is no homogeneous `w` component.
///
/// # Examples
///
/// ```
/// use sphere_tracer::vector::Vector3;
///
/// let v = Vector3::new(3.0, 0.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.normalize(), Vector3::new(0.6, 0.0, 0.8));
/// ```
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Approximate equality, component-wise.
///
/// Two vectors are equal if each pair of components differs by less than
/// `FEQ_EPSILON`. Compare the fields directly when exact equality matters.
impl PartialEq for Vector3 {
    fn eq(&self, other: &Vector3) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    pub fn zero() -> Vector3 {
        Vector3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn length(&self) -> f64 {
        f64::sqrt(self.dot(self))
    }

    /// Scales a vector to unit length.
    ///
    /// A zero-length vector yields NaN components. Callers are expected not
    /// to normalize degenerate vectors.
    pub fn normalize(&self) -> Vector3 {
        let len = self.length();

        Vector3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    /// Component-wise product of two vectors.
    pub fn hadamard(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Reflects a vector across a normal.
    ///
    /// `normal` must be unit length.
    pub fn reflect(&self, normal: &Vector3) -> Vector3 {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Vector3 {
        Vector3 { x: v[0], y: v[1], z: v[2] }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use sphere_tracer::vector::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(v * 2.0, Vector3::new(2.0, 4.0, 6.0));
/// ```
impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a vector.
impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

/* Tests */

#[test]
fn add_vectors() {
    let a1 = Vector3::new(3.0, -2.0, 5.0);
    let a2 = Vector3::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Vector3::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Vector3::new(3.0, 2.0, 1.0);
    let p2 = Vector3::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vector3::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_vector() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Vector3::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_scalar_both_sides() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(a * 3.5, Vector3::new(3.5, -7.0, 10.5));
    assert_eq!(0.5 * a, Vector3::new(0.5, -1.0, 1.5));
}

#[test]
fn hadamard_vectors() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(2.0, 0.5, -1.0);

    assert_eq!(a.hadamard(&b), Vector3::new(2.0, 1.0, -3.0));
}

#[test]
fn length_pos_and_neg() {
    assert_eq!(Vector3::new(1.0, 2.0, 3.0).length(), f64::sqrt(14.0));
    assert_eq!(Vector3::new(-1.0, -2.0, -3.0).length(), f64::sqrt(14.0));
}

#[test]
fn normalize_dirty() {
    let v = Vector3::new(1.0, 2.0, 3.0);
    let e = Vector3::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
    assert!(feq(v.normalize().length(), 1.0));
}

#[test]
fn normalize_zero_is_nan() {
    let n = Vector3::zero().normalize();

    assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
}

#[test]
fn dot_vectors() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn reflect_45() {
    let v = Vector3::new(1.0, -1.0, 0.0);
    let n = Vector3::new(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Vector3::new(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Vector3::new(0.0, -1.0, 0.0);
    let n = Vector3::new(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n), Vector3::new(1.0, 0.0, 0.0));
}
