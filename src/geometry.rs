use crate::vector::Vector3;
use crate::ray::Ray;
use crate::light::Material;

/// A sphere primitive.
///
/// Spheres are plain values; a `World` owns them in a `Vec` and refers to
/// them by index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64, material: Material) -> Sphere {
        Sphere { center, radius, material }
    }

    /// Distance along `ray` to this sphere, or infinity on a miss.
    ///
    /// See `intersect_sphere`.
    pub fn intersect(&self, ray: &Ray) -> f64 {
        intersect_sphere(self.center, self.radius, ray.origin, ray.direction)
    }

    /// The outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vector3) -> Vector3 {
        (point - self.center).normalize()
    }
}

/// Checks whether a ray intersects a sphere.
///
/// Solves the quadratic for the ray parameter `t` and returns the nearer
/// root. Only hits in front of the ray count, and only when *both* roots are
/// positive: a ray whose origin lies inside the sphere reports a miss. Misses
/// are `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use sphere_tracer::geometry::intersect_sphere;
/// use sphere_tracer::vector::Vector3;
///
/// let t = intersect_sphere(
///     Vector3::zero(), 1.0,
///     Vector3::new(0.0, 0.0, 5.0),
///     Vector3::new(0.0, 0.0, -1.0),
/// );
/// assert_eq!(t, 4.0);
/// ```
pub fn intersect_sphere(center: Vector3, radius: f64,
    origin: Vector3, direction: Vector3) -> f64 {
    let sphere_to_ray = origin - center;

    let a = direction.dot(&direction);
    let b = 2.0 * direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - radius * radius;

    let discriminant = b * b - (4.0 * a * c);

    if discriminant < 0.0 {
        return f64::INFINITY;
    }

    let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
    let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

    if t1 > 0.0 && t2 > 0.0 {
        t1.min(t2)
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
use crate::feq;

#[cfg(test)]
fn unit_sphere() -> Sphere {
    Sphere::new(Vector3::zero(), 1.0, Default::default())
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, -1.0));

    for &radius in &[0.5, 1.0, 2.5] {
        let s = Sphere::new(Vector3::zero(), radius, Default::default());
        assert!(feq(s.intersect(&r), 5.0 - radius));
    }
}

#[test]
fn ray_pointing_away_misses() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, 1.0));
    let s = unit_sphere();

    assert_eq!(s.intersect(&r), f64::INFINITY);
}

#[test]
fn ray_misses_offset_sphere() {
    let r = Ray::new(Vector3::new(0.0, 2.0, -5.0),
                     Vector3::new(0.0, 0.0, 1.0));
    let s = unit_sphere();

    assert_eq!(s.intersect(&r), f64::INFINITY);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray::new(Vector3::new(0.0, 1.0, -5.0),
                     Vector3::new(0.0, 0.0, 1.0));
    let s = unit_sphere();
    let t = s.intersect(&r);

    assert!(t.is_finite());
    assert!(feq(t, 5.0));
}

#[test]
fn ray_inside_sphere_is_a_miss() {
    // Roots are -1 and 1; a hit from inside is deliberately not reported.
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));
    let s = unit_sphere();

    assert_eq!(s.intersect(&r), f64::INFINITY);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, 1.0));
    let s = Sphere::new(Vector3::zero(), 1.0, Default::default());

    assert_eq!(s.intersect(&r), f64::INFINITY);
}

#[test]
fn degenerate_radius_does_not_panic() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, -1.0));

    // A zero radius collapses to a tangent point; a negative radius squares
    // to the same thing. Neither may crash.
    let zero = intersect_sphere(Vector3::zero(), 0.0, r.origin, r.direction);
    let neg = intersect_sphere(Vector3::zero(), -1.0, r.origin, r.direction);

    assert!(feq(zero, 5.0));
    assert!(feq(neg, 4.0));
}

#[test]
fn normal_on_sphere_axes() {
    let s = unit_sphere();

    assert_eq!(s.normal_at(Vector3::new(1.0, 0.0, 0.0)),
        Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Vector3::new(0.0, 1.0, 0.0)),
        Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Vector3::new(0.0, 0.0, 1.0)),
        Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_translated() {
    let s = Sphere::new(Vector3::new(0.0, 1.0, 0.0), 1.0, Default::default());
    let n = s.normal_at(Vector3::new(0.0, 1.70711, -0.70711));

    assert_eq!(n, Vector3::new(0.0, 0.70711, -0.70711));
}
