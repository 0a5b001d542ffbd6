use crate::consts::SHADOW_BIAS;
use crate::vector::Vector3;
use crate::ray::Ray;
use crate::geometry::Sphere;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is the offset from the ray origin, and `index` is the position of the hit
/// sphere in the slice that was searched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub index: usize,
}

/// Finds the nearest sphere hit by a ray.
///
/// This is a linear scan over every sphere. A sphere only replaces the
/// current best if it is strictly closer, so on exact ties the sphere that
/// comes first in `objects` wins. Returns `None` when nothing is hit.
pub fn nearest_intersection(objects: &[Sphere], ray: &Ray)
    -> Option<Intersection> {
    let mut nearest: Option<Intersection> = None;
    let mut min_t = f64::INFINITY;

    for (index, sphere) in objects.iter().enumerate() {
        let t = sphere.intersect(ray);
        if t < min_t {
            min_t = t;
            nearest = Some(Intersection { t, index });
        }
    }

    nearest
}

/// A record for computations associated with an `Intersection`.
#[derive(Clone, Debug)]
pub struct IntersectionComputation {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// Index of the object being intersected.
    pub index: usize,

    /// The point where the intersection occurs.
    pub point: Vector3,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Vector3,

    /// The outward normal of the sphere at `point`.
    pub normalv: Vector3,

    /// The intersection ray, reflected across the normal.
    pub reflectv: Vector3,
}

impl IntersectionComputation {
    /// Creates a new intersection computation, given a ray, the intersection
    /// and the sphere it refers to.
    pub fn new(r: &Ray, hit: &Intersection, obj: &Sphere)
        -> IntersectionComputation {
        let t = hit.t;
        let point = r.position(t);
        let normalv = obj.normal_at(point);
        let over_point = point + normalv * SHADOW_BIAS;
        let reflectv = r.direction.reflect(&normalv);

        IntersectionComputation {
            t,
            index: hit.index,
            point, over_point,
            normalv, reflectv,
        }
    }
}

#[cfg(test)]
use crate::feq;

#[cfg(test)]
fn sphere_at(z: f64, radius: f64) -> Sphere {
    Sphere::new(Vector3::new(0.0, 0.0, z), radius, Default::default())
}

#[test]
fn nearest_of_two_spheres() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, -1.0));
    let near = sphere_at(0.0, 1.0);
    let far = sphere_at(-10.0, 1.0);

    let hit = nearest_intersection(&[near, far], &r).unwrap();
    assert_eq!(hit.index, 0);
    assert!(feq(hit.t, 4.0));

    // Insertion order does not matter
    let hit = nearest_intersection(&[far, near], &r).unwrap();
    assert_eq!(hit.index, 1);
    assert!(feq(hit.t, 4.0));
}

#[test]
fn nearest_with_no_hit() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 1.0, 0.0));

    assert_eq!(nearest_intersection(&[sphere_at(0.0, 1.0)], &r), None);
    assert_eq!(nearest_intersection(&[], &r), None);
}

#[test]
fn nearest_tie_goes_to_first() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, -1.0));
    let a = sphere_at(0.0, 1.0);
    let mut b = a;
    b.material.reflection = 0.0;

    let hit = nearest_intersection(&[a, b], &r).unwrap();
    assert_eq!(hit.index, 0);
    let hit = nearest_intersection(&[b, a], &r).unwrap();
    assert_eq!(hit.index, 0);
}

#[test]
fn nearest_skips_sphere_containing_origin() {
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));
    let around = sphere_at(0.0, 1.0);
    let ahead = sphere_at(-5.0, 1.0);

    let hit = nearest_intersection(&[around, ahead], &r).unwrap();
    assert_eq!(hit.index, 1);
    assert!(feq(hit.t, 4.0));
}

#[test]
fn precompute_intersection_state() {
    let r = Ray::new(Vector3::new(0.0, 0.0, 5.0),
                     Vector3::new(0.0, 0.0, -1.0));
    let shape = sphere_at(0.0, 1.0);
    let i = Intersection { t: 4.0, index: 0 };

    let comps = IntersectionComputation::new(&r, &i, &shape);

    assert_eq!(comps.t, 4.0);
    assert_eq!(comps.index, 0);
    assert_eq!(comps.point, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(comps.normalv, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(comps.reflectv, Vector3::new(0.0, 0.0, 1.0));
    assert!(comps.over_point.z > comps.point.z);
    assert!(feq(comps.over_point.z - comps.point.z, SHADOW_BIAS));
}
