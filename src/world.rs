use crate::ray::Ray;
use crate::vector::Vector3;
use crate::color::Color;
use crate::light::{ PointLight, lighting };
use crate::geometry::Sphere;
use crate::intersect::{ Intersection, IntersectionComputation,
    nearest_intersection };

/// A world with objects and light.
///
/// Objects are spheres held in an ordered `Vec`; everything that refers to
/// a sphere does so by its index. A world is never mutated while a render
/// is running, so it can be shared between worker threads by reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    pub objects: Vec<Sphere>,
    pub light_source: PointLight,
}

/// The outcome of tracing one camera ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Trace {
    /// Accumulated color, before clamping.
    pub color: Color,

    /// How many surface hits were shaded.
    pub bounces: usize,
}

impl World {
    pub fn new(objects: Vec<Sphere>, light_source: PointLight) -> World {
        World { objects, light_source }
    }

    /// Creates an empty world with no objects and the default light source.
    pub fn empty() -> World {
        World { objects: Vec::new(), light_source: Default::default() }
    }

    /// Gets the nearest intersection of a ray with the world's objects.
    pub fn intersect(&self, r: &Ray) -> Option<Intersection> {
        nearest_intersection(&self.objects, r)
    }

    /// Determines whether an intersection is shadowed.
    ///
    /// The shadow ray starts at the biased `over_point` and heads along
    /// `lightv`. Anything it hits closer than the light (measured from the
    /// unbiased surface point) casts a shadow.
    pub fn is_shadowed(&self, comps: &IntersectionComputation,
        lightv: Vector3) -> bool {
        let distance = (self.light_source.position - comps.point).length();
        let r = Ray::new(comps.over_point, lightv);

        match self.intersect(&r) {
            Some(i) => i.t < distance,
            None => false,
        }
    }

    /// Traces a ray through at most `max_depth` mirror bounces.
    ///
    /// Each bounce adds the local illumination of the hit surface, scaled by
    /// the product of the reflection coefficients of every surface hit
    /// before it. Tracing stops at the first miss, and also at the first
    /// shadowed hit: a shadowed surface contributes nothing and nothing
    /// behind it is traced.
    ///
    /// `eye` is the camera position. Specular highlights on every bounce are
    /// computed relative to it rather than to the bounce's ray origin.
    pub fn trace(&self, ray: Ray, eye: Vector3, max_depth: usize) -> Trace {
        let mut color = Color::black();
        let mut reflection = 1.0;
        let mut bounces = 0;
        let mut ray = ray;

        for _ in 0..max_depth {
            let hit = match self.intersect(&ray) {
                Some(hit) => hit,
                None => break,
            };

            let obj = &self.objects[hit.index];
            let comps = IntersectionComputation::new(&ray, &hit, obj);
            let lightv = (self.light_source.position - comps.over_point)
                .normalize();

            if self.is_shadowed(&comps, lightv) {
                break;
            }

            let eyev = (eye - comps.point).normalize();
            let illumination = lighting(&obj.material, &self.light_source,
                lightv, comps.normalv, eyev);

            color += reflection * illumination;
            bounces += 1;

            reflection *= obj.material.reflection;
            ray = Ray::new(comps.over_point, comps.reflectv);
        }

        Trace { color, bounces }
    }

    /// Determines the final, clamped color seen along a camera ray.
    pub fn color_at(&self, r: Ray, eye: Vector3, max_depth: usize) -> Color {
        self.trace(r, eye, max_depth).color.clamp()
    }
}

#[cfg(test)]
use crate::feq;

#[cfg(test)]
fn sphere(x: f64, y: f64, z: f64, radius: f64) -> Sphere {
    Sphere::new(Vector3::new(x, y, z), radius, Default::default())
}

#[cfg(test)]
fn camera_ray() -> (Ray, Vector3) {
    let eye = Vector3::new(0.0, 0.0, 5.0);
    (Ray::new(eye, Vector3::new(0.0, 0.0, -1.0)), eye)
}

#[test]
fn color_ray_miss() {
    let w = World::new(vec![sphere(0.0, 0.0, 0.0, 1.0)], Default::default());
    let eye = Vector3::new(0.0, 0.0, 5.0);
    let r = Ray::new(eye, Vector3::new(0.0, 1.0, 0.0));

    let t = w.trace(r, eye, 3);
    assert_eq!(t.color, Color::black());
    assert_eq!(t.bounces, 0);
}

#[test]
fn empty_world_is_black() {
    let w = World::empty();
    let (r, eye) = camera_ray();

    assert_eq!(w.color_at(r, eye, 3), Color::black());
}

#[test]
fn zero_depth_is_black() {
    let w = World::new(vec![sphere(0.0, 0.0, 0.0, 1.0)], Default::default());
    let (r, eye) = camera_ray();

    let t = w.trace(r, eye, 0);
    assert_eq!(t.color.r, 0.0);
    assert_eq!(t.color.g, 0.0);
    assert_eq!(t.color.b, 0.0);
    assert_eq!(t.bounces, 0);
}

#[test]
fn single_bounce_matches_lighting() {
    let light = PointLight::new(Vector3::new(0.0, 10.0, 10.0));
    let w = World::new(vec![sphere(0.0, 0.0, 0.0, 1.0)], light);
    let (r, eye) = camera_ray();

    // Hit at (0, 0, 1) with normal +z, looking straight back at the eye
    let point = Vector3::new(0.0, 0.0, 1.0);
    let normalv = Vector3::new(0.0, 0.0, 1.0);
    let lightv = (light.position - point).normalize();
    let eyev = Vector3::new(0.0, 0.0, 1.0);
    let expected = lighting(&w.objects[0].material, &light,
        lightv, normalv, eyev);

    let t = w.trace(r, eye, 1);
    assert_eq!(t.bounces, 1);
    assert_eq!(t.color, expected);
}

#[test]
fn shade_intersection_in_shadow() {
    let light = PointLight::new(Vector3::new(0.0, 10.0, 10.0));
    let target = sphere(0.0, 0.0, 0.0, 1.0);
    // Sits on the segment from (0, 0, 1) to the light, off the camera axis
    let occluder = sphere(0.0, 5.0, 5.5, 1.0);
    let (r, eye) = camera_ray();

    let lit = World::new(vec![target], light).trace(r, eye, 1);
    let shadowed = World::new(vec![target, occluder], light).trace(r, eye, 1);

    let ambient = target.material.ambient * light.ambient;
    assert!(lit.color.r > ambient.r);

    // No diffuse or specular survives. The shadowed bounce is dropped
    // entirely, so the ambient term goes with it.
    assert_eq!(shadowed.bounces, 0);
    assert_eq!(shadowed.color, Color::black());
}

#[test]
fn shadow_ends_the_reflection_chain() {
    let light = PointLight::new(Vector3::new(0.0, 10.0, 10.0));
    let occluder = sphere(0.0, 5.0, 5.5, 1.0);
    let mirror = sphere(0.0, 0.0, 0.0, 1.0);
    let (r, eye) = camera_ray();

    let w = World::new(vec![mirror, occluder], light);
    assert_eq!(w.trace(r, eye, 5).bounces, 0);
}

#[test]
fn object_behind_light_casts_no_shadow() {
    let light = PointLight::new(Vector3::new(0.0, 10.0, 10.0));
    let target = sphere(0.0, 0.0, 0.0, 1.0);
    let beyond = sphere(0.0, 20.0, 19.0, 1.0);
    let (r, eye) = camera_ray();

    let lit = World::new(vec![target], light).trace(r, eye, 1);
    let also_lit = World::new(vec![target, beyond], light).trace(r, eye, 1);

    assert_eq!(lit, also_lit);
}

#[cfg(test)]
fn facing_mirrors(reflection: f64) -> World {
    let mut a = sphere(0.0, 0.0, 0.0, 1.0);
    a.material.reflection = reflection;
    let mut b = sphere(0.0, 0.0, 10.0, 1.0);
    b.material.reflection = reflection;

    World::new(vec![a, b], PointLight::new(Vector3::new(0.0, 5.0, 5.0)))
}

#[test]
fn second_bounce_scaled_by_reflection() {
    let k = 0.3;
    let w = facing_mirrors(k);
    let (r, eye) = camera_ray();

    let one = w.trace(r, eye, 1);
    let two = w.trace(r, eye, 2);
    assert_eq!(one.bounces, 1);
    assert_eq!(two.bounces, 2);

    // Trace the reflected ray on its own, unattenuated
    let hit = w.intersect(&r).unwrap();
    let comps = IntersectionComputation::new(&r, &hit, &w.objects[hit.index]);
    let reflected = Ray::new(comps.over_point, comps.reflectv);
    let bounce = w.trace(reflected, eye, 1);
    assert_eq!(bounce.bounces, 1);

    let second = Color::rgb(
        two.color.r - one.color.r,
        two.color.g - one.color.g,
        two.color.b - one.color.b,
    );
    assert!(second.r > 0.0);
    assert!(feq(second.r, k * bounce.color.r));
    assert!(feq(second.g, k * bounce.color.g));
    assert!(feq(second.b, k * bounce.color.b));
}

#[test]
fn facing_mirrors_stop_at_max_depth() {
    let w = facing_mirrors(0.9);
    let (r, eye) = camera_ray();

    for depth in 0..8 {
        assert_eq!(w.trace(r, eye, depth).bounces, depth);
    }
}

#[test]
fn color_at_clamps_bright_pixels() {
    let mut bright = sphere(0.0, 0.0, 0.0, 1.0);
    bright.material.ambient = Color::rgb(3.0, 0.2, 1.0);
    bright.material.specular = Color::black();
    bright.material.diffuse = Color::black();

    let w = World::new(vec![bright], Default::default());
    let (r, eye) = camera_ray();

    assert!(w.trace(r, eye, 1).color.r > 1.0);

    let c = w.color_at(r, eye, 1);
    assert_eq!(c.r, 1.0);
    assert_eq!(c.b, 1.0);
    assert!(feq(c.g, 0.2));
}
