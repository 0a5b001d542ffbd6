use std::fs;
use std::path::Path;

use anyhow::{ ensure, Context, Result };
use log::{ debug, warn };
use rand::{ Rng, SeedableRng };
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::color::Color;
use crate::vector::Vector3;
use crate::light::{ Material, PointLight };
use crate::geometry::Sphere;
use crate::world::World;
use crate::camera::Camera;
use crate::consts::REFLECTION_RECURSION_DEPTH;

/// Everything needed to render an image.
///
/// A scene is built once and then only read, by any number of threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
    pub max_depth: usize,
}

/// Shorthand for the spheres of the built-in scene.
fn sphere(center: [f64; 3], radius: f64, ambient: [f64; 3],
    diffuse: [f64; 3], shininess: f64, reflection: f64) -> Sphere {
    Sphere::new(center.into(), radius, Material {
        ambient: ambient.into(),
        diffuse: diffuse.into(),
        specular: Color::white(),
        shininess,
        reflection,
    })
}

impl Scene {
    pub fn new(world: World, camera: Camera, max_depth: usize) -> Scene {
        Scene { world, camera, max_depth }
    }

    /// The built-in scene.
    ///
    /// Two large red spheres flank a small magenta one, with a small green
    /// sphere in front. Three teal spheres sit behind the camera and only
    /// show up in reflections, and a huge grey sphere acts as the floor.
    pub fn default_scene(width: usize, height: usize, max_depth: usize)
        -> Scene {
        let camera = Camera::new(width, height, Vector3::new(0.0, 0.0, 1.0));
        let light_source = PointLight::new(Vector3::new(5.0, 5.0, 5.0));

        let objects = vec![
            sphere([-1.0, 0.0, -1.0], 0.7,
                [0.1, 0.0, 0.0], [0.7, 0.0, 0.0], 100.0, 0.5),
            sphere([1.0, 0.0, -1.0], 0.7,
                [0.1, 0.0, 0.0], [0.7, 0.0, 0.0], 100.0, 0.5),
            sphere([0.1, -0.4, -1.08], 0.2,
                [0.1, 0.0, 0.1], [0.7, 0.0, 0.7], 100.0, 0.5),
            sphere([-0.3, 0.0, 0.0], 0.15,
                [0.0, 0.1, 0.0], [0.0, 0.6, 0.0], 100.0, 0.5),

            // Behind the camera
            sphere([-2.0, 0.7, 1.0], 0.2,
                [0.1, 0.5, 0.5], [0.5, 0.5, 0.5], 50.0, 0.2),
            sphere([-1.0, 0.0, 1.0], 0.2,
                [0.1, 0.5, 0.5], [0.5, 0.5, 0.5], 50.0, 0.2),
            sphere([-0.5, 0.5, 1.0], 0.2,
                [0.1, 0.5, 0.5], [0.5, 0.5, 0.5], 50.0, 0.2),

            // Floor
            sphere([0.0, -9000.0, 0.0], 9000.0 - 0.7,
                [0.1, 0.1, 0.1], [0.6, 0.6, 0.6], 100.0, 0.5),
        ];

        Scene {
            world: World::new(objects, light_source),
            camera,
            max_depth,
        }
    }

    /// Adds `n` randomly placed spheres in front of the camera.
    ///
    /// Useful for giving the renderer more work. The same `seed` always
    /// produces the same spheres.
    pub fn add_random_spheres(&mut self, n: usize, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..n {
            let center = Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                -1.0 - rng.gen_range(0.0..1.0),
            );
            let radius = rng.gen_range(0.05..0.15);
            let color = Color::rgb(rng.gen(), rng.gen(), rng.gen());

            self.world.objects.push(Sphere::new(center, radius, Material {
                ambient: color * 0.2,
                diffuse: color * 0.7,
                specular: Color::white(),
                shininess: 100.0,
                reflection: 0.5,
            }));
        }

        debug!("added {} random spheres (seed {})", n, seed);
    }

    /// Reads a JSON scene description from a file.
    ///
    /// See `SceneJson` for the format. The image size is not part of the
    /// description; the viewport is derived from `width` and `height`.
    pub fn load(path: &Path, width: usize, height: usize) -> Result<Scene> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;

        Scene::from_json(&text, width, height)
            .with_context(|| format!("parsing scene {}", path.display()))
    }

    /// Parses a JSON scene description.
    pub fn from_json(text: &str, width: usize, height: usize) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        scene_json.into_scene(width, height)
    }
}

/// The on-disk form of a scene.
///
/// ```json
/// {
///   "camera": [0, 0, 1],
///   "max_depth": 3,
///   "light": {
///     "position": [5, 5, 5],
///     "ambient": [1, 1, 1], "diffuse": [1, 1, 1], "specular": [1, 1, 1]
///   },
///   "spheres": [
///     { "center": [0, 0, -1], "radius": 0.7,
///       "ambient": [0.1, 0, 0], "diffuse": [0.7, 0, 0],
///       "specular": [1, 1, 1], "shininess": 100, "reflection": 0.5 }
///   ]
/// }
/// ```
///
/// `max_depth` is optional. Light colors default to white.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneJson {
    camera: Vec<f64>,
    max_depth: Option<usize>,
    light: LightJson,
    spheres: Vec<SphereJson>,
}

#[derive(Clone, Debug, Deserialize)]
struct LightJson {
    position: Vec<f64>,
    ambient: Option<Vec<f64>>,
    diffuse: Option<Vec<f64>>,
    specular: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Deserialize)]
struct SphereJson {
    center: Vec<f64>,
    radius: f64,
    ambient: Vec<f64>,
    diffuse: Vec<f64>,
    specular: Vec<f64>,
    shininess: f64,
    reflection: f64,
}

/// Reads a three-element array, naming `what` in the error.
fn triple(v: &[f64], what: &str) -> Result<[f64; 3]> {
    ensure!(v.len() == 3, "{} must have 3 components, found {}", what, v.len());
    Ok([v[0], v[1], v[2]])
}

fn light_color(v: &Option<Vec<f64>>, what: &str) -> Result<Color> {
    match v {
        Some(v) => Ok(triple(v, what)?.into()),
        None => Ok(Color::white()),
    }
}

impl SceneJson {
    fn into_scene(self, width: usize, height: usize) -> Result<Scene> {
        let position: Vector3 = triple(&self.camera, "camera")?.into();
        let camera = Camera::new(width, height, position);

        let light_source = PointLight {
            position: triple(&self.light.position, "light position")?.into(),
            ambient: light_color(&self.light.ambient, "light ambient")?,
            diffuse: light_color(&self.light.diffuse, "light diffuse")?,
            specular: light_color(&self.light.specular, "light specular")?,
        };

        let mut objects = Vec::with_capacity(self.spheres.len());
        for (i, s) in self.spheres.into_iter().enumerate() {
            objects.push(s.into_sphere().with_context(|| format!("sphere {}", i))?);
        }

        if objects.is_empty() {
            warn!("scene has no spheres; the image will be black");
        }

        let max_depth = self.max_depth.unwrap_or(REFLECTION_RECURSION_DEPTH);
        Ok(Scene::new(World::new(objects, light_source), camera, max_depth))
    }
}

impl SphereJson {
    fn into_sphere(self) -> Result<Sphere> {
        ensure!(self.radius > 0.0, "radius must be positive, found {}", self.radius);
        ensure!(self.shininess > 0.0,
            "shininess must be positive, found {}", self.shininess);

        if !(0.0..=1.0).contains(&self.reflection) {
            warn!("reflection {} is outside [0, 1]", self.reflection);
        }

        Ok(Sphere::new(triple(&self.center, "center")?.into(), self.radius,
            Material {
                ambient: triple(&self.ambient, "ambient")?.into(),
                diffuse: triple(&self.diffuse, "diffuse")?.into(),
                specular: triple(&self.specular, "specular")?.into(),
                shininess: self.shininess,
                reflection: self.reflection,
            }))
    }
}

#[cfg(test)]
const ONE_SPHERE: &str = r#"{
    "camera": [0, 0, 1],
    "light": { "position": [5, 5, 5], "diffuse": [0.5, 0.5, 0.5] },
    "spheres": [
        { "center": [0, 0, -1], "radius": 0.7,
          "ambient": [0.1, 0, 0], "diffuse": [0.7, 0, 0],
          "specular": [1, 1, 1], "shininess": 100, "reflection": 0.5 }
    ]
}"#;

#[test]
fn default_scene_layout() {
    let s = Scene::default_scene(300, 200, 3);

    assert_eq!(s.world.objects.len(), 8);
    assert_eq!(s.camera.position, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(s.world.light_source.position, Vector3::new(5.0, 5.0, 5.0));
    assert!(crate::feq(s.camera.viewport.top, 2.0 / 3.0));
    assert_eq!(s.max_depth, 3);
}

#[test]
fn random_spheres_are_seeded() {
    let mut a = Scene::default_scene(30, 20, 3);
    let mut b = Scene::default_scene(30, 20, 3);
    a.add_random_spheres(20, 7);
    b.add_random_spheres(20, 7);

    assert_eq!(a.world.objects.len(), 28);
    assert_eq!(a, b);

    for s in &a.world.objects[8..] {
        assert!(s.radius >= 0.05 && s.radius < 0.15);
        assert!(s.center.z <= -1.0 && s.center.z > -2.0);
    }
}

#[test]
fn parse_json_scene() {
    let s = Scene::from_json(ONE_SPHERE, 40, 20).unwrap();

    assert_eq!(s.max_depth, REFLECTION_RECURSION_DEPTH);
    assert_eq!(s.camera.hsize, 40);
    assert_eq!(s.world.objects.len(), 1);
    assert_eq!(s.world.objects[0].radius, 0.7);
    assert_eq!(s.world.objects[0].material.diffuse, Color::rgb(0.7, 0.0, 0.0));
    assert_eq!(s.world.light_source.ambient, Color::white());
    assert_eq!(s.world.light_source.diffuse, Color::rgb(0.5, 0.5, 0.5));
}

#[test]
fn reject_bad_json_scenes() {
    let short_center = ONE_SPHERE.replace("\"center\": [0, 0, -1]", "\"center\": [0, 0]");
    assert!(Scene::from_json(&short_center, 4, 4).is_err());

    let zero_radius = ONE_SPHERE.replace("0.7,", "0.0,");
    assert!(Scene::from_json(&zero_radius, 4, 4).is_err());

    assert!(Scene::from_json("{ \"camera\": [0, 0, 1] }", 4, 4).is_err());
}
