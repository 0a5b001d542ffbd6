use crate::color::Color;
use crate::vector::Vector3;

/// A point light.
///
/// The light carries separate ambient, diffuse and specular intensities,
/// each of which modulates the matching coefficient of a surface's
/// `Material`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Default for PointLight {
    fn default() -> PointLight {
        PointLight::new(Vector3::new(5.0, 5.0, 5.0))
    }
}

impl PointLight {
    /// Creates a white point light at `position`.
    pub fn new(position: Vector3) -> PointLight {
        PointLight {
            position,
            ambient: Color::white(),
            diffuse: Color::white(),
            specular: Color::white(),
        }
    }
}

/// A material record.
///
/// Materials use the attributes of the Blinn-Phong reflection model; ambient,
/// diffuse and specular colors plus a shininess exponent. `reflection` is the
/// fraction of light carried over to the next mirror bounce.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f64,
    pub reflection: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ambient: Color::rgb(0.1, 0.1, 0.1),
            diffuse: Color::rgb(0.7, 0.7, 0.7),
            specular: Color::white(),
            shininess: 100.0,
            reflection: 0.5,
        }
    }
}

/// Calculate the local illumination of a surface point.
///
/// `lightv` points from the surface toward the light, `normalv` is the unit
/// surface normal and `eyev` points from the surface toward the camera. All
/// three must be unit length.
///
/// The specular term uses the half-vector between `lightv` and `eyev`, raised
/// to a quarter of the material's shininess. Shadowing is decided by the
/// caller; this function always lights the point.
pub fn lighting(m: &Material, light: &PointLight,
    lightv: Vector3, normalv: Vector3, eyev: Vector3) -> Color {
    let ambient = m.ambient * light.ambient;

    // Surfaces facing away from the light get no diffuse light
    let light_dot_normal = f64::max(0.0, lightv.dot(&normalv));
    let diffuse = m.diffuse * light.diffuse * light_dot_normal;

    let halfv = (lightv + eyev).normalize();
    let normal_dot_half = f64::max(0.0, normalv.dot(&halfv));
    let specular = m.specular * light.specular
        * normal_dot_half.powf(m.shininess / 4.0);

    ambient + diffuse + specular
}

#[test]
fn eye_and_light_along_normal() {
    let m: Material = Default::default();
    let light = PointLight::new(Vector3::new(0.0, 0.0, -10.0));

    let lightv = Vector3::new(0.0, 0.0, -1.0);
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let eyev = Vector3::new(0.0, 0.0, -1.0);

    let res = lighting(&m, &light, lightv, normalv, eyev);
    assert_eq!(res, Color::rgb(1.8, 1.8, 1.8));
}

#[test]
fn light_offset_45() {
    let m: Material = Default::default();
    let light = PointLight::new(Vector3::new(0.0, 10.0, -10.0));

    let lightv = Vector3::new(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt() / 2.0));
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let eyev = Vector3::new(0.0, 0.0, -1.0);

    // 0.1 ambient + 0.7 * cos(45) diffuse + cos(22.5)^25 specular
    let res = lighting(&m, &light, lightv, normalv, eyev);
    assert_eq!(res, Color::rgb(0.73314, 0.73314, 0.73314));
}

#[test]
fn light_behind_surface() {
    let m: Material = Default::default();
    let light = PointLight::new(Vector3::new(0.0, 0.0, 10.0));

    let lightv = Vector3::new(0.0, 0.0, 1.0);
    let normalv = Vector3::new(0.0, 0.0, -1.0);
    let eyev = Vector3::new(0.0, 1.0, 0.0);

    // Both the light and the half-vector face away from the normal
    let res = lighting(&m, &light, lightv, normalv, eyev);
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn coefficients_modulate_light_channels() {
    let m = Material {
        ambient: Color::rgb(0.1, 0.0, 0.0),
        diffuse: Color::rgb(0.7, 0.0, 0.0),
        specular: Color::black(),
        ..Default::default()
    };

    let mut light = PointLight::new(Vector3::new(0.0, 0.0, -10.0));
    light.diffuse = Color::rgb(0.5, 1.0, 1.0);

    let v = Vector3::new(0.0, 0.0, -1.0);
    let res = lighting(&m, &light, v, v, v);
    assert_eq!(res, Color::rgb(0.45, 0.0, 0.0));
}
