use crate::ray::Ray;
use crate::vector::Vector3;

/// The rectangle on the `z = 0` plane that the image maps onto.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Viewport {
    /// A viewport two units wide whose aspect ratio matches a `width` by
    /// `height` image.
    pub fn from_aspect(width: usize, height: usize) -> Viewport {
        let ratio = (width as f64) / (height as f64);

        Viewport {
            left: -1.0,
            top: 1.0 / ratio,
            right: 1.0,
            bottom: -1.0 / ratio,
        }
    }
}

/// A camera record for generating a canvas.
///
/// The camera sits at `position` and looks through the `viewport`; every
/// pixel's ray starts at the camera and passes through the center of that
/// pixel's cell on the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub position: Vector3,
    pub viewport: Viewport,
}

impl Camera {
    /// Creates a camera whose viewport follows the image's aspect ratio.
    pub fn new(hsize: usize, vsize: usize, position: Vector3) -> Camera {
        Camera {
            hsize,
            vsize,
            position,
            viewport: Viewport::from_aspect(hsize, vsize),
        }
    }

    /// The ray through the center of pixel column `px`, row `py`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        let vp = &self.viewport;

        let x = vp.left
            + (vp.right - vp.left) * (px as f64 + 0.5) / (self.hsize as f64);
        let y = vp.top
            + (vp.bottom - vp.top) * (py as f64 + 0.5) / (self.vsize as f64);

        let pixel = Vector3::new(x, y, 0.0);
        let direction = (pixel - self.position).normalize();

        Ray::new(self.position, direction)
    }
}

#[test]
fn viewport_matches_aspect() {
    let vp = Viewport::from_aspect(300, 200);

    assert_eq!(vp.left, -1.0);
    assert_eq!(vp.right, 1.0);
    assert!(crate::feq(vp.top, 2.0 / 3.0));
    assert!(crate::feq(vp.bottom, -2.0 / 3.0));
    assert!(crate::feq((vp.right - vp.left) / (vp.top - vp.bottom), 1.5));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, Vector3::new(0.0, 0.0, 1.0));
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(r.direction, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(2, 2, Vector3::new(0.0, 0.0, 1.0));
    let r = c.ray_for_pixel(0, 0);

    // Top-left cell center is (-0.5, 0.5, 0)
    let expected = Vector3::new(-0.5, 0.5, -1.0).normalize();
    assert_eq!(r.direction, expected);

    let r = c.ray_for_pixel(1, 1);
    let expected = Vector3::new(0.5, -0.5, -1.0).normalize();
    assert_eq!(r.direction, expected);
}

#[test]
fn rays_are_unit_length() {
    let c = Camera::new(16, 9, Vector3::new(0.0, 0.0, 1.0));

    for py in 0..c.vsize {
        for px in 0..c.hsize {
            assert!(crate::feq(c.ray_for_pixel(px, py).direction.length(), 1.0));
        }
    }
}
