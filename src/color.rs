use std::ops::{ Add, AddAssign, Mul };

use crate::feq;

/// A linear RGB color.
///
/// Material coefficients and light intensities are colors too; a channel of
/// a coefficient is expected, but not required, to lie in `[0, 1]`. Colors
/// accumulated by the renderer may exceed 1.0 until they are clamped.
///
/// # Examples
///
/// Modulate a white light by a red surface:
///
/// ```
/// # use sphere_tracer::color::Color;
/// let red = Color::rgb(0.7, 0.0, 0.0);
/// let light = Color::white();
/// assert_eq!(red * light, Color::rgb(0.7, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Vector3`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color { r: v[0], g: v[1], b: v[2] }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color {
            r: 0.0,
            g: 0.0,
            b: 0.0
        }
    }

    /// The color white.
    pub fn white() -> Color {
        Color {
            r: 1.0,
            g: 1.0,
            b: 1.0
        }
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// The hadamard product multiplies each component of the two colors, and
    /// yields a new color containing those products.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        let r = c1.r * c2.r;
        let g = c1.g * c2.g;
        let b = c1.b * c2.b;

        Color { r, g, b }
    }

    /// Saturates each channel to `[0, 1]`.
    ///
    /// Values above 1.0 become exactly 1.0; no tone mapping is applied. A NaN
    /// channel stays NaN.
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Converts a color to 8-bit channels, clamping first.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();

        [
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
        ]
    }
}

/// Adds two colors together.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl AddAssign<Color> for Color {
    fn add_assign(&mut self, other: Color) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
    }
}

/// Multiplies a color by a scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color {
            r: self * other.r,
            g: self * other.g,
            b: self * other.b,
        }
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `Color::hadamard(&c1, &c2)`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn add_assign_colors() {
    let mut c = Color::black();
    c += Color::rgb(0.1, 0.2, 0.3);
    c += Color::rgb(0.1, 0.2, 0.3);

    assert_eq!(c, Color::rgb(0.2, 0.4, 0.6));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn hadamard_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn clamp_saturates_exactly() {
    let c = Color::rgb(1.7, 0.5, -0.2).clamp();

    assert_eq!(c.r, 1.0);
    assert_eq!(c.g, 0.5);
    assert_eq!(c.b, 0.0);
}

#[test]
fn to_rgb8_scales_and_truncates() {
    assert_eq!(Color::rgb(1.0, 0.5, 2.0).to_rgb8(), [255, 127, 255]);
    assert_eq!(Color::black().to_rgb8(), [0, 0, 0]);
}
