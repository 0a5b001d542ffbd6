use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use anyhow::{ Context, Result };
use image::RgbImage;

use crate::color::Color;

/// A canvas for drawing pixels.
///
/// This structure stores the results of the ray tracer: one linear RGB color
/// per pixel, row-major. Once rendering finishes, the `Canvas` can be saved
/// to an image file.
///
/// PPM files are written by hand; every other format goes through the
/// `image` crate.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    ///
    /// This function allocates a `Vec<Color>` of size `width * height`, which
    /// may take up a decent amount of memory, depending on image size.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// All pixels, row after row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access to all pixels, row after row.
    ///
    /// Splitting this slice into rows of `width` gives each row to exactly
    /// one writer.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Converts the canvas to an 8-bit RGB image.
    ///
    /// Fails if the canvas is too large for the `image` crate's `u32`
    /// dimensions.
    pub fn to_image(&self) -> Result<RgbImage> {
        let width = u32::try_from(self.width)
            .context("canvas width does not fit an 8-bit image")?;
        let height = u32::try_from(self.height)
            .context("canvas height does not fit an 8-bit image")?;

        let mut buf = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in self.pixels.iter() {
            buf.extend_from_slice(&pixel.to_rgb8());
        }

        RgbImage::from_raw(width, height, buf)
            .context("canvas does not fit an 8-bit image")
    }

    /// Saves a canvas to an image file.
    ///
    /// The format follows the file extension: `.ppm` is written as plain
    /// text PPM, anything else is encoded by the `image` crate (PNG for
    /// `.png`).
    pub fn save(&self, path: &Path) -> Result<()> {
        let is_ppm = path.extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            self.write_ppm(&mut out)
                .with_context(|| format!("writing {}", path.display()))?;
            out.flush()?;
        } else {
            self.to_image()?.save(path)
                .with_context(|| format!("encoding {}", path.display()))?;
        }

        Ok(())
    }

    /// Writes the canvas as a plain text (P3) PPM image.
    ///
    /// Lines in the PPM file are at most 70 columns wide. A channel value
    /// that would cross the 70 column mark moves to the next line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        // Write PPM header, as well as metadata
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?; // Maximum color value

        // Write channel values, starting a new line whenever the next value
        // and its separator would pass column 70
        let mut col = 0;
        for pixel in self.pixels.iter() {
            for value in pixel.to_rgb8().iter() {
                let text = value.to_string();

                if col > 0 && col + 1 + text.len() > 70 {
                    writeln!(out)?;
                    col = 0;
                }

                if col > 0 {
                    write!(out, " ")?;
                    col += 1;
                }

                write!(out, "{}", text)?;
                col += text.len();
            }
        }

        // Terminate the PPM file with a newline
        writeln!(out)?;

        Ok(())
    }
}

#[cfg(test)]
fn set(c: &mut Canvas, x: usize, y: usize, color: Color) {
    let width = c.width;
    c.pixels_mut()[y * width + x] = color;
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.pixels().len(), 200);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn ppm_header_and_pixels() {
    let mut c = Canvas::new(2, 2);
    set(&mut c, 0, 0, Color::rgb(1.5, 0.0, 0.0));
    set(&mut c, 1, 1, Color::rgb(0.0, 0.5, 1.0));

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text, "P3\n2 2\n255\n255 0 0 0 0 0 0 0 0 0 127 255\n");
}

#[test]
fn ppm_lines_stay_under_70_columns() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            set(&mut c, x, y, Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.lines().all(|line| line.len() <= 70));
    assert_eq!(text.split_whitespace().count(), 4 + 60);
}

#[test]
fn ppm_wraps_three_digit_values_at_70() {
    // Seventeen 3-digit values fill 67 columns; the next one must wrap
    let mut c = Canvas::new(6, 1);
    for x in 0..6 {
        set(&mut c, x, 0, Color::white());
    }

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().skip(3).collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), 67);
    assert_eq!(lines[1], "255");
}

#[test]
fn to_image_matches_canvas() {
    let mut c = Canvas::new(3, 2);
    set(&mut c, 1, 0, Color::rgb(1.0, 0.0, 0.5));

    let img = c.to_image().unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 0).0, [255, 0, 127]);
    assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0]);
}

#[test]
fn to_image_rejects_mismatched_buffer() {
    let mut c = Canvas::new(3, 2);
    c.width = 4;

    assert!(c.to_image().is_err());
}
