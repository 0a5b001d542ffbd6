use std::time::{ Duration, Instant };

use anyhow::{ ensure, Context, Result };
use log::{ debug, info };
use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::scene::Scene;

/// Timing and sizing of a finished render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderStats {
    pub threads: usize,
    pub pixels: usize,
    pub elapsed: Duration,
}

/// Shades one row of pixels into `row`.
///
/// `row` must be exactly `scene.camera.hsize` pixels long.
pub fn render_row(scene: &Scene, py: usize, row: &mut [Color]) {
    let camera = &scene.camera;

    for (px, pixel) in row.iter_mut().enumerate() {
        let ray = camera.ray_for_pixel(px, py);
        *pixel = scene.world.color_at(ray, camera.position, scene.max_depth);
    }
}

/// Renders a scene using a pool of `threads` worker threads.
///
/// The canvas is split into rows and rows are handed out to the workers, so
/// every pixel is written exactly once by exactly one thread and no locking
/// is needed. Pixels do not depend on each other, so the result is the same
/// for any thread count.
pub fn parallel_render(scene: &Scene, threads: usize)
    -> Result<(Canvas, RenderStats)> {
    // There should be at least one thread to run workers.
    ensure!(threads > 0, "thread count must be at least 1");

    let width = scene.camera.hsize;
    let height = scene.camera.vsize;
    let mut canvas = Canvas::new(width, height);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("building render thread pool")?;

    info!("Rendering {}x{} using {} threads...", width, height, threads);
    debug!("{} spheres, max depth {}",
        scene.world.objects.len(), scene.max_depth);
    let start = Instant::now();

    // A zero-width canvas has no rows to hand out
    if width > 0 {
        pool.install(|| {
            canvas.pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(py, row)| render_row(scene, py, row));
        });
    }

    let elapsed = start.elapsed();
    info!("...done in {:.3} seconds.", elapsed.as_secs_f64());

    let stats = RenderStats { threads, pixels: width * height, elapsed };
    Ok((canvas, stats))
}

#[cfg(test)]
fn small_scene() -> Scene {
    Scene::default_scene(32, 18, 3)
}

#[test]
fn zero_threads_is_rejected() {
    assert!(parallel_render(&small_scene(), 0).is_err());
}

#[test]
fn render_matches_sequential_rows() {
    let scene = small_scene();
    let (canvas, stats) = parallel_render(&scene, 2).unwrap();

    assert_eq!(stats.pixels, 32 * 18);
    assert_eq!(stats.threads, 2);

    for py in 0..18 {
        let mut row = vec![Color::black(); 32];
        render_row(&scene, py, &mut row);
        assert_eq!(&canvas.pixels()[py * 32..(py + 1) * 32], &row[..]);
    }
}

#[test]
fn empty_canvas_renders() {
    let scene = Scene::default_scene(0, 0, 3);
    let (canvas, stats) = parallel_render(&scene, 4).unwrap();

    assert!(canvas.pixels().is_empty());
    assert_eq!(stats.pixels, 0);
}
