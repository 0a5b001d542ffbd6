use sphere_tracer::camera::Camera;
use sphere_tracer::color::Color;
use sphere_tracer::geometry::Sphere;
use sphere_tracer::light::{ Material, PointLight };
use sphere_tracer::parallel::parallel_render;
use sphere_tracer::scene::Scene;
use sphere_tracer::vector::Vector3;
use sphere_tracer::world::World;

fn bits(c: &Color) -> [u64; 3] {
    [c.r.to_bits(), c.g.to_bits(), c.b.to_bits()]
}

#[test]
fn thread_count_does_not_change_the_image() {
    let mut scene = Scene::default_scene(64, 36, 3);
    scene.add_random_spheres(25, 42);

    let (single, _) = parallel_render(&scene, 1).unwrap();
    let (many, _) = parallel_render(&scene, 8).unwrap();

    assert_eq!(single.pixels().len(), many.pixels().len());
    for (a, b) in single.pixels().iter().zip(many.pixels()) {
        assert_eq!(bits(a), bits(b));
    }
}

#[test]
fn zero_depth_renders_black() {
    let scene = Scene::default_scene(24, 16, 0);
    let (canvas, _) = parallel_render(&scene, 3).unwrap();

    for p in canvas.pixels() {
        assert_eq!(bits(p), bits(&Color::black()));
    }
}

#[test]
fn default_scene_has_content() {
    let scene = Scene::default_scene(48, 27, 3);
    let (canvas, _) = parallel_render(&scene, 2).unwrap();

    assert!(canvas.pixels().iter().any(|p| p.r > 0.0));
    assert!(canvas.pixels().iter()
        .all(|p| (0.0..=1.0).contains(&p.r)
            && (0.0..=1.0).contains(&p.g)
            && (0.0..=1.0).contains(&p.b)));
}

#[test]
fn empty_world_renders_black() {
    let camera = Camera::new(10, 10, Vector3::new(0.0, 0.0, 1.0));
    let scene = Scene::new(World::empty(), camera, 3);
    let (canvas, _) = parallel_render(&scene, 2).unwrap();

    assert!(canvas.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn overexposed_pixels_saturate_at_one() {
    // A sphere filling the view with an ambient term well above 1.0
    let glow = Sphere::new(Vector3::new(0.0, 0.0, -100.0), 90.0, Material {
        ambient: Color::rgb(4.0, 0.25, 1.5),
        diffuse: Color::black(),
        specular: Color::black(),
        shininess: 10.0,
        reflection: 0.0,
    });

    let world = World::new(vec![glow], PointLight::new(Vector3::new(0.0, 0.0, 2.0)));
    let camera = Camera::new(8, 8, Vector3::new(0.0, 0.0, 1.0));
    let scene = Scene::new(world, camera, 2);
    let (canvas, _) = parallel_render(&scene, 2).unwrap();

    for p in canvas.pixels() {
        assert_eq!(p.r, 1.0);
        assert_eq!(p.b, 1.0);
        assert!((p.g - 0.25).abs() < 1e-12);
    }
}

#[test]
fn ppm_round_trip_on_disk() {
    let scene = Scene::default_scene(12, 8, 2);
    let (canvas, _) = parallel_render(&scene, 2).unwrap();

    let path = std::env::temp_dir().join("sphere_tracer_render_test.ppm");
    canvas.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(text.starts_with("P3\n12 8\n255\n"));
    assert_eq!(text.split_whitespace().count(), 4 + 12 * 8 * 3);
}
