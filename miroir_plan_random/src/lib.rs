use miroir_plan::{scene::*, *};

use core::iter;
pub use rand;

/// Half the width of the square random polygons are generated in
const MAX_POLYGON_RADIUS: Float = 30.0;

pub trait Random: Sized {
    /// Generate a random value, lying inside `canvas`, using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success.
    ///
    /// `canvas` must have a positive area.
    fn random(rng: &mut (impl rand::Rng + ?Sized), canvas: &Canvas) -> Self;
}

pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), canvas: &Canvas) -> Point {
    // the rng generates floats in 0.0..1.0, scale the range accordingly
    Point::new(rng.gen::<Float>() * canvas.width, rng.gen::<Float>() * canvas.height)
}

impl Random for Point {
    fn random(rng: &mut (impl rand::Rng + ?Sized), canvas: &Canvas) -> Self {
        rand_point(rng, canvas)
    }
}

impl Random for Segment {
    /// Never shorter than a twentieth of the canvas' diagonal.
    fn random(rng: &mut (impl rand::Rng + ?Sized), canvas: &Canvas) -> Self {
        let min_length = canvas.width.hypot(canvas.height) / 20.0;

        loop {
            let segment = Self::new(rand_point(rng, canvas), rand_point(rng, canvas));
            if segment.length() >= min_length {
                break segment;
            }
        }
    }
}

impl Random for Shape {
    /// Either a point, or a triangle with vertices close to each other
    fn random(rng: &mut (impl rand::Rng + ?Sized), canvas: &Canvas) -> Self {
        let center = rand_point(rng, canvas);

        if rng.gen_bool(0.5) {
            return Self::Point(center);
        }

        let mut vertex = || {
            let offset = Point::from_fn(|_, _| (rng.gen::<Float>() - 0.5) * 2.0 * MAX_POLYGON_RADIUS);
            canvas.clamp(&(center + offset))
        };

        Self::triangle(vertex(), vertex(), vertex())
    }
}

/// A scene with one viewer, `num_mirrors` mirrors and `num_objects` objects, all inside `config.canvas`.
///
/// The viewer has id `0`, mirrors and objects are numbered after it, in that order.
pub fn random_scene(
    rng: &mut (impl rand::Rng + ?Sized),
    config: SceneConfig,
    num_mirrors: usize,
    num_objects: usize,
) -> Scene {
    let canvas = config.canvas;
    let defaults = config.defaults;

    let viewer = Element::Viewer(Viewer {
        id: 0,
        position: rand_point(rng, &canvas),
        radius: defaults.viewer_radius,
    });

    let mirrors = iter::repeat_with(|| Segment::random(rng, &canvas))
        .take(num_mirrors)
        .collect::<Vec<_>>();

    let objects = iter::repeat_with(|| Shape::random(rng, &canvas))
        .take(num_objects)
        .collect::<Vec<_>>();

    let mirrors = mirrors.into_iter().map(|segment| MirrorElement {
        id: 0,
        segment,
        thickness: defaults.mirror_thickness,
    });

    let objects = objects.into_iter().map(|shape| Object {
        id: 0,
        shape,
        radius: defaults.object_radius,
    });

    let elements = iter::once(viewer)
        .chain(mirrors.map(Element::Mirror))
        .chain(objects.map(Element::Object))
        .zip(0..)
        .map(|(mut element, id)| {
            match &mut element {
                Element::Viewer(v) => v.id = id,
                Element::Mirror(m) => m.id = id,
                Element::Object(o) => o.id = id,
            }
            element
        });

    Scene::with_elements(config, elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const SAMPLES: usize = 500;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_random_values_in_canvas() {
        let mut rng = rng();
        let canvas = Canvas::new(300., 200.);

        for _ in 0..SAMPLES {
            let m = Segment::random(&mut rng, &canvas);
            assert!(canvas.contains(&m.start) && canvas.contains(&m.end));
            assert!(m.length() > 0.);

            let shape = Shape::random(&mut rng, &canvas);
            assert!(shape.vertices().iter().all(|v| canvas.contains(v)));
        }
    }

    #[test]
    fn test_reflection_properties() {
        let mut rng = rng();
        let canvas = Canvas::default();

        for _ in 0..SAMPLES {
            let p = Point::random(&mut rng, &canvas);
            let m = Segment::random(&mut rng, &canvas);
            let line = m.try_line(DEFAULT_EPS).unwrap();

            let image = reflect_point(&p, &m).unwrap();

            // involution
            assert!((reflect_point(&image, &m).unwrap() - p).norm() < 1e-6);
            // distance preservation
            assert!((line.distance_to(&p) - line.distance_to(&image)).abs() < 1e-6);
            // fixed points
            let q = line.at(rng.gen_range(-100.0..100.0));
            assert_eq!(reflect_point(&q, &m).unwrap(), q);
        }
    }

    #[test]
    fn test_traced_paths_are_consistent() {
        let mut rng = rng();
        let canvas = Canvas::default();
        let mut traced = 0;

        for _ in 0..SAMPLES {
            let object = Point::random(&mut rng, &canvas);
            let viewer = Point::random(&mut rng, &canvas);
            let m = Segment::random(&mut rng, &canvas);

            let Ok(path) = trace_single_reflection(&object, &viewer, &m) else {
                continue;
            };
            traced += 1;

            assert!(m.contains(&path.reflection, 1e-6));

            let sight = path.sight().try_line(DEFAULT_EPS).unwrap();
            assert!(sight.contains(&path.reflection, 1e-6));
            assert!((path.virtual_object - reflect_point(&object, &m).unwrap()).norm() < 1e-9);
        }

        // not a property, but a sanity check of the sampling
        assert!(traced > 0);
    }

    #[test]
    fn test_random_scene() {
        let mut rng = rng();
        let config = SceneConfig {
            multiple_mirrors: true,
            ..Default::default()
        };

        let scene = random_scene(&mut rng, config, 6, 4);

        assert_eq!(scene.viewers().count(), 1);
        assert_eq!(scene.mirrors().count(), 6);
        assert_eq!(scene.objects().count(), 4);

        let ids: Vec<_> = scene.elements().iter().map(Element::id).collect();
        assert_eq!(ids, (0..11).collect::<Vec<_>>());

        let outcome = scene.evaluate();
        assert!(outcome.images.len() <= 6 * 4);
        assert!(outcome.paths.len() <= 6 * 4);
        assert!(outcome.images.iter().all(|i| i.image.source.is_some()));
    }
}
