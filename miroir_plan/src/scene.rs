//! A viewer, some mirrors and some objects, as an interactive front end holds
//! them, and the evaluation of everything the geometry engine can tell about them.

use core::slice;

use either::Either;
use log::{debug, trace};

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Viewer {
    pub id: ElementId,
    pub position: Point,
    pub radius: Float,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MirrorElement {
    pub id: ElementId,
    pub segment: Segment,
    pub thickness: Float,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub id: ElementId,
    pub shape: Shape,
    pub radius: Float,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Viewer(Viewer),
    Mirror(MirrorElement),
    Object(Object),
}

impl Element {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ElementId {
        match self {
            Self::Viewer(v) => v.id,
            Self::Mirror(m) => m.id,
            Self::Object(o) => o.id,
        }
    }

    /// Every point defining this element's position
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        match self {
            Self::Viewer(v) => Either::Left(slice::from_ref(&v.position).iter()),
            Self::Mirror(m) => Either::Right(Either::Left(m.segment.endpoints().into_iter())),
            Self::Object(o) => Either::Right(Either::Right(o.shape.vertices().iter())),
        }
    }

    pub fn translate(&mut self, delta: &Point) {
        match self {
            Self::Viewer(v) => v.position += delta,
            Self::Mirror(m) => {
                m.segment.start += delta;
                m.segment.end += delta;
            }
            Self::Object(o) => o.shape.translate(delta),
        }
    }

    fn clamp_into(&mut self, canvas: &Canvas) {
        match self {
            Self::Viewer(v) => v.position = canvas.clamp(&v.position),
            Self::Mirror(m) => {
                m.segment.start = canvas.clamp(&m.segment.start);
                m.segment.end = canvas.clamp(&m.segment.end);
            }
            Self::Object(o) => o
                .shape
                .vertices_mut()
                .iter_mut()
                .for_each(|v| *v = canvas.clamp(v)),
        }
    }
}

/// The image of an object in one mirror
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualImage {
    pub mirror: ElementId,
    pub image: VirtualShape,
}

/// A ray path from an object to a viewer, off one mirror
#[derive(Clone, Debug, PartialEq)]
pub struct TracedPath {
    pub object: ElementId,
    pub viewer: ElementId,
    pub mirror: ElementId,
    pub path: RayPath,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneOutcome {
    pub images: Vec<VirtualImage>,
    pub paths: Vec<TracedPath>,
    /// Copied from the scene's config, paths are computed either way.
    pub show_rays: bool,
    /// How many (object, mirror) reflections and (object, viewer, mirror) traces failed,
    /// plus the malformed objects that were not evaluated at all.
    pub skipped: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    config: SceneConfig,
    elements: Vec<Element>,
}

impl Scene {
    #[inline]
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
        }
    }

    /// Adds every element with [`Self::push`]
    #[must_use]
    pub fn with_elements(config: SceneConfig, elements: impl IntoIterator<Item = Element>) -> Self {
        let mut scene = Self::new(config);
        elements.into_iter().for_each(|e| scene.push(e));
        scene
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn set_show_rays(&mut self, show: bool) {
        self.config.show_rays = show;
    }

    #[inline]
    pub fn set_multiple_mirrors(&mut self, multiple: bool) {
        self.config.multiple_mirrors = multiple;
    }

    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Adds `element` to the scene, moving its points inside the canvas if necessary.
    pub fn push(&mut self, mut element: Element) {
        element.clamp_into(&self.config.canvas);
        self.elements.push(element);
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn viewers(&self) -> impl Iterator<Item = &Viewer> {
        self.elements.iter().filter_map(|e| match e {
            Element::Viewer(v) => Some(v),
            _ => None,
        })
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.elements.iter().filter_map(|e| match e {
            Element::Object(o) => Some(o),
            _ => None,
        })
    }

    /// The mirrors taking part in the simulation: all of them, or only the
    /// first one (in element order) if multiple mirrors are disabled.
    pub fn mirrors(&self) -> impl Iterator<Item = &MirrorElement> {
        let n = if self.config.multiple_mirrors {
            usize::MAX
        } else {
            1
        };

        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Mirror(m) => Some(m),
                _ => None,
            })
            .take(n)
    }

    /// Moves element `id` by `delta`, or less, so that it stays inside the canvas.
    ///
    /// Returns `false` if there is no such element.
    pub fn drag(&mut self, id: ElementId, delta: &Point) -> bool {
        let canvas = self.config.canvas;

        let Some(element) = self.elements.iter_mut().find(|e| e.id() == id) else {
            return false;
        };

        let delta = canvas.clamp_translation(element.points(), delta);
        element.translate(&delta);
        true
    }

    /// Computes the images of every object in every mirror it faces,
    /// and the ray paths from every object to every viewer off those mirrors.
    ///
    /// An object "faces" a mirror if its anchor ([`Shape::anchor`]) is
    /// projected on it. Failed reflections and traces are skipped.
    #[must_use]
    pub fn evaluate(&self) -> SceneOutcome {
        let ctx = self.config.ctx();
        let mirrors: Vec<_> = self.mirrors().collect();

        let mut outcome = SceneOutcome {
            show_rays: self.config.show_rays,
            ..Default::default()
        };

        for object in self.objects() {
            if let Err(e) = object.shape.validate() {
                debug!("skipping object {}: {e}", object.id);
                outcome.skipped += 1;
                continue;
            }

            let anchor = object.shape.anchor();

            let (faced, hidden): (Vec<&&MirrorElement>, Vec<&&MirrorElement>) = mirrors
                .iter()
                .partition(|m| ctx.faces_mirror(&anchor, &m.segment));

            for m in hidden {
                trace!("object {} doesn't face mirror {}", object.id, m.id);
            }

            for m in &faced {
                match ctx.reflect_shape(&object.shape, &m.segment) {
                    Ok(image) => outcome.images.push(VirtualImage {
                        mirror: m.id,
                        image: image.with_source(object.id),
                    }),
                    Err(e) => {
                        debug!("no image of object {} in mirror {}: {e}", object.id, m.id);
                        outcome.skipped += 1;
                    }
                }
            }

            let segments: Vec<_> = faced.iter().map(|m| m.segment).collect();

            for viewer in self.viewers() {
                for (i, res) in ctx.trace_each(&anchor, &viewer.position, &segments) {
                    let mirror = faced[i].id;
                    match res {
                        Ok(path) => outcome.paths.push(TracedPath {
                            object: object.id,
                            viewer: viewer.id,
                            mirror,
                            path,
                        }),
                        Err(e) => {
                            debug!(
                                "no path from object {} to viewer {} off mirror {mirror}: {e}",
                                object.id, viewer.id
                            );
                            outcome.skipped += 1;
                        }
                    }
                }
            }
        }

        outcome
    }
}
