use miroir_plan::{scene::*, *};

use std::{collections::HashSet, error::Error};

pub use serde_json;
use serde_json::{json, Value};

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_point(json_array: &[Value]) -> Option<Point> {
    let [x, y] = json_array else {
        return None;
    };

    Some(Point::new(x.as_f64()?, y.as_f64()?))
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &Value,
    map: impl FnMut(&Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

fn point_field(json: &Value, field: &str) -> Result<Point, Box<dyn Error>> {
    json.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .and_then(json_array_to_point)
        .ok_or_else(|| format!("Failed to parse {field}").into())
}

fn id_field(json: &Value) -> Result<ElementId, Box<dyn Error>> {
    Ok(json
        .get("id")
        .ok_or("Missing element id")?
        .as_u64()
        .ok_or("id must be a positive integer")?)
}

/// Absent and `null` fields take the `default` value
fn float_or(json: &Value, field: &str, default: Float) -> Result<Float, Box<dyn Error>> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| format!("{field} must be a number").into()),
    }
}

fn bool_or(json: &Value, field: &str, default: bool) -> Result<bool, Box<dyn Error>> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| format!("{field} must be a boolean").into()),
    }
}

pub trait JsonType {
    /// Returns a string, unique to the type, found in the "type" field of the json
    /// representation of a scene element of this type
    fn json_type() -> String;
}

impl JsonType for Viewer {
    fn json_type() -> String {
        "viewer".into()
    }
}

impl JsonType for MirrorElement {
    fn json_type() -> String {
        "mirror".into()
    }
}

impl JsonType for Object {
    fn json_type() -> String {
        "object".into()
    }
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> Value {
        Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> Value {
        (*self).to_json()
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl JsonSer for Point {
    /// `[x, y]`
    fn to_json(&self) -> Value {
        json!([self.x, self.y])
    }
}

impl JsonDes for Point {
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        json.as_array()
            .map(Vec::as_slice)
            .and_then(json_array_to_point)
            .ok_or_else(|| "a point must be an array of 2 numbers".into())
    }
}

impl JsonSer for Segment {
    fn to_json(&self) -> Value {
        json!({
            "start": self.start.to_json(),
            "end": self.end.to_json(),
        })
    }
}

impl JsonDes for Segment {
    /// Deserialize a segment from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "start": [1., 2.],
    ///     "end": [3., 4.],
    /// }
    /// ```
    ///
    /// Coincident endpoints are accepted, such a mirror simply reflects nothing.
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(point_field(json, "start")?, point_field(json, "end")?))
    }
}

impl JsonSer for ShapeKind {
    fn to_json(&self) -> Value {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Polygon => "polygon",
        }
        .into()
    }
}

impl JsonDes for ShapeKind {
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        match json.as_str().ok_or("shape kind must be a string")? {
            "point" => Ok(Self::Point),
            "polygon" | "triangle" => Ok(Self::Polygon),
            other => Err(format!("invalid shape kind: {other}").into()),
        }
    }
}

impl JsonSer for Shape {
    fn to_json(&self) -> Value {
        json!({
            "kind": self.kind().to_json(),
            "vertices": self.vertices().to_json(),
        })
    }
}

impl JsonDes for Shape {
    /// Deserialize a shape from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "kind": "point" | "polygon", // optional, deduced from the number of vertices
    ///     "vertices": [[1., 2.], ...], // 1 vertex for a point, 3 or more for a polygon
    /// }
    /// ```
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        let vertices: Vec<Point> =
            map_json_array(json.get("vertices").ok_or("Missing shape vertices")?, Point::from_json)?;

        let shape = Shape::try_from_vertices(vertices)?;

        if let Some(kind) = json.get("kind") {
            if ShapeKind::from_json(kind)? != shape.kind() {
                return Err("shape kind doesn't match its number of vertices".into());
            }
        }

        Ok(shape)
    }
}

impl JsonSer for VirtualShape {
    fn to_json(&self) -> Value {
        json!({
            "source": self.source,
            "shape": self.shape.to_json(),
        })
    }
}

impl JsonSer for RayPath {
    fn to_json(&self) -> Value {
        json!({
            "object": self.object.to_json(),
            "reflection": self.reflection.to_json(),
            "viewer": self.viewer.to_json(),
            "virtual_object": self.virtual_object.to_json(),
        })
    }
}

impl JsonDes for RayPath {
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            object: point_field(json, "object")?,
            reflection: point_field(json, "reflection")?,
            viewer: point_field(json, "viewer")?,
            virtual_object: point_field(json, "virtual_object")?,
        })
    }
}

impl JsonSer for Viewer {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "position": self.position.to_json(),
            "radius": self.radius,
        })
    }
}

impl JsonSer for MirrorElement {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "start": self.segment.start.to_json(),
            "end": self.segment.end.to_json(),
            "thickness": self.thickness,
        })
    }
}

impl JsonSer for Object {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "shape": self.shape.to_json(),
            "radius": self.radius,
        })
    }
}

impl JsonSer for Element {
    fn to_json(&self) -> Value {
        let (json_type, data) = match self {
            Element::Viewer(v) => (Viewer::json_type(), v.to_json()),
            Element::Mirror(m) => (MirrorElement::json_type(), m.to_json()),
            Element::Object(o) => (Object::json_type(), o.to_json()),
        };

        json!({
            "type": json_type,
            "data": data,
        })
    }
}

/// Deserialize a scene element from a JSON object.
///
/// The JSON object must follow the following format:
///
/// ```json
/// {
///     "type": "viewer" | "mirror" | "object",
///     "data": // <layout depends on the value at "type">
/// }
/// ```
///
/// With `"data"` being, respectively:
///
/// ```json
/// { "id": 0, "position": [1., 2.], "radius": 10. }
/// { "id": 1, "start": [1., 2.], "end": [3., 4.], "thickness": 4. }
/// { "id": 2, "shape": { "vertices": [[1., 2.]] }, "radius": 8. }
/// ```
///
/// Missing sizes are taken from `defaults`.
pub fn element_from_json(json: &Value, defaults: &ElementDefaults) -> Result<Element, Box<dyn Error>> {
    let element_type = json
        .get("type")
        .ok_or("Missing element type")?
        .as_str()
        .ok_or("type must be a string")?;

    let data = json.get("data").ok_or("Missing element data")?;
    let id = id_field(data)?;

    Ok(match element_type {
        t if t == Viewer::json_type() => Element::Viewer(Viewer {
            id,
            position: point_field(data, "position")?,
            radius: float_or(data, "radius", defaults.viewer_radius)?,
        }),
        t if t == MirrorElement::json_type() => Element::Mirror(MirrorElement {
            id,
            segment: Segment::from_json(data)?,
            thickness: float_or(data, "thickness", defaults.mirror_thickness)?,
        }),
        t if t == Object::json_type() => Element::Object(Object {
            id,
            shape: Shape::from_json(data.get("shape").ok_or("Missing object shape")?)?,
            radius: float_or(data, "radius", defaults.object_radius)?,
        }),
        other => return Err(format!("invalid element type: {other}").into()),
    })
}

impl JsonSer for SceneConfig {
    fn to_json(&self) -> Value {
        json!({
            "eps": self.eps,
            "canvas": {
                "width": self.canvas.width,
                "height": self.canvas.height,
            },
            "show_rays": self.show_rays,
            "multiple_mirrors": self.multiple_mirrors,
            "defaults": {
                "viewer_radius": self.defaults.viewer_radius,
                "object_radius": self.defaults.object_radius,
                "mirror_thickness": self.defaults.mirror_thickness,
            },
        })
    }
}

impl JsonDes for SceneConfig {
    /// Every field is optional, missing ones take their [`SceneConfig::default`] value.
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        let d = Self::default();

        let canvas = match json.get("canvas") {
            Some(c) => Canvas::new(
                float_or(c, "width", d.canvas.width)?,
                float_or(c, "height", d.canvas.height)?,
            ),
            None => d.canvas,
        };

        if !(canvas.width >= 0. && canvas.height >= 0.) {
            return Err("canvas width and height must be non-negative".into());
        }

        let defaults = match json.get("defaults") {
            Some(e) => ElementDefaults {
                viewer_radius: float_or(e, "viewer_radius", d.defaults.viewer_radius)?,
                object_radius: float_or(e, "object_radius", d.defaults.object_radius)?,
                mirror_thickness: float_or(e, "mirror_thickness", d.defaults.mirror_thickness)?,
            },
            None => d.defaults,
        };

        let eps = float_or(json, "eps", d.eps)?;
        if eps.is_nan() || eps <= 0. {
            return Err("eps must be positive".into());
        }

        Ok(Self {
            eps,
            canvas,
            show_rays: bool_or(json, "show_rays", d.show_rays)?,
            multiple_mirrors: bool_or(json, "multiple_mirrors", d.multiple_mirrors)?,
            defaults,
        })
    }
}

impl JsonSer for Scene {
    fn to_json(&self) -> Value {
        json!({
            "config": self.config().to_json(),
            "elements": self.elements().to_json(),
        })
    }
}

impl JsonDes for Scene {
    /// Deserialize a scene from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "config": { ... }, // optional, see `SceneConfig::from_json`
    ///     "elements": [ ... ], // see `element_from_json`
    /// }
    /// ```
    ///
    /// Element ids must be unique. Elements are clamped to the canvas.
    fn from_json(json: &Value) -> Result<Self, Box<dyn Error>> {
        let config = json
            .get("config")
            .map(SceneConfig::from_json)
            .transpose()?
            .unwrap_or_default();

        let elements: Vec<Element> = map_json_array(
            json.get("elements").ok_or("elements field expected")?,
            |e| element_from_json(e, &config.defaults),
        )?;

        let mut ids = HashSet::new();
        if let Some(e) = elements.iter().find(|e| !ids.insert(e.id())) {
            return Err(format!("duplicate element id: {}", e.id()).into());
        }

        Ok(Scene::with_elements(config, elements))
    }
}

impl JsonSer for VirtualImage {
    fn to_json(&self) -> Value {
        json!({
            "mirror": self.mirror,
            "image": self.image.to_json(),
        })
    }
}

impl JsonSer for TracedPath {
    fn to_json(&self) -> Value {
        json!({
            "object": self.object,
            "viewer": self.viewer,
            "mirror": self.mirror,
            "path": self.path.to_json(),
        })
    }
}

impl JsonSer for SceneOutcome {
    fn to_json(&self) -> Value {
        json!({
            "show_rays": self.show_rays,
            "skipped": self.skipped,
            "images": self.images.to_json(),
            "paths": self.paths.to_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_json() -> Value {
        json!({
            "config": {
                "multiple_mirrors": true,
                "canvas": { "width": 400. },
            },
            "elements": [
                { "type": "viewer", "data": { "id": 1, "position": [100., 300.] } },
                { "type": "mirror", "data": { "id": 2, "start": [200., 50.], "end": [200., 350.], "thickness": 2. } },
                { "type": "object", "data": { "id": 3, "shape": { "kind": "point", "vertices": [[100., 100.]] } } },
            ],
        })
    }

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_json(&scene_json()).unwrap();

        let config = scene.config();
        assert!(config.multiple_mirrors);
        assert_eq!(config.canvas, Canvas::new(400., 600.));
        assert_eq!(config.eps, DEFAULT_EPS);

        assert_eq!(scene.elements().len(), 3);
        assert_eq!(
            scene.get(1),
            Some(&Element::Viewer(Viewer {
                id: 1,
                position: Point::new(100., 300.),
                radius: ElementDefaults::default().viewer_radius,
            }))
        );
        let Some(Element::Mirror(m)) = scene.get(2) else {
            panic!("mirror missing")
        };
        assert_eq!(m.thickness, 2.);
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let scene = Scene::from_json(&scene_json()).unwrap();
        assert_eq!(Scene::from_json(&scene.to_json()).unwrap(), scene);
    }

    #[test]
    fn test_outcome_json() {
        let scene = Scene::from_json(&scene_json()).unwrap();
        let json = scene.evaluate().to_json();

        assert_eq!(json["skipped"], 0);
        assert_eq!(json["show_rays"], true);
        assert_eq!(json["images"][0]["mirror"], 2);
        assert_eq!(json["images"][0]["image"]["source"], 3);
        assert_eq!(json["images"][0]["image"]["shape"]["kind"], "point");

        let path = RayPath::from_json(&json["paths"][0]["path"]).unwrap();
        assert!((path.reflection - Point::new(200., 200.)).norm() < 1e-6);
        assert!((path.virtual_object - Point::new(300., 100.)).norm() < 1e-6);
    }

    #[test]
    fn test_shape_errors() {
        assert!(Shape::from_json(&json!({ "vertices": [[0., 0.], [1., 1.]] })).is_err());
        assert!(Shape::from_json(&json!({ "kind": "point", "vertices": [[0., 0.], [1., 1.], [2., 0.]] })).is_err());
        assert!(Shape::from_json(&json!({ "vertices": [[0., 0.], [1.]] })).is_err());

        assert_eq!(
            Shape::from_json(&json!({ "kind": "triangle", "vertices": [[0., 0.], [1., 1.], [2., 0.]] })).unwrap(),
            Shape::triangle([0., 0.], [1., 1.], [2., 0.])
        );
    }

    #[test]
    fn test_scene_errors() {
        let mut json = scene_json();
        json["elements"][2]["data"]["id"] = json!(1);
        assert!(Scene::from_json(&json).is_err());

        let mut json = scene_json();
        json["elements"][0]["type"] = json!("lamp");
        assert!(Scene::from_json(&json).is_err());

        let mut json = scene_json();
        json["config"]["eps"] = json!(-1.);
        assert!(Scene::from_json(&json).is_err());

        let mut json = scene_json();
        json["config"]["canvas"] = json!({ "width": -10. });
        assert!(Scene::from_json(&json).is_err());

        assert!(Scene::from_json(&json!({ "config": {} })).is_err());
    }
}
