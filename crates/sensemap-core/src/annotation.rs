//! Annotation envelope and the tagged geometry it carries.
//!
//! Markers and the three zone shapes share one [`Annotation`] envelope; the
//! shape-specific part is the [`Geometry`] tag.

use std::fmt;

use sensemap_geometry::{Circle, Point, Rect, Vector, polygon_contains, polygon_outline_distance};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::category::Category;
use crate::color::{IntensityCodec, MAX_INTENSITY, Rgb};
use crate::error::ValidationError;

/// Annotation identifier - random UUID, never reused within a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marker or zone, without the shape details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Marker,
    Zone,
}

impl AnnotationKind {
    pub fn label(self) -> &'static str {
        match self {
            AnnotationKind::Marker => "marker",
            AnnotationKind::Zone => "zone",
        }
    }
}

/// Where an annotation sits on the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// A single point
    Marker(Point),
    /// Axis-aligned zone, origin at the minimum corner
    Rectangle(Rect),
    Circle(Circle),
    /// Vertices in insertion order; the order defines edges and winding
    Polygon { points: Vec<Point> },
}

impl Geometry {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Geometry::Marker(_) => AnnotationKind::Marker,
            _ => AnnotationKind::Zone,
        }
    }

    /// Short name of the shape variant
    pub fn shape_name(&self) -> &'static str {
        match self {
            Geometry::Marker(_) => "marker",
            Geometry::Rectangle(_) => "rectangle",
            Geometry::Circle(_) => "circle",
            Geometry::Polygon { .. } => "polygon",
        }
    }

    /// Keys of the shape's fields in the stored form, besides `type`
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Geometry::Marker(_) => &["x", "y"],
            Geometry::Rectangle(_) => &["x", "y", "width", "height"],
            Geometry::Circle(_) => &["cx", "cy", "radius"],
            Geometry::Polygon { .. } => &["points"],
        }
    }

    /// Check the structural invariants of the shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Geometry::Marker(p) => {
                if !p.is_finite() {
                    return Err(ValidationError::NonFiniteCoordinate);
                }
            }
            Geometry::Rectangle(rect) => {
                if !rect.is_finite() {
                    return Err(ValidationError::NonFiniteCoordinate);
                }
                if rect.width < 0.0 {
                    return Err(ValidationError::NegativeExtent("width"));
                }
                if rect.height < 0.0 {
                    return Err(ValidationError::NegativeExtent("height"));
                }
            }
            Geometry::Circle(circle) => {
                if !circle.is_finite() {
                    return Err(ValidationError::NonFiniteCoordinate);
                }
                if circle.radius < 0.0 {
                    return Err(ValidationError::NegativeExtent("radius"));
                }
            }
            Geometry::Polygon { points } => {
                if points.len() < 3 {
                    return Err(ValidationError::TooFewVertices(points.len()));
                }
                if !points.iter().all(|p| p.is_finite()) {
                    return Err(ValidationError::NonFiniteCoordinate);
                }
            }
        }
        Ok(())
    }

    pub fn translated(&self, delta: Vector) -> Self {
        match self {
            Geometry::Marker(p) => Geometry::Marker(p.translated(delta)),
            Geometry::Rectangle(rect) => Geometry::Rectangle(rect.translated(delta)),
            Geometry::Circle(circle) => Geometry::Circle(circle.translated(delta)),
            Geometry::Polygon { points } => Geometry::Polygon {
                points: points.iter().map(|p| p.translated(delta)).collect(),
            },
        }
    }

    /// Hit test: inside the shape, or within `tolerance` of it
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        match self {
            Geometry::Marker(pos) => pos.distance(p) <= tolerance,
            Geometry::Rectangle(rect) => rect.contains_within(p, tolerance),
            Geometry::Circle(circle) => circle.contains_within(p, tolerance),
            Geometry::Polygon { points } => {
                polygon_contains(points, p)
                    || polygon_outline_distance(points, p).is_some_and(|d| d <= tolerance)
            }
        }
    }
}

/// Check an intensity value without clamping it
pub fn validate_intensity(value: f64) -> Result<f64, ValidationError> {
    if (0.0..=MAX_INTENSITY).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::IntensityOutOfRange(value))
    }
}

/// A marker or zone placed on the floor plan.
///
/// Fields this crate does not know about are kept in `extra` (item level)
/// and `geometry_extra` (inside the geometry object) and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredAnnotation", into = "StoredAnnotation")]
pub struct Annotation {
    pub id: AnnotationId,
    pub category: Category,
    pub description: String,
    pub intensity: Option<f64>,
    pub color_override: Option<Rgb>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
    pub geometry: Geometry,
    pub geometry_extra: Map<String, Value>,
    pub extra: Map<String, Value>,
}

/// Wire form of an [`Annotation`]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnnotation {
    id: AnnotationId,
    category: Category,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color_override: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_ref: Option<String>,
    geometry: StoredGeometry,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct StoredGeometry {
    #[serde(flatten)]
    shape: Geometry,
    // Also receives the shape's own keys on load; stripped in `From`
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<StoredAnnotation> for Annotation {
    fn from(stored: StoredAnnotation) -> Self {
        let StoredGeometry { shape, mut extra } = stored.geometry;
        extra.retain(|key, _| key.as_str() != "type" && !shape.field_names().contains(&key.as_str()));
        Self {
            id: stored.id,
            category: stored.category,
            description: stored.description,
            intensity: stored.intensity,
            color_override: stored.color_override,
            image_ref: stored.image_ref,
            audio_ref: stored.audio_ref,
            geometry: shape,
            geometry_extra: extra,
            extra: stored.extra,
        }
    }
}

impl From<Annotation> for StoredAnnotation {
    fn from(annotation: Annotation) -> Self {
        Self {
            id: annotation.id,
            category: annotation.category,
            description: annotation.description,
            intensity: annotation.intensity,
            color_override: annotation.color_override,
            image_ref: annotation.image_ref,
            audio_ref: annotation.audio_ref,
            geometry: StoredGeometry {
                shape: annotation.geometry,
                extra: annotation.geometry_extra,
            },
            extra: annotation.extra,
        }
    }
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        self.geometry.kind()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.geometry.validate()?;
        if let Some(value) = self.intensity {
            validate_intensity(value)?;
        }
        Ok(())
    }

    /// Color to paint: the override, else the encoded intensity, else the
    /// codec's low anchor
    pub fn display_color(&self, codec: &IntensityCodec) -> Rgb {
        match (self.color_override, self.intensity) {
            (Some(color), _) => color,
            (None, Some(intensity)) => codec.encode(intensity),
            (None, None) => codec.low,
        }
    }
}

/// Everything needed to create an annotation; the model assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDraft {
    pub category: Category,
    pub description: String,
    pub intensity: Option<f64>,
    pub color_override: Option<Rgb>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
    pub geometry: Geometry,
}

impl AnnotationDraft {
    pub fn new(category: Category, geometry: Geometry) -> Self {
        Self {
            category,
            description: String::new(),
            intensity: None,
            color_override: None,
            image_ref: None,
            audio_ref: None,
            geometry,
        }
    }

    pub(crate) fn into_annotation(self, id: AnnotationId) -> Annotation {
        Annotation {
            id,
            category: self.category,
            description: self.description,
            intensity: self.intensity,
            color_override: self.color_override,
            image_ref: self.image_ref,
            audio_ref: self.audio_ref,
            geometry: self.geometry,
            geometry_extra: Map::new(),
            extra: Map::new(),
        }
    }
}

/// Partial update. `None` leaves a field alone; for optional fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPatch {
    pub category: Option<Category>,
    pub description: Option<String>,
    pub intensity: Option<Option<f64>>,
    pub color_override: Option<Option<Rgb>>,
    pub image_ref: Option<Option<String>>,
    pub audio_ref: Option<Option<String>>,
    pub geometry: Option<Geometry>,
}

impl AnnotationPatch {
    pub fn geometry(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Apply onto a copy, returning it only if the result is valid
    pub(crate) fn applied_to(self, current: &Annotation) -> Result<Annotation, ValidationError> {
        let mut next = current.clone();
        if let Some(category) = self.category {
            next.category = category;
        }
        if let Some(description) = self.description {
            next.description = description;
        }
        if let Some(intensity) = self.intensity {
            next.intensity = intensity;
        }
        if let Some(color) = self.color_override {
            next.color_override = color;
        }
        if let Some(image_ref) = self.image_ref {
            next.image_ref = image_ref;
        }
        if let Some(audio_ref) = self.audio_ref {
            next.audio_ref = audio_ref;
        }
        if let Some(geometry) = self.geometry {
            next.geometry = geometry;
        }
        next.validate()?;
        Ok(next)
    }
}
