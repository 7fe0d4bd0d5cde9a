//! The shape model - canonical, renderer-agnostic collection of annotations
//! for one map.
//!
//! Order is insertion order and stays stable across edits. The model never
//! touches storage; persistence goes through [`crate::record::MapRecord`].

use indexmap::IndexMap;
use sensemap_geometry::Point;

use crate::annotation::{Annotation, AnnotationDraft, AnnotationId, AnnotationPatch, Geometry};
use crate::error::{ModelError, ValidationError};

/// All markers and zones of one map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeModel {
    items: IndexMap<AnnotationId, Annotation>,
}

impl ShapeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a new annotation under a fresh id
    pub fn insert(&mut self, draft: AnnotationDraft) -> Result<AnnotationId, ModelError> {
        let mut id = AnnotationId::new();
        while self.items.contains_key(&id) {
            id = AnnotationId::new();
        }
        let annotation = draft.into_annotation(id);
        annotation.validate()?;
        self.items.insert(id, annotation);
        Ok(id)
    }

    /// Add an annotation that already carries an id, e.g. from a stored record
    pub fn insert_existing(&mut self, annotation: Annotation) -> Result<AnnotationId, ValidationError> {
        annotation.validate()?;
        let id = annotation.id;
        if self.items.contains_key(&id) {
            return Err(ValidationError::DuplicateId(id));
        }
        self.items.insert(id, annotation);
        Ok(id)
    }

    /// Apply a patch atomically: either every field changes or none does
    pub fn update(&mut self, id: AnnotationId, patch: AnnotationPatch) -> Result<(), ModelError> {
        let current = self.items.get(&id).ok_or(ModelError::NotFound(id))?;
        let next = patch.applied_to(current)?;
        self.items.insert(id, next);
        Ok(())
    }

    /// Replace only the geometry
    pub fn set_geometry(&mut self, id: AnnotationId, geometry: Geometry) -> Result<(), ModelError> {
        self.update(id, AnnotationPatch::geometry(geometry))
    }

    /// Remove, keeping the relative order of the remaining items
    pub fn remove(&mut self, id: AnnotationId) -> Result<Annotation, ModelError> {
        self.items.shift_remove(&id).ok_or(ModelError::NotFound(id))
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.items.contains_key(&id)
    }

    /// Annotations in insertion order
    pub fn list(&self) -> impl Iterator<Item = &Annotation> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = AnnotationId> + '_ {
        self.items.keys().copied()
    }

    /// Topmost (most recently inserted) annotation under `p`
    pub fn hit_test(&self, p: Point, tolerance: f64) -> Option<AnnotationId> {
        self.items
            .values()
            .rev()
            .find(|a| a.geometry.contains(p, tolerance))
            .map(|a| a.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sensemap_geometry::Rect;

    use super::*;
    use crate::category::Category;

    fn marker_at(x: f64, y: f64) -> AnnotationDraft {
        AnnotationDraft::new(Category::Noise, Geometry::Marker(Point::new(x, y)))
    }

    #[test]
    fn ids_are_distinct() {
        let mut model = ShapeModel::new();
        let ids: HashSet<_> = (0..50)
            .map(|i| model.insert(marker_at(i as f64, 0.0)).unwrap())
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn removed_id_is_not_reused() {
        let mut model = ShapeModel::new();
        let first = model.insert(marker_at(0.0, 0.0)).unwrap();
        model.remove(first).unwrap();
        let second = model.insert(marker_at(1.0, 1.0)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn order_is_stable_across_edits_and_removal() {
        let mut model = ShapeModel::new();
        let a = model.insert(marker_at(0.0, 0.0)).unwrap();
        let b = model.insert(marker_at(1.0, 0.0)).unwrap();
        let c = model.insert(marker_at(2.0, 0.0)).unwrap();

        model.update(a, AnnotationPatch::description("edited")).unwrap();
        assert_eq!(model.ids().collect::<Vec<_>>(), vec![a, b, c]);

        model.remove(b).unwrap();
        assert_eq!(model.ids().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut model = ShapeModel::new();
        let ghost = AnnotationId::new();
        assert_eq!(model.remove(ghost), Err(ModelError::NotFound(ghost)));
        assert_eq!(
            model.update(ghost, AnnotationPatch::description("x")),
            Err(ModelError::NotFound(ghost))
        );
    }

    #[test]
    fn invalid_insert_leaves_model_untouched() {
        let mut model = ShapeModel::new();
        let draft = AnnotationDraft::new(
            Category::QuietZone,
            Geometry::Polygon {
                points: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            },
        );
        assert_eq!(
            model.insert(draft),
            Err(ModelError::Validation(ValidationError::TooFewVertices(2)))
        );
        assert!(model.is_empty());
    }

    #[test]
    fn duplicate_existing_id_is_rejected() {
        let mut model = ShapeModel::new();
        let id = model.insert(marker_at(0.0, 0.0)).unwrap();
        let copy = model.get(id).unwrap().clone();
        assert_eq!(model.insert_existing(copy), Err(ValidationError::DuplicateId(id)));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut model = ShapeModel::new();
        let rect = Rect { x: 0.0, y: 0.0, width: 20.0, height: 20.0 };
        let below = model
            .insert(AnnotationDraft::new(Category::QuietZone, Geometry::Rectangle(rect)))
            .unwrap();
        let above = model.insert(marker_at(10.0, 10.0)).unwrap();

        assert_eq!(model.hit_test(Point::new(10.0, 11.0), 2.0), Some(above));
        assert_eq!(model.hit_test(Point::new(2.0, 2.0), 2.0), Some(below));
        assert_eq!(model.hit_test(Point::new(50.0, 50.0), 2.0), None);
    }
}
