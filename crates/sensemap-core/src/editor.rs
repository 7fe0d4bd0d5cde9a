//! Pointer-driven draw/edit state machine.
//!
//! The whole editor state (armed tool, selection, in-progress gesture) is a
//! plain value. [`EditorState::handle`] consumes it together with one event
//! and returns the next state plus the effect on the shape model. Nothing
//! here is global, so transitions can be tested without any setup.
//!
//! Uncommitted geometry (a rectangle being dragged out, polygon vertices, a
//! handle drag preview) lives only in the state. The model changes on
//! commit and nowhere else.

use sensemap_geometry::{Circle, Point, Rect};
use tracing::{debug, info, warn};

use crate::annotation::{AnnotationDraft, AnnotationId, Geometry};
use crate::category::Category;
use crate::config::EditorConfig;
use crate::error::ModelError;
use crate::event::{InputEvent, Key, Tool, ZoneShape};
use crate::handles::{self, Handle, HandleKind};
use crate::model::ShapeModel;

/// Coarse state name, for status lines and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in progress; clicks select or deselect
    Idle,
    /// Marker tool armed
    Placing,
    /// Rectangle or circle being dragged out
    Drawing,
    /// Polygon vertices being collected
    PolygonDrawing,
    /// Handle drag on the selected shape
    Editing,
}

/// Press/drag zone shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragShape {
    Rectangle,
    Circle,
}

/// In-progress, uncommitted gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    None,
    Drawing {
        shape: DragShape,
        category: Category,
        anchor: Point,
        current: Point,
    },
    Polygon {
        category: Category,
        vertices: Vec<Point>,
    },
    Editing {
        id: AnnotationId,
        handle: HandleKind,
        start: Point,
        original: Geometry,
        preview: Geometry,
    },
}

/// What an event did to the model or the selection
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Selection changed (possibly to nothing)
    Selected(Option<AnnotationId>),
    /// A finished gesture produced a new annotation
    Created(AnnotationId),
    /// Handle drag committed new geometry
    Updated(AnnotationId),
    Deleted(AnnotationId),
    /// Gesture dropped without touching the model
    Discarded,
    /// The model refused the committed geometry
    Rejected(ModelError),
}

/// Result of feeding one event to the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: EditorState,
    pub effect: Effect,
}

/// Complete editor state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    tool: Tool,
    selection: Option<AnnotationId>,
    gesture: Gesture,
    /// Where the last press/release gesture ended. A click at that spot on
    /// the very next event is the host echoing the release and is ignored.
    last_release: Option<Point>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selection(&self) -> Option<AnnotationId> {
        self.selection
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn phase(&self) -> Phase {
        match (&self.gesture, self.tool) {
            (Gesture::Drawing { .. }, _) => Phase::Drawing,
            (Gesture::Polygon { .. }, _) => Phase::PolygonDrawing,
            (Gesture::Editing { .. }, _) => Phase::Editing,
            (Gesture::None, Tool::Marker { .. }) => Phase::Placing,
            (Gesture::None, _) => Phase::Idle,
        }
    }

    /// Arm a tool. Any uncommitted gesture is dropped.
    pub fn with_tool(self, tool: Tool) -> Self {
        debug!(tool = tool.name(), "tool selected");
        Self {
            tool,
            gesture: Gesture::None,
            last_release: None,
            ..self
        }
    }

    pub fn with_selection(self, selection: Option<AnnotationId>) -> Self {
        Self { selection, ..self }
    }

    /// Provisional geometry of the gesture in progress
    pub fn preview(&self) -> Option<Geometry> {
        match &self.gesture {
            Gesture::None => None,
            Gesture::Drawing { shape, anchor, current, .. } => {
                Some(drawn_geometry(*shape, *anchor, *current))
            }
            Gesture::Polygon { vertices, .. } => Some(Geometry::Polygon {
                points: vertices.clone(),
            }),
            Gesture::Editing { preview, .. } => Some(preview.clone()),
        }
    }

    /// Handles of the selected shape, following a live handle drag
    pub fn selected_handles(&self, model: &ShapeModel) -> Vec<Handle> {
        if let Gesture::Editing { preview, .. } = &self.gesture {
            return handles::handles(preview);
        }
        self.selection
            .and_then(|id| model.get(id))
            .map(|a| handles::handles(&a.geometry))
            .unwrap_or_default()
    }

    /// Advance by one event
    pub fn handle(mut self, event: &InputEvent, model: &mut ShapeModel, config: &EditorConfig) -> Transition {
        if let InputEvent::KeyPress { key: Key::Escape } = event {
            return self.cancel();
        }

        let last_release = self.last_release.take();
        match self.gesture.clone() {
            Gesture::None => {
                if let (InputEvent::Click(p), Some(released)) = (event, last_release) {
                    if released.distance(*p) <= config.discard_threshold {
                        debug!("click after release ignored");
                        return self.stay();
                    }
                }
                self.idle(event, model, config)
            }
            Gesture::Drawing { shape, category, anchor, .. } => {
                self.drawing(event, model, config, shape, category, anchor)
            }
            Gesture::Polygon { category, vertices } => {
                self.polygon(event, model, config, category, vertices)
            }
            Gesture::Editing { id, handle, start, original, .. } => {
                self.editing(event, model, id, handle, start, original)
            }
        }
    }

    fn cancel(self) -> Transition {
        let effect = match self.gesture {
            Gesture::None => Effect::Selected(None),
            _ => Effect::Discarded,
        };
        debug!(phase = ?self.phase(), "cancelled");
        Transition {
            state: EditorState::new(),
            effect,
        }
    }

    fn idle(mut self, event: &InputEvent, model: &mut ShapeModel, config: &EditorConfig) -> Transition {
        match *event {
            InputEvent::PressDown(p) => {
                if let Some((id, handle, original)) = self.handle_under(p, model, config) {
                    debug!(%id, ?handle, "handle drag started");
                    self.gesture = Gesture::Editing {
                        id,
                        handle,
                        start: p,
                        preview: original.clone(),
                        original,
                    };
                    return self.stay();
                }
                if let Tool::Zone { shape, category } = self.tool {
                    let shape = match shape {
                        ZoneShape::Rectangle => DragShape::Rectangle,
                        ZoneShape::Circle => DragShape::Circle,
                        ZoneShape::Polygon => return self.stay(),
                    };
                    self.gesture = Gesture::Drawing {
                        shape,
                        category,
                        anchor: p,
                        current: p,
                    };
                }
                self.stay()
            }
            InputEvent::Click(p) => {
                match self.tool {
                    Tool::Select => self.select_at(p, model, config),
                    Tool::Marker { category } => {
                        if model.hit_test(p, config.hit_tolerance).is_some() {
                            return self.select_at(p, model, config);
                        }
                        let draft = AnnotationDraft::new(category, Geometry::Marker(p));
                        self.commit(draft, model)
                    }
                    Tool::Zone { shape: ZoneShape::Polygon, category } => {
                        self.gesture = Gesture::Polygon {
                            category,
                            vertices: vec![p],
                        };
                        self.stay()
                    }
                    Tool::Zone { .. } => self.stay(),
                }
            }
            InputEvent::KeyPress { key: Key::Delete | Key::Backspace } => {
                let Some(id) = self.selection.take() else {
                    return self.stay();
                };
                match model.remove(id) {
                    Ok(_) => {
                        info!(%id, "annotation deleted");
                        self.emit(Effect::Deleted(id))
                    }
                    Err(err) => self.emit(Effect::Rejected(err)),
                }
            }
            _ => self.stay(),
        }
    }

    fn drawing(
        mut self,
        event: &InputEvent,
        model: &mut ShapeModel,
        config: &EditorConfig,
        shape: DragShape,
        category: Category,
        anchor: Point,
    ) -> Transition {
        match *event {
            InputEvent::Move(p) => {
                self.gesture = Gesture::Drawing {
                    shape,
                    category,
                    anchor,
                    current: p,
                };
                self.stay()
            }
            InputEvent::PressUp(p) => {
                self.last_release = Some(p);
                let geometry = drawn_geometry(shape, anchor, p);
                if exceeds_threshold(&geometry, config.discard_threshold) {
                    self.commit(AnnotationDraft::new(category, geometry), model)
                } else {
                    debug!(shape = geometry.shape_name(), "draw gesture below threshold");
                    self.finish(Effect::Discarded)
                }
            }
            _ => self.stay(),
        }
    }

    fn polygon(
        mut self,
        event: &InputEvent,
        model: &mut ShapeModel,
        config: &EditorConfig,
        category: Category,
        mut vertices: Vec<Point>,
    ) -> Transition {
        match *event {
            InputEvent::Click(p) => {
                let closes = vertices
                    .first()
                    .is_some_and(|first| first.distance(p) <= config.hit_tolerance);
                if closes {
                    return self.finish_polygon(model, config, category, vertices);
                }
                vertices.push(p);
                self.gesture = Gesture::Polygon { category, vertices };
                self.stay()
            }
            InputEvent::DoubleClick(_) | InputEvent::KeyPress { key: Key::Enter } => {
                self.finish_polygon(model, config, category, vertices)
            }
            _ => self.stay(),
        }
    }

    fn finish_polygon(
        self,
        model: &mut ShapeModel,
        config: &EditorConfig,
        category: Category,
        mut vertices: Vec<Point>,
    ) -> Transition {
        // Double-clicks deliver their clicks first; collapse the repeats
        vertices.dedup_by(|b, a| a.distance(*b) <= config.discard_threshold);
        if vertices.len() < 3 {
            debug!(vertices = vertices.len(), "polygon too small");
            return self.finish(Effect::Discarded);
        }
        self.commit(AnnotationDraft::new(category, Geometry::Polygon { points: vertices }), model)
    }

    fn editing(
        mut self,
        event: &InputEvent,
        model: &mut ShapeModel,
        id: AnnotationId,
        handle: HandleKind,
        start: Point,
        original: Geometry,
    ) -> Transition {
        match *event {
            InputEvent::Move(p) => {
                let preview = handles::drag(&original, handle, p - start);
                self.gesture = Gesture::Editing {
                    id,
                    handle,
                    start,
                    original,
                    preview,
                };
                self.stay()
            }
            InputEvent::PressUp(p) => {
                let geometry = handles::drag(&original, handle, p - start);
                self.gesture = Gesture::None;
                self.last_release = Some(p);
                match model.set_geometry(id, geometry) {
                    Ok(()) => {
                        info!(%id, ?handle, "geometry updated");
                        self.emit(Effect::Updated(id))
                    }
                    Err(err) => {
                        warn!(%id, %err, "handle drag rejected");
                        self.emit(Effect::Rejected(err))
                    }
                }
            }
            _ => self.stay(),
        }
    }

    /// Handle of the selected shape under `p`, with that shape's geometry
    fn handle_under(
        &self,
        p: Point,
        model: &ShapeModel,
        config: &EditorConfig,
    ) -> Option<(AnnotationId, HandleKind, Geometry)> {
        let id = self.selection?;
        let annotation = model.get(id)?;
        let handle = handles::hit_handle(&annotation.geometry, p, config.hit_tolerance)?;
        Some((id, handle, annotation.geometry.clone()))
    }

    fn select_at(mut self, p: Point, model: &ShapeModel, config: &EditorConfig) -> Transition {
        let hit = model.hit_test(p, config.hit_tolerance);
        self.selection = hit;
        self.emit(Effect::Selected(hit))
    }

    /// Insert a finished gesture, select it and return to the select tool
    fn commit(mut self, draft: AnnotationDraft, model: &mut ShapeModel) -> Transition {
        let shape = draft.geometry.shape_name();
        match model.insert(draft) {
            Ok(id) => {
                info!(%id, shape, "annotation created");
                self.selection = Some(id);
                self.finish(Effect::Created(id))
            }
            Err(err) => {
                warn!(shape, %err, "new annotation rejected");
                self.finish(Effect::Rejected(err))
            }
        }
    }

    /// End the gesture and disarm the tool
    fn finish(mut self, effect: Effect) -> Transition {
        self.gesture = Gesture::None;
        self.tool = Tool::Select;
        self.emit(effect)
    }

    fn stay(self) -> Transition {
        self.emit(Effect::None)
    }

    fn emit(self, effect: Effect) -> Transition {
        Transition { state: self, effect }
    }
}

fn drawn_geometry(shape: DragShape, anchor: Point, current: Point) -> Geometry {
    match shape {
        DragShape::Rectangle => Geometry::Rectangle(Rect::from_corners(anchor, current)),
        DragShape::Circle => Geometry::Circle(Circle::new(anchor, anchor.distance(current))),
    }
}

fn exceeds_threshold(geometry: &Geometry, threshold: f64) -> bool {
    match geometry {
        Geometry::Rectangle(rect) => rect.exceeds(threshold),
        Geometry::Circle(circle) => circle.radius > threshold,
        _ => true,
    }
}
