//! One open map: shape model, editor state, codec and record metadata.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::annotation::{Annotation, AnnotationId, AnnotationPatch, Geometry};
use crate::category::Category;
use crate::color::{IntensityCodec, Rgb};
use crate::config::EditorConfig;
use crate::editor::{Effect, EditorState, Phase};
use crate::error::{ModelError, RecordError};
use crate::event::{InputEvent, Tool};
use crate::handles::Handle;
use crate::model::ShapeModel;
use crate::record::{ImageDimensions, MapRecord};

/// Everything a renderer needs to paint one frame
#[derive(Debug, Clone)]
pub struct RenderView<'a> {
    pub annotations: Vec<&'a Annotation>,
    pub selected: Option<AnnotationId>,
    /// Handles of the selected shape
    pub handles: Vec<Handle>,
    /// Geometry of the gesture in progress, not yet in the model
    pub preview: Option<Geometry>,
    pub phase: Phase,
}

/// An open map being viewed or edited
#[derive(Debug, Clone)]
pub struct MapSession {
    floor_plan_image_ref: String,
    image_dimensions: ImageDimensions,
    extra: Map<String, Value>,
    model: ShapeModel,
    editor: EditorState,
    config: EditorConfig,
    codec: IntensityCodec,
}

impl MapSession {
    /// Empty map over a floor-plan image
    pub fn new(floor_plan_image_ref: impl Into<String>, image_dimensions: ImageDimensions) -> Self {
        Self::from_parts(MapRecord::new(floor_plan_image_ref, image_dimensions), ShapeModel::new())
    }

    /// Open a stored record
    pub fn from_record(mut record: MapRecord) -> Result<Self, RecordError> {
        let mut model = ShapeModel::new();
        for (index, item) in std::mem::take(&mut record.items).into_iter().enumerate() {
            if let Err(source) = model.insert_existing(item) {
                warn!(index, %source, "record item rejected");
                return Err(RecordError::InvalidItem { index, source });
            }
        }
        info!(items = model.len(), image = %record.floor_plan_image_ref, "map opened");
        Ok(Self::from_parts(record, model))
    }

    fn from_parts(record: MapRecord, model: ShapeModel) -> Self {
        Self {
            floor_plan_image_ref: record.floor_plan_image_ref,
            image_dimensions: record.image_dimensions,
            extra: record.extra,
            model,
            editor: EditorState::new(),
            config: EditorConfig::default(),
            codec: IntensityCodec::default(),
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_codec(mut self, codec: IntensityCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Snapshot for the storage collaborator
    pub fn to_record(&self) -> MapRecord {
        MapRecord {
            floor_plan_image_ref: self.floor_plan_image_ref.clone(),
            image_dimensions: self.image_dimensions.clone(),
            items: self.model.list().cloned().collect(),
            extra: self.extra.clone(),
        }
    }

    pub fn model(&self) -> &ShapeModel {
        &self.model
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn codec(&self) -> &IntensityCodec {
        &self.codec
    }

    pub fn image_dimensions(&self) -> &ImageDimensions {
        &self.image_dimensions
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.editor = std::mem::take(&mut self.editor).with_tool(tool);
    }

    /// Feed one pointer or keyboard event through the state machine
    pub fn dispatch(&mut self, event: &InputEvent) -> Effect {
        let state = std::mem::take(&mut self.editor);
        let transition = state.handle(event, &mut self.model, &self.config);
        self.editor = transition.state;
        if transition.effect != Effect::None {
            debug!(?event, effect = ?transition.effect, "event handled");
        }
        transition.effect
    }

    /// Select an annotation directly (e.g. from a list view)
    pub fn select(&mut self, id: Option<AnnotationId>) -> Result<(), ModelError> {
        if let Some(id) = id {
            if !self.model.contains(id) {
                return Err(ModelError::NotFound(id));
            }
        }
        self.editor = std::mem::take(&mut self.editor).with_selection(id);
        Ok(())
    }

    /// Set severity; the color follows the codec again
    pub fn set_intensity(&mut self, id: AnnotationId, intensity: Option<f64>) -> Result<(), ModelError> {
        self.model.update(
            id,
            AnnotationPatch {
                intensity: Some(intensity),
                color_override: Some(None),
                ..AnnotationPatch::default()
            },
        )
    }

    /// Set a custom color; the intensity becomes its nearest on-scale match
    pub fn set_color(&mut self, id: AnnotationId, color: Rgb) -> Result<(), ModelError> {
        let intensity = self.codec.decode(color);
        self.model.update(
            id,
            AnnotationPatch {
                intensity: Some(Some(intensity)),
                color_override: Some(Some(color)),
                ..AnnotationPatch::default()
            },
        )
    }

    pub fn set_description(&mut self, id: AnnotationId, description: impl Into<String>) -> Result<(), ModelError> {
        self.model.update(id, AnnotationPatch::description(description))
    }

    pub fn set_category(&mut self, id: AnnotationId, category: Category) -> Result<(), ModelError> {
        self.model.update(
            id,
            AnnotationPatch {
                category: Some(category),
                ..AnnotationPatch::default()
            },
        )
    }

    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation, ModelError> {
        let removed = self.model.remove(id)?;
        if self.editor.selection() == Some(id) {
            self.editor = EditorState::new();
        }
        info!(%id, "annotation deleted");
        Ok(removed)
    }

    pub fn display_color(&self, id: AnnotationId) -> Option<Rgb> {
        self.model.get(id).map(|a| a.display_color(&self.codec))
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            annotations: self.model.list().collect(),
            selected: self.editor.selection(),
            handles: self.editor.selected_handles(&self.model),
            preview: self.editor.preview(),
            phase: self.editor.phase(),
        }
    }
}
