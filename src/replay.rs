//! Apply a scripted event stream to a map.
//!
//! A script is a JSON array of steps. It stands in for the interactive
//! renderer: pointer events go through the same state machine, and the edit
//! steps act on whatever is selected at that point.

use anyhow::{Result, bail};
use sensemap_core::{Effect, InputEvent, MapSession, Rgb, Tool};
use serde::Deserialize;
use tracing::debug;

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    Tool { tool: Tool },
    Event { event: InputEvent },
    Intensity { value: Option<f64> },
    Color { color: Rgb },
    Description { text: String },
}

/// What a replay changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub discarded: usize,
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>> {
    Ok(serde_json::from_str(json)?)
}

pub fn replay(session: &mut MapSession, steps: &[ScriptStep]) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "replay step");
        match step {
            ScriptStep::Tool { tool } => session.set_tool(*tool),
            ScriptStep::Event { event } => match session.dispatch(event) {
                Effect::Created(_) => summary.created += 1,
                Effect::Updated(_) => summary.updated += 1,
                Effect::Deleted(_) => summary.deleted += 1,
                Effect::Discarded => summary.discarded += 1,
                Effect::Rejected(err) => bail!("step {index}: {err}"),
                Effect::None | Effect::Selected(_) => {}
            },
            ScriptStep::Intensity { value } => {
                let id = selected(session, index)?;
                session.set_intensity(id, *value)?;
                summary.updated += 1;
            }
            ScriptStep::Color { color } => {
                let id = selected(session, index)?;
                session.set_color(id, *color)?;
                summary.updated += 1;
            }
            ScriptStep::Description { text } => {
                let id = selected(session, index)?;
                session.set_description(id, text.clone())?;
                summary.updated += 1;
            }
        }
    }

    Ok(summary)
}

fn selected(session: &MapSession, index: usize) -> Result<sensemap_core::AnnotationId> {
    match session.editor().selection() {
        Some(id) => Ok(id),
        None => bail!("step {index}: nothing is selected"),
    }
}
