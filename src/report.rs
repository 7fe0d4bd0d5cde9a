//! Plain-text review of a map.

use std::fmt::Write;

use sensemap_core::{CategoryGroup, MapSession};

/// One line per annotation, then counts per category group
pub fn render_report(session: &MapSession) -> String {
    let mut out = String::new();
    let dims = session.image_dimensions();
    let annotations = session.view().annotations;

    let _ = writeln!(
        out,
        "{} annotation(s) on a {}x{} floor plan",
        annotations.len(),
        dims.width,
        dims.height
    );

    for annotation in &annotations {
        let intensity = annotation
            .intensity
            .map(|v| format!("{v:>5.1}"))
            .unwrap_or_else(|| "    -".to_string());
        let _ = writeln!(
            out,
            "{:<7} {:<10} {:<18} {} {} {}",
            annotation.kind().label(),
            annotation.geometry.shape_name(),
            annotation.category.label(),
            intensity,
            annotation.display_color(session.codec()),
            annotation.description
        );
    }

    for group in [CategoryGroup::Sensory, CategoryGroup::Respite, CategoryGroup::Amenity] {
        let count = annotations
            .iter()
            .filter(|a| a.category.group() == group)
            .count();
        let _ = writeln!(out, "{}: {}", group.label(), count);
    }

    out
}

#[cfg(test)]
mod tests {
    use sensemap_core::geometry::Point;
    use sensemap_core::{Category, Effect, ImageDimensions, InputEvent, Tool};

    use super::*;

    #[test]
    fn lists_each_annotation_and_group_counts() {
        let mut session = MapSession::new("cafe.png", ImageDimensions::new(300, 200));
        session.set_tool(Tool::Marker { category: Category::Smell });
        let Effect::Created(id) = session.dispatch(&InputEvent::Click(Point::new(20.0, 20.0))) else {
            panic!("marker expected");
        };
        session.set_intensity(id, Some(50.0)).unwrap();
        session.set_description(id, "Coffee roaster").unwrap();

        let report = render_report(&session);
        assert!(report.starts_with("1 annotation(s) on a 300x200 floor plan"));
        assert!(report.contains("marker"));
        assert!(report.contains("Smell"));
        assert!(report.contains(" 50.0 #ffc107 Coffee roaster"));
        assert!(report.contains("Sensory: 1"));
        assert!(report.contains("Amenity: 0"));
    }
}
