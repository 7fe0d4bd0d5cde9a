use sensemap_core::geometry::{Circle, Point, Rect};
use sensemap_core::handles::{Corner, HandleKind};
use sensemap_core::{
    AnnotationDraft, Category, EditorConfig, EditorState, Effect, Geometry, InputEvent, Key, Phase,
    ShapeModel, Tool, ZoneShape,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Feed events in order, returning the final state and every effect
fn run(state: EditorState, model: &mut ShapeModel, events: &[InputEvent]) -> (EditorState, Vec<Effect>) {
    let config = EditorConfig::default();
    let mut state = state;
    let mut effects = Vec::new();
    for event in events {
        let transition = state.handle(event, model, &config);
        state = transition.state;
        effects.push(transition.effect);
    }
    (state, effects)
}

fn zone_tool(shape: ZoneShape) -> EditorState {
    EditorState::new().with_tool(Tool::Zone { shape, category: Category::QuietZone })
}

fn drag_gesture(from: Point, via: Point, to: Point) -> Vec<InputEvent> {
    vec![
        InputEvent::PressDown(from),
        InputEvent::Move(via),
        InputEvent::PressUp(to),
        InputEvent::Click(to),
    ]
}

#[test]
fn rectangle_drag_commits_a_normalized_zone() {
    let mut model = ShapeModel::new();
    let (state, effects) = run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &drag_gesture(p(40.0, 30.0), p(20.0, 20.0), p(10.0, 5.0)),
    );

    assert_eq!(model.len(), 1);
    let zone = model.list().next().unwrap();
    assert_eq!(
        zone.geometry,
        Geometry::Rectangle(Rect { x: 10.0, y: 5.0, width: 30.0, height: 25.0 })
    );
    assert_eq!(effects[2], Effect::Created(zone.id));
    assert_eq!(state.selection(), Some(zone.id));
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.tool(), Tool::Select);
    // The trailing click must not deselect
    assert_eq!(effects[3], Effect::None);
}

#[test]
fn up_left_and_down_right_drags_give_the_same_rectangle() {
    let mut a = ShapeModel::new();
    let mut b = ShapeModel::new();
    run(zone_tool(ZoneShape::Rectangle), &mut a, &drag_gesture(p(0.0, 0.0), p(5.0, 5.0), p(12.0, 9.0)));
    run(zone_tool(ZoneShape::Rectangle), &mut b, &drag_gesture(p(12.0, 9.0), p(5.0, 5.0), p(0.0, 0.0)));
    assert_eq!(a.list().next().unwrap().geometry, b.list().next().unwrap().geometry);
}

#[test]
fn tiny_rectangle_is_discarded() {
    let mut model = ShapeModel::new();
    let (state, effects) = run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &[InputEvent::PressDown(p(10.0, 10.0)), InputEvent::PressUp(p(10.5, 10.5))],
    );
    assert!(model.is_empty());
    assert_eq!(effects[1], Effect::Discarded);
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn thin_rectangle_is_discarded_even_if_long() {
    let mut model = ShapeModel::new();
    run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &[InputEvent::PressDown(p(0.0, 0.0)), InputEvent::PressUp(p(100.0, 1.0))],
    );
    assert!(model.is_empty());
}

#[test]
fn drawing_phase_tracks_pointer() {
    let mut model = ShapeModel::new();
    let (state, _) = run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &[InputEvent::PressDown(p(5.0, 5.0)), InputEvent::Move(p(1.0, 9.0))],
    );
    assert_eq!(state.phase(), Phase::Drawing);
    assert_eq!(
        state.preview(),
        Some(Geometry::Rectangle(Rect { x: 1.0, y: 5.0, width: 4.0, height: 4.0 }))
    );
    assert!(model.is_empty());
}

#[test]
fn circle_radius_comes_from_drag_distance() {
    let mut model = ShapeModel::new();
    run(
        zone_tool(ZoneShape::Circle),
        &mut model,
        &drag_gesture(p(10.0, 10.0), p(12.0, 10.0), p(13.0, 14.0)),
    );
    assert_eq!(
        model.list().next().unwrap().geometry,
        Geometry::Circle(Circle { cx: 10.0, cy: 10.0, radius: 5.0 })
    );

    let mut model = ShapeModel::new();
    run(
        zone_tool(ZoneShape::Circle),
        &mut model,
        &[InputEvent::PressDown(p(10.0, 10.0)), InputEvent::PressUp(p(10.6, 10.6))],
    );
    assert!(model.is_empty());
}

#[test]
fn marker_click_creates_and_selects() {
    let mut model = ShapeModel::new();
    let state = EditorState::new().with_tool(Tool::Marker { category: Category::Noise });
    assert_eq!(state.phase(), Phase::Placing);

    let (state, effects) = run(state, &mut model, &[InputEvent::Click(p(3.0, 4.0))]);
    let marker = model.list().next().unwrap();
    assert_eq!(marker.geometry, Geometry::Marker(p(3.0, 4.0)));
    assert_eq!(marker.category, Category::Noise);
    assert_eq!(effects, vec![Effect::Created(marker.id)]);
    assert_eq!(state.selection(), Some(marker.id));
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn marker_click_over_existing_shape_selects_instead() {
    let mut model = ShapeModel::new();
    let existing = model
        .insert(AnnotationDraft::new(
            Category::Seating,
            Geometry::Rectangle(Rect { x: 0.0, y: 0.0, width: 50.0, height: 50.0 }),
        ))
        .unwrap();
    let state = EditorState::new().with_tool(Tool::Marker { category: Category::Noise });
    let (state, effects) = run(state, &mut model, &[InputEvent::Click(p(25.0, 25.0))]);
    assert_eq!(model.len(), 1);
    assert_eq!(effects, vec![Effect::Selected(Some(existing))]);
    assert_eq!(state.selection(), Some(existing));
}

#[test]
fn polygon_needs_three_vertices() {
    let mut model = ShapeModel::new();
    let (_, effects) = run(
        zone_tool(ZoneShape::Polygon),
        &mut model,
        &[
            InputEvent::Click(p(0.0, 0.0)),
            InputEvent::Click(p(50.0, 0.0)),
            InputEvent::key(Key::Enter),
        ],
    );
    assert!(model.is_empty());
    assert_eq!(effects.last(), Some(&Effect::Discarded));
}

#[test]
fn polygon_keeps_click_order() {
    let mut model = ShapeModel::new();
    let clicks = [p(0.0, 0.0), p(50.0, 0.0), p(25.0, 40.0)];
    let mut events: Vec<_> = clicks.iter().map(|&c| InputEvent::Click(c)).collect();
    events.push(InputEvent::key(Key::Enter));

    let (state, _) = run(zone_tool(ZoneShape::Polygon), &mut model, &events);
    assert_eq!(model.len(), 1);
    assert_eq!(
        model.list().next().unwrap().geometry,
        Geometry::Polygon { points: clicks.to_vec() }
    );
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn polygon_closes_on_first_vertex() {
    let mut model = ShapeModel::new();
    let (state, effects) = run(
        zone_tool(ZoneShape::Polygon),
        &mut model,
        &[
            InputEvent::Click(p(0.0, 0.0)),
            InputEvent::Click(p(50.0, 0.0)),
            InputEvent::Click(p(50.0, 50.0)),
            InputEvent::Click(p(0.0, 50.0)),
        ],
    );
    assert_eq!(state.phase(), Phase::PolygonDrawing);
    assert_eq!(effects.last(), Some(&Effect::None));

    let (state, effects) = run(state, &mut model, &[InputEvent::Click(p(2.0, 1.0))]);
    assert!(matches!(effects[0], Effect::Created(_)));
    assert_eq!(state.phase(), Phase::Idle);
    let Geometry::Polygon { points } = &model.list().next().unwrap().geometry else {
        panic!("polygon expected");
    };
    assert_eq!(points.len(), 4);
}

#[test]
fn double_click_finishes_without_duplicate_vertex() {
    let mut model = ShapeModel::new();
    run(
        zone_tool(ZoneShape::Polygon),
        &mut model,
        &[
            InputEvent::Click(p(0.0, 0.0)),
            InputEvent::Click(p(50.0, 0.0)),
            InputEvent::Click(p(25.0, 40.0)),
            InputEvent::Click(p(25.0, 40.0)),
            InputEvent::DoubleClick(p(25.0, 40.0)),
        ],
    );
    let Geometry::Polygon { points } = &model.list().next().unwrap().geometry else {
        panic!("polygon expected");
    };
    assert_eq!(points.len(), 3);
}

fn selected_rect(model: &mut ShapeModel) -> (EditorState, sensemap_core::AnnotationId) {
    let id = model
        .insert(AnnotationDraft::new(
            Category::QuietZone,
            Geometry::Rectangle(Rect { x: 100.0, y: 100.0, width: 40.0, height: 20.0 }),
        ))
        .unwrap();
    (EditorState::new().with_selection(Some(id)), id)
}

#[test]
fn centroid_drag_translates_exactly() {
    let mut model = ShapeModel::new();
    let (state, id) = selected_rect(&mut model);

    let (state, effects) = run(
        state,
        &mut model,
        &drag_gesture(p(120.0, 110.0), p(125.0, 100.0), p(127.5, 93.0)),
    );
    assert_eq!(effects[2], Effect::Updated(id));
    assert_eq!(
        model.get(id).unwrap().geometry,
        Geometry::Rectangle(Rect { x: 107.5, y: 83.0, width: 40.0, height: 20.0 })
    );
    assert_eq!(state.selection(), Some(id));
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn corner_drag_previews_then_commits() {
    let mut model = ShapeModel::new();
    let (state, id) = selected_rect(&mut model);
    let before = model.get(id).unwrap().geometry.clone();

    let (state, _) = run(
        state,
        &mut model,
        &[InputEvent::PressDown(p(140.0, 120.0)), InputEvent::Move(p(90.0, 90.0))],
    );
    assert_eq!(state.phase(), Phase::Editing);
    assert_eq!(model.get(id).unwrap().geometry, before);
    let expected = Geometry::Rectangle(Rect { x: 90.0, y: 90.0, width: 10.0, height: 10.0 });
    assert_eq!(state.preview(), Some(expected.clone()));
    // Handles follow the preview
    let handles = state.selected_handles(&model);
    assert_eq!(handles[0].kind, HandleKind::Corner(Corner::TopLeft));
    assert_eq!(handles[0].position, p(90.0, 90.0));

    run(state, &mut model, &[InputEvent::PressUp(p(90.0, 90.0))]);
    assert_eq!(model.get(id).unwrap().geometry, expected);
}

#[test]
fn escape_during_edit_leaves_model_untouched() {
    let mut model = ShapeModel::new();
    let (state, id) = selected_rect(&mut model);
    let before = model.clone();

    let (state, effects) = run(
        state,
        &mut model,
        &[
            InputEvent::PressDown(p(100.0, 100.0)),
            InputEvent::Move(p(0.0, 0.0)),
            InputEvent::key(Key::Escape),
        ],
    );
    assert_eq!(model, before);
    assert_eq!(effects[2], Effect::Discarded);
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.selection(), None);
    assert!(model.contains(id));
}

#[test]
fn escape_during_draw_discards() {
    let mut model = ShapeModel::new();
    let (state, _) = run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &[
            InputEvent::PressDown(p(0.0, 0.0)),
            InputEvent::Move(p(50.0, 50.0)),
            InputEvent::key(Key::Escape),
            InputEvent::PressUp(p(50.0, 50.0)),
        ],
    );
    assert!(model.is_empty());
    assert_eq!(state, EditorState::new());
}

#[test]
fn select_tool_click_selects_and_deselects() {
    let mut model = ShapeModel::new();
    let (_, id) = selected_rect(&mut model);
    let (state, effects) = run(
        EditorState::new(),
        &mut model,
        &[InputEvent::Click(p(110.0, 110.0))],
    );
    assert_eq!(effects, vec![Effect::Selected(Some(id))]);
    assert_eq!(state.selection(), Some(id));
    assert_eq!(state.selected_handles(&model).len(), 5);

    let (state, effects) = run(state, &mut model, &[InputEvent::Click(p(500.0, 500.0))]);
    assert_eq!(effects, vec![Effect::Selected(None)]);
    assert!(state.selected_handles(&model).is_empty());
}

#[test]
fn delete_key_removes_selection() {
    let mut model = ShapeModel::new();
    let (state, id) = selected_rect(&mut model);
    let (state, effects) = run(state, &mut model, &[InputEvent::key(Key::Delete)]);
    assert_eq!(effects, vec![Effect::Deleted(id)]);
    assert!(model.is_empty());
    assert_eq!(state.selection(), None);
}

#[test]
fn click_elsewhere_after_a_drag_is_not_dropped() {
    let mut model = ShapeModel::new();
    let (_, existing) = selected_rect(&mut model);

    let (state, effects) = run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &[
            InputEvent::PressDown(p(0.0, 0.0)),
            InputEvent::PressUp(p(50.0, 50.0)),
            InputEvent::Click(p(110.0, 110.0)),
        ],
    );
    assert!(matches!(effects[1], Effect::Created(_)));
    assert_eq!(effects[2], Effect::Selected(Some(existing)));
    assert_eq!(state.selection(), Some(existing));
}

#[test]
fn only_the_click_right_after_release_is_ignored() {
    let mut model = ShapeModel::new();
    let (state, effects) = run(
        zone_tool(ZoneShape::Rectangle),
        &mut model,
        &[
            InputEvent::PressDown(p(0.0, 0.0)),
            InputEvent::PressUp(p(50.0, 50.0)),
            InputEvent::Click(p(50.0, 50.0)),
            InputEvent::Click(p(500.0, 500.0)),
        ],
    );
    let Effect::Created(id) = effects[1] else {
        panic!("expected a new zone, got {:?}", effects[1]);
    };
    assert_eq!(effects[2], Effect::None);
    assert_eq!(effects[3], Effect::Selected(None));
    assert_eq!(state.selection(), None);
    assert!(model.contains(id));
}

#[test]
fn circle_radius_handle_drag_commits() {
    let mut model = ShapeModel::new();
    let id = model
        .insert(AnnotationDraft::new(
            Category::Noise,
            Geometry::Circle(Circle::new(p(50.0, 50.0), 10.0)),
        ))
        .unwrap();
    let state = EditorState::new().with_selection(Some(id));

    let (state, effects) = run(
        state,
        &mut model,
        &[
            InputEvent::PressDown(p(60.0, 50.0)),
            InputEvent::Move(p(65.0, 50.0)),
        ],
    );
    assert_eq!(state.phase(), Phase::Editing);
    assert_eq!(effects[1], Effect::None);
    assert_eq!(
        state.preview(),
        Some(Geometry::Circle(Circle { cx: 50.0, cy: 50.0, radius: 15.0 }))
    );

    let (state, effects) = run(state, &mut model, &[InputEvent::PressUp(p(70.0, 50.0))]);
    assert_eq!(effects, vec![Effect::Updated(id)]);
    assert_eq!(
        model.get(id).unwrap().geometry,
        Geometry::Circle(Circle { cx: 50.0, cy: 50.0, radius: 20.0 })
    );
    assert_eq!(state.selection(), Some(id));
}

#[test]
fn polygon_vertex_handle_drag_moves_one_vertex() {
    let mut model = ShapeModel::new();
    let id = model
        .insert(AnnotationDraft::new(
            Category::Crowding,
            Geometry::Polygon {
                points: vec![p(0.0, 0.0), p(90.0, 0.0), p(0.0, 60.0)],
            },
        ))
        .unwrap();
    let state = EditorState::new().with_selection(Some(id));

    let (state, effects) = run(
        state,
        &mut model,
        &drag_gesture(p(90.0, 0.0), p(95.0, 5.0), p(100.0, 10.0)),
    );
    assert_eq!(effects[2], Effect::Updated(id));
    assert_eq!(effects[3], Effect::None);
    assert_eq!(
        model.get(id).unwrap().geometry,
        Geometry::Polygon {
            points: vec![p(0.0, 0.0), p(100.0, 10.0), p(0.0, 60.0)],
        }
    );
    assert_eq!(state.selection(), Some(id));
    assert_eq!(state.phase(), Phase::Idle);
}
