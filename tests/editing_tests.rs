//! Integrationstests für die Editing-Modi:
//! - Split, Merge (mit Host-Bestätigung), Offset
//! - Transform (Verschieben, Skalieren, Abbruch)
//! - Stützpunkt-Drag, Messlinien-Länge, Bogen-Griffe

use approx::assert_abs_diff_eq;
use glam::DVec2;
use map_feature_editor::core::keys;
use map_feature_editor::geometry::generate_arc;
use map_feature_editor::app::modes::{HandleRole, MergeCandidate, OverlaySync};
use map_feature_editor::{
    AppController, AppIntent, AppState, EditorEvent, EditorOptions, EditorTool, Feature,
    FeatureCollection, Geometry, Key, LineEnd, Modifiers, OffsetSide, Projection, Properties,
};
use serde_json::Value;

fn run(controller: &mut AppController, state: &mut AppState, intent: AppIntent) {
    controller
        .handle_intent(state, intent)
        .expect("Intent sollte ohne Fehler durchlaufen");
}

fn click(x: f64, y: f64) -> AppIntent {
    AppIntent::PointerClicked {
        world_pos: DVec2::new(x, y),
        modifiers: Modifiers::default(),
    }
}

/// Kompletter Drag: Start, ein Zwischenschritt, Ende.
fn drag(controller: &mut AppController, state: &mut AppState, from: DVec2, to: DVec2) {
    run(
        controller,
        state,
        AppIntent::PointerDragStarted {
            world_pos: from,
            modifiers: Modifiers::default(),
        },
    );
    run(
        controller,
        state,
        AppIntent::PointerDragged {
            world_pos: from.lerp(to, 0.5),
        },
    );
    run(controller, state, AppIntent::PointerDragEnded { world_pos: to });
}

fn line(id: u64, coords: &[(f64, f64)], properties: Properties) -> Feature {
    Feature::new(
        id,
        Geometry::LineString(coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()),
        properties,
    )
}

fn square(id: u64, size: f64) -> Feature {
    Feature::new(
        id,
        Geometry::polygon(vec![
            DVec2::ZERO,
            DVec2::new(size, 0.0),
            DVec2::new(size, size),
            DVec2::new(0.0, size),
        ]),
        Properties::new(),
    )
}

fn arc_feature(id: u64, with_control_points: bool) -> Feature {
    let (p1, p2, p3) = (DVec2::ZERO, DVec2::new(10.0, 10.0), DVec2::new(20.0, 0.0));
    let mut feature = Feature::new(
        id,
        Geometry::LineString(generate_arc(p1, p2, p3, 32)),
        Properties::new(),
    );
    feature.set_flag(keys::IS_ARC, true);
    if with_control_points {
        feature.set_arc_control_points([p1, p2, p3]);
    }
    feature
}

fn load(features: Vec<Feature>) -> (AppController, AppState) {
    let options = EditorOptions {
        projection: Projection::Planar,
        ..EditorOptions::default()
    };
    let mut controller = AppController::new();
    let mut state = AppState::with_options(options);
    run(
        &mut controller,
        &mut state,
        AppIntent::FeaturesLoaded {
            collection: FeatureCollection { features },
        },
    );
    state.drain_events();
    (controller, state)
}

fn named(name: &str) -> Properties {
    let mut properties = Properties::new();
    properties.insert(keys::NAME.into(), Value::from(name));
    properties
}

fn coords_of(state: &AppState, id: u64) -> Vec<DVec2> {
    state
        .store
        .get(id)
        .map(|f| f.geometry().vertices())
        .expect("Feature vorhanden")
}

// ── Split ────────────────────────────────────────────────────────

#[test]
fn test_split_replaces_line_with_two_named_parts() {
    let (mut controller, mut state) = load(vec![line(1, &[(0.0, 0.0), (100.0, 0.0)], named("Weg"))]);

    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Split,
        },
    );
    run(&mut controller, &mut state, click(40.0, 2.0));

    assert_eq!(state.feature_count(), 2);
    assert!(!state.store.contains(1));
    let events = state.drain_events();
    let parts: Vec<&Feature> = state.store.iter().collect();
    assert_eq!(
        parts[0].line_coords(),
        Some(&[DVec2::ZERO, DVec2::new(40.0, 0.0)][..])
    );
    assert_eq!(
        parts[1].line_coords(),
        Some(&[DVec2::new(40.0, 0.0), DVec2::new(100.0, 0.0)][..])
    );
    assert_eq!(parts[0].name(), Some("Weg 1"));
    assert_eq!(parts[1].name(), Some("Weg 2"));
    assert!(events.contains(&EditorEvent::FeaturesReplaced {
        removed: vec![1],
        added: vec![parts[0].id, parts[1].id],
    }));

    run(&mut controller, &mut state, AppIntent::UndoRequested);
    assert_eq!(state.feature_count(), 1);
    assert!(state.store.contains(1));
}

#[test]
fn test_split_ignores_arcs_and_line_ends() {
    let (mut controller, mut state) = load(vec![
        arc_feature(1, true),
        line(2, &[(0.0, 50.0), (100.0, 50.0)], Properties::new()),
    ]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Split,
        },
    );

    run(&mut controller, &mut state, click(10.0, 10.0));
    run(&mut controller, &mut state, click(100.0, 50.0));

    assert_eq!(state.feature_count(), 2);
    assert!(!state.can_undo());
}

// ── Merge ────────────────────────────────────────────────────────

#[test]
fn test_merge_drag_proposes_candidate_and_confirmation_merges() {
    let (mut controller, mut state) = load(vec![
        line(1, &[(0.0, 0.0), (100.0, 0.0)], named("A")),
        line(2, &[(130.0, 0.0), (230.0, 0.0)], named("B")),
    ]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Merge,
        },
    );
    run(&mut controller, &mut state, click(50.0, 0.0));
    assert_eq!(state.active_selection(), vec![1]);
    state.drain_events();

    drag(
        &mut controller,
        &mut state,
        DVec2::new(100.0, 0.0),
        DVec2::new(110.0, 0.0),
    );

    let events = state.drain_events();
    assert!(events.contains(&EditorEvent::FeaturesModified { features: vec![1] }));
    let candidate = events
        .iter()
        .find_map(|e| match e {
            EditorEvent::MergeRequested { candidate } => Some(*candidate),
            _ => None,
        })
        .expect("Merge-Kandidat erwartet");
    assert_eq!(candidate.feature_a, 1);
    assert_eq!(candidate.feature_b, 2);
    assert_abs_diff_eq!(candidate.distance, 20.0, epsilon = 1e-9);

    run(
        &mut controller,
        &mut state,
        AppIntent::MergeConfirmed { candidate },
    );

    assert_eq!(state.feature_count(), 1);
    let merged = state.store.iter().next().expect("zusammengeführte Linie");
    assert_eq!(
        merged.line_coords(),
        Some(
            &[
                DVec2::ZERO,
                DVec2::new(110.0, 0.0),
                DVec2::new(230.0, 0.0)
            ][..]
        )
    );
    assert_eq!(merged.name(), Some("A"));
    assert!(state.active_selection().is_empty());

    run(&mut controller, &mut state, AppIntent::UndoRequested);
    assert_eq!(state.feature_count(), 2);
}

#[test]
fn test_merge_drag_without_nearby_endpoint_proposes_nothing() {
    let (mut controller, mut state) = load(vec![
        line(1, &[(0.0, 0.0), (100.0, 0.0)], Properties::new()),
        line(2, &[(300.0, 0.0), (400.0, 0.0)], Properties::new()),
    ]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Merge,
        },
    );
    run(&mut controller, &mut state, click(50.0, 0.0));
    drag(
        &mut controller,
        &mut state,
        DVec2::new(100.0, 0.0),
        DVec2::new(120.0, 0.0),
    );

    assert!(!state
        .drain_events()
        .iter()
        .any(|e| matches!(e, EditorEvent::MergeRequested { .. })));
    assert_eq!(coords_of(&state, 1)[1], DVec2::new(120.0, 0.0));
}

// ── Offset ───────────────────────────────────────────────────────

#[test]
fn test_offset_request_and_confirm_on_both_sides() {
    let (mut controller, mut state) = load(vec![line(1, &[(0.0, 0.0), (100.0, 0.0)], named("Achse"))]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Offset,
        },
    );
    run(&mut controller, &mut state, click(50.0, 1.0));
    assert!(state
        .drain_events()
        .contains(&EditorEvent::OffsetRequested { feature: 1 }));

    run(
        &mut controller,
        &mut state,
        AppIntent::OffsetConfirmed {
            feature: 1,
            side: OffsetSide::Both,
            distance: 5.0,
        },
    );

    assert_eq!(state.feature_count(), 3);
    let offsets: Vec<&Feature> = state.store.iter().skip(1).collect();
    assert_eq!(
        offsets[0].line_coords(),
        Some(&[DVec2::new(0.0, 5.0), DVec2::new(100.0, 5.0)][..])
    );
    assert_eq!(
        offsets[1].line_coords(),
        Some(&[DVec2::new(0.0, -5.0), DVec2::new(100.0, -5.0)][..])
    );
    assert_eq!(offsets[0].name(), Some("Achse"));
    assert_eq!(state.modes.offset.pending(), None);
}

#[test]
fn test_offset_of_arc_drops_arc_tags() {
    let (mut controller, mut state) = load(vec![arc_feature(1, true)]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Offset,
        },
    );
    run(&mut controller, &mut state, click(10.0, 10.0));
    assert_eq!(state.modes.offset.pending(), Some(1));
    run(
        &mut controller,
        &mut state,
        AppIntent::OffsetConfirmed {
            feature: 1,
            side: OffsetSide::Left,
            distance: 2.0,
        },
    );

    let offset = state.store.iter().last().expect("Versatz vorhanden");
    assert_ne!(offset.id, 1);
    assert!(!offset.is_arc());
    assert!(offset.arc_control_points().is_none());
}

#[test]
fn test_offset_cancel_and_invalid_distance_leave_store_unchanged() {
    let (mut controller, mut state) = load(vec![line(1, &[(0.0, 0.0), (100.0, 0.0)], Properties::new())]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Offset,
        },
    );
    run(&mut controller, &mut state, click(50.0, 0.0));
    run(&mut controller, &mut state, AppIntent::OffsetCancelled);
    assert_eq!(state.modes.offset.pending(), None);

    run(
        &mut controller,
        &mut state,
        AppIntent::OffsetConfirmed {
            feature: 1,
            side: OffsetSide::Right,
            distance: f64::NAN,
        },
    );
    assert_eq!(state.feature_count(), 1);
}

#[test]
fn test_offset_confirm_for_other_feature_or_mode_is_ignored() {
    let (mut controller, mut state) = load(vec![
        line(1, &[(0.0, 0.0), (100.0, 0.0)], Properties::new()),
        line(2, &[(0.0, 50.0), (100.0, 50.0)], Properties::new()),
    ]);
    let confirm = |feature| AppIntent::OffsetConfirmed {
        feature,
        side: OffsetSide::Left,
        distance: 5.0,
    };

    // Select-Modus: keine offene Anfrage
    run(&mut controller, &mut state, confirm(1));
    assert_eq!(state.feature_count(), 2);

    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Offset,
        },
    );
    run(&mut controller, &mut state, click(50.0, 1.0));
    assert_eq!(state.modes.offset.pending(), Some(1));

    run(&mut controller, &mut state, confirm(2));
    assert_eq!(state.feature_count(), 2);
    assert_eq!(state.modes.offset.pending(), Some(1), "Anfrage bleibt offen");

    run(&mut controller, &mut state, confirm(1));
    assert_eq!(state.feature_count(), 3);
}

#[test]
fn test_merge_confirm_outside_merge_mode_or_out_of_reach_is_ignored() {
    let (mut controller, mut state) = load(vec![
        line(1, &[(0.0, 0.0), (100.0, 0.0)], Properties::new()),
        line(2, &[(300.0, 0.0), (400.0, 0.0)], Properties::new()),
    ]);
    let far_apart = MergeCandidate {
        feature_a: 1,
        end_a: LineEnd::End,
        feature_b: 2,
        end_b: LineEnd::Start,
        distance: 10.0,
    };

    run(
        &mut controller,
        &mut state,
        AppIntent::MergeConfirmed {
            candidate: far_apart,
        },
    );
    assert_eq!(state.feature_count(), 2, "Select-Modus führt keinen Merge aus");

    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Merge,
        },
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::MergeConfirmed {
            candidate: far_apart,
        },
    );
    assert_eq!(state.feature_count(), 2, "Enden 200 Einheiten auseinander");
    assert!(!state.can_undo());
}

#[test]
fn test_mode_selection_updates_interaction_flags() {
    let (mut controller, mut state) = load(vec![
        square(1, 100.0),
        line(2, &[(0.0, 200.0), (100.0, 200.0)], Properties::new()),
    ]);
    assert!(state.view.panning_enabled);

    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Transform,
        },
    );
    run(&mut controller, &mut state, click(50.0, 50.0));
    assert_eq!(state.active_selection(), vec![1]);
    assert!(state.view.feature_drag_enabled);
    assert!(!state.view.panning_enabled);

    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Offset,
        },
    );
    assert!(state.view.panning_enabled);
    run(&mut controller, &mut state, click(50.0, 201.0));
    assert_eq!(state.active_selection(), vec![2]);
    assert!(!state.view.panning_enabled);

    run(&mut controller, &mut state, AppIntent::OffsetCancelled);
    assert!(state.view.panning_enabled);
    assert!(!state.view.feature_drag_enabled);
}

// ── Transform ────────────────────────────────────────────────────

#[test]
fn test_transform_body_drag_translates_and_escape_restores() {
    let (mut controller, mut state) = load(vec![square(1, 100.0)]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Transform,
        },
    );
    run(&mut controller, &mut state, click(50.0, 50.0));
    assert_eq!(state.active_selection(), vec![1]);

    drag(
        &mut controller,
        &mut state,
        DVec2::new(50.0, 50.0),
        DVec2::new(60.0, 70.0),
    );
    assert_eq!(coords_of(&state, 1)[0], DVec2::new(10.0, 20.0));
    assert!(state
        .drain_events()
        .contains(&EditorEvent::FeaturesModified { features: vec![1] }));

    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDragStarted {
            world_pos: DVec2::new(60.0, 70.0),
            modifiers: Modifiers::default(),
        },
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDragged {
            world_pos: DVec2::new(300.0, 300.0),
        },
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::KeyPressed {
            key: Key::Escape,
            modifiers: Modifiers::default(),
        },
    );
    run(
        &mut controller,
        &mut state,
        AppIntent::PointerDragEnded {
            world_pos: DVec2::new(300.0, 300.0),
        },
    );

    assert_eq!(coords_of(&state, 1)[0], DVec2::new(10.0, 20.0));
    assert_eq!(state.active_selection(), vec![1]);
}

#[test]
fn test_transform_corner_drag_scales_from_opposite_corner() {
    let (mut controller, mut state) = load(vec![square(1, 100.0)]);
    run(
        &mut controller,
        &mut state,
        AppIntent::ActiveToolChanged {
            tool: EditorTool::Transform,
        },
    );
    run(&mut controller, &mut state, click(50.0, 50.0));

    drag(
        &mut controller,
        &mut state,
        DVec2::new(100.0, 100.0),
        DVec2::new(200.0, 200.0),
    );

    let extent = state
        .store
        .geometry(1)
        .and_then(|g| g.extent())
        .expect("Extent vorhanden");
    assert_abs_diff_eq!(extent.min.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(extent.min.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(extent.max.x, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(extent.max.y, 200.0, epsilon = 1e-9);
}

// ── Select/Modify ────────────────────────────────────────────────

#[test]
fn test_polygon_vertex_drag_keeps_ring_closed() {
    let (mut controller, mut state) = load(vec![square(1, 100.0)]);
    run(&mut controller, &mut state, click(50.0, 50.0));

    drag(
        &mut controller,
        &mut state,
        DVec2::ZERO,
        DVec2::new(-10.0, -10.0),
    );

    let ring = coords_of(&state, 1);
    assert_eq!(ring.first(), Some(&DVec2::new(-10.0, -10.0)));
    assert_eq!(ring.first(), ring.last());
}

#[test]
fn test_drag_on_segment_inserts_vertex() {
    let (mut controller, mut state) = load(vec![line(1, &[(0.0, 0.0), (100.0, 0.0)], Properties::new())]);
    run(&mut controller, &mut state, click(50.0, 0.0));

    drag(
        &mut controller,
        &mut state,
        DVec2::new(50.0, 1.0),
        DVec2::new(50.0, 20.0),
    );

    assert_eq!(
        coords_of(&state, 1),
        vec![DVec2::ZERO, DVec2::new(50.0, 20.0), DVec2::new(100.0, 0.0)]
    );
}

#[test]
fn test_measure_length_is_recomputed_after_vertex_drag() {
    let mut properties = Properties::new();
    properties.insert(keys::IS_LINE_TYPE.into(), Value::Bool(true));
    properties.insert(keys::IS_MEASURE.into(), Value::Bool(true));
    properties.insert(keys::MEASURE_LENGTH.into(), Value::from(100.0));
    let (mut controller, mut state) = load(vec![line(1, &[(0.0, 0.0), (100.0, 0.0)], properties)]);

    run(&mut controller, &mut state, click(50.0, 0.0));
    drag(
        &mut controller,
        &mut state,
        DVec2::new(100.0, 0.0),
        DVec2::new(200.0, 0.0),
    );

    let length = state
        .store
        .property(1, keys::MEASURE_LENGTH)
        .and_then(Value::as_f64)
        .expect("Messlänge vorhanden");
    assert_abs_diff_eq!(length, 200.0, epsilon = 1e-9);
}

#[test]
fn test_select_all_then_delete_removes_everything() {
    let (mut controller, mut state) = load(vec![
        line(1, &[(0.0, 0.0), (10.0, 0.0)], Properties::new()),
        square(2, 5.0),
    ]);

    run(&mut controller, &mut state, AppIntent::SelectAllRequested);
    assert_eq!(state.active_selection(), vec![1, 2]);
    run(&mut controller, &mut state, AppIntent::DeleteSelectedRequested);

    assert_eq!(state.feature_count(), 0);
    assert!(state.view.panning_enabled);
}

// ── Bogen-Griffe ─────────────────────────────────────────────────

fn handle_position(state: &AppState, role: HandleRole) -> Option<DVec2> {
    state
        .modes
        .select
        .overlay()
        .handles()
        .iter()
        .find(|h| h.role == role)
        .map(|h| h.position)
}

#[test]
fn test_arc_handle_drag_recomputes_arc_and_undo_resyncs_handles() {
    let (mut controller, mut state) = load(vec![arc_feature(1, true)]);
    run(&mut controller, &mut state, click(10.0, 10.0));
    assert_eq!(state.modes.select.overlay().arc(), Some(1));
    assert_eq!(
        handle_position(&state, HandleRole::Through),
        Some(DVec2::new(10.0, 10.0))
    );

    drag(
        &mut controller,
        &mut state,
        DVec2::new(10.0, 10.0),
        DVec2::new(10.0, 5.0),
    );

    let arc = state.store.get(1).expect("Bogen vorhanden");
    assert_eq!(
        arc.arc_control_points().map(|cps| cps[1]),
        Some(DVec2::new(10.0, 5.0))
    );
    let coords = arc.line_coords().expect("Bogen ist LineString");
    assert_eq!(coords.first(), Some(&DVec2::ZERO));
    assert_eq!(coords.last(), Some(&DVec2::new(20.0, 0.0)));

    run(&mut controller, &mut state, AppIntent::UndoRequested);

    assert_eq!(
        handle_position(&state, HandleRole::Through),
        Some(DVec2::new(10.0, 10.0))
    );
    assert_eq!(state.modes.select.overlay().arc(), Some(1));
    assert_eq!(
        state.modes.select.overlay().sync_state(),
        OverlaySync::Idle
    );
}

#[test]
fn test_selecting_arc_without_control_points_derives_them_once() {
    let (mut controller, mut state) = load(vec![arc_feature(1, false)]);
    run(&mut controller, &mut state, click(10.0, 10.0));

    let cps = state
        .store
        .get(1)
        .and_then(Feature::arc_control_points)
        .expect("Kontrollpunkte abgeleitet");
    assert_eq!(cps[0], DVec2::ZERO);
    assert_abs_diff_eq!(cps[1].x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cps[1].y, 10.0, epsilon = 1e-9);
    assert_eq!(cps[2], DVec2::new(20.0, 0.0));
}
