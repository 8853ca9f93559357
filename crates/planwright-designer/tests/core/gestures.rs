use planwright_core::{EditorConfig, Point};
use planwright_designer::catalog::CatalogRegistry;
use planwright_designer::gesture::{Gesture, PanTrigger, PointerButton};
use planwright_designer::model::{NodeKind, Wall};
use planwright_designer::session::DesignerSession;
use planwright_designer::viewport::ScreenPoint;
use planwright_core::DesignError;
use std::sync::Arc;

fn session() -> DesignerSession {
    DesignerSession::new(&EditorConfig::default(), Arc::new(CatalogRegistry::standard()))
}

#[test]
fn test_drag_snaps_and_commits_once() {
    let mut session = session();
    let id = session
        .place_catalog_cabinet_at("base-30", Point::new(0.0, 0.0))
        .unwrap();
    let depth_before = session.history().undo_depth();

    session.begin_drag(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(11.0, 12.0));
    session.update_gesture(ScreenPoint::new(23.0, 47.0));
    assert_eq!(session.history().undo_depth(), depth_before);

    assert!(session.end_gesture());
    let cab = session.state().cabinet(&id).unwrap();
    assert_eq!((cab.x, cab.y), (20.0, 40.0));
    assert_eq!(session.history().undo_depth(), depth_before + 1);
    assert!(session.gesture().is_idle());
}

#[test]
fn test_drag_divides_by_scale() {
    let mut session = session();
    session.set_units(planwright_core::UnitSystem::Metric);
    session.viewport_mut().set_scale(2.0);
    session.viewport_mut().set_snap_enabled(false);
    let id = session
        .place_catalog_cabinet_at("base-30", Point::new(100.0, 100.0))
        .unwrap();

    session.begin_drag(&id, ScreenPoint::new(500.0, 500.0)).unwrap();
    session.update_gesture(ScreenPoint::new(530.0, 470.0));
    session.end_gesture();
    let cab = session.state().cabinet(&id).unwrap();
    assert_eq!((cab.x, cab.y), (115.0, 85.0));
}

#[test]
fn test_drag_without_movement_commits_nothing() {
    let mut session = session();
    let id = session.add_node(NodeKind::Room);
    let depth = session.history().undo_depth();

    session.begin_drag(&id, ScreenPoint::new(10.0, 10.0)).unwrap();
    session.update_gesture(ScreenPoint::new(12.0, 11.0));
    assert!(!session.end_gesture());
    assert_eq!(session.history().undo_depth(), depth);
}

#[test]
fn test_resize_clamps_to_minimum() {
    let mut session = session();
    let id = session.add_node(NodeKind::Room);

    session.begin_resize(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(-200.0, -95.0));
    assert!(session.end_gesture());
    assert_eq!(session.canvas().size_of(&id).unwrap(), (10.0, 10.0));

    session.viewport_mut().set_snap_enabled(false);
    session.begin_resize(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(33.0, -50.0));
    session.end_gesture();
    assert_eq!(session.canvas().size_of(&id).unwrap(), (43.0, 10.0));
}

#[test]
fn test_resize_snaps_size() {
    let mut session = session();
    let id = session.add_node(NodeKind::Door);
    session.begin_resize(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(27.0, 3.0));
    session.end_gesture();
    // 60 + 27 = 87 -> 80; 12 + 3 = 15 -> 20
    assert_eq!(session.canvas().size_of(&id).unwrap(), (80.0, 20.0));
}

#[test]
fn test_pan_requires_trigger_and_never_commits() {
    let mut session = session();
    assert!(!session.begin_pan(ScreenPoint::new(0.0, 0.0), PanTrigger::default()));
    assert!(session.gesture().is_idle());

    let trigger = PanTrigger {
        button: PointerButton::Middle,
        ..PanTrigger::default()
    };
    assert!(session.begin_pan(ScreenPoint::new(10.0, 10.0), trigger));
    session.update_gesture(ScreenPoint::new(15.0, 30.0));
    session.update_gesture(ScreenPoint::new(40.0, 5.0));
    assert_eq!(session.viewport().pan(), (30.0, -5.0));

    assert!(!session.end_gesture());
    assert!(!session.can_undo());
    assert_eq!(session.edit_generation(), 0);
}

#[test]
fn test_abandoned_gesture_cleans_up_once() {
    let mut session = session();
    let id = session.add_node(NodeKind::Window);
    let depth = session.history().undo_depth();

    session.begin_drag(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(100.0, 0.0));
    assert!(session.abandon_gesture());
    assert!(!session.abandon_gesture());
    assert!(!session.end_gesture());
    assert_eq!(session.history().undo_depth(), depth + 1);
}

#[test]
fn test_new_gesture_ends_active_one() {
    let mut session = session();
    let id = session.add_node(NodeKind::Room);
    let depth = session.history().undo_depth();

    session.begin_drag(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(60.0, 60.0));
    let trigger = PanTrigger {
        on_empty_canvas: true,
        ..PanTrigger::default()
    };
    assert!(session.begin_pan(ScreenPoint::new(0.0, 0.0), trigger));
    assert!(matches!(session.gesture(), Gesture::Panning { .. }));
    assert_eq!(session.history().undo_depth(), depth + 1);
}

#[test]
fn test_undo_mid_gesture_reverts_the_gesture() {
    let mut session = session();
    let id = session.add_node(NodeKind::Room);
    let origin = session.canvas().position_of(&id).unwrap();

    session.begin_drag(&id, ScreenPoint::new(0.0, 0.0)).unwrap();
    session.update_gesture(ScreenPoint::new(200.0, 200.0));
    assert!(session.undo());
    assert!(session.gesture().is_idle());
    assert_eq!(session.canvas().position_of(&id).unwrap(), origin);
}

#[test]
fn test_walls_cannot_be_dragged() {
    let mut session = session();
    let wall_id = session
        .add_entity(Wall::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0, 10.0))
        .unwrap();
    assert!(matches!(
        session.begin_drag(&wall_id, ScreenPoint::new(0.0, 0.0)),
        Err(DesignError::NotMovable { .. })
    ));
    assert!(session.gesture().is_idle());
}
