use planwright_core::{DesignError, EditorConfig, Point, UnitSystem};
use planwright_designer::catalog::CatalogRegistry;
use planwright_designer::model::{CabinetPatch, LegacyNode, NodeKind};
use planwright_designer::session::{DesignerSession, GENERATED_COUNTERTOP_ID};
use planwright_designer::shortcuts::{EditorAction, KeyInput, NudgeDirection};
use std::sync::Arc;

fn session() -> DesignerSession {
    DesignerSession::new(&EditorConfig::default(), Arc::new(CatalogRegistry::standard()))
}

#[test]
fn test_new_session_uses_configured_units() {
    let mut config = EditorConfig::default();
    config.default_units = UnitSystem::Metric;
    let session = DesignerSession::new(&config, Arc::new(CatalogRegistry::standard()));
    assert_eq!(session.state().settings.units, UnitSystem::Metric);
    assert!(session.canvas().is_empty());
}

#[test]
fn test_add_node_at_anchor() {
    let mut session = session();
    session.viewport_mut().set_pan(10.0, -20.0);
    session.viewport_mut().set_scale(1.5);

    let id = session.add_node(NodeKind::Door);
    let node = session.canvas().node(&id).unwrap();
    // (80 - 10) / 1.5 = 46.67 -> 47; (80 + 20) / 1.5 = 66.67 -> 67
    assert_eq!(node.position(), Point::new(47.0, 67.0));
    assert_eq!(node.size().0, 60.0);
    assert_eq!(session.selection(), Some(id.as_str()));
    assert_eq!(session.history().undo_depth(), 1);
}

#[test]
fn test_place_catalog_cabinet_at_anchor() {
    let mut session = session();
    let id = session.place_catalog_cabinet("tall-24x84").unwrap();
    let cab = session.state().cabinet(&id).unwrap();
    assert_eq!((cab.x, cab.y), (120.0, 120.0));
    assert_eq!(session.selection(), Some(id.as_str()));
}

#[test]
fn test_edit_generation_tracks_every_mutation() {
    let mut session = session();
    assert_eq!(session.edit_generation(), 0);
    let id = session.place_catalog_cabinet("base-30").unwrap();
    assert_eq!(session.edit_generation(), 1);
    session
        .update_entity(&id, CabinetPatch { rotation: Some(90.0), ..CabinetPatch::default() })
        .unwrap();
    assert_eq!(session.edit_generation(), 2);
    session.undo();
    assert_eq!(session.edit_generation(), 3);
    session.viewport_mut().zoom_in();
    assert_eq!(session.edit_generation(), 3);
}

#[test]
fn test_delete_and_duplicate_selection() {
    let mut session = session();
    assert!(matches!(session.delete_selection(), Err(DesignError::NoSelection)));

    let node_id = session.add_node(NodeKind::Room);
    let copy_id = session.duplicate_selection().unwrap();
    assert_ne!(copy_id, node_id);
    assert_eq!(session.selection(), Some(copy_id.as_str()));
    let original = session.canvas().position_of(&node_id).unwrap();
    let copy = session.canvas().position_of(&copy_id).unwrap();
    assert_eq!(copy, Point::new(original.x + 20.0, original.y + 20.0));

    session.delete_selection().unwrap();
    assert!(session.canvas().node(&copy_id).is_none());
    assert_eq!(session.selection(), None);
}

#[test]
fn test_duplicate_cabinet() {
    let mut session = session();
    let id = session.place_catalog_cabinet_at("base-36", Point::new(0.0, 0.0)).unwrap();
    let copy_id = session.duplicate_selection().unwrap();
    let copy = session.state().cabinet(&copy_id).unwrap();
    assert_eq!((copy.x, copy.y), (20.0, 20.0));
    assert_eq!(copy.width, session.state().cabinet(&id).unwrap().width);
}

#[test]
fn test_nudge_commits_each_press() {
    let mut session = session();
    let id = session.place_catalog_cabinet_at("base-30", Point::new(100.0, 100.0)).unwrap();
    let depth = session.history().undo_depth();

    session.nudge(NudgeDirection::Right, false).unwrap();
    session.nudge(NudgeDirection::Right, false).unwrap();
    session.nudge(NudgeDirection::Up, true).unwrap();
    let cab = session.state().cabinet(&id).unwrap();
    assert_eq!((cab.x, cab.y), (104.0, 90.0));
    assert_eq!(session.history().undo_depth(), depth + 3);

    session.undo();
    let cab = session.state().cabinet(&id).unwrap();
    assert_eq!((cab.x, cab.y), (104.0, 100.0));
}

#[test]
fn test_generate_countertop_from_cabinets() {
    let mut session = session();
    assert_eq!(session.generate_countertop_from_cabinets(), None);

    session.place_catalog_cabinet_at("base-30", Point::new(0.0, 0.0)).unwrap();
    session.place_catalog_cabinet_at("base-36", Point::new(762.0, 0.0)).unwrap();
    let id = session.generate_countertop_from_cabinets().unwrap();
    assert_eq!(id, GENERATED_COUNTERTOP_ID);

    let ct = session.state().countertop(&id).unwrap();
    assert_eq!(ct.polygon[0], Point::new(-40.0, -40.0));
    assert!((ct.polygon[2].x - 1716.4).abs() < 1e-9);
    assert!((ct.polygon[2].y - 649.6).abs() < 1e-9);
    assert_eq!(ct.thickness, 30.0);

    // Regenerating replaces rather than duplicates
    session.generate_countertop_from_cabinets().unwrap();
    assert_eq!(session.state().countertops.len(), 1);
    assert_eq!(session.takeoff().items.len(), 4);
}

#[test]
fn test_set_node_field_uses_schema() {
    let mut session = session();
    let id = session.add_node(NodeKind::Door);

    session.set_node_field(&id, "swing", "right").unwrap();
    session.set_node_field(&id, "label", "Pantry").unwrap();
    assert!(matches!(
        session.set_node_field(&id, "w", "4"),
        Err(DesignError::InvalidField { .. })
    ));
    assert!(session.set_node_field(&id, "floor", "2").is_err());
    assert!(matches!(
        session.set_node_field("ghost", "label", "x"),
        Err(DesignError::NotFound { .. })
    ));

    match session.canvas().node(&id).unwrap() {
        LegacyNode::Door(door) => {
            assert_eq!(door.frame.label, "Pantry");
            assert_eq!(door.swing, planwright_designer::model::DoorSwing::Right);
        }
        other => panic!("expected door, got {:?}", other),
    }
}

#[test]
fn test_set_units_commits_only_on_change() {
    let mut session = session();
    session.set_units(UnitSystem::Imperial);
    assert!(!session.can_undo());
    session.set_units(UnitSystem::Metric);
    assert!(session.can_undo());
    assert_eq!(session.state().settings.units, UnitSystem::Metric);
}

#[test]
fn test_keyboard_shortcuts_drive_session() {
    let mut session = session();
    let id = session.add_node(NodeKind::Room);

    assert_eq!(
        session.handle_key(&KeyInput::new("ArrowDown").with_shift()),
        Some(EditorAction::Nudge { direction: NudgeDirection::Down, large: true })
    );
    assert_eq!(session.canvas().position_of(&id).unwrap(), Point::new(80.0, 90.0));

    session.handle_key(&KeyInput::new("z").with_cmd());
    assert_eq!(session.canvas().position_of(&id).unwrap(), Point::new(80.0, 80.0));
    session.handle_key(&KeyInput::new("y").with_cmd());
    assert_eq!(session.canvas().position_of(&id).unwrap(), Point::new(80.0, 90.0));

    session.handle_key(&KeyInput::new("=").with_cmd());
    assert_eq!(session.viewport().scale(), 1.1);
    session.handle_key(&KeyInput::new("0").with_cmd());
    assert_eq!(session.viewport().scale(), 1.0);

    session.handle_key(&KeyInput::new("Delete"));
    assert!(session.canvas().node(&id).is_none());
    // Nothing selected: bound but ignored
    assert_eq!(session.handle_key(&KeyInput::new("Delete")), Some(EditorAction::Delete));
    assert_eq!(session.handle_key(&KeyInput::new("x")), None);
}

#[test]
fn test_undo_clears_stale_selection() {
    let mut session = session();
    let id = session.add_node(NodeKind::Window);
    assert_eq!(session.selection(), Some(id.as_str()));
    session.undo();
    assert_eq!(session.selection(), None);
    assert!(session.select(&id).is_err());
}
