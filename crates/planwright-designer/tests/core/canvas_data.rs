use planwright_core::{Point, UnitSystem};
use planwright_designer::canvas::CanvasData;
use planwright_designer::catalog::CatalogRegistry;
use planwright_designer::model::{
    CountertopSurface, Cutout, CutoutType, LegacyNode, NodeKind, Opening, OpeningType,
    TileSurface, Wall,
};
use serde_json::json;

fn mixed_canvas() -> CanvasData {
    let catalog = CatalogRegistry::standard();
    let mut canvas = CanvasData::default();
    canvas.state.settings.units = UnitSystem::Metric;

    let wall_id = canvas
        .state
        .add(Wall::new(Point::new(0.0, 0.0), Point::new(4000.0, 0.0), 120.0, 2400.0))
        .unwrap();
    canvas
        .state
        .add_opening(
            &wall_id,
            Opening::new(OpeningType::Window, 1200.0, 900.0, 1100.0).with_sill_height(1000.0),
        )
        .unwrap();

    let mut cab = catalog.instantiate("wall-30x30", 10.0, 20.0).unwrap();
    cab.metadata = Some(json!({"hinge": "left", "soft_close": true}).as_object().unwrap().clone());
    canvas.state.add(cab).unwrap();

    let mut ct = CountertopSurface::new(
        vec![Point::new(0.0, 0.0), Point::new(2400.0, 0.0), Point::new(2400.0, 650.0), Point::new(0.0, 650.0)],
        30.0,
    );
    ct.material_id = Some("quartz-white".to_string());
    ct.cutouts.push(Cutout::new(CutoutType::Sink, 800.0, 100.0, 760.0, 450.0));
    canvas.state.add(ct).unwrap();
    canvas.state.add(TileSurface::new(vec![Point::new(0.0, 0.0)])).unwrap();

    canvas.add_node(LegacyNode::new(NodeKind::Door, "node_1", 40.0, 40.0));
    canvas
}

#[test]
fn test_mixed_document_round_trips() {
    let canvas = mixed_canvas();
    let json = canvas.to_json().unwrap();
    assert!(json["nodes"]["node_1"].is_object());
    assert!(json["walls"].is_object());
    assert_eq!(json["settings"]["units"], "metric");

    let back = CanvasData::from_json(json.clone()).unwrap();
    assert_eq!(back, canvas);
    assert_eq!(back.to_json().unwrap(), json);
}

#[test]
fn test_round_trip_through_string() {
    let canvas = mixed_canvas();
    let text = serde_json::to_string(&canvas).unwrap();
    let back: CanvasData = serde_json::from_str(&text).unwrap();
    assert_eq!(back, canvas);
}

#[test]
fn test_structured_only_document() {
    let data = CanvasData::from_json(json!({
        "cabinets": {
            "cab_1": {"id": "cab_1", "mount": "corner-diag", "width": 914.4, "depth": 609.6,
                      "height": 876.3, "x": 0, "y": 0}
        },
        "settings": {"units": "metric"}
    }))
    .unwrap();

    assert!(data.nodes.is_empty());
    let cab = data.state.cabinet("cab_1").unwrap();
    assert_eq!(cab.rotation, 0.0);
    assert!(data.state.walls.is_empty());
    assert_eq!(data.state.settings.units, UnitSystem::Metric);
    assert!(data.to_json().unwrap().get("nodes").is_none());
}

#[test]
fn test_wall_openings_sorted_on_load() {
    let data = CanvasData::from_json(json!({
        "walls": {
            "w1": {"id": "w1", "start": {"x": 0, "y": 0}, "end": {"x": 3000, "y": 0},
                   "thickness": 100, "height": 2400,
                   "openings": [
                       {"id": "o2", "type": "window", "offset": 2000, "width": 600, "height": 900},
                       {"id": "o1", "type": "door", "offset": 100, "width": 800, "height": 2000}
                   ]}
        }
    }))
    .unwrap();
    let ids: Vec<&str> = data.state.wall("w1").unwrap().openings.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o1", "o2"]);
}

#[test]
fn test_legacy_node_defaults_filled_per_kind() {
    let data = CanvasData::from_json(json!({
        "nodes": {
            "n1": {"type": "window", "x": 5, "y": 5},
            "n2": {"type": "room", "x": 0, "y": 0, "floor": 2},
            "n3": {"type": "door", "x": 0, "y": 0, "swing": "sideways"}
        }
    }))
    .unwrap();

    let window = data.node("n1").unwrap().frame().unwrap();
    assert_eq!(window.w, 80.0);
    assert_eq!(window.label, "Window");
    assert_eq!(window.color, "#e0f2fe");

    // Values outside the kind's schema are kept as written
    let nodes = data.to_json().unwrap()["nodes"].clone();
    assert!(matches!(data.node("n2").unwrap(), LegacyNode::Unrecognized(_)));
    assert_eq!(nodes["n2"]["floor"], 2);
    assert_eq!(data.node("n3").unwrap().kind(), NodeKind::Door);
    assert_eq!(nodes["n3"]["swing"], "sideways");
}

#[test]
fn test_null_nodes_tolerated() {
    let data = CanvasData::from_json(json!({"nodes": null})).unwrap();
    assert!(data.is_empty());
}
