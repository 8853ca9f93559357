use planwright_core::{Point, ViewportSettings};
use planwright_designer::viewport::{ScreenPoint, Viewport};
use proptest::prelude::*;

#[test]
fn test_viewport_defaults() {
    let vp = Viewport::default();
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.pan(), (0.0, 0.0));
    assert_eq!(vp.grid_size(), 20.0);
    assert!(vp.snap_enabled());
    assert!(vp.grid_visible());
}

#[test]
fn test_screen_to_model_formula() {
    let mut vp = Viewport::default();
    vp.set_pan(100.0, 50.0);
    vp.set_scale(0.5);
    let p = vp.screen_to_model(ScreenPoint::new(120.0, 60.0));
    assert_eq!(p, Point::new(40.0, 20.0));
}

#[test]
fn test_custom_zoom_bounds() {
    let settings = ViewportSettings {
        zoom_min: 0.5,
        zoom_max: 1.5,
        zoom_step: 0.25,
        ..ViewportSettings::default()
    };
    let mut vp = Viewport::new(&settings);
    vp.zoom_in();
    vp.zoom_in();
    vp.zoom_in();
    assert_eq!(vp.scale(), 1.5);
    vp.set_scale(0.1);
    assert_eq!(vp.scale(), 0.5);
}

#[test]
fn test_toggles() {
    let mut vp = Viewport::default();
    assert!(!vp.toggle_snap());
    assert_eq!(vp.snap_point(Point::new(23.0, 47.0)), Point::new(23.0, 47.0));
    assert!(vp.toggle_snap());
    assert_eq!(vp.snap_point(Point::new(23.0, 47.0)), Point::new(20.0, 40.0));
    assert!(!vp.toggle_grid());
}

proptest! {
    #[test]
    fn prop_snap_is_idempotent_multiple_of_grid(v in -1.0e6f64..1.0e6, grid in prop::sample::select(vec![5.0f64, 10.0, 20.0, 25.0, 50.0])) {
        let vp = Viewport::new(&ViewportSettings { grid_size: grid, ..ViewportSettings::default() });
        let snapped = vp.snap(v);
        prop_assert_eq!(vp.snap(snapped), snapped);
        prop_assert_eq!((snapped / grid).fract(), 0.0);
        prop_assert!((snapped - v).abs() <= grid / 2.0 + 1e-6);
    }
}
