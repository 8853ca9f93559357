//! Viewport and coordinate transformation for the plan canvas.
//!
//! Maps screen pixels to model units through a pan offset and a zoom scale,
//! and snaps model values to the grid.

use planwright_core::{round_to, Point, ViewportSettings};
use std::fmt;

/// Pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom/grid state of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
    grid_size: f64,
    zoom_min: f64,
    zoom_max: f64,
    zoom_step: f64,
    snap_enabled: bool,
    grid_visible: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewportSettings::default())
    }
}

impl Viewport {
    pub fn new(settings: &ViewportSettings) -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
            grid_size: settings.grid_size,
            zoom_min: settings.zoom_min,
            zoom_max: settings.zoom_max,
            zoom_step: settings.zoom_step,
            snap_enabled: settings.snap_enabled,
            grid_visible: settings.grid_visible,
        }
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Converts screen pixels to model units.
    ///
    /// ```text
    /// model = (screen - pan) / scale
    /// ```
    pub fn screen_to_model(&self, screen: ScreenPoint) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.scale,
            (screen.y - self.pan_y) / self.scale,
        )
    }

    pub fn model_to_screen(&self, model: Point) -> ScreenPoint {
        ScreenPoint::new(
            model.x * self.scale + self.pan_x,
            model.y * self.scale + self.pan_y,
        )
    }

    /// Converts a screen-space distance to model units.
    pub fn screen_delta_to_model(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }

    /// Rounds to the nearest grid multiple; halves round toward +∞.
    pub fn snap(&self, value: f64) -> f64 {
        (value / self.grid_size + 0.5).floor() * self.grid_size
    }

    /// Snaps a size and clamps it to `min`.
    pub fn snap_size(&self, value: f64, min: f64) -> f64 {
        self.snap(value).max(min)
    }

    /// Snaps a point when snapping is enabled.
    pub fn snap_point(&self, point: Point) -> Point {
        if self.snap_enabled {
            Point::new(self.snap(point.x), self.snap(point.y))
        } else {
            point
        }
    }

    /// Sets the scale, clamped to the zoom bounds.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.zoom_min, self.zoom_max);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(round_to(self.scale + self.zoom_step, 2));
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(round_to(self.scale - self.zoom_step, 2));
    }

    /// Scale 1, pan at the origin.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.snap_enabled = !self.snap_enabled;
        self.snap_enabled
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        self.grid_visible
    }

    /// Pixel offset of the first background grid line, in `[0, grid * scale)`.
    pub fn grid_phase(&self) -> (f64, f64) {
        let spacing = self.grid_size * self.scale;
        (self.pan_x.rem_euclid(spacing), self.pan_y.rem_euclid(spacing))
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(scale: {:.2}, pan: ({:.1}, {:.1}), grid: {}, snap: {})",
            self.scale,
            self.pan_x,
            self.pan_y,
            self.grid_size,
            if self.snap_enabled { "on" } else { "off" }
        )
    }
}
