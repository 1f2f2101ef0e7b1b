//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom delta applied by the discrete zoom-in/zoom-out controls.
pub const ZOOM_STEP: f64 = 0.1;

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates:
/// `screen = world * zoom + offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Change the zoom level by an additive delta, clamped to the allowed
    /// range.
    ///
    /// If a screen-space `center` is given, the offset is recomputed so the
    /// world point currently under `center` stays under it after the zoom
    /// change (zoom-to-cursor). Without a center, the zoom changes in place.
    pub fn zoom_by(&mut self, delta: f64, center: Option<Point>) {
        let new_zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        match center {
            Some(center) => {
                // Convert the anchor to world space before the zoom change,
                // then solve for the offset that maps it back afterwards.
                let world_point = self.screen_to_world(center);
                self.zoom = new_zoom;
                let new_screen = self.world_to_screen(world_point);
                self.offset += Vec2::new(center.x - new_screen.x, center.y - new_screen.y);
            }
            None => self.zoom = new_zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_identity() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        let world = camera.screen_to_world(screen);
        assert!((world.x - screen.x).abs() < f64::EPSILON);
        assert!((world.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let world = camera.screen_to_world(original);
        let back = camera.world_to_screen(world);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_by(-100.0, None);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        camera.zoom_by(1000.0, None);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_to_cursor_keeps_point_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(40.0, -10.0);

        let cursor = Point::new(320.0, 240.0);
        let world_before = camera.screen_to_world(cursor);
        camera.zoom_by(0.7, Some(cursor));
        let screen_after = camera.world_to_screen(world_before);

        assert!((screen_after.x - cursor.x).abs() < 1e-9);
        assert!((screen_after.y - cursor.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_without_center_keeps_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(15.0, 25.0);
        camera.zoom_by(0.5, None);
        assert_eq!(camera.offset, Vec2::new(15.0, 25.0));
        assert!((camera.zoom - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
