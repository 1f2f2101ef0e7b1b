//! Selection resize handles.
//!
//! A selected element shows eight square handles at the corners and edge
//! midpoints of its bounding box. Handle geometry lives in world space; the
//! renderer compensates sizes by the camera zoom so handles keep a constant
//! screen size.

use crate::elements::{Element, text::LINE_HEIGHT_FACTOR};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle square side in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;
/// Minimum element extent after a resize, in world units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;
/// Minimum text size scalar after a resize.
const MIN_TEXT_SCALE: f64 = 1.0;

/// The eight resize handles of a selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::East,
        Handle::SouthEast,
        Handle::South,
        Handle::SouthWest,
        Handle::West,
    ];

    /// Handle position on the bounding box.
    pub fn position(&self, bounds: Rect) -> Point {
        let cx = bounds.center().x;
        let cy = bounds.center().y;
        match self {
            Handle::NorthWest => Point::new(bounds.x0, bounds.y0),
            Handle::North => Point::new(cx, bounds.y0),
            Handle::NorthEast => Point::new(bounds.x1, bounds.y0),
            Handle::East => Point::new(bounds.x1, cy),
            Handle::SouthEast => Point::new(bounds.x1, bounds.y1),
            Handle::South => Point::new(cx, bounds.y1),
            Handle::SouthWest => Point::new(bounds.x0, bounds.y1),
            Handle::West => Point::new(bounds.x0, cy),
        }
    }

    fn moves_left(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::West | Handle::SouthWest)
    }

    fn moves_right(&self) -> bool {
        matches!(self, Handle::NorthEast | Handle::East | Handle::SouthEast)
    }

    fn moves_top(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::North | Handle::NorthEast)
    }

    fn moves_bottom(&self) -> bool {
        matches!(self, Handle::SouthWest | Handle::South | Handle::SouthEast)
    }
}

/// Find which handle of `bounds` is hit at the given world point.
/// `tolerance` should already be adjusted for camera zoom.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<Handle> {
    Handle::ALL.into_iter().find(|handle| {
        let pos = handle.position(bounds);
        let dx = point.x - pos.x;
        let dy = point.y - pos.y;
        dx * dx + dy * dy <= tolerance * tolerance
    })
}

/// Apply a resize drag to a bounding box.
///
/// Only the edges the handle controls move; each dimension is floor-clamped
/// to [`MIN_ELEMENT_SIZE`], anchored at the opposite edge.
pub fn resize_bounds(bounds: Rect, handle: Handle, delta: Vec2) -> Rect {
    let mut x0 = bounds.x0;
    let mut y0 = bounds.y0;
    let mut x1 = bounds.x1;
    let mut y1 = bounds.y1;

    if handle.moves_left() {
        x0 = (x0 + delta.x).min(x1 - MIN_ELEMENT_SIZE);
    }
    if handle.moves_right() {
        x1 = (x1 + delta.x).max(x0 + MIN_ELEMENT_SIZE);
    }
    if handle.moves_top() {
        y0 = (y0 + delta.y).min(y1 - MIN_ELEMENT_SIZE);
    }
    if handle.moves_bottom() {
        y1 = (y1 + delta.y).max(y0 + MIN_ELEMENT_SIZE);
    }

    Rect::new(x0, y0, x1, y1)
}

/// Write a resized bounding box back into an element.
///
/// Text moves its anchor and re-derives the size scalar from the new height
/// so the line count fits; paths only record the transient extent and never
/// rescale their point geometry.
pub fn apply_resize(element: &mut Element, new_bounds: Rect) {
    match element {
        Element::Path(path) => {
            path.width = Some(new_bounds.width());
            path.height = Some(new_bounds.height());
        }
        Element::Text(text) => {
            text.position = Point::new(new_bounds.x0, new_bounds.y0);
            text.width = Some(new_bounds.width());
            text.height = Some(new_bounds.height());
            let lines = text.line_count() as f64;
            text.size = (new_bounds.height() / (lines * LINE_HEIGHT_FACTOR)).max(MIN_TEXT_SCALE);
            text.invalidate_cache();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Rgba, TextElement};

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 50.0, 50.0)
    }

    #[test]
    fn test_handle_positions() {
        let b = bounds();
        assert_eq!(Handle::NorthWest.position(b), Point::new(0.0, 0.0));
        assert_eq!(Handle::SouthEast.position(b), Point::new(50.0, 50.0));
        assert_eq!(Handle::North.position(b), Point::new(25.0, 0.0));
        assert_eq!(Handle::West.position(b), Point::new(0.0, 25.0));
    }

    #[test]
    fn test_hit_test_handles() {
        let b = bounds();
        assert_eq!(
            hit_test_handles(b, Point::new(1.0, 1.0), 5.0),
            Some(Handle::NorthWest)
        );
        assert_eq!(
            hit_test_handles(b, Point::new(50.0, 25.0), 5.0),
            Some(Handle::East)
        );
        assert_eq!(hit_test_handles(b, Point::new(25.0, 25.0), 5.0), None);
    }

    #[test]
    fn test_resize_corner_moves_two_edges() {
        let resized = resize_bounds(bounds(), Handle::NorthWest, Vec2::new(10.0, 10.0));
        assert_eq!(resized, Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_resize_edge_moves_one_edge() {
        let resized = resize_bounds(bounds(), Handle::East, Vec2::new(30.0, 99.0));
        // Vertical extent unaffected by an east-handle drag.
        assert_eq!(resized, Rect::new(0.0, 0.0, 80.0, 50.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let resized = resize_bounds(bounds(), Handle::SouthEast, Vec2::new(-100.0, -100.0));
        // Shrinking past the floor pins the moving edges at 20 world units
        // from the anchored ones.
        assert_eq!(resized, Rect::new(0.0, 0.0, 20.0, 20.0));

        let resized = resize_bounds(bounds(), Handle::NorthWest, Vec2::new(100.0, 100.0));
        assert_eq!(resized, Rect::new(30.0, 30.0, 50.0, 50.0));
    }

    #[test]
    fn test_apply_resize_text_rederives_scale() {
        let mut text = TextElement::new(
            Point::new(0.0, 0.0),
            "one\ntwo".to_string(),
            Rgba::black(),
            2.0,
        );
        let mut element = Element::Text(text.clone());
        // Two lines at the new height of 60 give size 60 / (2 * 10) = 3.
        apply_resize(&mut element, Rect::new(5.0, 5.0, 105.0, 65.0));
        let resized = element.as_text().unwrap();
        assert!((resized.size - 3.0).abs() < f64::EPSILON);
        assert_eq!(resized.position, Point::new(5.0, 5.0));

        // Shrinking below one unit clamps.
        text.content = "one\ntwo".to_string();
        let mut element = Element::Text(text);
        apply_resize(&mut element, Rect::new(0.0, 0.0, 30.0, 5.0));
        assert!((element.as_text().unwrap().size - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_resize_path_keeps_points() {
        use crate::elements::PathElement;
        let path = PathElement::from_points(
            vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0)],
            Rgba::black(),
            2.0,
            None,
        );
        let original_points = path.points.clone();
        let mut element = Element::Path(path);

        apply_resize(&mut element, Rect::new(0.0, 0.0, 100.0, 100.0));
        if let Element::Path(path) = &element {
            assert_eq!(path.points, original_points);
            assert_eq!(path.width, Some(100.0));
            assert_eq!(path.height, Some(100.0));
        } else {
            panic!("expected a path element");
        }
    }
}
