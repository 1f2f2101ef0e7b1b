//! Freehand pencil stroke element.

use super::{ElementId, Rgba};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed pencil stroke (series of world-space points).
///
/// Point coordinates are absolute, so the element's anchor is always the
/// origin. Points are append-only while the stroke is in progress and frozen
/// once committed to the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub id: ElementId,
    /// Points along the stroke, in draw order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: Rgba,
    /// Stroke size (diameter of the outline at full pressure).
    pub size: f64,
    /// Optional pressure setting in (0, 1], scaling the outline radius.
    pub pressure: Option<f64>,
    /// Selection flag. At most one element on a board is selected.
    pub selected: bool,
    /// Transient size written during a resize gesture; never affects the
    /// point geometry.
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl PathElement {
    /// Create a stroke from recorded points and the active drawing settings.
    pub fn from_points(points: Vec<Point>, color: Rgba, size: f64, pressure: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            size,
            pressure,
            selected: false,
            width: None,
            height: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box spanning the min/max of the points.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Translate every point by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: Vec<Point>) -> PathElement {
        PathElement::from_points(points, Rgba::black(), 4.0, None)
    }

    #[test]
    fn test_bounds() {
        let path = stroke(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
        ]);

        let bounds = path.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(stroke(Vec::new()).bounds(), Rect::ZERO);
    }

    #[test]
    fn test_translate() {
        let mut path = stroke(vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)]);
        path.translate(Vec2::new(-10.0, 5.0));
        assert_eq!(path.points[0], Point::new(0.0, 15.0));
        assert_eq!(path.points[1], Point::new(10.0, 25.0));
    }
}
