//! Drawable element definitions.

pub mod path;
pub mod text;

pub use path::PathElement;
pub use text::TextElement;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements. Assigned at creation, never reused.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Enum wrapper for all element types.
///
/// Insertion order into the board is z-order; geometry and rendering code
/// matches exhaustively on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Path(PathElement),
    Text(TextElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Path(e) => e.id,
            Element::Text(e) => e.id,
        }
    }

    /// Get the bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Path(e) => e.bounds(),
            Element::Text(e) => e.bounds(),
        }
    }

    /// Check if a world-space point hits this element (point-in-box against
    /// the bounds).
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Translate the element by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Path(e) => e.translate(delta),
            Element::Text(e) => e.translate(delta),
        }
    }

    pub fn selected(&self) -> bool {
        match self {
            Element::Path(e) => e.selected,
            Element::Text(e) => e.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Element::Path(e) => e.selected = selected,
            Element::Text(e) => e.selected = selected,
        }
    }

    /// Whether the element is being edited in the overlay. Only text can be.
    pub fn editing(&self) -> bool {
        match self {
            Element::Path(_) => false,
            Element::Text(e) => e.editing,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match self {
            Element::Text(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roundtrip() {
        let rgba = Rgba::new(12, 34, 56, 200);
        let color: Color = rgba.into();
        assert_eq!(Rgba::from(color), rgba);
    }

    #[test]
    fn test_hit_test_inside_bounds() {
        let path = PathElement::from_points(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0)],
            Rgba::black(),
            4.0,
            None,
        );
        let element = Element::Path(path);
        // Anywhere inside the bounding box counts as a hit.
        assert!(element.hit_test(Point::new(50.0, 25.0)));
        assert!(element.hit_test(Point::new(90.0, 5.0)));
        assert!(!element.hit_test(Point::new(150.0, 25.0)));
    }

    #[test]
    fn test_translate_path_moves_points() {
        let path = PathElement::from_points(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            Rgba::black(),
            2.0,
            None,
        );
        let mut element = Element::Path(path);
        element.translate(Vec2::new(5.0, -5.0));
        let bounds = element.bounds();
        assert!((bounds.x0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.y0 + 5.0).abs() < f64::EPSILON);
    }
}
