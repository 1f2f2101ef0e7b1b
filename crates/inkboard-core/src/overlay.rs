//! Text overlay state.
//!
//! The overlay is a transient in-place editor anchored to a world position.
//! It is not a committed element: creating one allocates the element id up
//! front so a later submit can either append a fresh element or update the
//! one being edited.

use crate::elements::{ElementId, TextElement};
use kurbo::Point;
use uuid::Uuid;

/// How an overlay session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClose {
    /// Throw the typed content away.
    Discard,
    /// Commit the typed content as a new or updated element.
    Submit,
}

/// An open text-editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    /// Id of the element the session will create or update.
    pub target: ElementId,
    /// World-space anchor (top-left of the text box).
    pub position: Point,
    /// Current typed content.
    pub content: String,
    /// Whether `target` already exists on the board.
    pub existing: bool,
}

impl TextOverlay {
    /// Open an empty session for a brand new element at `position`.
    pub fn new_element(position: Point) -> Self {
        Self {
            target: Uuid::new_v4(),
            position,
            content: String::new(),
            existing: false,
        }
    }

    /// Open a session seeded from an existing text element, so a submit
    /// updates it in place rather than duplicating it.
    pub fn for_element(text: &TextElement) -> Self {
        Self {
            target: text.id,
            position: text.position,
            content: text.content.clone(),
            existing: true,
        }
    }

    /// Escape always discards, committed or not.
    pub fn resolve_escape(&self) -> OverlayClose {
        OverlayClose::Discard
    }

    /// Losing focus commits non-empty content and discards empty content.
    pub fn resolve_blur(&self) -> OverlayClose {
        if self.content.trim().is_empty() {
            OverlayClose::Discard
        } else {
            OverlayClose::Submit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Rgba;

    #[test]
    fn test_new_element_session_is_empty() {
        let overlay = TextOverlay::new_element(Point::new(10.0, 20.0));
        assert!(overlay.content.is_empty());
        assert!(!overlay.existing);
    }

    #[test]
    fn test_session_for_existing_element_keeps_id() {
        let text = TextElement::new(
            Point::new(5.0, 5.0),
            "hello".to_string(),
            Rgba::black(),
            2.0,
        );
        let overlay = TextOverlay::for_element(&text);
        assert_eq!(overlay.target, text.id);
        assert_eq!(overlay.content, "hello");
        assert!(overlay.existing);
    }

    #[test]
    fn test_escape_always_discards() {
        let mut overlay = TextOverlay::new_element(Point::ZERO);
        overlay.content = "typed something".to_string();
        assert_eq!(overlay.resolve_escape(), OverlayClose::Discard);
    }

    #[test]
    fn test_blur_commits_non_empty_only() {
        let mut overlay = TextOverlay::new_element(Point::ZERO);
        assert_eq!(overlay.resolve_blur(), OverlayClose::Discard);

        overlay.content = "   \n ".to_string();
        assert_eq!(overlay.resolve_blur(), OverlayClose::Discard);

        overlay.content = "note".to_string();
        assert_eq!(overlay.resolve_blur(), OverlayClose::Submit);
    }
}
