//! Text element.

use super::{ElementId, Rgba};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// Line height per unit of the text size scalar.
///
/// Kept at 10 so a resize derives the scalar as `height / (lines * 10)`
/// and the derived bounds round-trip exactly.
pub const LINE_HEIGHT_FACTOR: f64 = 10.0;
/// Font size (px) per unit of the text size scalar.
pub const FONT_SIZE_FACTOR: f64 = 8.0;
/// Average glyph width relative to the font size, for the non-measuring
/// width fallback.
const CHAR_WIDTH_FACTOR: f64 = 0.55;
/// Minimum bounding-box width so empty or tiny text stays clickable.
const MIN_TEXT_WIDTH: f64 = 20.0;

/// A block of multi-line text anchored at its top-left corner.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextElement {
    pub id: ElementId,
    /// World-space anchor (top-left corner of the text box).
    pub position: Point,
    /// The text content; newlines separate lines.
    pub content: String,
    /// Fill color.
    pub color: Rgba,
    /// Size scalar; derives both the font size and the line height.
    pub size: f64,
    /// Selection flag. At most one element on a board is selected.
    pub selected: bool,
    /// Editing flag. An element being edited is excluded from the normal
    /// render pass and shown via the overlay instead.
    pub editing: bool,
    /// Transient size written during a resize gesture.
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Layout size (width, height) measured by the renderer.
    ///
    /// Written during rendering through interior mutability; when absent,
    /// bounds fall back to a character-count estimate.
    #[serde(skip)]
    cached_size: RwLock<Option<(f64, f64)>>,
}

impl Clone for TextElement {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            position: self.position,
            content: self.content.clone(),
            color: self.color,
            size: self.size,
            selected: self.selected,
            editing: self.editing,
            width: self.width,
            height: self.height,
            // Clone the cached value, not the lock.
            cached_size: RwLock::new(self.cached_size.read().ok().and_then(|guard| *guard)),
        }
    }
}

impl PartialEq for TextElement {
    fn eq(&self, other: &Self) -> bool {
        // The measurement cache is derived state and ignored for structural
        // equality (history round-trips compare snapshots).
        self.id == other.id
            && self.position == other.position
            && self.content == other.content
            && self.color == other.color
            && self.size == other.size
            && self.selected == other.selected
            && self.editing == other.editing
            && self.width == other.width
            && self.height == other.height
    }
}

impl TextElement {
    /// Create a new text element with the given content and settings.
    pub fn new(position: Point, content: String, color: Rgba, size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            color,
            size,
            selected: false,
            editing: false,
            width: None,
            height: None,
            cached_size: RwLock::new(None),
        }
    }

    /// Font size in pixels derived from the size scalar.
    pub fn font_size(&self) -> f64 {
        self.size * FONT_SIZE_FACTOR
    }

    /// Line height in world units derived from the size scalar.
    pub fn line_height(&self) -> f64 {
        self.size * LINE_HEIGHT_FACTOR
    }

    /// Number of lines in the content. Empty content counts as one line;
    /// a trailing newline adds one.
    pub fn line_count(&self) -> usize {
        let count = self.content.lines().count().max(1);
        if self.content.ends_with('\n') {
            count + 1
        } else {
            count
        }
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.invalidate_cache();
    }

    /// Record the layout size measured by the renderer.
    pub fn set_cached_size(&self, width: f64, height: f64) {
        if let Ok(mut cache) = self.cached_size.write() {
            *cache = Some((width, height));
        }
    }

    /// Drop the measured size (call when content or size change).
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.cached_size.write() {
            *cache = None;
        }
    }

    /// Width estimate from character counts, for environments without text
    /// measurement.
    fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_line_len as f64 * self.font_size() * CHAR_WIDTH_FACTOR
    }

    /// Bounding box: measured extents when the renderer has cached them,
    /// otherwise the character-count estimate. Height always follows the
    /// fixed line height so resize math stays consistent.
    pub fn bounds(&self) -> Rect {
        let height = self.line_count() as f64 * self.line_height();
        let width = self
            .cached_size
            .read()
            .ok()
            .and_then(|guard| *guard)
            .map(|(w, _)| w)
            .unwrap_or_else(|| self.approximate_width())
            .max(MIN_TEXT_WIDTH);
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    /// Translate the anchor by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
