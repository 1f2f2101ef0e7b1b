//! Input routing.
//!
//! [`Router`] owns the board, the camera and all transient interaction
//! state, and turns pointer/wheel/key input into element mutations. Exactly
//! one interaction [`Mode`] is active at a time; gesture state lives in the
//! mode variant and is dropped when the gesture ends.

use crate::board::Board;
use crate::camera::{Camera, ZOOM_STEP};
use crate::elements::{Element, ElementId, PathElement, Rgba, TextElement};
use crate::handles::{self, HANDLE_HIT_TOLERANCE, Handle};
use crate::overlay::{OverlayClose, TextOverlay};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom delta per wheel unit when the precision modifier is held.
const WHEEL_ZOOM_FACTOR: f64 = 0.005;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Select,
    Pencil,
    Eraser,
    Text,
    Pan,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Drawing settings supplied by the surrounding chrome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawSettings {
    pub color: Rgba,
    /// Stroke size for the pencil; size scalar for new text.
    pub size: f64,
    /// Optional pressure setting in (0, 1].
    pub pressure: Option<f64>,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            color: Rgba::black(),
            size: 4.0,
            pressure: None,
        }
    }
}

/// Transient success notifications delivered to the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Erased,
    Undone,
    Redone,
    TextSaved,
    Cleared,
}

/// The active interaction mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    /// Panning the camera; `last` is the previous screen position.
    Panning { last: Point },
    /// Recording a pencil stroke into the live point list.
    Drawing,
    /// Moving the selected element; `last` is the previous world position.
    Dragging { id: ElementId, last: Point },
    /// Resizing the selected element from one of its handles. `bounds` is
    /// the working box, carried across moves so clamping stays anchored.
    Resizing {
        id: ElementId,
        handle: Handle,
        bounds: Rect,
        last: Point,
    },
    /// The text overlay is open for this element id.
    EditingText { id: ElementId },
}

/// The canvas interaction engine.
pub struct Router {
    board: Board,
    camera: Camera,
    tool: Tool,
    settings: DrawSettings,
    mode: Mode,
    /// Points of the stroke in progress, in world coordinates.
    live_points: Vec<Point>,
    overlay: Option<TextOverlay>,
    /// Screen position of the eraser cursor indicator.
    eraser_cursor: Option<Point>,
    /// Handle under the pointer, for cursor feedback only.
    hovered_handle: Option<Handle>,
    /// Whether the pan modifier key (Space) is held.
    pan_modifier: bool,
    notify: Box<dyn FnMut(Notice)>,
    /// Chrome hook that opens the help dialog, fired via [`Router::help`].
    open_help: Option<Box<dyn FnMut()>>,
}

impl Router {
    /// Create a router with an empty board and the given notification sink.
    pub fn new(notify: impl FnMut(Notice) + 'static) -> Self {
        Self {
            board: Board::new(),
            camera: Camera::new(),
            tool: Tool::default(),
            settings: DrawSettings::default(),
            mode: Mode::Idle,
            live_points: Vec::new(),
            overlay: None,
            eraser_cursor: None,
            hovered_handle: None,
            pan_modifier: false,
            notify: Box::new(notify),
            open_help: None,
        }
    }

    /// Install the chrome's help-open callback.
    pub fn set_help_callback(&mut self, open_help: impl FnMut() + 'static) {
        self.open_help = Some(Box::new(open_help));
    }

    /// Open the help dialog. The shell forwards the help shortcut here; a
    /// no-op until a callback is installed.
    pub fn help(&mut self) {
        if let Some(open_help) = self.open_help.as_mut() {
            open_help();
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn settings(&self) -> DrawSettings {
        self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn live_points(&self) -> &[Point] {
        &self.live_points
    }

    pub fn overlay(&self) -> Option<&TextOverlay> {
        self.overlay.as_ref()
    }

    pub fn eraser_cursor(&self) -> Option<Point> {
        self.eraser_cursor
    }

    pub fn hovered_handle(&self) -> Option<Handle> {
        self.hovered_handle
    }

    /// Switch tools, abandoning any gesture in progress. An open overlay is
    /// resolved with blur semantics first.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        if self.overlay.is_some() {
            self.overlay_blur();
        }
        self.mode = Mode::Idle;
        self.live_points.clear();
        self.eraser_cursor = None;
        self.hovered_handle = None;
        self.tool = tool;
        log::debug!("tool changed to {tool:?}");
    }

    pub fn set_settings(&mut self, settings: DrawSettings) {
        self.settings = settings;
    }

    /// Track the pan modifier key (Space). While held, any pointer press
    /// pans regardless of the active tool.
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    pub fn pointer_down(&mut self, position: Point, button: MouseButton) {
        // A middle-button press or the held pan modifier always pans.
        if button == MouseButton::Middle || self.pan_modifier {
            self.mode = Mode::Panning { last: position };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        // A press outside the overlay is a blur, except the text tool which
        // explicitly discards before opening a fresh session.
        if self.overlay.is_some() {
            if self.tool == Tool::Text {
                self.close_overlay(OverlayClose::Discard);
            } else {
                self.overlay_blur();
            }
        }

        let world = self.camera.screen_to_world(position);
        match self.tool {
            Tool::Pan => self.mode = Mode::Panning { last: position },
            Tool::Pencil => {
                self.live_points = vec![world];
                self.mode = Mode::Drawing;
            }
            Tool::Eraser => self.erase_at(world),
            Tool::Text => {
                let overlay = TextOverlay::new_element(world);
                self.mode = Mode::EditingText { id: overlay.target };
                self.overlay = Some(overlay);
            }
            Tool::Select => self.select_press(world),
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        if self.tool == Tool::Eraser {
            self.eraser_cursor = Some(position);
        }

        match self.mode {
            Mode::Panning { last } => {
                self.camera.pan(position - last);
                self.mode = Mode::Panning { last: position };
            }
            Mode::Drawing => {
                self.live_points.push(self.camera.screen_to_world(position));
            }
            Mode::Dragging { id, last } => {
                let world = self.camera.screen_to_world(position);
                if let Some(element) = self.board.get_mut(id) {
                    element.translate(world - last);
                }
                self.mode = Mode::Dragging { id, last: world };
            }
            Mode::Resizing {
                id,
                handle,
                bounds,
                last,
            } => {
                let world = self.camera.screen_to_world(position);
                let bounds = handles::resize_bounds(bounds, handle, world - last);
                if let Some(element) = self.board.get_mut(id) {
                    handles::apply_resize(element, bounds);
                }
                self.mode = Mode::Resizing {
                    id,
                    handle,
                    bounds,
                    last: world,
                };
            }
            Mode::Idle => {
                // Hover feedback over the selected element's handles.
                self.hovered_handle = if self.tool == Tool::Select {
                    let world = self.camera.screen_to_world(position);
                    let tolerance = HANDLE_HIT_TOLERANCE / self.camera.zoom;
                    self.board
                        .selected()
                        .and_then(|e| handles::hit_test_handles(e.bounds(), world, tolerance))
                } else {
                    None
                };
            }
            Mode::EditingText { .. } => {}
        }
    }

    pub fn pointer_up(&mut self, _position: Point, _button: MouseButton) {
        match self.mode {
            Mode::Drawing => self.finish_stroke(),
            Mode::Dragging { .. } | Mode::Resizing { .. } => {
                self.board.commit_current();
                self.mode = Mode::Idle;
            }
            Mode::Panning { .. } => self.mode = Mode::Idle,
            Mode::Idle | Mode::EditingText { .. } => {}
        }
    }

    /// Wheel input: the precision modifier zooms continuously at the
    /// pointer, a plain wheel pans.
    pub fn wheel(&mut self, position: Point, delta: Vec2, precision_modifier: bool) {
        if precision_modifier {
            self.camera
                .zoom_by(-delta.y * WHEEL_ZOOM_FACTOR, Some(position));
        } else {
            self.camera.pan(-delta);
        }
    }

    /// Discrete zoom step centered at the viewport's visual center.
    pub fn zoom_in(&mut self, viewport_center: Point) {
        self.camera.zoom_by(ZOOM_STEP, Some(viewport_center));
    }

    pub fn zoom_out(&mut self, viewport_center: Point) {
        self.camera.zoom_by(-ZOOM_STEP, Some(viewport_center));
    }

    pub fn undo(&mut self) {
        if self.board.undo() {
            self.emit(Notice::Undone);
        }
    }

    pub fn redo(&mut self) {
        if self.board.redo() {
            self.emit(Notice::Redone);
        }
    }

    /// Explicit reset: drop every element (undoable) and notify.
    pub fn clear(&mut self) {
        if self.overlay.is_some() {
            self.close_overlay(OverlayClose::Discard);
        }
        self.board.clear();
        self.emit(Notice::Cleared);
    }

    /// Replace the overlay's typed content.
    pub fn overlay_set_content(&mut self, content: String) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.content = content;
        }
    }

    /// Escape pressed inside the overlay: discard the in-progress edit.
    pub fn overlay_escape(&mut self) {
        if let Some(close) = self.overlay.as_ref().map(TextOverlay::resolve_escape) {
            self.close_overlay(close);
        }
    }

    /// The overlay lost focus: commit non-empty content, discard empty.
    pub fn overlay_blur(&mut self) {
        if let Some(close) = self.overlay.as_ref().map(TextOverlay::resolve_blur) {
            self.close_overlay(close);
        }
    }

    fn select_press(&mut self, world: Point) {
        // Handles of the current selection win over element hits.
        if let Some(selected) = self.board.selected() {
            let bounds = selected.bounds();
            let id = selected.id();
            let tolerance = HANDLE_HIT_TOLERANCE / self.camera.zoom;
            if let Some(handle) = handles::hit_test_handles(bounds, world, tolerance) {
                self.mode = Mode::Resizing {
                    id,
                    handle,
                    bounds,
                    last: world,
                };
                return;
            }
        }

        let hit = self
            .board
            .hit_test(world)
            .map(|e| (e.id(), e.selected(), e.as_text().is_some()));
        match hit {
            None => self.board.clear_selection(),
            Some((id, true, true)) => self.open_overlay_for(id),
            Some((id, true, false)) => self.mode = Mode::Dragging { id, last: world },
            Some((id, false, _)) => self.board.select_only(id),
        }
    }

    fn erase_at(&mut self, world: Point) {
        let Some(id) = self.board.hit_test(world).map(|e| e.id()) else {
            return;
        };
        self.board.elements_mut().retain(|e| e.id() != id);
        self.board.commit_current();
        self.emit(Notice::Erased);
    }

    fn finish_stroke(&mut self) {
        let points = std::mem::take(&mut self.live_points);
        self.mode = Mode::Idle;
        if points.is_empty() {
            return;
        }
        let path = PathElement::from_points(
            points,
            self.settings.color,
            self.settings.size,
            self.settings.pressure,
        );
        self.board.elements_mut().push(Element::Path(path));
        self.board.commit_current();
    }

    /// Re-open the overlay on an existing text element, seeded with its
    /// content so a submit updates rather than duplicates.
    fn open_overlay_for(&mut self, id: ElementId) {
        let Some(text) = self.board.get_mut(id).and_then(Element::as_text_mut) else {
            return;
        };
        text.editing = true;
        let overlay = TextOverlay::for_element(text);
        self.overlay = Some(overlay);
        self.mode = Mode::EditingText { id };
    }

    fn close_overlay(&mut self, close: OverlayClose) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        self.mode = Mode::Idle;

        if let Some(text) = self
            .board
            .get_mut(overlay.target)
            .and_then(Element::as_text_mut)
        {
            text.editing = false;
        }

        if close != OverlayClose::Submit {
            return;
        }

        if overlay.existing {
            if let Some(text) = self
                .board
                .get_mut(overlay.target)
                .and_then(Element::as_text_mut)
            {
                text.set_content(overlay.content);
            }
        } else {
            let mut text = TextElement::new(
                overlay.position,
                overlay.content,
                self.settings.color,
                self.settings.size,
            );
            text.id = overlay.target;
            self.board.elements_mut().push(Element::Text(text));
        }
        self.board.commit_current();
        self.emit(Notice::TextSaved);
    }

    fn emit(&mut self, notice: Notice) {
        log::debug!("notice: {notice:?}");
        (self.notify)(notice);
    }
}
