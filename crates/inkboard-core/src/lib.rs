//! Inkboard Core Library
//!
//! Platform-agnostic core data structures and logic for the Inkboard canvas:
//! element store, history, camera math, hit-testing and the input router.

pub mod board;
pub mod camera;
pub mod elements;
pub mod handles;
pub mod overlay;
pub mod router;
pub mod stroke;

pub use board::Board;
pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use elements::{Element, ElementId, PathElement, Rgba, TextElement};
pub use handles::{HANDLE_HIT_TOLERANCE, HANDLE_SIZE, Handle};
pub use overlay::{OverlayClose, TextOverlay};
pub use router::{DrawSettings, Mode, MouseButton, Notice, Router, Tool};
pub use stroke::stroke_outline;
