//! Inkboard Render Library
//!
//! Renderer abstraction and implementations for Inkboard.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
pub mod text_editor;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, Theme};

#[cfg(feature = "vello-renderer")]
pub use text_editor::{TextEditResult, TextEditState, TextKey, TextModifiers};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
