//! Renderer trait abstraction.

use inkboard_core::Router;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Color theme for the canvas chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Canvas background.
    pub background: Color,
    /// Selection rectangle and handle border color.
    pub selection: Color,
    /// Eraser cursor outline color.
    pub eraser: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::from_rgba8(250, 250, 250, 255),
            selection: Color::from_rgba8(59, 130, 246, 255),
            eraser: Color::from_rgba8(100, 100, 100, 200),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::from_rgba8(24, 24, 27, 255),
            selection: Color::from_rgba8(96, 165, 250, 255),
            eraser: Color::from_rgba8(180, 180, 180, 200),
        }
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The interaction engine to render.
    pub router: &'a Router,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Color theme.
    pub theme: Theme,
}

impl<'a> RenderContext<'a> {
    pub fn new(router: &'a Router, viewport_size: Size) -> Self {
        Self {
            router,
            viewport_size,
            scale_factor: 1.0,
            theme: Theme::light(),
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame; the whole viewport is redrawn from scratch.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.theme.background
    }
}
