//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use crate::text_editor::TextEditState;
use inkboard_core::elements::{Element, PathElement, TextElement};
use inkboard_core::handles::{HANDLE_SIZE, Handle};
use inkboard_core::stroke_outline;
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape as KurboShape, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, GenericFamily, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Gap between an element's bounds and its dashed selection rectangle, in
/// screen pixels.
const SELECTION_INSET: f64 = 4.0;
/// Dash length of the selection rectangle, in screen pixels.
const SELECTION_DASH: f64 = 4.0;
/// Radius of the eraser cursor indicator, in screen pixels.
const ERASER_CURSOR_RADIUS: f64 = 8.0;

/// Convert a Parley BoundingBox to a Kurbo Rect.
fn convert_rect(rect: &parley::BoundingBox) -> Rect {
    Rect::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Selection chrome color, taken from the theme each frame.
    selection_color: Color,
    /// Font context for text rendering (cached across frames).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Current zoom level (for zoom-independent chrome).
    zoom: f64,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer using the system font collection.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            zoom: 1.0,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Get mutable references to both font and layout contexts for text
    /// editing.
    pub fn contexts_mut(&mut self) -> (&mut FontContext, &mut LayoutContext<Brush>) {
        (&mut self.font_cx, &mut self.layout_cx)
    }

    /// Fill a pencil stroke's outline.
    fn render_path(&mut self, path: &PathElement, transform: Affine) {
        if path.is_empty() {
            return;
        }
        let outline = stroke_outline(&path.points, path.size, path.pressure);
        self.scene
            .fill(Fill::NonZero, transform, Color::from(path.color), None, &outline);
    }

    /// Render a text element line by line with a fixed line height, writing
    /// the measured extents back into the element's cache.
    fn render_text(&mut self, text: &TextElement, transform: Affine) {
        let brush = Brush::Solid(text.color.into());
        let font_size = text.font_size() as f32;
        let line_height = text.line_height();

        let mut max_width = 0.0_f64;
        // `str::lines` drops a trailing empty line; the bounds math counts
        // it, so split manually.
        for (index, line) in text.content.split('\n').enumerate() {
            if line.is_empty() {
                continue;
            }

            let mut builder = self
                .layout_cx
                .ranged_builder(&mut self.font_cx, line, 1.0, false);
            builder.push_default(StyleProperty::FontSize(font_size));
            builder.push_default(StyleProperty::Brush(brush.clone()));
            builder.push_default(StyleProperty::from(GenericFamily::SansSerif));
            let mut layout = builder.build(line);
            layout.break_all_lines(None);
            layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());
            max_width = max_width.max(layout.width() as f64);

            let line_transform = transform
                * Affine::translate((
                    text.position.x,
                    text.position.y + index as f64 * line_height,
                ));
            self.draw_layout_glyphs(&layout, &brush, line_transform);
        }

        text.set_cached_size(max_width, text.line_count() as f64 * line_height);
    }

    /// Draw all glyph runs of a computed layout (adapted from Parley's vello
    /// example).
    fn draw_layout_glyphs(
        &mut self,
        layout: &parley::Layout<Brush>,
        brush: &Brush,
        transform: Affine,
    ) {
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(brush)
                        .hint(true)
                        .transform(transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }
    }

    /// Dashed selection rectangle plus the eight resize handles.
    ///
    /// All strokes and sizes are compensated by 1/zoom so the chrome keeps a
    /// constant screen size.
    fn render_selection(&mut self, bounds: Rect, transform: Affine) {
        let inset = SELECTION_INSET / self.zoom;
        let stroke_width = 1.0 / self.zoom;
        let dash_len = SELECTION_DASH / self.zoom;

        let outline = bounds.inflate(inset, inset);
        let mut path = BezPath::new();
        path.move_to(Point::new(outline.x0, outline.y0));
        path.line_to(Point::new(outline.x1, outline.y0));
        path.line_to(Point::new(outline.x1, outline.y1));
        path.line_to(Point::new(outline.x0, outline.y1));
        path.close_path();

        let stroke = Stroke::new(stroke_width).with_dashes(0.0, &[dash_len, dash_len]);
        self.scene
            .stroke(&stroke, transform, self.selection_color, None, &path);

        let handle_size = HANDLE_SIZE / self.zoom;
        for handle in Handle::ALL {
            self.render_handle(handle.position(bounds), transform, handle_size);
        }
    }

    /// A single square handle, white fill with a themed border.
    fn render_handle(&mut self, pos: Point, transform: Affine, size: f64) {
        let half = size / 2.0;
        let rect = Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half);
        let path = rect.to_path(0.1);

        self.scene
            .fill(Fill::NonZero, transform, Color::WHITE, None, &path);
        self.scene.stroke(
            &Stroke::new(1.5 / self.zoom),
            transform,
            self.selection_color,
            None,
            &path,
        );
    }

    /// Render the open text overlay through its editing state, with the
    /// selection highlight and blinking cursor.
    ///
    /// Called after `build_scene`; the element being edited was skipped in
    /// the main pass.
    pub fn render_text_overlay(
        &mut self,
        edit_state: &mut TextEditState,
        position: Point,
        color: Color,
        camera_transform: Affine,
    ) {
        let brush = Brush::Solid(color);
        edit_state.set_brush(brush.clone());

        let text_transform = camera_transform * Affine::translate((position.x, position.y));

        // The layout must be computed before any cursor/selection geometry.
        let layout = edit_state
            .editor_mut()
            .layout(&mut self.font_cx, &mut self.layout_cx);

        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let glyph_style = glyph_run.style();
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&glyph_style.brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // Selection background behind the cursor.
        let selection_color = Color::from_rgba8(70, 130, 180, 128);
        edit_state.editor().selection_geometry_with(|rect, _| {
            self.scene.fill(
                Fill::NonZero,
                text_transform,
                selection_color,
                None,
                &convert_rect(&rect),
            );
        });

        if edit_state.is_cursor_visible() {
            if let Some(cursor) = edit_state.editor().cursor_geometry(1.5) {
                self.scene.fill(
                    Fill::NonZero,
                    text_transform,
                    color,
                    None,
                    &convert_rect(&cursor),
                );
            } else if edit_state.text().is_empty() {
                // Empty session: show a placeholder caret at the anchor.
                let cursor_height = edit_state.font_size() as f64 * 1.2;
                let cursor_rect = Rect::new(0.0, 0.0, 1.5, cursor_height);
                self.scene
                    .fill(Fill::NonZero, text_transform, color, None, &cursor_rect);
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.selection_color = ctx.theme.selection;

        let camera = ctx.router.camera();
        self.zoom = camera.zoom;
        let camera_transform = camera.transform();

        // Clear to the theme background.
        let background = Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            ctx.theme.background,
            None,
            &background,
        );

        // Elements in z-order; the one being edited is drawn by the overlay.
        for element in ctx.router.board().elements() {
            if element.editing() {
                continue;
            }
            match element {
                Element::Path(path) => self.render_path(path, camera_transform),
                Element::Text(text) => self.render_text(text, camera_transform),
            }
        }

        // Live stroke preview while drawing.
        let live = ctx.router.live_points();
        if !live.is_empty() {
            let settings = ctx.router.settings();
            let outline = stroke_outline(live, settings.size, settings.pressure);
            self.scene.fill(
                Fill::NonZero,
                camera_transform,
                Color::from(settings.color),
                None,
                &outline,
            );
        }

        // Selection chrome on top of the content.
        if let Some(selected) = ctx.router.board().selected() {
            if !selected.editing() {
                self.render_selection(selected.bounds(), camera_transform);
            }
        }

        // Screen-space eraser cursor.
        if let Some(pos) = ctx.router.eraser_cursor() {
            let circle = Circle::new(pos, ERASER_CURSOR_RADIUS);
            self.scene.stroke(
                &Stroke::new(1.5),
                Affine::IDENTITY,
                ctx.theme.eraser,
                None,
                &circle,
            );
        }
    }
}
