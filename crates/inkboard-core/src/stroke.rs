//! Stroke outline construction.
//!
//! Converts a recorded polyline into a closed outline suitable for filling,
//! giving pencil strokes a consistent rounded look. Used for both committed
//! paths and the live preview while drawing.

use kurbo::{BezPath, Point, Vec2};

/// Fraction of the stroke size used as the outline radius.
const RADIUS_FACTOR: f64 = 0.5;

/// Build a closed fill outline around a polyline.
///
/// Each point gets a radius from the stroke `size` (scaled by `pressure`
/// when set), perpendicular offsets are laid down on both sides of the
/// polyline, and both caps are rounded. The outline is smoothed by emitting
/// quadratic segments through the midpoints of consecutive offset points.
///
/// A single point yields a filled circle; an empty slice yields an empty
/// path.
pub fn stroke_outline(points: &[Point], size: f64, pressure: Option<f64>) -> BezPath {
    let radius = size * RADIUS_FACTOR * pressure.unwrap_or(1.0).clamp(0.0, 1.0).max(0.1);

    match points {
        [] => BezPath::new(),
        [point] => dot(*point, radius),
        _ => outline(points, radius),
    }
}

/// Circle outline for a single-point stroke.
fn dot(center: Point, radius: f64) -> BezPath {
    // Cubic circle approximation constant.
    const K: f64 = 0.552_284_749_830_793_4;
    let r = radius;
    let k = r * K;

    let mut path = BezPath::new();
    path.move_to((center.x + r, center.y));
    path.curve_to(
        (center.x + r, center.y + k),
        (center.x + k, center.y + r),
        (center.x, center.y + r),
    );
    path.curve_to(
        (center.x - k, center.y + r),
        (center.x - r, center.y + k),
        (center.x - r, center.y),
    );
    path.curve_to(
        (center.x - r, center.y - k),
        (center.x - k, center.y - r),
        (center.x, center.y - r),
    );
    path.curve_to(
        (center.x + k, center.y - r),
        (center.x + r, center.y - k),
        (center.x + r, center.y),
    );
    path.close_path();
    path
}

/// Unit direction of the segment entering/leaving each point.
fn directions(points: &[Point]) -> Vec<Vec2> {
    let mut dirs = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        let dir = if i + 1 < points.len() {
            points[i + 1] - *point
        } else {
            *point - points[i - 1]
        };
        let len = dir.hypot();
        if len < f64::EPSILON {
            // Degenerate segment; reuse the previous direction when we have
            // one, otherwise point right.
            dirs.push(dirs.last().copied().unwrap_or(Vec2::new(1.0, 0.0)));
        } else {
            dirs.push(dir / len);
        }
    }
    dirs
}

fn outline(points: &[Point], radius: f64) -> BezPath {
    let dirs = directions(points);

    // Offset points on the left and right of the polyline.
    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());
    for (point, dir) in points.iter().zip(&dirs) {
        let normal = Vec2::new(-dir.y, dir.x) * radius;
        left.push(*point + normal);
        right.push(*point - normal);
    }

    let mut path = BezPath::new();

    // Start cap: two quadratics from the right side over the backward tip
    // to the left side, approximating a half circle.
    let start = points[0];
    let start_dir = dirs[0];
    let start_normal = Vec2::new(-start_dir.y, start_dir.x) * radius;
    let start_tip = start - start_dir * radius;
    path.move_to(right[0]);
    path.quad_to(start_tip - start_normal, start_tip);
    path.quad_to(start_tip + start_normal, left[0]);

    // Left side, smoothed through midpoints.
    smooth_side(&mut path, &left);

    // End cap over the forward tip.
    let end = points[points.len() - 1];
    let end_dir = dirs[dirs.len() - 1];
    let end_normal = Vec2::new(-end_dir.y, end_dir.x) * radius;
    let end_tip = end + end_dir * radius;
    path.line_to(left[left.len() - 1]);
    path.quad_to(end_tip + end_normal, end_tip);
    path.quad_to(end_tip - end_normal, right[right.len() - 1]);

    // Right side back to the start.
    let mut reversed = right.clone();
    reversed.reverse();
    smooth_side(&mut path, &reversed);
    path.line_to(right[0]);

    path.close_path();
    path
}

/// Append quadratic segments through the midpoints of consecutive offset
/// points, using each point as the control.
fn smooth_side(path: &mut BezPath, side: &[Point]) {
    for window in side.windows(2) {
        let mid = window[0].midpoint(window[1]);
        path.quad_to(window[0], mid);
    }
}
