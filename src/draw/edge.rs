use crate::geometry::{Point, Rect};

/// Returns the point on the border of `rect` that faces toward `target`.
///
/// The exit side is picked by normalizing the displacement to `target` by
/// the rectangle's half-extents on each axis: when the horizontal component
/// dominates the line leaves through the left or right edge (vertically
/// centered), otherwise through the top or bottom edge (horizontally
/// centered). Two axis-aligned boxes connected this way get non-overlapping
/// endpoints without full line clipping.
///
/// If `rect` has zero size or `target` coincides with its center, the
/// center is returned.
pub fn edge_exit(rect: Rect, target: Point) -> Point {
    let center = rect.center();
    let hw = rect.width() / 2;
    let hh = rect.height() / 2;

    let dx = target.x - center.x;
    let dy = target.y - center.y;

    if (dx == 0 && dy == 0) || (hw == 0 && hh == 0) {
        return center;
    }

    let ndx = if hw > 0 { dx as f64 / hw as f64 } else { 0.0 };
    let ndy = if hh > 0 { dy as f64 / hh as f64 } else { 0.0 };

    if ndx.abs() > ndy.abs() {
        if dx > 0 {
            Point::new(rect.max.x - 1, center.y)
        } else {
            Point::new(rect.min.x, center.y)
        }
    } else if dy > 0 {
        Point::new(center.x, rect.max.y - 1)
    } else {
        Point::new(center.x, rect.min.y)
    }
}
