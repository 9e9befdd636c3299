//! Terminal drawing primitives: Bresenham lines, directional line/arrow
//! character lookup, edge exit-point geometry, a background grid, and
//! convenience functions that paint into a [`Buffer`].
//!
//! Coordinates passed to the drawing functions are buffer-local; the buffer
//! clips out-of-bounds cells itself.

mod edge;
mod grid;
mod line;

pub use edge::edge_exit;
pub use grid::draw_grid;
pub use line::{arrow_char, bresenham, line_char};

use crate::buffer::{Buffer, StyleId};

/// Draws a Bresenham line into `buf` with the appropriate line character
/// for the segment's direction.
pub fn draw_line(buf: &mut Buffer, x0: i32, y0: i32, x1: i32, y1: i32, style: StyleId) {
    let ch = line_char(x1 - x0, y1 - y0);
    for p in bresenham(x0, y0, x1, y1) {
        buf.set(p.x, p.y, ch, style);
    }
}

/// Draws a line with an arrowhead at the endpoint. The line body uses
/// `line_style` and the arrowhead uses `arrow_style`.
pub fn draw_arrow_line(
    buf: &mut Buffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    line_style: StyleId,
    arrow_style: StyleId,
) {
    let pts = bresenham(x0, y0, x1, y1);
    let Some((last, body)) = pts.split_last() else {
        return;
    };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let ch = line_char(dx, dy);
    for p in body {
        buf.set(p.x, p.y, ch, line_style);
    }
    buf.set(last.x, last.y, arrow_char(dx, dy), arrow_style);
}

/// Draws a dashed Bresenham line: every third sampled point is skipped.
/// Used for connect-mode previews.
pub fn draw_dashed_line(buf: &mut Buffer, x0: i32, y0: i32, x1: i32, y1: i32, style: StyleId) {
    let ch = line_char(x1 - x0, y1 - y0);
    for (i, p) in bresenham(x0, y0, x1, y1).into_iter().enumerate() {
        if i % 3 != 2 {
            buf.set(p.x, p.y, ch, style);
        }
    }
}
