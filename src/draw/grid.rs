use crate::buffer::{Buffer, StyleId};

/// Fills the buffer with grid dots (`·`) at regular world-space intervals,
/// offset by the camera position. A dot lands wherever the world coordinate
/// is a multiple of the spacing on both axes.
pub fn draw_grid(
    buf: &mut Buffer,
    cam_x: i32,
    cam_y: i32,
    spacing_x: i32,
    spacing_y: i32,
    style: StyleId,
) {
    for row in 0..buf.height() as i32 {
        if mod_floor(row + cam_y, spacing_y) != 0 {
            continue;
        }
        for col in 0..buf.width() as i32 {
            if mod_floor(col + cam_x, spacing_x) == 0 {
                buf.set(col, row, '·', style);
            }
        }
    }
}

// Non-negative modulus; `%` on negative operands would skip dots left of
// or above the origin.
fn mod_floor(a: i32, m: i32) -> i32 {
    if m == 0 { 0 } else { a.rem_euclid(m) }
}
