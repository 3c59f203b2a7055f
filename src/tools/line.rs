use egui::Color32;

use crate::picture::{PixelEdit, Point};

/// Bresenham line from `anchor` to `point`, both ends included.
pub fn line(anchor: Point, point: Point, color: Color32) -> Vec<PixelEdit> {
    let (mut x, mut y) = (anchor.x, anchor.y);
    let dx = (point.x - x).abs();
    let dy = -(point.y - y).abs();
    let sx = if x < point.x { 1 } else { -1 };
    let sy = if y < point.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut edits = Vec::new();
    loop {
        edits.push(PixelEdit::new(x, y, color));
        if x == point.x && y == point.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    edits
}
