use egui::Color32;

use crate::picture::{PixelEdit, Point};

/// Filled disk centred on `anchor` whose radius reaches `point` (rounded).
pub fn circle(anchor: Point, point: Point, color: Color32) -> Vec<PixelEdit> {
    let dx = f64::from(point.x - anchor.x);
    let dy = f64::from(point.y - anchor.y);
    let radius = dx.hypot(dy).round() as i32;
    let radius_sq = radius * radius;

    let mut edits = Vec::new();
    for y in -radius..=radius {
        for x in -radius..=radius {
            if x * x + y * y <= radius_sq {
                edits.push(PixelEdit::new(anchor.x + x, anchor.y + y, color));
            }
        }
    }
    edits
}
