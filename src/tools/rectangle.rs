use egui::Color32;

use crate::picture::{PixelEdit, Point};

/// Every cell of the axis-aligned box spanned by `anchor` and `point`, inclusive.
pub fn rectangle(anchor: Point, point: Point, color: Color32) -> Vec<PixelEdit> {
    let (x0, x1) = (anchor.x.min(point.x), anchor.x.max(point.x));
    let (y0, y1) = (anchor.y.min(point.y), anchor.y.max(point.y));

    let mut edits = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
    for y in y0..=y1 {
        for x in x0..=x1 {
            edits.push(PixelEdit::new(x, y, color));
        }
    }
    edits
}
