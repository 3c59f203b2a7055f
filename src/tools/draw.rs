use egui::Color32;

use crate::picture::{PixelEdit, Point};

/// One pixel at the pointer
pub fn draw(point: Point, color: Color32) -> Vec<PixelEdit> {
    vec![PixelEdit::at(point, color)]
}
