use egui::Color32;

use crate::picture::{Picture, Point};

/// The color under `point`, if it is on the picture
pub fn pick(picture: &Picture, point: Point) -> Option<Color32> {
    picture.pixel_at(point.x, point.y).ok()
}
