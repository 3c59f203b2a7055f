use std::collections::HashSet;

use egui::Color32;

use crate::picture::{Picture, PixelEdit, Point};

const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 4-connected flood fill from `seed`.
///
/// Every cell reachable from the seed through cells of the seed's color gets
/// an edit to `color`, in discovery order. A seed outside the picture yields
/// no edits.
pub fn flood_fill(picture: &Picture, seed: Point, color: Color32) -> Vec<PixelEdit> {
    let Ok(target) = picture.pixel_at(seed.x, seed.y) else {
        return Vec::new();
    };

    let mut discovered = vec![seed];
    let mut seen = HashSet::from([seed]);
    let mut next = 0;

    while let Some(&cell) = discovered.get(next) {
        next += 1;
        for (dx, dy) in NEIGHBORS {
            let neighbor = Point::new(cell.x + dx, cell.y + dy);
            // Bounds before color
            if !picture.contains(neighbor.x, neighbor.y) || seen.contains(&neighbor) {
                continue;
            }
            if picture.pixel_at(neighbor.x, neighbor.y) == Ok(target) {
                seen.insert(neighbor);
                discovered.push(neighbor);
            }
        }
    }

    discovered
        .into_iter()
        .map(|cell| PixelEdit::at(cell, color))
        .collect()
}
