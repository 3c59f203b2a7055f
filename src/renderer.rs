use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions};
use std::sync::Arc;

use crate::picture::{Picture, PictureRef};

/// Cells that differ between two pictures of the same size.
///
/// Returns `None` when there is no previous picture or the size changed,
/// meaning everything must be redrawn.
pub fn changed_cells(previous: Option<&Picture>, next: &Picture) -> Option<Vec<(usize, usize)>> {
    let previous = previous?;
    if previous.width() != next.width() || previous.height() != next.height() {
        return None;
    }

    let width = next.width().max(1);
    Some(
        previous
            .cells()
            .iter()
            .zip(next.cells())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(index, _)| (index % width, index / width))
            .collect(),
    )
}

/// Draws a picture onto the canvas at a fixed number of screen pixels per cell
pub struct Renderer {
    scale: f32,
    // CPU-side copy of what the texture currently shows
    image: ColorImage,
    texture: Option<TextureHandle>,
    previous: Option<PictureRef>,
}

impl Renderer {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            image: ColorImage::new([0, 0], Color32::TRANSPARENT),
            texture: None,
            previous: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// On-screen size of a picture
    pub fn canvas_size(&self, picture: &Picture) -> egui::Vec2 {
        egui::vec2(picture.width() as f32, picture.height() as f32) * self.scale
    }

    /// Bring the texture up to date with `picture`.
    ///
    /// Only cells that changed since the last sync are rewritten; a new size
    /// or the first sync redraws everything.
    pub fn sync(&mut self, ctx: &egui::Context, picture: &PictureRef) {
        if let Some(previous) = &self.previous {
            if Arc::ptr_eq(previous, picture) {
                return;
            }
        }

        let changed = if self.texture.is_some() {
            changed_cells(self.previous.as_deref(), picture)
        } else {
            None
        };
        let Some(changed) = changed else {
            self.redraw(ctx, picture);
            self.previous = Some(picture.clone());
            return;
        };

        if !changed.is_empty() {
            self.update_cells(picture, &changed);
        }
        self.previous = Some(picture.clone());
    }

    fn redraw(&mut self, ctx: &egui::Context, picture: &Picture) {
        log::debug!("full redraw of {}x{} picture", picture.width(), picture.height());

        if picture.cells().is_empty() {
            self.texture = None;
            self.image = ColorImage::new([0, 0], Color32::TRANSPARENT);
            return;
        }

        let mut image = ColorImage::new([picture.width(), picture.height()], Color32::TRANSPARENT);
        image.pixels.copy_from_slice(picture.cells());

        if let Some(texture) = &mut self.texture {
            texture.set(image.clone(), TextureOptions::NEAREST);
        } else {
            self.texture = Some(ctx.load_texture("picture", image.clone(), TextureOptions::NEAREST));
        }
        self.image = image;
    }

    fn update_cells(&mut self, picture: &Picture, changed: &[(usize, usize)]) {
        let width = picture.width();
        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0, 0);

        for &(x, y) in changed {
            self.image.pixels[y * width + x] = picture.cells()[y * width + x];
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        // Upload only the bounding box of the changed cells
        let region_width = max_x - min_x + 1;
        let region_height = max_y - min_y + 1;
        let mut region = ColorImage::new([region_width, region_height], Color32::TRANSPARENT);
        for row in 0..region_height {
            let src = (min_y + row) * width + min_x;
            region.pixels[row * region_width..(row + 1) * region_width]
                .copy_from_slice(&self.image.pixels[src..src + region_width]);
        }

        if let Some(texture) = &mut self.texture {
            texture.set_partial([min_x, min_y], region, TextureOptions::NEAREST);
        }
    }

    /// Paint the synced picture into `rect`
    pub fn render(&self, painter: &egui::Painter, rect: egui::Rect) {
        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    #[cfg(test)]
    fn image(&self) -> &ColorImage {
        &self.image
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("scale", &self.scale)
            .field("size", &self.image.size)
            .field("has_texture", &self.texture.is_some())
            .finish()
    }
}
