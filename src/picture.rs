use egui::Color32;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by picture construction and reads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PictureError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} picture")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("expected {expected} cells for the picture, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A grid position, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A single proposed write against a picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelEdit {
    pub x: i32,
    pub y: i32,
    pub color: Color32,
}

impl PixelEdit {
    pub const fn new(x: i32, y: i32, color: Color32) -> Self {
        Self { x, y, color }
    }

    pub const fn at(point: Point, color: Color32) -> Self {
        Self::new(point.x, point.y, color)
    }
}

/// Immutable grid of colors, stored row-major.
///
/// Edits never modify a picture in place: [`Picture::with_edits`] returns a
/// new one, so older pictures stay valid as undo snapshots.
#[derive(Clone, PartialEq, Eq)]
pub struct Picture {
    width: usize,
    height: usize,
    cells: Vec<Color32>,
}

// Shared handle used by the editor state and history
pub type PictureRef = Arc<Picture>;

impl Picture {
    /// Create a picture filled with a single color
    pub fn empty(width: usize, height: usize, color: Color32) -> Self {
        Self {
            width,
            height,
            cells: vec![color; width * height],
        }
    }

    /// Create a picture from an existing row-major cell buffer
    pub fn from_cells(width: usize, height: usize, cells: Vec<Color32>) -> Result<Self, PictureError> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(PictureError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Color32] {
        &self.cells
    }

    /// Whether (x, y) addresses a cell of this picture
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn pixel_at(&self, x: i32, y: i32) -> Result<Color32, PictureError> {
        if !self.contains(x, y) {
            return Err(PictureError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[y as usize * self.width + x as usize])
    }

    /// Apply edits in order and return the resulting picture.
    ///
    /// Edits outside the grid are skipped; a later edit to the same cell wins.
    pub fn with_edits(&self, edits: &[PixelEdit]) -> Self {
        let mut cells = self.cells.clone();
        for edit in edits {
            if self.contains(edit.x, edit.y) {
                cells[edit.y as usize * self.width + edit.x as usize] = edit.color;
            }
        }
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cells", &format!("<{} cells>", self.cells.len()))
            .finish()
    }
}
