use egui::Color32;
use std::time::Duration;

use crate::history::DEFAULT_HISTORY_WINDOW;
use crate::tools::ToolName;

/// Startup settings for a new editing session
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Canvas size in cells
    pub width: usize,
    pub height: usize,
    pub background: Color32,
    pub color: Color32,
    pub tool: ToolName,
    /// Screen pixels per cell
    pub scale: f32,
    pub history_window: Duration,
    /// Imported images are cropped to this many cells per side
    pub max_import_size: u32,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 30,
            background: Color32::from_rgb(0xf0, 0xf0, 0xf0),
            color: Color32::BLACK,
            tool: ToolName::Draw,
            scale: 10.0,
            history_window: DEFAULT_HISTORY_WINDOW,
            max_import_size: 100,
            export_file_name: "pixelart.png".to_owned(),
        }
    }
}
