use egui::Color32;

use crate::picture::PictureRef;
use crate::tools::ToolName;

/// A request to change the editor state.
///
/// Only the fields that are set take part in the transition; everything
/// else is carried over from the previous state.
#[derive(Clone, Default, PartialEq)]
pub struct Action {
    pub tool: Option<ToolName>,
    pub color: Option<Color32>,
    pub picture: Option<PictureRef>,
    pub undo: bool,
}

impl Action {
    pub fn set_tool(tool: ToolName) -> Self {
        Self {
            tool: Some(tool),
            ..Self::default()
        }
    }

    pub fn set_color(color: Color32) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn set_picture(picture: impl Into<PictureRef>) -> Self {
        Self {
            picture: Some(picture.into()),
            ..Self::default()
        }
    }

    pub fn undo() -> Self {
        Self {
            undo: true,
            ..Self::default()
        }
    }

    /// Short label for logs
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.undo {
            parts.push("undo".to_owned());
        }
        if let Some(tool) = self.tool {
            parts.push(format!("tool={tool}"));
        }
        if let Some(color) = self.color {
            parts.push(format!("color={}", crate::color::to_hex(color)));
        }
        if let Some(picture) = &self.picture {
            parts.push(format!("picture={}x{}", picture.width(), picture.height()));
        }
        if parts.is_empty() {
            "noop".to_owned()
        } else {
            parts.join(" ")
        }
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action({})", self.describe())
    }
}
