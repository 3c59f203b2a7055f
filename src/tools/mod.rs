use crate::action::Action;
use crate::picture::{PictureRef, Point};
use crate::state::AppState;

mod circle;
mod draw;
mod fill;
mod line;
mod pick;
mod rectangle;

pub use circle::circle;
pub use draw::draw;
pub use fill::flood_fill;
pub use line::line;
pub use pick::pick;
pub use rectangle::rectangle;

/// The tools available in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolName {
    #[default]
    Draw,
    Fill,
    Rectangle,
    Circle,
    Line,
    Pick,
}

impl ToolName {
    pub const ALL: [ToolName; 6] = [
        ToolName::Draw,
        ToolName::Fill,
        ToolName::Rectangle,
        ToolName::Circle,
        ToolName::Line,
        ToolName::Pick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Fill => "fill",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Pick => "pick",
        }
    }

    /// Keyboard shortcut: the first letter of the tool name
    pub fn shortcut(&self) -> char {
        self.name().chars().next().unwrap_or_default()
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == c)
    }

    /// Whether the tool keeps editing while the pointer is dragged
    pub fn drags(&self) -> bool {
        !matches!(self, Self::Fill | Self::Pick)
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An in-progress pointer gesture.
///
/// Created on pointer-down by [`ToolSession::begin`] and fed every later
/// pointer position until release. `base` is the picture when the gesture
/// started; shape tools always draw onto it so each move replaces the
/// previous partial shape.
#[derive(Debug, Clone)]
pub struct ToolSession {
    tool: ToolName,
    anchor: Point,
    base: PictureRef,
}

impl ToolSession {
    /// Run the tool's first step at `point`.
    ///
    /// Returns the session to keep for drag tools, plus the action to dispatch.
    pub fn begin(tool: ToolName, point: Point, state: &AppState) -> (Option<Self>, Option<Action>) {
        let session = Self {
            tool,
            anchor: point,
            base: state.picture.clone(),
        };

        match tool {
            ToolName::Fill => {
                let action = state
                    .picture
                    .contains(point.x, point.y)
                    .then(|| flood_fill(&state.picture, point, state.color))
                    .map(|edits| Action::set_picture(state.picture.with_edits(&edits)));
                (None, action)
            }
            ToolName::Pick => (None, pick(&state.picture, point).map(Action::set_color)),
            _ => {
                let action = session.update(point, state);
                (Some(session), action)
            }
        }
    }

    /// Run the tool for the current pointer position
    pub fn update(&self, point: Point, state: &AppState) -> Option<Action> {
        let picture = match self.tool {
            ToolName::Draw => state.picture.with_edits(&draw(point, state.color)),
            ToolName::Rectangle => self.base.with_edits(&rectangle(self.anchor, point, state.color)),
            ToolName::Circle => self.base.with_edits(&circle(self.anchor, point, state.color)),
            ToolName::Line => self.base.with_edits(&line(self.anchor, point, state.color)),
            ToolName::Fill | ToolName::Pick => return None,
        };
        Some(Action::set_picture(picture))
    }

    pub fn tool(&self) -> ToolName {
        self.tool
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_are_unique() {
        for tool in ToolName::ALL {
            assert_eq!(ToolName::from_shortcut(tool.shortcut()), Some(tool));
        }
        assert_eq!(ToolName::from_shortcut('R'), Some(ToolName::Rectangle));
        assert_eq!(ToolName::from_shortcut('x'), None);
    }

    #[test]
    fn test_drag_tools() {
        assert!(ToolName::Draw.drags());
        assert!(ToolName::Circle.drags());
        assert!(!ToolName::Fill.drags());
        assert!(!ToolName::Pick.drags());
    }
}
