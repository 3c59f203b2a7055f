use egui::{Context, Key, Modifiers, Pos2, Rect, Response};

use crate::picture::Point;
use crate::tools::ToolName;

/// Translate a screen position into the grid cell under it
pub fn cell_at(pos: Pos2, origin: Pos2, scale: f32) -> Point {
    Point::new(
        ((pos.x - origin.x) / scale).floor() as i32,
        ((pos.y - origin.y) / scale).floor() as i32,
    )
}

/// One step of a pointer gesture on the canvas, in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Primary button pressed over the canvas
    Start(Point),
    /// Pointer moved into another cell while held down
    Move(Point),
    /// Primary button released
    End,
}

/// Events the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Gesture(GestureEvent),
    Undo,
    SelectTool(ToolName),
}

/// Pointer state for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    /// Primary button went down on the canvas
    pub pressed: bool,
    /// Primary button is held
    pub down: bool,
    pub pos: Option<Pos2>,
}

/// Map a key press to an editor shortcut
pub fn key_command(key: Key, modifiers: Modifiers) -> Option<InputEvent> {
    if modifiers.command && key == Key::Z {
        return Some(InputEvent::Undo);
    }
    if !modifiers.is_none() {
        return None;
    }

    let mut name = key.name().chars();
    match (name.next(), name.next()) {
        (Some(letter), None) => ToolName::from_shortcut(letter).map(InputEvent::SelectTool),
        _ => None,
    }
}

/// Turns raw egui input into grid gestures and shortcuts
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    scale: f32,
    last_cell: Option<Point>,
    dragging: bool,
}

impl InputHandler {
    pub fn new(scale: f32) -> Self {
        Self {
            canvas_rect: Rect::NOTHING,
            scale,
            last_cell: None,
            dragging: false,
        }
    }

    /// Update where the canvas is on screen (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Advance the gesture state machine by one frame of pointer state
    pub fn pointer(&mut self, sample: PointerSample) -> Option<GestureEvent> {
        if self.dragging {
            if !sample.down {
                self.dragging = false;
                self.last_cell = None;
                return Some(GestureEvent::End);
            }
            let cell = cell_at(sample.pos?, self.canvas_rect.min, self.scale);
            if self.last_cell == Some(cell) {
                return None;
            }
            self.last_cell = Some(cell);
            return Some(GestureEvent::Move(cell));
        }

        let pos = sample.pos?;
        if sample.pressed && self.canvas_rect.contains(pos) {
            let cell = cell_at(pos, self.canvas_rect.min, self.scale);
            self.dragging = true;
            self.last_cell = Some(cell);
            return Some(GestureEvent::Start(cell));
        }
        None
    }

    /// Gesture step from the canvas widget's response.
    ///
    /// Only presses that egui routed to the canvas count, so clicks on a
    /// window or popup lying over it never start a stroke.
    pub fn canvas_response(&mut self, response: &Response) -> Option<GestureEvent> {
        self.set_canvas_rect(response.rect);
        let down = response.is_pointer_button_down_on() && response.ctx.input(|i| i.pointer.primary_down());
        self.pointer(PointerSample {
            pressed: down,
            down,
            pos: response.interact_pointer_pos(),
        })
    }

    /// Keyboard shortcuts pressed this frame, unless a text field has focus
    pub fn process_keys(&self, ctx: &Context) -> Vec<InputEvent> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }

        ctx.input(|input| {
            input
                .raw
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => key_command(*key, *modifiers),
                    _ => None,
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn handler() -> InputHandler {
        let mut handler = InputHandler::new(10.0);
        handler.set_canvas_rect(Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(60.0, 30.0)));
        handler
    }

    fn held(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pressed: false,
            down: true,
            pos: Some(pos2(x, y)),
        }
    }

    #[test]
    fn test_cell_translation() {
        let origin = pos2(100.0, 50.0);
        assert_eq!(cell_at(pos2(100.0, 50.0), origin, 10.0), Point::new(0, 0));
        assert_eq!(cell_at(pos2(119.9, 65.0), origin, 10.0), Point::new(1, 1));
        assert_eq!(cell_at(pos2(95.0, 45.0), origin, 10.0), Point::new(-1, -1));
    }

    #[test]
    fn test_gesture_sequence() {
        let mut input = handler();
        let press = PointerSample {
            pressed: true,
            ..held(105.0, 55.0)
        };

        assert_eq!(input.pointer(press), Some(GestureEvent::Start(Point::new(0, 0))));
        assert!(input.is_dragging());
        // Same cell: nothing new
        assert_eq!(input.pointer(held(108.0, 58.0)), None);
        assert_eq!(input.pointer(held(125.0, 58.0)), Some(GestureEvent::Move(Point::new(2, 0))));
        // Leaving the canvas keeps the drag alive
        assert_eq!(input.pointer(held(90.0, 58.0)), Some(GestureEvent::Move(Point::new(-1, 0))));

        let release = PointerSample {
            down: false,
            ..held(90.0, 58.0)
        };
        assert_eq!(input.pointer(release), Some(GestureEvent::End));
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = handler();
        let press = PointerSample {
            pressed: true,
            ..held(10.0, 10.0)
        };
        assert_eq!(input.pointer(press), None);
        assert_eq!(input.pointer(held(105.0, 55.0)), None);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(key_command(Key::Z, Modifiers::COMMAND), Some(InputEvent::Undo));
        assert_eq!(
            key_command(Key::F, Modifiers::NONE),
            Some(InputEvent::SelectTool(ToolName::Fill))
        );
        assert_eq!(key_command(Key::F, Modifiers::SHIFT), None);
        assert_eq!(key_command(Key::Z, Modifiers::NONE), None);
        assert_eq!(key_command(Key::Enter, Modifiers::NONE), None);
    }
}
