use std::sync::Arc;

use crate::action::Action;
use crate::config::EditorConfig;
use crate::file_handler::FileHandler;
use crate::history::HistoryReducer;
use crate::color::{parse_hex, to_hex};
use crate::input::{GestureEvent, InputEvent, InputHandler};
use crate::io::{self, ImportError};
use crate::panels;
use crate::picture::{Picture, PictureRef};
use crate::renderer::Renderer;
use crate::state::{AppState, EditorContext};
use crate::tools::{ToolName, ToolSession};
use crate::util::time::{Clock, SystemClock};

/// The pixel editor: editor state plus the UI adapters around it.
///
/// All mutable UI bookkeeping (texture, pointer tracking, the live gesture,
/// dialogs) lives here; the editor state itself only changes through
/// [`PixelEditorApp::dispatch`].
pub struct PixelEditorApp {
    config: EditorConfig,
    editor: EditorContext,
    renderer: Renderer,
    input: InputHandler,
    session: Option<ToolSession>,
    file_handler: FileHandler,
    // Hex field contents while the user is typing
    color_text: String,
    status: Option<String>,
}

impl Default for PixelEditorApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl PixelEditorApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: EditorConfig, clock: Box<dyn Clock>) -> Self {
        let editor = EditorContext::new(
            AppState::from_config(&config),
            HistoryReducer::new(config.history_window),
            clock,
        );
        log::info!(
            "new {}x{} picture, history window {:?}",
            config.width,
            config.height,
            config.history_window
        );

        Self {
            renderer: Renderer::new(config.scale),
            input: InputHandler::new(config.scale),
            session: None,
            file_handler: FileHandler::new(config.max_import_size),
            color_text: to_hex(config.color),
            status: None,
            editor,
            config,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        self.editor.state()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn dispatch(&mut self, action: Action) {
        self.editor.dispatch(action);
    }

    pub fn select_tool(&mut self, tool: ToolName) {
        if self.state().tool != tool {
            log::info!("Tool selected: {}", tool);
            self.dispatch(Action::set_tool(tool));
        }
    }

    pub fn undo(&mut self) {
        if self.state().can_undo() {
            log::info!("Undo");
        }
        self.dispatch(Action::undo());
    }

    /// Feed one gesture step to the active tool
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        let state = self.state().clone();
        match event {
            GestureEvent::Start(point) => {
                let (session, action) = ToolSession::begin(state.tool, point, &state);
                if let Some(action) = action {
                    self.dispatch(action);
                }
                self.session = session;
            }
            GestureEvent::Move(point) => {
                let action = self.session.as_ref().and_then(|session| session.update(point, &state));
                if let Some(action) = action {
                    self.dispatch(action);
                }
            }
            GestureEvent::End => self.session = None,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Gesture(gesture) => self.handle_gesture(gesture),
            InputEvent::Undo => self.undo(),
            InputEvent::SelectTool(tool) => self.select_tool(tool),
        }
    }

    /// Replace the picture with an imported one, or report why it failed
    pub fn import(&mut self, result: Result<Picture, ImportError>) {
        match result {
            Ok(picture) => {
                log::info!("Loaded {}x{} picture", picture.width(), picture.height());
                self.status = None;
                self.dispatch(Action::set_picture(picture));
            }
            Err(err) => {
                log::error!("Failed to load image: {}", err);
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn save_picture(&mut self) {
        let picture = self.state().picture.clone();
        match io::save_picture(&picture, &self.config.export_file_name) {
            Ok(()) => self.status = Some(format!("Saved {}", self.config.export_file_name)),
            Err(err) => {
                log::error!("Failed to save picture: {}", err);
                self.status = Some(err.to_string());
            }
        }
    }

    /// Let the user pick an image file; it is imported once the dialog
    /// completes, and cancelling leaves the picture alone
    pub fn open_load_dialog(&mut self, ctx: &egui::Context) {
        self.file_handler.open_file_dialog(ctx);
    }

    /// Apply every import that completed since the last frame.
    ///
    /// Each one is dispatched in turn, so the last to complete wins.
    pub fn apply_completed_imports(&mut self) {
        for result in self.file_handler.completed_imports() {
            self.import(result);
        }
    }

    /// Set the drawing color from `#rgb` or `#rrggbb` text
    pub fn set_color_hex(&mut self, text: &str) {
        match parse_hex(text) {
            Ok(color) => {
                self.status = None;
                if color != self.state().color {
                    self.dispatch(Action::set_color(color));
                }
            }
            Err(err) => {
                log::warn!("Invalid color {:?}: {}", text, err);
                self.status = Some(format!("Invalid color {text:?}: {err}"));
            }
        }
        self.color_text = to_hex(self.state().color);
    }

    pub(crate) fn color_text_mut(&mut self) -> &mut String {
        &mut self.color_text
    }

    /// Feed the canvas widget's pointer interaction to the active tool
    pub(crate) fn canvas_interaction(&mut self, response: &egui::Response) {
        if let Some(gesture) = self.input.canvas_response(response) {
            self.handle_gesture(gesture);
        }
    }

    /// Upload the current picture to the canvas texture and paint it
    pub(crate) fn paint_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let picture: PictureRef = self.state().picture.clone();
        self.renderer.sync(ctx, &picture);
        self.renderer.render(painter, rect);
    }

    #[cfg(test)]
    fn input_canvas_rect(&self) -> egui::Rect {
        self.input.canvas_rect()
    }

    pub(crate) fn canvas_size(&self) -> egui::Vec2 {
        self.renderer.canvas_size(&self.state().picture)
    }
}

impl PixelEditorApp {
    /// Build one frame of the editor UI and apply this frame's input
    pub fn ui(&mut self, ctx: &egui::Context) {
        let before = Arc::clone(self.state());

        self.apply_completed_imports();
        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            for result in self.file_handler.process_dropped_files() {
                self.import(result);
            }
        }

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        for event in self.input.process_keys(ctx) {
            self.handle_input(event);
        }
        if !Arc::ptr_eq(&before, self.state()) {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for PixelEditorApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::Point;
    use crate::util::time::ManualClock;
    use egui::Color32;
    use std::rc::Rc;

    const SCREEN: egui::Vec2 = egui::vec2(1000.0, 700.0);
    const OVERLAY_POS: egui::Pos2 = egui::pos2(300.0, 60.0);

    fn run_frame(ctx: &egui::Context, app: &mut PixelEditorApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN)),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            app.ui(ctx);
            // Stands in for any window lying over the canvas
            egui::Window::new("Overlay")
                .fixed_pos(OVERLAY_POS)
                .fixed_size(egui::vec2(200.0, 100.0))
                .show(ctx, |ui| {
                    ui.label("on top of the canvas");
                    let _ = ui.button("Load");
                });
        });
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn click(ctx: &egui::Context, app: &mut PixelEditorApp, pos: egui::Pos2) {
        run_frame(ctx, app, vec![egui::Event::PointerMoved(pos), button(pos, true)]);
        run_frame(ctx, app, vec![]);
        run_frame(ctx, app, vec![button(pos, false)]);
        run_frame(ctx, app, vec![]);
    }

    /// Full-size canvas, laid out by a couple of idle frames
    fn laid_out_app() -> (PixelEditorApp, egui::Context) {
        let config = EditorConfig {
            background: Color32::WHITE,
            ..EditorConfig::default()
        };
        let mut app = PixelEditorApp::with_clock(config, Box::new(ManualClock::default()));
        let ctx = egui::Context::default();
        for _ in 0..3 {
            run_frame(&ctx, &mut app, vec![]);
        }
        (app, ctx)
    }

    fn app() -> (PixelEditorApp, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::default());
        let config = EditorConfig {
            width: 5,
            height: 5,
            background: Color32::WHITE,
            ..EditorConfig::default()
        };
        (PixelEditorApp::with_clock(config, Box::new(clock.clone())), clock)
    }

    #[test]
    fn test_drag_with_draw_tool_accumulates_and_undoes_once() {
        let (mut app, _clock) = app();

        app.handle_gesture(GestureEvent::Start(Point::new(0, 0)));
        app.handle_gesture(GestureEvent::Move(Point::new(1, 0)));
        app.handle_gesture(GestureEvent::Move(Point::new(2, 0)));
        app.handle_gesture(GestureEvent::End);

        let picture = &app.state().picture;
        for x in 0..3 {
            assert_eq!(picture.pixel_at(x, 0).unwrap(), Color32::BLACK);
        }
        assert_eq!(app.state().history.len(), 1);

        app.undo();
        assert!(app.state().picture.cells().iter().all(|c| *c == Color32::WHITE));
        assert!(app.state().history.is_empty());
    }

    #[test]
    fn test_rectangle_drag_replaces_partial_shape() {
        let (mut app, _clock) = app();
        app.select_tool(ToolName::Rectangle);

        app.handle_gesture(GestureEvent::Start(Point::new(1, 1)));
        app.handle_gesture(GestureEvent::Move(Point::new(4, 4)));
        app.handle_gesture(GestureEvent::Move(Point::new(2, 2)));
        app.handle_gesture(GestureEvent::End);

        let painted = app.state().picture.cells().iter().filter(|c| **c == Color32::BLACK).count();
        assert_eq!(painted, 4);
        assert_eq!(app.state().picture.pixel_at(4, 4).unwrap(), Color32::WHITE);
    }

    #[test]
    fn test_pick_sets_color_and_moves_are_ignored() {
        let (mut app, _clock) = app();
        app.handle_gesture(GestureEvent::Start(Point::new(3, 3)));
        app.handle_gesture(GestureEvent::End);

        app.select_tool(ToolName::Pick);
        app.handle_gesture(GestureEvent::Start(Point::new(0, 0)));
        assert_eq!(app.state().color, Color32::WHITE);

        app.handle_gesture(GestureEvent::Move(Point::new(3, 3)));
        assert_eq!(app.state().color, Color32::WHITE);
        app.handle_gesture(GestureEvent::End);
    }

    #[test]
    fn test_failed_import_leaves_state_unchanged() {
        let (mut app, _clock) = app();
        let before = Arc::clone(app.state());

        app.import(io::decode_picture(b"not an image", 100));
        assert!(Arc::ptr_eq(&before, app.state()));
        assert!(app.status().is_some());
    }

    #[test]
    fn test_shortcut_events() {
        let (mut app, _clock) = app();
        app.handle_input(InputEvent::SelectTool(ToolName::Fill));
        assert_eq!(app.state().tool, ToolName::Fill);

        app.handle_input(InputEvent::Gesture(GestureEvent::Start(Point::new(0, 0))));
        assert!(app.state().picture.cells().iter().all(|c| *c == Color32::BLACK));

        app.handle_input(InputEvent::Undo);
        assert!(app.state().picture.cells().iter().all(|c| *c == Color32::WHITE));
    }

    #[test]
    fn test_click_on_window_over_canvas_does_not_paint() {
        let (mut app, ctx) = laid_out_app();
        let overlay = ctx
            .memory(|mem| mem.area_rect(egui::Id::new("Overlay")))
            .expect("overlay was laid out");
        let canvas = app.input_canvas_rect();
        let target = overlay.center();
        assert!(canvas.contains(target), "overlay must cover the canvas");

        let before = Arc::clone(app.state());
        click(&ctx, &mut app, target);
        assert!(Arc::ptr_eq(&before, app.state()));
        assert!(app.state().history.is_empty());
    }

    #[test]
    fn test_click_on_uncovered_canvas_paints() {
        let (mut app, ctx) = laid_out_app();
        let overlay = ctx
            .memory(|mem| mem.area_rect(egui::Id::new("Overlay")))
            .expect("overlay was laid out");
        let canvas = app.input_canvas_rect();
        let target = canvas.right_bottom() - egui::vec2(5.0, 5.0);
        assert!(!overlay.contains(target));

        click(&ctx, &mut app, target);
        let painted: Vec<_> = app
            .state()
            .picture
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Color32::BLACK)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(painted, vec![60 * 30 - 1]);
        assert_eq!(app.state().history.len(), 1);
    }

    #[test]
    fn test_no_completed_import_is_noop() {
        let (mut app, _clock) = app();
        let before = Arc::clone(app.state());

        app.apply_completed_imports();
        assert!(Arc::ptr_eq(&before, app.state()));
        assert_eq!(app.status(), None);
    }

    #[test]
    fn test_last_completed_import_wins() {
        let (mut app, _clock) = app();
        app.file_handler.complete(Ok(Picture::empty(2, 2, Color32::RED)));
        app.file_handler.complete(Ok(Picture::empty(3, 1, Color32::BLUE)));

        app.apply_completed_imports();
        let picture = &app.state().picture;
        assert_eq!((picture.width(), picture.height()), (3, 1));
        assert_eq!(picture.pixel_at(0, 0).unwrap(), Color32::BLUE);

        app.undo();
        assert_eq!(app.state().picture.width(), 5);
    }

    #[test]
    fn test_hex_color_entry() {
        let (mut app, _clock) = app();
        app.set_color_hex("#f00");
        assert_eq!(app.state().color, Color32::from_rgb(255, 0, 0));
        assert_eq!(app.color_text_mut().as_str(), "#ff0000");

        app.set_color_hex("red");
        assert_eq!(app.state().color, Color32::from_rgb(255, 0, 0));
        assert!(app.status().is_some());
        assert_eq!(app.color_text_mut().as_str(), "#ff0000");
    }
}
