use crate::PixelEditorApp;

/// The drawing surface, sized to the picture at the configured scale
pub fn central_panel(app: &mut PixelEditorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Dragging draws, so it must not scroll
        egui::ScrollArea::both().drag_to_scroll(false).show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(app.canvas_size(), egui::Sense::click_and_drag());
            app.canvas_interaction(&response);
            app.paint_canvas(ctx, &painter, response.rect);
        });
    });
}
