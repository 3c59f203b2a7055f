use crate::PixelEditorApp;
use crate::action::Action;
use crate::color::to_hex;
use crate::tools::ToolName;

pub fn tools_panel(app: &mut PixelEditorApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            // Always shows the state's values, whatever changed them
            let state = app.state().clone();

            let mut tool = state.tool;
            egui::ComboBox::from_label("Tool")
                .selected_text(tool.name())
                .show_ui(ui, |ui| {
                    for option in ToolName::ALL {
                        ui.selectable_value(&mut tool, option, format!("{} ({})", option, option.shortcut()));
                    }
                });
            if tool != state.tool {
                app.select_tool(tool);
            }

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = state.color;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.dispatch(Action::set_color(color));
                }

                let response = ui.add(
                    egui::TextEdit::singleline(app.color_text_mut())
                        .desired_width(64.0)
                        .font(egui::TextStyle::Monospace),
                );
                if response.lost_focus() {
                    let text = app.color_text_mut().clone();
                    app.set_color_hex(&text);
                } else if !response.has_focus() {
                    *app.color_text_mut() = to_hex(state.color);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("💾 Save").clicked() {
                    log::info!("Save requested");
                    app.save_picture();
                }
                if ui.button("📂 Load").clicked() {
                    app.open_load_dialog(ctx);
                }
                if ui.add_enabled(state.can_undo(), egui::Button::new("⮪ Undo")).clicked() {
                    app.undo();
                }
            });

            ui.separator();

            ui.label(format!("Canvas: {}x{}", state.picture.width(), state.picture.height()));
            ui.label(format!("Undo steps: {}", state.history.len()));
            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}
