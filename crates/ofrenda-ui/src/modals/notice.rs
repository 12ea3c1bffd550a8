//! Notice modal (the browser's `alert`)

use egui::{Color32, RichText};
use ofrenda::{AppEvent, Notice};

pub fn show(ctx: &egui::Context, notice: &Notice) -> Option<AppEvent> {
    let mut result = None;
    let color = if notice.is_error() {
        Color32::from_rgb(248, 113, 113)
    } else {
        Color32::LIGHT_GRAY
    };

    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 24.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&notice.message).color(color));
            ui.add_space(6.0);
            if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                result = Some(AppEvent::DismissNotice);
            }
        });

    result
}
