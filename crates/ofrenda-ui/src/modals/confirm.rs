//! Confirmation modal

use egui::RichText;
use ofrenda::{AppEvent, Confirmation};

pub fn show(ctx: &egui::Context, confirmation: &Confirmation) -> Option<AppEvent> {
    let mut result = None;

    egui::Window::new("Please confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(confirmation.message()).size(14.0));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Remove").clicked() {
                    result = Some(AppEvent::ConfirmAccepted);
                }
                if ui.button("Keep").clicked() {
                    result = Some(AppEvent::ConfirmDeclined);
                }
            });

            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                result = Some(AppEvent::ConfirmDeclined);
            }
        });

    result
}
