//! Detail modal
//!
//! Read-only view of one entry: photo, name, dates and description, with
//! edit and delete actions.

use crate::images;
use egui::{Color32, RichText, Vec2};
use ofrenda::{AppEvent, DetailView, Entry};
use url::Url;

const PHOTO_SIZE: Vec2 = Vec2::new(220.0, 280.0);

pub fn show(ctx: &egui::Context, view: &DetailView, entry: Entry, base: &Url) -> Option<AppEvent> {
    let mut result = None;
    let mut open = true;

    egui::Window::new(view.display_name.as_str())
        .id(egui::Id::new("detail_modal"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Image::new(images::resolve(base, &view.image))
                        .fit_to_exact_size(PHOTO_SIZE)
                        .maintain_aspect_ratio(true),
                );
                ui.add_space(6.0);
                ui.heading(&view.display_name);
                ui.label(RichText::new(view.dates_line()).color(Color32::GRAY));
            });

            if !view.description.is_empty() {
                ui.add_space(8.0);
                ui.label(&view.description);
            }

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Edit").clicked() {
                    result = Some(AppEvent::EditEntry(entry.clone()));
                }
                if ui
                    .button(RichText::new("Delete").color(Color32::from_rgb(248, 113, 113)))
                    .clicked()
                {
                    result = Some(AppEvent::RequestDelete(entry.clone()));
                }
            });
        });

    if !open {
        result = Some(AppEvent::CloseDetail);
    }
    result
}
