//! Entry form modal
//!
//! Edits the raw inputs of the open form in place. Save and cancel are
//! reported as events. While the save is in flight the whole form is locked,
//! so the outcome always belongs to the draft that was sent.

use crate::images;
use egui::{Color32, RichText, TextEdit, Vec2};
use ofrenda::dialog::DialogController;
use ofrenda::form::{FieldInput, FieldKind};
use ofrenda::AppEvent;
use url::Url;

const PREVIEW_SIZE: Vec2 = Vec2::new(120.0, 150.0);

pub fn show(ctx: &egui::Context, dialog: &mut DialogController, base: &Url) -> Option<AppEvent> {
    let heading = dialog.heading()?;
    let busy = dialog.is_busy();
    let mut result = None;
    let mut photo_edited = false;

    egui::Window::new(heading)
        .id(egui::Id::new("entry_form_modal"))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let preview = dialog.form().preview().clone();
            ui.horizontal(|ui| {
                ui.add(
                    egui::Image::new(images::resolve(base, &preview.src))
                        .fit_to_exact_size(PREVIEW_SIZE)
                        .maintain_aspect_ratio(true),
                );
                if preview.has_photo
                    && ui
                        .add_enabled(!busy, egui::Button::new("Remove photo").small())
                        .clicked()
                {
                    result = Some(AppEvent::RemovePhoto);
                }
            });
            ui.add_space(8.0);

            ui.add_enabled_ui(!busy, |ui| {
                egui::Grid::new("entry_form_fields")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for (spec, input) in dialog.form_mut().fields_mut() {
                            if spec.kind == FieldKind::Hidden {
                                continue;
                            }
                            ui.label(&spec.label);
                            let changed = match input {
                                FieldInput::Checked(checked) => {
                                    ui.checkbox(checked, "").changed()
                                }
                                FieldInput::Text(text) => {
                                    let edit = match spec.kind {
                                        FieldKind::TextArea => {
                                            TextEdit::multiline(text).desired_rows(3)
                                        }
                                        FieldKind::Date => {
                                            TextEdit::singleline(text).hint_text("YYYY-MM-DD")
                                        }
                                        FieldKind::Url => {
                                            TextEdit::singleline(text).hint_text("https://")
                                        }
                                        _ => TextEdit::singleline(text),
                                    };
                                    ui.add(edit.desired_width(260.0)).changed()
                                }
                            };
                            if changed && spec.kind == FieldKind::Url {
                                photo_edited = true;
                            }
                            ui.end_row();
                        }
                    });
            });

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                let save = egui::Button::new(RichText::new("Save").strong());
                if ui.add_enabled(!busy, save).clicked() {
                    result = Some(AppEvent::SubmitForm);
                }
                if ui.add_enabled(!busy, egui::Button::new("Cancel")).clicked() {
                    result = Some(AppEvent::CancelEdit);
                }
                if busy {
                    ui.spinner();
                    ui.label(RichText::new("Saving...").color(Color32::GRAY));
                }
            });

            if !busy && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                result = Some(AppEvent::CancelEdit);
            }
        });

    if photo_edited {
        dialog.sync_preview();
    }
    result
}
