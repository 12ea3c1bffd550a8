//! Altar panel
//!
//! Draws a `SlotGrid` as rows of picture frames. Filled frames show the photo
//! (or the placeholder) with the name underneath; empty frames show the dimmed
//! placeholder. Clicking a frame yields that slot's event unless the altar is
//! locked by a save or delete in flight.

use crate::images;
use egui::{Color32, RichText, Sense, Vec2};
use ofrenda::grid::{Slot, SlotGrid};
use ofrenda::AppEvent;
use url::Url;

const COLUMNS: usize = 4;
const FRAME_SIZE: Vec2 = Vec2::new(120.0, 150.0);
const MARIGOLD: Color32 = Color32::from_rgb(245, 158, 11);
const EMPTY_TINT: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 90);

/// Render the grid; returns the event of the clicked slot, if any
pub fn show(ui: &mut egui::Ui, grid: &SlotGrid, base: &Url, locked: bool) -> Option<AppEvent> {
    let mut clicked = None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("altar_grid")
            .spacing([16.0, 16.0])
            .show(ui, |ui| {
                for slot in grid.slots() {
                    if frame(ui, slot, base).clicked() && !locked {
                        clicked = Some(slot.click_event());
                    }
                    if (slot.index() + 1) % COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });

        if grid.hidden_count() > 0 {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("{} more not shown", grid.hidden_count()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    });

    clicked
}

fn frame(ui: &mut egui::Ui, slot: &Slot, base: &Url) -> egui::Response {
    let stroke_color = if slot.is_filled() {
        MARIGOLD
    } else {
        Color32::DARK_GRAY
    };

    let response = egui::Frame::none()
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .rounding(6.0)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                let mut image = egui::Image::new(images::resolve(base, slot.image()))
                    .fit_to_exact_size(FRAME_SIZE)
                    .maintain_aspect_ratio(true);
                if !slot.is_filled() {
                    image = image.tint(EMPTY_TINT);
                }
                ui.add(image);

                let caption = RichText::new(slot.alt()).size(11.0);
                ui.label(if slot.is_filled() {
                    caption.color(Color32::WHITE)
                } else {
                    caption.color(Color32::GRAY).italics()
                });
            });
        })
        .response
        .interact(Sense::click());

    match slot {
        Slot::Filled(filled) => match &filled.hover {
            Some(hover) => response.on_hover_text(hover),
            None => response,
        },
        Slot::Empty { .. } => response.on_hover_text("Add someone to the ofrenda"),
    }
}
