use client_core::{reference::insert_hint, AnalysisLine, AnalysisView, Transcription};
use eframe::egui;
use shared::protocol::{ReferenceSign, WorkedExample};

use crate::ui::theme;

pub fn results_panel(ui: &mut egui::Ui, results: &Transcription) -> egui::Response {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Results");
            ui.add_space(4.0);
            ui.strong("Transliteration");
            ui.label(egui::RichText::new(results.transliteration.as_str()).size(18.0));
            ui.add_space(4.0);
            ui.strong("Phonetic");
            ui.label(egui::RichText::new(results.phonetic.as_str()).size(18.0).italics());
        })
        .response
}

pub fn analysis_panel(ui: &mut egui::Ui, view: &AnalysisView) {
    if !view.is_visible() {
        return;
    }
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading("Word Analysis");
        ui.add_space(4.0);
        for line in view.lines() {
            analysis_line(ui, line);
        }
    });
}

fn analysis_line(ui: &mut egui::Ui, line: &AnalysisLine) {
    match line.value() {
        Some(value) => {
            ui.horizontal_wrapped(|ui| {
                ui.strong(format!("{}:", line.label()));
                ui.label(value);
            });
        }
        None => {
            ui.strong(format!("{}:", line.label()));
            ui.indent(line.label(), |ui| {
                for item in line.items() {
                    ui.label(format!("• {item}"));
                }
            });
        }
    }
}

pub fn example_card(ui: &mut egui::Ui, example: &WorkedExample) -> egui::Response {
    egui::Frame::group(ui.style())
        .fill(theme::CARD_FILL)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(example.name.as_str()).strong().color(theme::ACCENT));
            ui.label(egui::RichText::new(example.linear_b.as_str()).size(theme::GLYPH_SIZE));
            ui.label(egui::RichText::new(example.description.as_str()).weak());
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

pub fn sign_card(ui: &mut egui::Ui, sign: &ReferenceSign, highlighted: bool) -> egui::Response {
    let fill = if highlighted {
        theme::CARD_HIGHLIGHT_FILL
    } else {
        theme::CARD_FILL
    };
    egui::Frame::group(ui.style())
        .fill(fill)
        .show(ui, |ui| {
            ui.set_min_width(48.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(sign.sign.as_str()).size(theme::GLYPH_SIZE));
                ui.small(sign.transliteration.as_str());
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .on_hover_text(insert_hint(sign))
}
