use std::time::{Duration, Instant};

use client_core::Settings;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorCategory, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{DecoderController, ScrollTarget, SyllabaryPanel};
use crate::ui::{panels, theme};

const IDLE_REPAINT: Duration = Duration::from_millis(100);

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Input",
        UiErrorCategory::Service => "Decoder",
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Unknown => "Error",
    }
}

/// Composition root: binds user actions to controller handlers and queues
/// whatever backend work they produce.
pub struct DecoderGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: DecoderController,
}

impl DecoderGuiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: DecoderController::new(settings.highlight_duration()),
        };
        for cmd in app.controller.startup_commands() {
            app.dispatch(cmd);
        }
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, self.controller.status_mut());
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply(event);
        }
    }

    fn on_submit(&mut self) {
        if let Some(cmd) = self.controller.submit() {
            self.dispatch(cmd);
        }
    }

    fn show_syllabary(&mut self, ctx: &egui::Context, now: Instant) {
        let mut clicked = None;
        egui::SidePanel::right("syllabary")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Syllabary");
                ui.separator();
                match self.controller.syllabary() {
                    SyllabaryPanel::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading...");
                        });
                    }
                    SyllabaryPanel::Failed(message) => {
                        ui.add_space(12.0);
                        ui.colored_label(theme::ERROR_TEXT, message.as_str());
                    }
                    SyllabaryPanel::Loaded(signs) => {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                for (index, sign) in signs.iter().enumerate() {
                                    let highlighted = self.controller.is_highlighted(index, now);
                                    if panels::sign_card(ui, sign, highlighted).clicked() {
                                        clicked = Some(index);
                                    }
                                }
                            });
                        });
                    }
                }
            });
        if let Some(index) = clicked {
            self.controller.select_sign(index, now);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.small(self.controller.status());
        });
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        let scroll = self.controller.take_scroll_target();
        let focus = self.controller.take_focus_request();

        let mut submit = false;
        let mut clear = false;
        let mut insert_space = false;
        let mut clicked_example = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let title = ui.heading("Linear B Decoder");
                if scroll == Some(ScrollTarget::Top) {
                    title.scroll_to_me(Some(egui::Align::TOP));
                }
                ui.label("Enter Linear B text, or pick signs and examples from the lists.");
                ui.add_space(8.0);

                let input = ui.add(
                    egui::TextEdit::singleline(self.controller.input_mut().raw_mut())
                        .font(egui::FontId::proportional(theme::GLYPH_SIZE))
                        .hint_text("𐀷𐀙𐀏")
                        .desired_width(f32::INFINITY),
                );
                if focus {
                    input.request_focus();
                }
                let confirm_key = ui.input(|i| {
                    i.key_pressed(egui::Key::Enter) && (i.modifiers.ctrl || i.modifiers.mac_cmd)
                });
                if confirm_key && (input.has_focus() || input.lost_focus()) {
                    submit = true;
                }

                ui.horizontal(|ui| {
                    if ui.button("Transcribe").clicked() {
                        submit = true;
                    }
                    if ui.button("Add Space").clicked() {
                        insert_space = true;
                    }
                    if ui.button("Clear").clicked() {
                        clear = true;
                    }
                    ui.weak("Ctrl+Enter to transcribe");
                });
                ui.add_space(12.0);

                if let Some(results) = self.controller.results() {
                    let response = panels::results_panel(ui, results);
                    if scroll == Some(ScrollTarget::Results) {
                        response.scroll_to_me(Some(egui::Align::Center));
                    }
                    ui.add_space(8.0);
                }
                panels::analysis_panel(ui, self.controller.analysis());

                let examples = self.controller.examples();
                if !examples.is_empty() {
                    ui.add_space(12.0);
                    ui.heading("Examples");
                    for (index, example) in examples.iter().enumerate() {
                        if panels::example_card(ui, example).clicked() {
                            clicked_example = Some(index);
                        }
                    }
                }
            });
        });

        if insert_space {
            self.controller.insert_space();
        }
        if clear {
            self.controller.clear();
        }
        if let Some(index) = clicked_example {
            self.controller.select_example(index);
        }
        if submit {
            self.on_submit();
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.controller.alert().cloned() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(err_label(alert.category()))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert.message());
                ui.add_space(8.0);
                if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    dismissed = true;
                }
            });
        if dismissed {
            self.controller.dismiss_alert();
        }
    }
}

impl eframe::App for DecoderGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let now = Instant::now();
        self.show_status_bar(ctx);
        self.show_syllabary(ctx, now);
        self.show_workspace(ctx);
        self.show_alert(ctx);

        let repaint_after = self
            .controller
            .highlight_remaining(Instant::now())
            .map_or(IDLE_REPAINT, |remaining| remaining.min(IDLE_REPAINT));
        ctx.request_repaint_after(repaint_after);
    }
}
