use eframe::egui;

use crate::engine::controller::{Footer, GameView, HintButton};
use crate::engine::protocol::EngineCommand;
use crate::model::game_state::MAX_TURNS;

const HEADLINE_SIZE: f32 = 34.0;
const DETAIL_SIZE: f32 = 24.0;
const HINT_SIZE: f32 = 18.0;

/// What the player did in the bottom bar this frame.
pub enum FooterAction {
    Command(EngineCommand),
    OpenSettings,
}

pub fn draw_top_bar(ctx: &egui::Context, view: &GameView) -> bool {
    let mut open_settings = false;

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("⚙ Settings").clicked() {
                open_settings = true;
            }

            if view.show_turn_counter {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Guesses: {} / {MAX_TURNS}", view.turn_count));
                });
            }
        });
    });

    open_settings
}

pub fn draw_footer(
    ctx: &egui::Context,
    view: &GameView,
    input_text: &mut String,
    waiting: bool,
) -> Option<FooterAction> {
    let input_id = egui::Id::new("question_input");
    let mut action = None;

    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| match view.footer {
            Footer::ConfigureCredential => {
                if ui.button("Configure API Key").clicked() {
                    action = Some(FooterAction::OpenSettings);
                }
            }

            Footer::GameOver => {
                ui.label("Thanks for playing! A new word arrives tomorrow.");
            }

            Footer::Input => {
                match view.hint_button {
                    HintButton::Ready => {
                        if ui.add_enabled(!waiting, egui::Button::new("Get a Hint")).clicked() {
                            action = Some(FooterAction::Command(EngineCommand::RequestHint));
                        }
                    }
                    HintButton::Loading => {
                        ui.add_enabled(false, egui::Button::new("Getting Hint..."));
                    }
                    HintButton::Hidden => {}
                }

                let enabled = view.input_enabled && !waiting;
                let mut send_now = false;

                ui.horizontal(|ui| {
                    let width = ui.available_width() - 60.0;
                    let response = ui.add_enabled(
                        enabled,
                        egui::TextEdit::singleline(input_text)
                            .id(input_id)
                            .hint_text("Type your question or guess...")
                            .desired_width(width),
                    );

                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }

                    let can_send = enabled && !input_text.trim().is_empty();
                    if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                        send_now = true;
                    }
                });

                if send_now && enabled && !input_text.trim().is_empty() {
                    let text = std::mem::take(input_text);
                    action = Some(FooterAction::Command(EngineCommand::SubmitTurn(text)));
                    ui.memory_mut(|m| m.request_focus(input_id));
                }
            }
        });
        ui.add_space(8.0);
    });

    action
}

pub fn draw_center_panel(ctx: &egui::Context, view: &GameView) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);

            if view.loading && view.message_lines.is_empty() {
                ui.add(egui::Spinner::new().size(32.0));
            } else {
                for (i, line) in view.message_lines.iter().enumerate() {
                    let size = if view.is_intro && i > 0 {
                        DETAIL_SIZE
                    } else {
                        HEADLINE_SIZE
                    };
                    ui.label(egui::RichText::new(line).size(size).strong());
                }
            }

            if let Some(hint) = &view.hint {
                ui.add_space(16.0);
                ui.label(egui::RichText::new(hint).size(HINT_SIZE).weak());
            }
        });
    });
}
