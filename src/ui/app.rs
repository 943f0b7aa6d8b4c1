use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;

use crate::engine::controller::GameView;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::ui::center_panel::{draw_center_panel, draw_footer, draw_top_bar, FooterAction};
use crate::ui::settings::SettingsWindow;

pub struct TwentyQuestionsApp {
    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,

    view: Option<GameView>,
    input_text: String,
    /// A command was sent and its view has not come back yet.
    waiting: bool,
    settings: SettingsWindow,
}

impl TwentyQuestionsApp {
    pub fn new(
        cmd_tx: mpsc::Sender<EngineCommand>,
        resp_rx: mpsc::Receiver<EngineResponse>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            resp_rx,
            view: None,
            input_text: String::new(),
            waiting: false,
            settings: SettingsWindow::default(),
        };
        app.send_command(EngineCommand::BeginGame);
        app
    }

    fn send_command(&mut self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            log::error!("engine thread is gone, command dropped");
            return;
        }
        self.waiting = true;
    }

    fn drain_responses(&mut self, ctx: &egui::Context) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::View(view) => {
                    self.view = Some(view);
                    self.waiting = false;
                }
                EngineResponse::CredentialSaved(true) => {
                    self.settings.mark_saved(ctx.input(|i| i.time));
                }
                EngineResponse::CredentialSaved(false) => {}
            }
        }
    }
}

impl eframe::App for TwentyQuestionsApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.drain_responses(ctx);

        let Some(view) = self.view.clone() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Spinner::new().size(32.0));
                });
            });
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        };

        if draw_top_bar(ctx, &view) {
            self.settings.open_with(&view.stored_credential);
        }

        match draw_footer(ctx, &view, &mut self.input_text, self.waiting) {
            Some(FooterAction::Command(cmd)) => self.send_command(cmd),
            Some(FooterAction::OpenSettings) => self.settings.open_with(&view.stored_credential),
            None => {}
        }

        draw_center_panel(ctx, &view);

        for cmd in self.settings.show(ctx) {
            self.send_command(cmd);
        }

        if self.waiting || view.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
