use crate::engine::protocol::EngineCommand;

const SAVED_BANNER_SECS: f64 = 1.5;
const API_KEY_URL: &str = "https://aistudio.google.com/app/apikey";

#[derive(Default)]
pub struct SettingsWindow {
    pub open: bool,
    api_key: String,
    show_key: bool,
    saved_at: Option<f64>,
}

impl SettingsWindow {
    pub fn open_with(&mut self, stored_key: &str) {
        self.open = true;
        self.api_key = stored_key.to_string();
        self.show_key = false;
        self.saved_at = None;
    }

    /// The engine confirmed the key was written.
    pub fn mark_saved(&mut self, now: f64) {
        self.saved_at = Some(now);
    }

    /// Draws the window; returns the commands it produced this frame.
    pub fn show(&mut self, ctx: &egui::Context) -> Vec<EngineCommand> {
        let mut commands = Vec::new();
        if !self.open {
            return commands;
        }

        let now = ctx.input(|i| i.time);
        if let Some(saved_at) = self.saved_at {
            if now - saved_at >= SAVED_BANNER_SECS {
                self.close(&mut commands);
                return commands;
            }
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        let mut open = true;
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Gemini API Key");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.api_key)
                            .password(!self.show_key)
                            .hint_text("Enter your Gemini API key")
                            .desired_width(280.0),
                    );
                    let toggle = if self.show_key { "Hide" } else { "Show" };
                    if ui.small_button(toggle).clicked() {
                        self.show_key = !self.show_key;
                    }
                });

                ui.horizontal(|ui| {
                    ui.small("Get your free API key from");
                    ui.hyperlink_to("Google AI Studio", API_KEY_URL);
                });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let label = if self.saved_at.is_some() { "✓ Saved!" } else { "Save" };
                    let can_save = !self.api_key.trim().is_empty() && self.saved_at.is_none();
                    if ui.add_enabled(can_save, egui::Button::new(label)).clicked() {
                        commands.push(EngineCommand::SaveCredential(self.api_key.clone()));
                    }

                    if ui.button("Clear").clicked() {
                        self.api_key.clear();
                        commands.push(EngineCommand::ClearCredential);
                    }
                });
            });

        if !open {
            self.close(&mut commands);
        }

        commands
    }

    fn close(&mut self, commands: &mut Vec<EngineCommand>) {
        self.open = false;
        self.saved_at = None;
        self.api_key.clear();
        commands.push(EngineCommand::SettingsClosed);
    }
}
