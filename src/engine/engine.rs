use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{NaiveDate, Utc};

use crate::engine::controller::GameController;
use crate::engine::llm_client::Classifier;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::service::GameService;
use crate::model::storage::KeyValueStore;

/// Wakes the UI after a response is queued.
pub type Notify = Box<dyn Fn() + Send>;

/// Owns the game and performs the blocking model calls off the UI thread.
pub struct Engine<S, C> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    notify: Notify,
    today: fn() -> NaiveDate,
    controller: GameController<S>,
    service: GameService<C>,
}

/// Dates follow UTC so a day's word is the same everywhere.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

impl<S, C> Engine<S, C>
where
    S: KeyValueStore + Send + 'static,
    C: Classifier + Send + 'static,
{
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        controller: GameController<S>,
        service: GameService<C>,
    ) -> Self {
        Self {
            rx,
            tx,
            notify: Box::new(|| {}),
            today: today_utc,
            controller,
            service,
        }
    }

    pub fn with_notify(mut self, notify: Notify) -> Self {
        self.notify = notify;
        self
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Runs the engine on its own thread and hands back both channel ends.
    pub fn spawn(
        controller: GameController<S>,
        service: GameService<C>,
        notify: Notify,
    ) -> (Sender<EngineCommand>, Receiver<EngineResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::spawn(move || {
            Engine::new(cmd_rx, resp_tx, controller, service)
                .with_notify(notify)
                .run();
        });

        (cmd_tx, resp_rx)
    }

    pub fn run(&mut self) {
        let credential = self.controller.credential();
        self.service.classifier_mut().set_api_key(credential);

        while let Ok(cmd) = self.rx.recv() {
            self.handle(cmd);
            self.send_view();
        }
        log::debug!("command channel closed, engine stopping");
    }

    fn handle(&mut self, cmd: EngineCommand) {
        let today = (self.today)();

        match cmd {
            EngineCommand::BeginGame => {
                self.controller.begin_game(&self.service, today);
            }

            EngineCommand::SubmitTurn(text) => {
                let Some(request) = self.controller.submit_turn(&text) else {
                    return;
                };
                // Let the window show the typing indicator during the call.
                self.send_view();

                let result = self
                    .service
                    .classify_input(&request.secret_item, &request.utterance);
                self.controller.complete_turn(result, today);
            }

            EngineCommand::RequestHint => {
                let Some(request) = self.controller.request_hint() else {
                    return;
                };
                let hint = self.service.get_hint(&request.secret_item);
                self.controller.complete_hint(Ok(hint));
            }

            EngineCommand::SaveCredential(key) => {
                let saved = self.controller.save_credential(&key);
                if saved {
                    self.sync_credential();
                }
                self.send(EngineResponse::CredentialSaved(saved));
            }

            EngineCommand::ClearCredential => {
                self.controller.clear_credential();
                self.sync_credential();
            }

            EngineCommand::SettingsClosed => {
                self.controller.settings_closed(&self.service, today);
            }
        }
    }

    fn sync_credential(&mut self) {
        let credential = self.controller.credential();
        self.service.classifier_mut().set_api_key(credential);
    }

    fn send_view(&self) {
        self.send(EngineResponse::View(self.controller.view()));
    }

    fn send(&self, response: EngineResponse) {
        if self.tx.send(response).is_ok() {
            (self.notify)();
        }
    }
}
