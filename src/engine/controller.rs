use chrono::NaiveDate;

use crate::engine::llm_client::Classifier;
use crate::engine::service::GameService;
use crate::model::catalog::iso_date;
use crate::model::error::GameResult;
use crate::model::game_state::{GameState, HINT_THRESHOLD, MAX_TURNS};
use crate::model::reply::ClassifiedReply;
use crate::model::storage::{KeyValueStore, CREDENTIAL_KEY, LAST_PLAYED_KEY};

pub const INTRO_HEADLINE: &str = "I'm thinking of something...";
pub const INTRO_DETAIL: &str = "Ask me up to 20 yes/no questions to guess what it is!";
pub const WELCOME_MESSAGE: &str =
    "Welcome to 20 Questions!\nPlease configure your API key to start playing.";
pub const LOCKOUT_MESSAGE: &str = "You've already played today.\nCome back tomorrow for a new word!";
pub const WIN_HEADLINE: &str = "Yes! You got it!";
pub const TURN_FAILED_MESSAGE: &str =
    "I'm having a bit of trouble responding. Please try asking again.";
pub const HINT_FAILED_MESSAGE: &str = "Sorry, couldn't fetch a hint right now.";

/// Work the engine must do for a submitted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub secret_item: String,
    pub utterance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRequest {
    pub secret_item: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintButton {
    Hidden,
    Ready,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer {
    ConfigureCredential,
    GameOver,
    Input,
}

/// Everything the window needs to draw one frame. Never carries the
/// secret word except inside an end-of-game message.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub state: GameState,
    pub message_lines: Vec<String>,
    pub is_intro: bool,
    pub turn_count: u32,
    pub show_turn_counter: bool,
    pub hint: Option<String>,
    pub hint_button: HintButton,
    pub footer: Footer,
    pub input_enabled: bool,
    pub loading: bool,
    pub stored_credential: String,
}

pub struct GameController<S> {
    storage: S,
    fallback_credential: Option<String>,
    credential_known: bool,

    state: GameState,
    secret_item: String,
    message: String,
    locked_out: bool,

    turn_count: u32,
    turn_pending: bool,

    hint: String,
    hint_pending: bool,
    hint_revealed: bool,
}

impl<S: KeyValueStore> GameController<S> {
    pub fn new(storage: S, fallback_credential: Option<String>) -> Self {
        Self {
            storage,
            fallback_credential,
            credential_known: false,
            state: GameState::Starting,
            secret_item: String::new(),
            message: String::new(),
            locked_out: false,
            turn_count: 0,
            turn_pending: false,
            hint: String::new(),
            hint_pending: false,
            hint_revealed: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /* ---------- credential ---------- */

    pub fn credential(&self) -> Option<String> {
        self.storage
            .get(CREDENTIAL_KEY)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.fallback_credential.clone())
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Stores a trimmed key. Blank input is rejected.
    pub fn save_credential(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.storage.set(CREDENTIAL_KEY, key);
        true
    }

    pub fn clear_credential(&mut self) {
        self.storage.remove(CREDENTIAL_KEY);
    }

    /// A key added while the settings window was open starts the game.
    pub fn settings_closed<C: Classifier>(&mut self, service: &GameService<C>, today: NaiveDate) {
        let had_credential = self.credential_known;
        self.credential_known = self.has_credential();

        if !had_credential && self.credential_known {
            self.begin_game(service, today);
        }
    }

    /* ---------- lifecycle ---------- */

    pub fn begin_game<C: Classifier>(&mut self, service: &GameService<C>, today: NaiveDate) {
        self.credential_known = self.has_credential();
        if !self.credential_known {
            self.message = WELCOME_MESSAGE.to_string();
            return;
        }

        if self.storage.get(LAST_PLAYED_KEY).as_deref() == Some(iso_date(today).as_str()) {
            log::info!("already played on {today}, locking out");
            self.locked_out = true;
            self.message = LOCKOUT_MESSAGE.to_string();
            self.state = GameState::Lost;
            return;
        }

        self.locked_out = false;
        self.state = GameState::Starting;
        self.turn_count = 0;
        self.turn_pending = false;
        self.message = format!("{INTRO_HEADLINE}\n{INTRO_DETAIL}");
        self.hint.clear();
        self.hint_revealed = false;
        self.hint_pending = false;

        self.secret_item = service.start_new_game(today);
        log::info!("new game started for {today}");
        log::debug!("secret item: {}", self.secret_item);
        self.state = GameState::Playing;
    }

    /// Starts a turn. Returns `None` when the input is ignored.
    pub fn submit_turn(&mut self, utterance: &str) -> Option<TurnRequest> {
        let utterance = utterance.trim();
        if utterance.is_empty() || self.turn_pending || self.state != GameState::Playing {
            return None;
        }

        self.turn_pending = true;
        self.turn_count += 1;
        self.message.clear();

        Some(TurnRequest {
            secret_item: self.secret_item.clone(),
            utterance: utterance.to_string(),
        })
    }

    pub fn complete_turn(&mut self, result: GameResult<ClassifiedReply>, today: NaiveDate) {
        if !self.turn_pending {
            log::warn!("turn result arrived with no turn pending, dropping it");
            return;
        }
        self.turn_pending = false;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("turn {} failed: {e}", self.turn_count);
                self.turn_count -= 1;
                self.message = TURN_FAILED_MESSAGE.to_string();
                return;
            }
        };

        match reply {
            ClassifiedReply::GuessCorrect { .. } => {
                self.message = format!(
                    "{WIN_HEADLINE}\nThe secret word was \"{}\".",
                    self.secret_item
                );
                self.finish(GameState::Won, today);
            }
            ClassifiedReply::GuessIncorrect { .. } | ClassifiedReply::QuestionAnswer { .. }
                if self.turn_count >= MAX_TURNS =>
            {
                self.message = format!(
                    "You've run out of questions!\nThe answer was: {}",
                    self.secret_item
                );
                self.finish(GameState::Lost, today);
            }
            ClassifiedReply::GuessIncorrect { response }
            | ClassifiedReply::QuestionAnswer { response } => {
                self.message = response;
            }
        }
    }

    /// Submit, classify and complete in one call. Returns whether the
    /// utterance was accepted as a turn.
    pub fn play_turn<C: Classifier>(
        &mut self,
        utterance: &str,
        service: &GameService<C>,
        today: NaiveDate,
    ) -> bool {
        let Some(request) = self.submit_turn(utterance) else {
            return false;
        };
        let result = service.classify_input(&request.secret_item, &request.utterance);
        self.complete_turn(result, today);
        true
    }

    fn finish(&mut self, state: GameState, today: NaiveDate) {
        log::info!("game over after {} turns: {state:?}", self.turn_count);
        self.state = state;
        self.storage.set(LAST_PLAYED_KEY, &iso_date(today));
    }

    /* ---------- hints ---------- */

    fn hint_available(&self) -> bool {
        self.turn_count >= HINT_THRESHOLD
            && !self.hint_revealed
            && self.state == GameState::Playing
    }

    pub fn request_hint(&mut self) -> Option<HintRequest> {
        if !self.hint_available() || self.hint_pending {
            return None;
        }
        self.hint_pending = true;

        Some(HintRequest {
            secret_item: self.secret_item.clone(),
        })
    }

    pub fn complete_hint(&mut self, result: GameResult<String>) {
        if !self.hint_pending {
            return;
        }
        self.hint_pending = false;

        self.hint = match result {
            Ok(hint) => format!("Hint: {hint}"),
            Err(e) => {
                log::warn!("hint fetch failed: {e}");
                HINT_FAILED_MESSAGE.to_string()
            }
        };
        self.hint_revealed = true;
    }

    /* ---------- view ---------- */

    pub fn view(&self) -> GameView {
        let has_credential = self.has_credential();

        let hint_button = if self.hint_pending {
            HintButton::Loading
        } else if self.hint_available() && !self.turn_pending {
            HintButton::Ready
        } else {
            HintButton::Hidden
        };

        let footer = if !has_credential {
            Footer::ConfigureCredential
        } else if self.state.is_terminal() {
            Footer::GameOver
        } else {
            Footer::Input
        };

        GameView {
            state: self.state,
            message_lines: self.message.lines().map(str::to_string).collect(),
            is_intro: self.message.starts_with(INTRO_HEADLINE),
            turn_count: self.turn_count,
            show_turn_counter: has_credential
                && !self.locked_out
                && !(self.turn_pending && self.message.is_empty()),
            hint: (self.hint_revealed && self.state == GameState::Playing)
                .then(|| self.hint.clone()),
            hint_button,
            footer,
            input_enabled: !self.turn_pending && self.state == GameState::Playing,
            loading: self.turn_pending,
            stored_credential: self.storage.get(CREDENTIAL_KEY).unwrap_or_default(),
        }
    }
}
