use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use chrono::NaiveDate;

use twenty_questions::engine::controller::GameController;
use twenty_questions::engine::llm_client::Classifier;
use twenty_questions::engine::service::GameService;
use twenty_questions::model::catalog::ItemCatalog;
use twenty_questions::model::error::{GameError, GameResult};
use twenty_questions::model::reply::ClassifiedReply;
use twenty_questions::model::storage::{MemoryStore, CREDENTIAL_KEY};

/// Plays back queued replies and counts how often it was asked.
#[derive(Default)]
pub struct ScriptedClassifier {
    replies: RefCell<VecDeque<GameResult<ClassifiedReply>>>,
    calls: Cell<usize>,
}

impl ScriptedClassifier {
    pub fn push(&self, reply: GameResult<ClassifiedReply>) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, _: &str, _: &str) -> GameResult<ClassifiedReply> {
        self.calls.set(self.calls.get() + 1);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(no()))
    }
}

pub fn yes() -> ClassifiedReply {
    ClassifiedReply::QuestionAnswer {
        response: "Yes".into(),
    }
}

pub fn no() -> ClassifiedReply {
    ClassifiedReply::QuestionAnswer {
        response: "No".into(),
    }
}

pub fn correct() -> ClassifiedReply {
    ClassifiedReply::GuessCorrect {
        response: "Yes! You got it!".into(),
    }
}

/// A correct guess whose text repeats the secret word.
pub fn chatty_correct() -> ClassifiedReply {
    ClassifiedReply::GuessCorrect {
        response: "Banana it is!".into(),
    }
}

pub fn unavailable() -> GameResult<ClassifiedReply> {
    Err(GameError::Api {
        status: 503,
        body: "model overloaded".into(),
    })
}

pub fn malformed() -> GameResult<ClassifiedReply> {
    Err(GameError::Parse("expected a JSON object".into()))
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

pub fn tomorrow() -> NaiveDate {
    today().succ_opt().unwrap()
}

pub fn banana_service() -> GameService<ScriptedClassifier> {
    let catalog = ItemCatalog::from_json(
        r#"{
            "default_item": "Lighthouse",
            "daily": { "2026-10-14": "Banana" },
            "items": { "Banana": { "hints": ["It is yellow.", "Monkeys like it."] } }
        }"#,
    )
    .unwrap();
    GameService::new(catalog, ScriptedClassifier::default())
}

pub fn keyed_store() -> MemoryStore {
    MemoryStore::new().with_entry(CREDENTIAL_KEY, "test-key")
}

pub fn started(service: &GameService<ScriptedClassifier>) -> GameController<MemoryStore> {
    let mut controller = GameController::new(keyed_store(), None);
    controller.begin_game(service, today());
    controller
}
