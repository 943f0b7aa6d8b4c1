use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::llm_client::Classifier;
use crate::model::catalog::ItemCatalog;
use crate::model::error::{GameError, GameResult};
use crate::model::reply::ClassifiedReply;

pub const CLARIFICATION_MESSAGE: &str =
    "I'm sorry, I'm having a little trouble thinking. Could you ask that differently?";
pub const NO_HINT_MESSAGE: &str = "Sorry, I can't think of a hint for this one.";

pub struct GameService<C> {
    catalog: ItemCatalog,
    classifier: C,
}

impl<C: Classifier> GameService<C> {
    pub fn new(catalog: ItemCatalog, classifier: C) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    pub fn start_new_game(&self, today: NaiveDate) -> String {
        self.catalog.secret_for(today).to_string()
    }

    /// Malformed model output turns into a clarification answer; every other
    /// failure is returned to the caller.
    pub fn classify_input(&self, secret_item: &str, utterance: &str) -> GameResult<ClassifiedReply> {
        match self.classifier.classify(secret_item, utterance) {
            Err(GameError::Parse(reason)) => {
                log::warn!("failed to parse model reply: {reason}");
                Ok(ClassifiedReply::QuestionAnswer {
                    response: CLARIFICATION_MESSAGE.to_string(),
                })
            }
            other => other,
        }
    }

    pub fn get_hint(&self, secret_item: &str) -> String {
        self.get_hint_with(secret_item, &mut rand::thread_rng())
    }

    pub fn get_hint_with<R: Rng + ?Sized>(&self, secret_item: &str, rng: &mut R) -> String {
        self.catalog
            .resolve_hints(secret_item)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| NO_HINT_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixed(fn() -> GameResult<ClassifiedReply>);

    impl Classifier for Fixed {
        fn classify(&self, _: &str, _: &str) -> GameResult<ClassifiedReply> {
            (self.0)()
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_json(
            r#"{
                "default_item": "Banana",
                "daily": { "2026-10-14": "Lighthouse" },
                "items": { "Lighthouse": { "hints": ["Near the sea.", "Shines at night."] } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn start_uses_todays_entry_or_default() {
        let service = GameService::new(catalog(), Fixed(|| Err(GameError::MissingCredential)));

        let listed = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let unlisted = NaiveDate::from_ymd_opt(2031, 1, 1).unwrap();
        assert_eq!(service.start_new_game(listed), "Lighthouse");
        assert_eq!(service.start_new_game(unlisted), "Banana");
    }

    #[test]
    fn parse_failure_becomes_clarification() {
        let service = GameService::new(catalog(), Fixed(|| Err(GameError::Parse("junk".into()))));

        let reply = service.classify_input("Banana", "Is it red?").unwrap();
        assert_eq!(
            reply,
            ClassifiedReply::QuestionAnswer {
                response: CLARIFICATION_MESSAGE.into()
            }
        );
    }

    #[test]
    fn other_failures_propagate() {
        let service = GameService::new(
            catalog(),
            Fixed(|| {
                Err(GameError::Api {
                    status: 503,
                    body: "overloaded".into(),
                })
            }),
        );

        let result = service.classify_input("Banana", "Is it red?");
        assert!(matches!(result, Err(GameError::Api { status: 503, .. })));
    }

    #[test]
    fn hint_comes_from_catalog() {
        let service = GameService::new(catalog(), Fixed(|| Err(GameError::MissingCredential)));
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let hint = service.get_hint_with("Lighthouse", &mut rng);
            assert!(service.catalog().resolve_hints("Lighthouse").contains(&hint));
        }
    }

    #[test]
    fn unknown_item_has_no_hint() {
        let service = GameService::new(catalog(), Fixed(|| Err(GameError::MissingCredential)));
        assert_eq!(service.get_hint("Banana"), NO_HINT_MESSAGE);
    }
}
