use serde::{Deserialize, Serialize};

/// What the model decided the player's input was, plus its answer.
///
/// Wire form is `{"type": "guess_correct", "response": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedReply {
    GuessCorrect { response: String },
    GuessIncorrect { response: String },
    QuestionAnswer { response: String },
}

impl ClassifiedReply {
    pub fn response(&self) -> &str {
        match self {
            ClassifiedReply::GuessCorrect { response }
            | ClassifiedReply::GuessIncorrect { response }
            | ClassifiedReply::QuestionAnswer { response } => response,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ClassifiedReply::GuessCorrect { .. } => "guess_correct",
            ClassifiedReply::GuessIncorrect { .. } => "guess_incorrect",
            ClassifiedReply::QuestionAnswer { .. } => "question_answer",
        }
    }

    pub fn is_correct_guess(&self) -> bool {
        matches!(self, ClassifiedReply::GuessCorrect { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_matches_wire_name() {
        let reply = ClassifiedReply::QuestionAnswer {
            response: "Maybe".into(),
        };
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["type"], reply.tag());
        assert_eq!(json["response"], "Maybe");
    }
}
