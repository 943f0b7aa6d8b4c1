use serde_json::Value;

use crate::model::error::GameError;
use crate::model::reply::ClassifiedReply;

/// Decode raw model JSON into a typed reply.
///
/// Models sometimes wrap JSON in a markdown fence even when asked for
/// `application/json`; the fence is stripped before parsing.
pub fn decode_reply(raw: &str) -> Result<ClassifiedReply, GameError> {
    let text = strip_code_fence(raw.trim());

    let value: Value = serde_json::from_str(text)
        .map_err(|e| GameError::Parse(format!("not JSON ({e}): {raw}")))?;

    let Value::Object(_) = value else {
        return Err(GameError::Parse(format!("reply must be a JSON object: {raw}")));
    };

    serde_json::from_value::<ClassifiedReply>(value).map_err(|e| {
        GameError::Parse(format!("reply does not match schema ({e}): {raw}"))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_question_answer() {
        let reply = decode_reply(r#"{"type":"question_answer","response":"Yes"}"#).unwrap();
        assert_eq!(
            reply,
            ClassifiedReply::QuestionAnswer {
                response: "Yes".into()
            }
        );
    }

    #[test]
    fn decodes_fenced_json() {
        let raw = "```json\n{\"type\":\"guess_incorrect\",\"response\":\"No, that's not it.\"}\n```";
        let reply = decode_reply(raw).unwrap();
        assert_eq!(reply.tag(), "guess_incorrect");
    }

    #[test]
    fn rejects_plain_text() {
        assert!(matches!(decode_reply("Yes"), Err(GameError::Parse(_))));
    }

    #[test]
    fn rejects_unknown_tag() {
        let raw = r#"{"type":"riddle","response":"Hmm"}"#;
        assert!(matches!(decode_reply(raw), Err(GameError::Parse(_))));
    }

    #[test]
    fn rejects_missing_response() {
        let raw = r#"{"type":"guess_correct"}"#;
        assert!(matches!(decode_reply(raw), Err(GameError::Parse(_))));
    }

    #[test]
    fn rejects_arrays() {
        let raw = r#"[{"type":"guess_correct","response":"Yes!"}]"#;
        assert!(matches!(decode_reply(raw), Err(GameError::Parse(_))));
    }
}
