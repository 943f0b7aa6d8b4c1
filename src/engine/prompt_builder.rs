use serde_json::{json, Value};

/// Builds the classification prompt sent to the model.
/// Only formats text: no parsing, no networking.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(secret_item: &str, player_input: &str) -> String {
        let mut prompt = String::new();

        push_role(&mut prompt);
        push_game_facts(&mut prompt, secret_item, player_input);
        push_instructions(&mut prompt, secret_item);
        push_output_reminder(&mut prompt);

        prompt
    }

    /// Declared output shape: `type` enum plus free-text `response`, both required.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "type": {
                    "type": "STRING",
                    "enum": ["guess_correct", "guess_incorrect", "question_answer"],
                },
                "response": {
                    "type": "STRING",
                },
            },
            "required": ["type", "response"],
        })
    }
}

fn push_role(prompt: &mut String) {
    prompt.push_str("You are the AI for a 20 Questions game.\n");
}

fn push_game_facts(prompt: &mut String, secret_item: &str, player_input: &str) {
    prompt.push_str(&format!(
        "The secret word you are thinking of is: \"{secret_item}\".\n"
    ));
    prompt.push_str(&format!("The player's input is: \"{player_input}\".\n\n"));
}

fn push_instructions(prompt: &mut String, secret_item: &str) {
    prompt.push_str("Analyze the player's input.\n");
    prompt.push_str(
        "1. Determine if it is a direct guess of the secret word or if it is a question about the secret word's properties.\n",
    );
    prompt.push_str("2. If it is a guess:\n");
    prompt.push_str(
        "    - If the guess is correct, respond with type \"guess_correct\" and a celebratory message like \"Yes! You got it!\". The response should NOT include the secret word itself.\n",
    );
    prompt.push_str(
        "    - If the guess is incorrect, respond with type \"guess_incorrect\" and a \"No, that's not it\" type of message. Do NOT reveal the secret word.\n",
    );
    prompt.push_str("3. If it is a question:\n");
    prompt.push_str(&format!(
        "    - Answer the question about \"{secret_item}\" with only \"Yes\", \"No\", or \"Maybe\".\n"
    ));
    prompt.push_str(
        "    - Respond with type \"question_answer\" and your \"Yes/No/Maybe\" answer.\n\n",
    );
}

fn push_output_reminder(prompt: &mut String) {
    prompt.push_str(
        "Provide your response as a single, valid JSON object matching the required schema and nothing else.\n",
    );
}
