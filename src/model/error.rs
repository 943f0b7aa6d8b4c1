use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("API key not configured. Please add your Gemini API key in Settings.")]
    MissingCredential,

    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The model answered, but not with the declared reply shape.
    #[error("invalid model output: {0}")]
    Parse(String),
}

pub type GameResult<T> = Result<T, GameError>;
