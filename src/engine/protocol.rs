use crate::engine::controller::GameView;

pub enum EngineCommand {
    BeginGame,
    SubmitTurn(String),
    RequestHint,
    SaveCredential(String),
    ClearCredential,
    SettingsClosed,
}

pub enum EngineResponse {
    View(GameView),

    /// Answer to `SaveCredential`; `false` when the key was blank.
    CredentialSaved(bool),
}
