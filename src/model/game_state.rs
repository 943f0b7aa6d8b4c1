/// Questions the player may ask before the game is lost.
pub const MAX_TURNS: u32 = 20;

/// Turns played before a hint can be requested.
pub const HINT_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Starting,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}
