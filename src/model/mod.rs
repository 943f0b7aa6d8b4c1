pub mod catalog;
pub mod error;
pub mod game_state;
pub mod llm_decode;
pub mod reply;
pub mod storage;
