use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub api_base: String,
    /// Used when no key has been saved in Settings.
    pub fallback_api_key: Option<String>,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            api_base: env_or("GEMINI_API_BASE", DEFAULT_API_BASE),
            fallback_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            data_dir: env::var_os("TWENTY_QUESTIONS_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            fallback_api_key: None,
            data_dir: default_data_dir(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("twenty_questions");
    path
}
