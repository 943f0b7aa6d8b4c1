use anyhow::Context;

use twenty_questions::config::AppConfig;
use twenty_questions::engine::controller::GameController;
use twenty_questions::engine::engine::Engine;
use twenty_questions::engine::llm_client::GeminiClassifier;
use twenty_questions::engine::service::GameService;
use twenty_questions::model::catalog::ItemCatalog;
use twenty_questions::ui::app::TwentyQuestionsApp;
use twenty_questions::ui::settings_io::FileStore;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!("using model {} at {}", config.model, config.api_base);

    let storage = FileStore::open(&config.data_dir)?;
    log::info!("local storage at {}", storage.path().display());

    let controller = GameController::new(storage, config.fallback_api_key.clone());
    let service = GameService::new(ItemCatalog::embedded().clone(), GeminiClassifier::new(&config));

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "20 Questions",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let (cmd_tx, resp_rx) =
                Engine::spawn(controller, service, Box::new(move || ctx.request_repaint()));
            Ok(Box::new(TwentyQuestionsApp::new(cmd_tx, resp_rx)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the game window")
}
