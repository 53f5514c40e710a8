use cryptoscalp::config::{ConfigManager, ENV_PREFIX};
use cryptoscalp::ui::CryptoScalpApp;
use eframe::NativeOptions;

const CONFIG_PATH_VAR: &str = "CRYPTOSCALP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "cryptoscalp.toml";

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config_path =
        std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match ConfigManager::load(Some(&config_path), ENV_PREFIX) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring configuration from {}: {}", config_path, e);
            ConfigManager::with_path(&config_path)
        }
    };

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("CryptoScalp: Momentum Scanner"),
        ..Default::default()
    };

    eframe::run_native(
        "CryptoScalp",
        native_options,
        Box::new(|cc| Ok(Box::new(CryptoScalpApp::new(cc, config)))),
    )
}
