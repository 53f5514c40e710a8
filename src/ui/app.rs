use super::panels::{LeftPanel, MainPanel, PanelAction};
use super::services::{ConfigBridge, ScanRunner};
use super::state::{AppState, StatusLevel};
use crate::config::ConfigManager;
use crate::engines::{IndicatorEngine, Scanner};
use crate::types::ScanResult;
use egui::{Color32, RichText};
use std::time::Duration;

const BACKGROUND: Color32 = Color32::from_rgb(0x0E, 0x11, 0x17);
const ACCENT: Color32 = Color32::from_rgb(0x00, 0xFF, 0xA3);

pub struct CryptoScalpApp {
    config: ConfigManager,
    state: AppState,
    left_panel: LeftPanel,
    main_panel: MainPanel,
    runner: Option<ScanRunner>,
}

impl CryptoScalpApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ConfigManager) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = BACKGROUND;
        visuals.window_fill = BACKGROUND;
        cc.egui_ctx.set_visuals(visuals);

        let state = AppState::from_config(&config.get());

        Self {
            config,
            state,
            left_panel: LeftPanel::new(),
            main_panel: MainPanel::new(),
            runner: None,
        }
    }

    fn start_scan(&mut self) {
        if self.runner.is_some() {
            return;
        }

        let app_config = self.config.get();

        let request = match ConfigBridge::to_scan_request(&self.state) {
            Ok(request) => request,
            Err(e) => {
                self.state.set_status(StatusLevel::Error, e);
                return;
            }
        };
        let source = match ConfigBridge::to_data_source(&self.state, &app_config.data_source) {
            Ok(source) => source,
            Err(e) => {
                self.state.set_status(StatusLevel::Error, e);
                return;
            }
        };

        let scanner = Scanner::new(source, IndicatorEngine::from_config(&app_config.strategy));
        let symbol = request.symbol.clone();

        // Each scan starts from a clean slate
        self.state.last_result = None;

        match ScanRunner::start(scanner, request) {
            Ok(runner) => {
                self.runner = Some(runner);
                self.state.is_running = true;
                self.state
                    .set_status(StatusLevel::Info, format!("Analyzing {} market data...", symbol));
            }
            Err(e) => {
                self.state
                    .set_status(StatusLevel::Error, format!("Could not start scan: {}", e));
            }
        }
    }

    fn poll_scan(&mut self) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };
        let Some(outcome) = runner.try_get_result() else {
            return;
        };

        self.runner = None;
        self.state.is_running = false;

        match outcome {
            Ok(result) => {
                let (level, message) = Self::completion_status(&result);
                self.state.set_status(level, message);
                self.state.last_result = Some(result);
            }
            Err(e) if e.is_empty_data() => {
                self.state
                    .set_status(StatusLevel::Warning, "Data not found. Please verify the ticker symbol.");
            }
            Err(e) => {
                self.state.set_status(StatusLevel::Error, e.to_string());
            }
        }
    }

    fn completion_status(result: &ScanResult) -> (StatusLevel, String) {
        if result.insufficient_history() {
            return (
                StatusLevel::Warning,
                format!(
                    "Only {} bars for {}; at least {} are needed for RSI and Bollinger Bands.",
                    result.bars.len(),
                    result.request.symbol,
                    result.min_history
                ),
            );
        }

        (
            StatusLevel::Info,
            format!(
                "Scan complete: {} bars, {} buy / {} sell signals",
                result.bars.len(),
                result.stats.buy_count,
                result.stats.sell_count
            ),
        )
    }

    fn save_settings(&mut self) {
        let state = &self.state;
        let saved = self
            .config
            .update(|config| {
                config.strategy = ConfigBridge::to_strategy_config(state, &config.strategy);
                config.data_source = ConfigBridge::to_data_source_config(state, &config.data_source);
            })
            .and_then(|_| self.config.save());

        match saved {
            Ok(path) => {
                log::info!("Settings saved to {}", path.display());
                self.state
                    .set_status(StatusLevel::Info, format!("Settings saved to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to save settings: {}", e);
                self.state
                    .set_status(StatusLevel::Error, format!("Failed to save settings: {}", e));
            }
        }
    }
}

impl eframe::App for CryptoScalpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_scan();
        if self.state.is_running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(RichText::new("⚡ CryptoScalp: Algorithmic Scalping Tool").color(ACCENT));
            ui.label(
                "Real-time momentum scanner using RSI and Bollinger Bands \
                 to spot short-term overbought and oversold conditions.",
            );
            ui.add_space(4.0);
        });

        // Left Panel - Strategy Parameters
        let mut action = PanelAction::None;
        egui::SidePanel::left("left_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.left_panel.show(ui, &mut self.state);
                });
            });

        match action {
            PanelAction::Scan => self.start_scan(),
            PanelAction::SaveSettings => self.save_settings(),
            PanelAction::None => {}
        }

        // Central Panel - Dashboard
        let rsi_period = self.config.get().strategy.rsi_period;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.main_panel.show(ui, &self.state, rsi_period);
        });
    }
}
