use crate::ui::services::ConfigBridge;
use crate::ui::state::AppState;
use crate::ui::widgets::DataSelector;

/// What the user asked for this frame; app.rs carries it out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    Scan,
    SaveSettings,
}

pub struct LeftPanel;

impl LeftPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) -> PanelAction {
        ui.heading("Strategy Parameters");
        ui.separator();

        // 1. Data Source Section
        egui::CollapsingHeader::new("Market Data")
            .default_open(true)
            .show(ui, |ui| {
                DataSelector::show(ui, state);
            });

        ui.separator();

        // 2. Signal Sensitivity Section
        egui::CollapsingHeader::new("Signal Sensitivity")
            .default_open(true)
            .show(ui, |ui| {
                Self::show_sensitivity(ui, state);
            });

        ui.separator();

        // 3. Control Buttons
        Self::show_control_buttons(ui, state)
    }

    fn show_sensitivity(ui: &mut egui::Ui, state: &mut AppState) {
        let (upper_lo, upper_hi) = state.rsi_upper_range;
        let (lower_lo, lower_hi) = state.rsi_lower_range;

        ui.label("Overbought Threshold (RSI):");
        ui.add(egui::Slider::new(&mut state.rsi_upper, upper_lo..=upper_hi));

        ui.label("Oversold Threshold (RSI):");
        ui.add(egui::Slider::new(&mut state.rsi_lower, lower_lo..=lower_hi));
    }

    fn show_control_buttons(ui: &mut egui::Ui, state: &AppState) -> PanelAction {
        let mut action = PanelAction::None;

        ui.vertical_centered(|ui| {
            // Validate before allowing run
            let validation = ConfigBridge::validate(state);
            let can_run = validation.is_ok() && !state.is_running;

            let scan_button = ui.add_enabled(can_run, egui::Button::new("🔍 Scan Market"));
            if scan_button.clicked() {
                action = PanelAction::Scan;
            }

            if let Err(error) = validation {
                ui.colored_label(egui::Color32::RED, error);
            }

            let save_button = ui.add_enabled(!state.is_running, egui::Button::new("💾 Save Settings"));
            if save_button.clicked() {
                action = PanelAction::SaveSettings;
            }
        });

        action
    }
}
