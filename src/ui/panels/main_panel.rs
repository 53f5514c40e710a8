use crate::types::{ScanResult, Signal};
use crate::ui::state::{AppState, StatusLevel};
use crate::ui::widgets::{DataTable, MetricCards, PriceChart};

pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState, rsi_period: usize) {
        // Spinner (shown when running)
        if state.is_running {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(&state.status_message);
            });
            return;
        }

        if !state.status_message.is_empty() {
            Self::show_status(ui, state);
            ui.separator();
        }

        match &state.last_result {
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Select parameters and click 'Scan Market' to start.");
                });
            }
            Some(result) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    MetricCards::show(ui, &result.summary, rsi_period);
                    ui.separator();
                    PriceChart::show(ui, result);
                    ui.separator();
                    egui::CollapsingHeader::new("See Underlying Data & Logic").show(ui, |ui| {
                        DataTable::show(ui, result);
                        ui.add_space(8.0);
                        ui.label(logic_text(result));
                    });
                });
            }
        }
    }

    fn show_status(ui: &mut egui::Ui, state: &AppState) {
        let color = match state.status_level {
            StatusLevel::Info => ui.visuals().text_color(),
            StatusLevel::Warning => egui::Color32::YELLOW,
            StatusLevel::Error => egui::Color32::RED,
        };
        ui.colored_label(color, &state.status_message);
    }
}

/// Plain-language description of the rules behind the markers
pub fn logic_text(result: &ScanResult) -> String {
    let t = result.request.thresholds;
    let mut text = format!(
        "Algorithm Logic:\n\
         BUY when price closes below the Lower Bollinger Band AND RSI < {}.\n\
         SELL when price closes above the Upper Bollinger Band AND RSI > {}.",
        t.lower, t.upper
    );

    if let Some((idx, signal)) = result.stats.last_signal {
        if let (Some(bar), Some(price)) = (result.bars.get(idx), signal.price()) {
            let kind = match signal {
                Signal::Buy { .. } => "BUY",
                _ => "SELL",
            };
            text.push_str(&format!(
                "\n\nLast signal: {} at {:.2} on {}.",
                kind,
                price,
                bar.timestamp.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    text
}
