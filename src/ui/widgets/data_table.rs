use crate::types::ScanResult;
use crate::ui::widgets::metric_cards::format_optional;

/// Rows shown in the "underlying data" expander
pub const TABLE_ROWS: usize = 10;

pub struct DataTable;

impl DataTable {
    pub fn show(ui: &mut egui::Ui, result: &ScanResult) {
        let start = result.bars.len().saturating_sub(TABLE_ROWS);

        egui::ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("scan_data_table")
                .striped(true)
                .num_columns(10)
                .show(ui, |ui| {
                    for header in [
                        "Time", "Open", "High", "Low", "Close", "Volume", "RSI", "BB Lower", "BB Upper",
                        "Signal",
                    ] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for i in start..result.bars.len() {
                        let bar = &result.bars[i];
                        let point = result.indicators.get(i).copied().unwrap_or_default();
                        let signal = result.signals.get(i).copied().unwrap_or_default();

                        ui.label(bar.timestamp.format("%Y-%m-%d %H:%M").to_string());
                        ui.label(format!("{:.2}", bar.open));
                        ui.label(format!("{:.2}", bar.high));
                        ui.label(format!("{:.2}", bar.low));
                        ui.label(format!("{:.2}", bar.close));
                        ui.label(format!("{:.0}", bar.volume));
                        ui.label(format_optional(point.rsi, 2));
                        ui.label(format_optional(point.bb_lower, 2));
                        ui.label(format_optional(point.bb_upper, 2));
                        ui.label(signal.label());
                        ui.end_row();
                    }
                });
        });
    }
}
