use crate::data::CsvConnector;
use crate::types::{Interval, LookbackPeriod};
use crate::ui::state::{AppState, SourceKind, StatusLevel};

pub struct DataSelector;

impl DataSelector {
    pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            ui.radio_value(&mut state.source_kind, SourceKind::Yahoo, SourceKind::Yahoo.label());
            ui.radio_value(&mut state.source_kind, SourceKind::CsvFile, SourceKind::CsvFile.label());
        });

        ui.horizontal(|ui| {
            ui.label("Asset Ticker:");
            ui.text_edit_singleline(&mut state.symbol);
        });

        egui::ComboBox::from_label("Time Interval")
            .selected_text(state.interval.as_str())
            .show_ui(ui, |ui| {
                for interval in Interval::all() {
                    ui.selectable_value(&mut state.interval, interval, interval.as_str());
                }
            });

        egui::ComboBox::from_label("Lookback Period")
            .selected_text(state.period.as_str())
            .show_ui(ui, |ui| {
                for period in LookbackPeriod::all() {
                    ui.selectable_value(&mut state.period, period, period.as_str());
                }
            });

        if state.source_kind == SourceKind::CsvFile {
            ui.separator();
            Self::show_csv_picker(ui, state);
        }
    }

    fn show_csv_picker(ui: &mut egui::Ui, state: &mut AppState) {
        if ui.button("Select CSV File...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
            {
                match CsvConnector::load_bars(&path) {
                    Ok((_, preview)) => {
                        state.set_status(
                            StatusLevel::Info,
                            format!("Loaded {} rows from {}", preview.num_rows, preview.file_name),
                        );
                        state.csv_path = Some(path);
                        state.csv_preview = Some(preview);
                    }
                    Err(e) => {
                        state.set_status(StatusLevel::Error, format!("Error loading data: {}", e));
                    }
                }
            }
        }

        // Display current file info
        match &state.csv_preview {
            Some(preview) => {
                ui.label(format!("File: {}", preview.file_name));
                ui.label(format!("Rows: {}", preview.num_rows));
                if let Some((first, last)) = preview.date_range {
                    ui.label(format!(
                        "From {} to {}",
                        first.format("%Y-%m-%d %H:%M"),
                        last.format("%Y-%m-%d %H:%M")
                    ));
                }
                if let Some((low, high)) = preview.price_range {
                    ui.label(format!("Price range: {:.2} - {:.2}", low, high));
                }
                ui.collapsing("Columns", |ui| {
                    for column in &preview.columns {
                        ui.label(column);
                    }
                });
            }
            None => {
                ui.label("No file loaded");
            }
        }
    }
}
