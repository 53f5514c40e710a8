use crate::types::{MarketCondition, MarketSummary};
use egui::{Color32, RichText};

pub const NOT_AVAILABLE: &str = "N/A";

pub struct MetricCards;

impl MetricCards {
    pub fn show(ui: &mut egui::Ui, summary: &MarketSummary, rsi_period: usize) {
        ui.columns(4, |cols| {
            Self::card(
                &mut cols[0],
                "Current Price",
                summary.current_close.map(format_price).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                None,
            );
            Self::card(
                &mut cols[1],
                &format!("RSI ({})", rsi_period),
                format_optional(summary.current_rsi, 2),
                None,
            );
            Self::card(
                &mut cols[2],
                "Market Condition",
                condition_label(summary.condition).to_string(),
                summary.condition.map(condition_color),
            );
            Self::card(
                &mut cols[3],
                "Volatility (BB Width)",
                format_optional(summary.band_width, 2),
                None,
            );
        });
    }

    fn card(ui: &mut egui::Ui, title: &str, value: String, color: Option<Color32>) {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).small().weak());
            let mut text = RichText::new(value).size(22.0).strong();
            if let Some(color) = color {
                text = text.color(color);
            }
            ui.label(text);
        });
    }
}

/// `$67,432.10`
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn condition_label(condition: Option<MarketCondition>) -> &'static str {
    condition.map(|c| c.label()).unwrap_or(NOT_AVAILABLE)
}

fn condition_color(condition: MarketCondition) -> Color32 {
    match condition {
        MarketCondition::Overbought => Color32::from_rgb(0xFF, 0x4B, 0x4B),
        MarketCondition::Oversold => Color32::from_rgb(0x00, 0xFF, 0xA3),
        MarketCondition::Neutral => Color32::GRAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(67432.1), "$67,432.10");
        assert_eq!(format_price(1234567.891), "$1,234,567.89");
        assert_eq!(format_price(999.999), "$1,000.00");
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_price(-1500.0), "-$1,500.00");
    }

    #[test]
    fn test_undefined_values_render_na() {
        assert_eq!(format_optional(None, 2), "N/A");
        assert_eq!(format_optional(Some(42.123), 2), "42.12");
        assert_eq!(condition_label(None), "N/A");
        assert_eq!(condition_label(Some(MarketCondition::Oversold)), "OVERSOLD (Buy Zone)");
    }
}
