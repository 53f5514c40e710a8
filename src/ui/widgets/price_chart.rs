use crate::types::{ScanResult, Signal};
use chrono::DateTime;
use egui::{Color32, Id, Stroke, Vec2b};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, Corner, HLine, Legend, Line, LineStyle, MarkerShape, Plot,
    PlotPoints, Points, Polygon,
};

const INCREASING: Color32 = Color32::from_rgb(0x3D, 0x99, 0x70);
const DECREASING: Color32 = Color32::from_rgb(0xFF, 0x41, 0x36);
const BUY_COLOR: Color32 = Color32::from_rgb(0x00, 0xFF, 0xA3);
const SELL_COLOR: Color32 = Color32::from_rgb(0xFF, 0x4B, 0x4B);
const BAND_COLOR: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);
const BAND_FILL: Color32 = Color32::from_rgba_premultiplied(13, 13, 13, 25);
const MIDDLE_COLOR: Color32 = Color32::from_rgb(0xFF, 0xA5, 0x00);
const RSI_COLOR: Color32 = Color32::from_rgb(0x9C, 0x6A, 0xDE);

const PRICE_HEIGHT: f32 = 420.0;
const RSI_HEIGHT: f32 = 160.0;

pub struct PriceChart;

impl PriceChart {
    pub fn show(ui: &mut egui::Ui, result: &ScanResult) {
        ui.heading(chart_title(result));

        let link_group = Id::new("scan_time_axis");
        let candle_width = candle_width(result);

        let candles: Vec<BoxElem> = result
            .bars
            .iter()
            .map(|bar| {
                let color = if bar.close >= bar.open { INCREASING } else { DECREASING };
                let (body_low, body_high) = (bar.open.min(bar.close), bar.open.max(bar.close));
                BoxElem::new(
                    x_of(bar.timestamp),
                    BoxSpread::new(bar.low, body_low, bar.close, body_high, bar.high),
                )
                .box_width(candle_width)
                .whisker_width(0.0)
                .fill(color)
                .stroke(Stroke::new(1.0, color))
            })
            .collect();

        let (upper, middle, lower) = band_lines(result);
        let quads = band_quads(result);
        let (buys, sells) = signal_markers(result);

        Plot::new("price_chart")
            .height(PRICE_HEIGHT)
            .legend(Legend::default().position(Corner::LeftTop))
            .link_axis(link_group, Vec2b::new(true, false))
            .link_cursor(link_group, Vec2b::new(true, false))
            .x_axis_formatter(|mark, _range| format_time(mark.value))
            .label_formatter(|name, point| {
                format!("{}\n{}\n{:.2}", name, format_time(point.x), point.y)
            })
            .show(ui, |plot_ui| {
                for quad in quads {
                    plot_ui.polygon(
                        Polygon::new("Band", PlotPoints::from(quad.to_vec()))
                            .fill_color(BAND_FILL)
                            .stroke(Stroke::NONE),
                    );
                }
                plot_ui.box_plot(BoxPlot::new("Price", candles));
                plot_ui.line(Line::new("Upper Band", upper).color(BAND_COLOR).width(1.0));
                plot_ui.line(Line::new("Lower Band", lower).color(BAND_COLOR).width(1.0));
                plot_ui.line(
                    Line::new("Middle Band", middle)
                        .color(MIDDLE_COLOR)
                        .width(1.0)
                        .style(LineStyle::dashed_loose()),
                );
                if !buys.is_empty() {
                    plot_ui.points(
                        Points::new("BUY Signal", buys)
                            .shape(MarkerShape::Up)
                            .radius(7.0)
                            .filled(true)
                            .color(BUY_COLOR),
                    );
                }
                if !sells.is_empty() {
                    plot_ui.points(
                        Points::new("SELL Signal", sells)
                            .shape(MarkerShape::Down)
                            .radius(7.0)
                            .filled(true)
                            .color(SELL_COLOR),
                    );
                }
            });

        Self::show_rsi(ui, result, link_group);
    }

    fn show_rsi(ui: &mut egui::Ui, result: &ScanResult, link_group: Id) {
        let thresholds = result.request.thresholds;
        let rsi: Vec<[f64; 2]> = result
            .bars
            .iter()
            .zip(result.indicators.iter())
            .filter_map(|(bar, point)| point.rsi.map(|v| [x_of(bar.timestamp), v]))
            .collect();

        Plot::new("rsi_chart")
            .height(RSI_HEIGHT)
            .include_y(0.0)
            .include_y(100.0)
            .legend(Legend::default().position(Corner::LeftTop))
            .link_axis(link_group, Vec2b::new(true, false))
            .link_cursor(link_group, Vec2b::new(true, false))
            .x_axis_formatter(|mark, _range| format_time(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.hline(
                    HLine::new("Overbought", thresholds.upper)
                        .color(SELL_COLOR)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.hline(
                    HLine::new("Oversold", thresholds.lower)
                        .color(BUY_COLOR)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.line(Line::new("RSI", rsi).color(RSI_COLOR).width(1.5));
            });
    }
}

pub fn chart_title(result: &ScanResult) -> String {
    format!(
        "{} Scalping Chart ({})",
        result.request.symbol, result.request.interval
    )
}

fn x_of(timestamp: DateTime<chrono::Utc>) -> f64 {
    timestamp.timestamp() as f64
}

fn format_time(x: f64) -> String {
    DateTime::from_timestamp(x as i64, 0)
        .map(|dt| dt.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// 70% of the smallest gap between bars, in seconds
fn candle_width(result: &ScanResult) -> f64 {
    result
        .bars
        .windows(2)
        .map(|w| (w[1].timestamp - w[0].timestamp).num_seconds() as f64)
        .filter(|gap| *gap > 0.0)
        .fold(None, |acc: Option<f64>, gap| Some(acc.map_or(gap, |a| a.min(gap))))
        .unwrap_or(60.0)
        * 0.7
}

/// Upper, middle and lower band polylines over the bars where they are defined
fn band_lines(result: &ScanResult) -> (Vec<[f64; 2]>, Vec<[f64; 2]>, Vec<[f64; 2]>) {
    let mut upper = Vec::new();
    let mut middle = Vec::new();
    let mut lower = Vec::new();

    for (bar, point) in result.bars.iter().zip(result.indicators.iter()) {
        let x = x_of(bar.timestamp);
        if let Some(v) = point.bb_upper {
            upper.push([x, v]);
        }
        if let Some(v) = point.bb_middle {
            middle.push([x, v]);
        }
        if let Some(v) = point.bb_lower {
            lower.push([x, v]);
        }
    }

    (upper, middle, lower)
}

/// Fill between the bands as one quad per pair of consecutive defined bars.
/// A single polygon would be concave and egui only fills convex shapes.
fn band_quads(result: &ScanResult) -> Vec<[[f64; 2]; 4]> {
    let defined: Vec<(f64, f64, f64)> = result
        .bars
        .iter()
        .zip(result.indicators.iter())
        .filter_map(|(bar, point)| Some((x_of(bar.timestamp), point.bb_upper?, point.bb_lower?)))
        .collect();

    defined
        .windows(2)
        .map(|w| {
            let (x0, up0, lo0) = w[0];
            let (x1, up1, lo1) = w[1];
            [[x0, up0], [x1, up1], [x1, lo1], [x0, lo0]]
        })
        .collect()
}

/// Buy and sell markers at the triggering bar's time and close
fn signal_markers(result: &ScanResult) -> (Vec<[f64; 2]>, Vec<[f64; 2]>) {
    let mut buys = Vec::new();
    let mut sells = Vec::new();

    for (bar, signal) in result.bars.iter().zip(result.signals.iter()) {
        match signal {
            Signal::Buy { price } => buys.push([x_of(bar.timestamp), *price]),
            Signal::Sell { price } => sells.push([x_of(bar.timestamp), *price]),
            Signal::None => {}
        }
    }

    (buys, sells)
}
