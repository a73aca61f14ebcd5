use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use house_explorer::data::aggregate::area_price_points;

use crate::state::AppState;

const PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Price distribution
// ---------------------------------------------------------------------------

/// Histogram of prices in the filtered rows.
pub fn price_distribution(ui: &mut Ui, state: &AppState) {
    ui.heading("Price Distribution");

    let bars: Vec<Bar> = state
        .histogram
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width().max(1.0))
                .name(format!("{:.0} – {:.0}", bin.start, bin.end))
        })
        .collect();

    Plot::new("price_distribution")
        .height(PLOT_HEIGHT)
        .x_axis_label("Price")
        .y_axis_label("Houses")
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Area vs price
// ---------------------------------------------------------------------------

/// Scatter of area against price, one series per value of the selected feature.
pub fn area_vs_price(ui: &mut Ui, state: &AppState) {
    ui.heading("Area vs Price");

    let filtered = &state.filtered;
    let points = area_price_points(filtered);

    Plot::new("area_vs_price")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Area")
        .y_axis_label("Price")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let Some(cm) = &state.color_map else {
                plot_ui.points(Points::new(PlotPoints::from(points)).radius(2.5));
                return;
            };

            for (value, color) in cm.legend_entries() {
                let series: Vec<[f64; 2]> = filtered
                    .records()
                    .iter()
                    .zip(&points)
                    .filter(|(rec, _)| rec.category(cm.field) == value)
                    .map(|(_, p)| *p)
                    .collect();
                if series.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(series))
                        .radius(2.5)
                        .color(color)
                        .name(value),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Feature counts
// ---------------------------------------------------------------------------

/// Bar chart of value counts for the selected feature, largest first.
pub fn feature_counts(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .feature_counts
        .iter()
        .enumerate()
        .map(|(i, vc)| {
            let color = state
                .color_map
                .as_ref()
                .map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(&vc.value));
            Bar::new(i as f64, vc.count as f64)
                .width(0.7)
                .name(&vc.value)
                .fill(color)
        })
        .collect();

    let labels: Vec<String> = state
        .feature_counts
        .iter()
        .map(|vc| vc.value.clone())
        .collect();

    Plot::new("feature_counts")
        .height(PLOT_HEIGHT)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_label("Houses")
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
