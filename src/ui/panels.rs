use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use house_explorer::data::{CategoricalField, NumericField};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Numeric ranges ----
            for field in NumericField::ALL {
                let Some((min, max)) = dataset.display_bounds(field) else {
                    continue;
                };
                ui.strong(match field {
                    NumericField::Price => "Price Range (in million)".to_string(),
                    NumericField::Area => format!("Area Range ({})", field.display_unit()),
                });
                changed |= range_sliders(ui, state.controls.range_mut(field), min, max);
                ui.separator();
            }

            // ---- Stories ----
            let n_total = dataset.distinct_stories().len();
            let n_selected = state.controls.stories.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Number of Stories  ({n_selected}/{n_total})")).strong(),
            )
            .id_salt("stories")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                for &stories in dataset.distinct_stories() {
                    let mut checked = state.controls.stories.contains(&stories);
                    if ui.checkbox(&mut checked, stories.to_string()).changed() {
                        state.toggle_story(stories);
                    }
                }
            });
            ui.separator();

            // ---- Per-feature filter widgets (collapsible) ----
            for field in CategoricalField::ALL {
                let all_values = dataset.distinct_values(field);
                let n_selected = state
                    .controls
                    .categories
                    .get(&field)
                    .map_or(0, |s| s.len());
                let header_text = format!("{}  ({n_selected}/{})", field.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.column())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(field);
                            }
                        });

                        for value in all_values {
                            let mut checked = state
                                .controls
                                .categories
                                .get(&field)
                                .is_some_and(|s| s.contains(value));

                            // Show colour swatch if this is the colour field
                            let mut text = RichText::new(value);
                            if let Some(cm) = state.color_map.as_ref().filter(|cm| cm.field == field) {
                                text = text.color(cm.color_for(value));
                            }

                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_category(field, value);
                            }
                        }
                    });
            }
        });

    // Slider edits only touch the controls; checkboxes refilter themselves.
    if changed {
        state.refilter();
    }
}

/// Low / high sliders that never let the bounds cross.
fn range_sliders(ui: &mut Ui, range: &mut (f64, f64), min: f64, max: f64) -> bool {
    let (low, high) = range;
    let low_changed = ui
        .add(egui::Slider::new(low, min..=max).step_by(1.0).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(high, min..=max).step_by(1.0).text("max"))
        .changed();

    if *low > *high {
        if low_changed {
            *high = *low;
        } else {
            *low = *high;
        }
    }
    low_changed || high_changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} houses loaded, {} visible",
                ds.len(),
                state.filtered.len()
            ));
        }

        ui.separator();

        ui.checkbox(&mut state.show_raw, "Show raw data");

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_path(path);
    }
}
