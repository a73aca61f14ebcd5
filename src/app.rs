use eframe::egui::{self, ScrollArea, Ui};

use house_explorer::config::ExplorerConfig;
use house_explorer::data::CategoricalField;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HouseExplorerApp {
    pub state: AppState,
}

impl HouseExplorerApp {
    /// Build the app and read the configured dataset.
    pub fn new(config: ExplorerConfig) -> Self {
        let mut state = AppState::new(config);
        state.load();
        Self { state }
    }
}

impl eframe::App for HouseExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("House Data Explorer");

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a housing file to explore  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Showing {} houses:", state.filtered.len()));
            if state.show_raw {
                table::raw_data(ui, state);
            }
            ui.separator();

            plot::price_distribution(ui, state);
            ui.separator();

            plot::area_vs_price(ui, state);
            ui.separator();

            ui.heading("Feature Counts");
            let current = state.feature;
            egui::ComboBox::from_id_salt("feature_select")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for field in CategoricalField::ALL {
                        if ui.selectable_label(current == field, field.label()).clicked() {
                            state.set_feature(field);
                        }
                    }
                });
            plot::feature_counts(ui, state);
        });
}
