use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use house_explorer::data::{CategoricalField, NumericField};
use house_explorer::data::model::STORIES_COLUMN;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 240.0;

/// Filtered rows as a scrollable table.
pub fn raw_data(ui: &mut Ui, state: &AppState) {
    let rows = state.filtered.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .columns(Column::auto().at_least(80.0), 6)
        .header(ROW_HEIGHT + 2.0, |mut header| {
            let names = [
                NumericField::Price.column(),
                NumericField::Area.column(),
                STORIES_COLUMN,
            ]
            .into_iter()
            .chain(CategoricalField::ALL.map(CategoricalField::column));
            for name in names {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec = &rows[row.index()];
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.price));
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.area));
                });
                row.col(|ui| {
                    ui.label(rec.stories.to_string());
                });
                for field in CategoricalField::ALL {
                    row.col(|ui| {
                        ui.label(rec.category(field));
                    });
                }
            });
        });
}
