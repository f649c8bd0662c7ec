use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Raw data table (bottom of the central panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;
const MISSING_CELL: &str = "(unmapped)";

/// Virtualised table of the filtered rows, same columns as the CSV export.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };

    ui.add_space(4.0);
    ui.strong("Raw Data");
    ui.add_space(4.0);

    let header = export::export_header();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), header.len())
        .max_scroll_height(420.0)
        .header(20.0, |mut row| {
            for title in header {
                row.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = &ds.records[state.visible_indices[row.index()]];
                let cells = [
                    rec.work_year.to_string(),
                    label_or_missing(rec.experience_level.map(|v| v.label())),
                    label_or_missing(rec.employment_type.map(|v| v.label())),
                    rec.job_title.clone(),
                    rec.salary.to_string(),
                    rec.salary_currency.clone(),
                    rec.salary_in_usd.to_string(),
                    rec.employee_residence.clone(),
                    rec.remote_ratio.to_string(),
                    rec.company_location.clone(),
                    label_or_missing(rec.company_size.map(|v| v.label())),
                    label_or_missing(rec.remote_work_type.map(|v| v.label())),
                    rec.region.label().to_string(),
                    rec.job_category.label().to_string(),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn label_or_missing(label: Option<&'static str>) -> String {
    label.unwrap_or(MISSING_CELL).to_string()
}
