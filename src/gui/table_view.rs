//! Fines Table Widget
//! Sortable table of the current view. Only visible rows are laid out.

use crate::data::{FineRecord, MoneyFormat, SortColumn, ViewState};
use egui::{RichText, ScrollArea};

const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 420.0;

fn column_width(column: SortColumn) -> f32 {
    match column {
        SortColumn::Id => 60.0,
        SortColumn::Facility => 220.0,
        SortColumn::Company => 220.0,
        SortColumn::Category => 140.0,
        SortColumn::Region => 200.0,
        SortColumn::Fine => 130.0,
        SortColumn::FineAlt => 90.0,
        SortColumn::Date => 90.0,
    }
}

/// Columns shown for `view`; the UTA column only when the source carries it.
pub fn visible_columns(view: &ViewState) -> Vec<SortColumn> {
    let has_alt = view.records().iter().any(|r| r.fine_alt.is_some());
    SortColumn::ALL
        .into_iter()
        .filter(|c| has_alt || *c != SortColumn::FineAlt)
        .collect()
}

/// Text drawn in `column` for `record`.
pub fn cell_text(record: &FineRecord, column: SortColumn, money: &MoneyFormat) -> String {
    match column {
        SortColumn::Id => record.id.clone(),
        SortColumn::Facility => record.facility.clone(),
        SortColumn::Company => record.company.clone(),
        SortColumn::Category => record.category.clone(),
        SortColumn::Region => record.region.clone(),
        SortColumn::Fine => money.format(record.fine),
        SortColumn::FineAlt => record
            .fine_alt
            .map(|v| money.format_units(v))
            .unwrap_or_else(|| "-".to_string()),
        SortColumn::Date => record.date.clone(),
    }
}

/// Table of fines with clickable headers.
pub struct FinesTable;

impl FinesTable {
    /// Draw the table. Returns the column whose header was clicked.
    pub fn show(ui: &mut egui::Ui, view: &ViewState, money: &MoneyFormat) -> Option<SortColumn> {
        let columns = visible_columns(view);
        let sort = view.sort();
        let mut clicked = None;

        ui.label(
            RichText::new(format!(
                "Showing {} of {} fines",
                view.visible_len(),
                view.records().len()
            ))
            .size(12.0),
        );
        ui.add_space(4.0);

        ScrollArea::horizontal().id_salt("fines_table_h").show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    for &column in &columns {
                        let arrow = match sort.column {
                            Some(c) if c == column && sort.ascending => " ▲",
                            Some(c) if c == column => " ▼",
                            _ => "",
                        };
                        let text = RichText::new(format!("{}{}", column.label(), arrow)).strong();
                        let button = egui::Button::new(text).frame(false);
                        if ui
                            .add_sized([column_width(column), ROW_HEIGHT], button)
                            .clicked()
                        {
                            clicked = Some(column);
                        }
                    }
                });
                ui.separator();

                if view.visible_len() == 0 {
                    ui.label(RichText::new("No fines match the current filters").italics());
                    return;
                }

                ScrollArea::vertical()
                    .id_salt("fines_table_v")
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show_rows(ui, ROW_HEIGHT, view.visible_len(), |ui, row_range| {
                        for row in row_range {
                            let Some(record) = view.row(row) else {
                                continue;
                            };
                            ui.horizontal(|ui| {
                                for &column in &columns {
                                    let mut text = RichText::new(cell_text(record, column, money));
                                    if column.is_numeric() {
                                        text = text.monospace();
                                    }
                                    ui.add_sized(
                                        [column_width(column), ROW_HEIGHT],
                                        egui::Label::new(text).truncate(),
                                    );
                                }
                            });
                        }
                    });
            });
        });

        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::sample;

    #[test]
    fn test_alt_column_only_with_alt_amounts() {
        let plain = ViewState::new(vec![sample("1", "A", "Co1", "M", "N", 10, "2020-01-01")]);
        assert!(!visible_columns(&plain).contains(&SortColumn::FineAlt));
        assert_eq!(visible_columns(&plain).len(), SortColumn::ALL.len() - 1);

        let mut record = sample("1", "A", "Co1", "M", "N", 10, "2020-01-01");
        record.fine_alt = Some(0.5);
        let with_alt = ViewState::new(vec![record]);
        assert!(visible_columns(&with_alt).contains(&SortColumn::FineAlt));
    }

    #[test]
    fn test_cell_text_formats_amounts() {
        let money = MoneyFormat::default();
        let mut record = sample("7", "A", "Co1", "M", "N", 1_234_567, "2020-01-01");
        assert_eq!(cell_text(&record, SortColumn::Fine, &money), "$1.234.567");
        assert_eq!(cell_text(&record, SortColumn::FineAlt, &money), "-");
        record.fine_alt = Some(12.25);
        assert_eq!(cell_text(&record, SortColumn::FineAlt, &money), "12,3");
        assert_eq!(cell_text(&record, SortColumn::Company, &money), "Co1");
    }
}
