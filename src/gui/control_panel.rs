//! Control Panel Widget
//! Left side panel with the data source, filter controls and export.

use crate::data::FilterState;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

const LABEL_WIDTH: f32 = 80.0;
const COMBO_WIDTH: f32 = 200.0;

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    /// Filter as edited in the widgets; pushed to the view on change.
    pub filter: FilterState,
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub data_path: Option<PathBuf>,
    pub status: String,
    pub is_loading: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            categories: Vec::new(),
            regions: Vec::new(),
            data_path: None,
            status: "Ready".to_string(),
            is_loading: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace selector options after a load and reset the filter.
    pub fn update_options(&mut self, categories: Vec<String>, regions: Vec<String>) {
        self.categories = categories;
        self.regions = regions;
        self.filter = FilterState::default();
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("⚖ Fines Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Regulatory sanctions dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .data_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.data_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Open").clicked() {
                                action = ControlPanelAction::BrowseData;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔎 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let mut changed = false;

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Search:"));
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.filter.search)
                    .hint_text("Company or facility")
                    .desired_width(COMBO_WIDTH),
            );
            changed |= response.changed();
        });

        ui.add_space(5.0);
        changed |= Self::selector(
            ui,
            "category_filter",
            "Category:",
            "All categories",
            &self.categories,
            &mut self.filter.category,
        );

        ui.add_space(5.0);
        changed |= Self::selector(
            ui,
            "region_filter",
            "Region:",
            "All regions",
            &self.regions,
            &mut self.filter.region,
        );

        if changed {
            action = ControlPanelAction::FilterChanged;
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.filter.is_empty(), |ui| {
                if ui.button("✖ Clear filters").clicked() {
                    self.filter = FilterState::default();
                    action = ControlPanelAction::FilterChanged;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled && !self.is_loading, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export view").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        if self.is_loading {
            ui.add(egui::Spinner::new());
        }

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Exact-match selector with an "all" entry mapped to the empty string.
    fn selector(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        all_label: &str,
        options: &[String],
        selected: &mut String,
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
            let shown = if selected.is_empty() {
                all_label.to_string()
            } else {
                selected.clone()
            };
            ComboBox::from_id_salt(id)
                .width(COMBO_WIDTH)
                .selected_text(shown)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selected.is_empty(), all_label).clicked()
                        && !selected.is_empty()
                    {
                        selected.clear();
                        changed = true;
                    }
                    for option in options {
                        if ui.selectable_label(*selected == *option, option).clicked()
                            && *selected != *option
                        {
                            *selected = option.clone();
                            changed = true;
                        }
                    }
                });
        });
        changed
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseData,
    FilterChanged,
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_options_resets_filter() {
        let mut panel = ControlPanel::new();
        panel.filter.search = "co1".to_string();
        panel.filter.region = "North".to_string();

        panel.update_options(vec!["Mining".to_string()], vec!["South".to_string()]);
        assert!(panel.filter.is_empty());
        assert_eq!(panel.categories, vec!["Mining"]);
        assert_eq!(panel.regions, vec!["South"]);
    }
}
