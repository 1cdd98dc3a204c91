//! Fines Explorer Main Application
//! Main window with control panel, dashboard and fines table.

use crate::charts::{ChartLimits, Dashboard};
use crate::config::AppConfig;
use crate::data::{FineLoader, LoadedDataset, MoneyFormat, SortColumn, ViewState};
use crate::export::ReportExporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, FinesTable};
use egui::{RichText, SidePanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        dataset: LoadedDataset,
        path: PathBuf,
    },
    Error(String),
}

/// Main application window.
pub struct FinesApp {
    config: AppConfig,
    money: MoneyFormat,
    limits: ChartLimits,

    view: ViewState,
    dashboard: Dashboard,

    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl FinesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            money: config.money(),
            limits: config.chart_limits(),
            view: ViewState::default(),
            dashboard: Dashboard::default(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            config,
        };

        if let Some(path) = app.config.data_path.clone() {
            app.start_load(path);
        }
        app
    }

    /// Ask for a dataset file and load it.
    fn handle_browse_data(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Fines data", &["csv", "json"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Load the dataset in a background thread; the UI keeps its previous view meanwhile.
    fn start_load(&mut self, path: PathBuf) {
        self.control_panel.data_path = Some(path.clone());
        self.control_panel.set_status("Loading data...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {}...",
                path.display()
            )));

            match FineLoader::load_path(&path) {
                Ok(dataset) => {
                    let _ = tx.send(LoadResult::Complete { dataset, path });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { dataset, path } => {
                        let loaded = dataset.records.len();
                        let rejected = dataset.rejected.len();

                        self.view = ViewState::new(dataset.records);
                        self.control_panel.update_options(
                            self.view.categories().to_vec(),
                            self.view.regions().to_vec(),
                        );
                        self.control_panel.export_enabled = true;
                        self.refresh_dashboard();

                        let status = if rejected > 0 {
                            format!("Loaded {} fines ({} rejected)", loaded, rejected)
                        } else {
                            format!("Loaded {} fines", loaded)
                        };
                        log::debug!("Dataset ready from {}", path.display());
                        self.control_panel.set_status(&status);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("Failed to load dataset: {}", error);
                        self.view = ViewState::default();
                        self.control_panel.update_options(Vec::new(), Vec::new());
                        self.control_panel.export_enabled = false;
                        self.refresh_dashboard();
                        self.control_panel.set_status(&format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute every aggregate over the current view.
    fn refresh_dashboard(&mut self) {
        self.dashboard = Dashboard::build(&self.view.visible(), &self.limits);
    }

    fn apply_filters(&mut self) {
        if self.view.set_filter(self.control_panel.filter.clone()) {
            log::debug!(
                "Filter matched {} of {} fines",
                self.view.visible_len(),
                self.view.records().len()
            );
            self.refresh_dashboard();
        }
    }

    /// Sorting reorders the table only; aggregates are order-independent.
    fn handle_sort(&mut self, column: SortColumn) {
        self.view.sort_by(column);
    }

    /// Write the current view and charts into a chosen folder, then open it.
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        self.control_panel.set_status("Exporting...");
        let size = (self.config.export_width, self.config.export_height);

        match ReportExporter::export(&dir, &self.view.visible(), &self.dashboard, &self.money, size)
        {
            Ok(summary) => {
                self.control_panel.set_status(&format!(
                    "Exported {} rows and {} charts",
                    self.view.visible_len(),
                    summary.charts.len()
                ));
                if let Err(e) = open::that(&dir) {
                    log::warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.control_panel
                    .set_status(&format!("Error: export failed: {}", e));
            }
        }
    }
}

impl eframe::App for FinesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        self.control_panel.is_loading = self.is_loading;
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseData => self.handle_browse_data(),
                        ControlPanelAction::FilterChanged => self.apply_filters(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - dashboard and table
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.view.records().is_empty() && !self.is_loading {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Open a fines CSV or JSON file to begin")
                            .size(16.0)
                            .italics(),
                    );
                });
                return;
            }

            let mut clicked = None;
            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .show(ui, |ui| {
                    self.chart_viewer.show(ui, &self.dashboard, &self.money);
                    ui.separator();
                    clicked = FinesTable::show(ui, &self.view, &self.money);
                });

            if let Some(column) = clicked {
                self.handle_sort(column);
            }
        });
    }
}
