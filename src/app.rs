// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the result set store and the viewer state
//! machines, and applies the actions reported by the UI components.

use crate::config::Settings;
use crate::io::media::FrameImages;
use crate::io::search_client::{
    HttpTransport, QuerySubmitter, SearchDispatcher, SearchError, SearchOutcome, SearchTransport,
};
use crate::models::{
    inspector::MetadataInspector,
    navigator::ModalNavigator,
    result_set::ResultSetStore,
    results_view::{self, GridAction, ResultsView},
};
use crate::ui::{
    frame_modal, frame_modal::ModalAction, inspector, inspector::InspectorAction, results,
    search_bar,
};
use crate::util::listeners::{KeyListeners, NavKey};
use anyhow::Result;
use std::time::Duration;

/// Main application state.
pub struct FrameSearchApp<T = HttpTransport> {
    /// Text in the query field
    query: String,

    /// Runs search requests in the background
    dispatcher: SearchDispatcher<T>,

    /// Last successful result set
    store: ResultSetStore,

    /// What the results area currently shows
    results: ResultsView,

    /// Frame textures and their load state
    images: FrameImages,

    /// Full-window frame viewer
    navigator: ModalNavigator,

    /// Image information window
    inspector: MetadataInspector,

    /// Keyboard listeners attached by open overlays
    listeners: KeyListeners,
}

impl FrameSearchApp<HttpTransport> {
    /// Create the application talking to the configured search service.
    pub fn new(settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings)?;
        Self::with_transport(settings, transport)
    }
}

impl<T: SearchTransport + 'static> FrameSearchApp<T> {
    pub fn with_transport(settings: &Settings, transport: T) -> Result<Self> {
        let submitter = QuerySubmitter::new(transport, settings.form_pairs());
        let images = FrameImages::new(
            &settings.server_url,
            &settings.placeholder_path,
            settings.request_timeout(),
        )?;

        log::info!("Searching against {}", settings.search_url());

        Ok(Self {
            query: String::new(),
            dispatcher: SearchDispatcher::new(submitter),
            store: ResultSetStore::new(),
            results: ResultsView::Idle,
            images,
            navigator: ModalNavigator::new(),
            inspector: MetadataInspector::new(),
            listeners: KeyListeners::new(),
        })
    }

    /// Submit the current query.
    fn submit_query(&mut self) {
        match self.dispatcher.dispatch(&self.query) {
            Ok(_) => self.results = ResultsView::Searching,
            Err(e) => self.apply_outcome(Err(e)),
        }
    }

    /// Apply the outcome of a submission to the store and the results area.
    fn apply_outcome(&mut self, outcome: Result<SearchOutcome, SearchError>) {
        match outcome {
            Ok(SearchOutcome::Results(result)) => {
                self.store.replace(result);
                self.images.reset(self.store.frame_paths());
                self.results = results_view::render(&self.store);
            }
            Ok(SearchOutcome::Markup(body)) => {
                log::info!("Received non-JSON response ({} bytes)", body.len());
                self.results = ResultsView::Markup(body);
            }
            Err(e) => {
                self.results = ResultsView::error(e.to_string());
            }
        }
    }

    fn handle_grid_action(&mut self, action: GridAction) {
        match action {
            GridAction::OpenFrame(index) => {
                if let Some(path) = self.store.frame_path(index).map(String::from) {
                    let frames = self.store.snapshot_frames();
                    self.navigator.open(&path, frames, &mut self.listeners);
                }
            }
            GridAction::ShowInfo(index) => {
                if let Some(metadata) = self.store.metadata(index) {
                    self.inspector.show(metadata.clone());
                }
            }
            GridAction::None => {}
        }
    }

    fn handle_modal_action(&mut self, action: ModalAction) {
        match action {
            ModalAction::Prev => {
                self.navigator.prev();
            }
            ModalAction::Next => {
                self.navigator.next();
            }
            ModalAction::Close(reason) => {
                self.navigator.close(reason, &mut self.listeners);
            }
            ModalAction::None => {}
        }
    }

    fn handle_inspector_action(&mut self, action: InspectorAction) {
        match action {
            InspectorAction::OpenFrame => {
                if let Some((path, frames)) = self.inspector.frame_session() {
                    self.navigator.open(&path, frames, &mut self.listeners);
                }
            }
            InspectorAction::Close => self.inspector.close(),
            InspectorAction::None => {}
        }
    }

    /// Route a key press to the attached listener, if there is one.
    fn handle_key(&mut self, key: NavKey) {
        if let Some(listener) = self.listeners.target() {
            self.navigator.on_key(listener, key, &mut self.listeners);
        }
    }

    /// Export the current result set to a file.
    fn export_results(&self, path: std::path::PathBuf) {
        match crate::io::serialization::export(&self.store.as_result(), &path) {
            Ok(_) => log::info!("Exported {} frames to {}", self.store.len(), path.display()),
            Err(e) => log::error!("Failed to export results: {}", e),
        }
    }

    /// Make sure the frames shown in overlays have load slots.
    fn ensure_overlay_frames(&mut self) {
        if let Some(frame) = self.navigator.current_frame().map(String::from) {
            self.images.ensure(&frame);
        }
        if let Some(frame) = self.inspector.metadata().map(|m| m.frame_path.clone()) {
            self.images.ensure(&frame);
        }
    }
}

impl<T: SearchTransport + 'static> eframe::App for FrameSearchApp<T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a completed search
        if let Some(outcome) = self.dispatcher.poll() {
            self.apply_outcome(outcome);
        }

        self.ensure_overlay_frames();
        self.images.poll(ctx);

        // Keep polling while work is outstanding
        let (settled, expected) = self.images.progress();
        if self.dispatcher.is_pending() || settled < expected {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // Keyboard only reaches the viewer while its listener is attached
        if !self.listeners.is_empty() {
            let keys: Vec<NavKey> = ctx.input(|i| {
                [
                    (egui::Key::ArrowLeft, NavKey::ArrowLeft),
                    (egui::Key::ArrowRight, NavKey::ArrowRight),
                    (egui::Key::Escape, NavKey::Escape),
                ]
                .into_iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, nav)| nav)
                .collect()
            });
            for key in keys {
                self.handle_key(key);
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_results = self.store.generation() > 0;
                    if ui
                        .add_enabled(has_results, egui::Button::new("Export Results..."))
                        .clicked()
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .add_filter("YAML", &["yaml", "yml"])
                            .set_file_name("results.json")
                            .save_file()
                        {
                            self.export_results(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Search bar
        let submitted = egui::TopBottomPanel::top("search_bar")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let submitted = search_bar::show(ui, &mut self.query, self.dispatcher.is_pending());
                ui.add_space(4.0);
                submitted
            })
            .inner;
        if submitted {
            self.submit_query();
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} frames", self.store.len()));
                if expected > 0 {
                    ui.separator();
                    ui.label(format!("images {}/{}", settled, expected));
                }
            });
        });

        // Results (center)
        let grid_action = egui::CentralPanel::default()
            .show(ctx, |ui| results::show(ui, &self.results, &self.images))
            .inner;
        self.handle_grid_action(grid_action);

        // Overlays: inspector window, then the viewer on top of everything
        let inspector_action = inspector::show(ctx, &self.inspector, &self.images);
        self.handle_inspector_action(inspector_action);

        let modal_action = frame_modal::show(ctx, &self.navigator, &self.images);
        self.handle_modal_action(modal_action);
    }
}
