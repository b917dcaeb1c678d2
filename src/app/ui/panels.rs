use std::sync::Arc;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::analysis::{ModuleDetails, ProjectionConfig, RawGraph, Selection, module_details, project};

use super::super::{DetailsCache, DetailsCacheKey, ViewModel, ViewOptions};

impl ViewModel {
    const TRIVIA_ROWS: usize = 5;

    pub(in crate::app) fn new(dataset: RawGraph, options: ViewOptions) -> Self {
        let max_depth = dataset.max_internal_depth();
        let top_modules = dataset
            .top_modules_by_complexity(Self::TRIVIA_ROWS)
            .into_iter()
            .map(|(module, complexity)| (module.name.to_string(), complexity))
            .collect();
        let top_artifacts = dataset
            .top_artifacts_by_complexity(Self::TRIVIA_ROWS)
            .into_iter()
            .map(|ranked| (ranked.module_name, ranked.artifact, ranked.complexity))
            .collect();

        let config = options.projection;
        let projected = Arc::new(project(&dataset, config));
        let selection = Selection::all_of(&projected);

        Self {
            dataset,
            config,
            show_names: options.show_names,
            max_depth,
            projected,
            selection,
            module_filter: String::new(),
            selected: None,
            pan: Vec2::ZERO,
            zoom: 1.6,
            live_physics: true,
            drag: None,
            graph_dirty: true,
            render_graph_revision: 0,
            graph_cache: None,
            derived_cache: None,
            details_cache: None,
            top_modules,
            top_artifacts,
            visible_node_count: 0,
            visible_edge_count: 0,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Polymetric view");
                    ui.separator();
                    ui.label(format!("modules: {}", self.dataset.modules.len()));
                    ui.label(format!("requires: {}", self.dataset.requires.len()));
                    ui.label(format!("depth: {}", self.config.depth));
                    if ui.button("Restart layout").clicked() {
                        self.graph_dirty = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(text) = self.visible_graph_text() {
                            ui.label(text);
                        }
                    });
                });
            });

        egui::SidePanel::right("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("controls_scroll")
                    .show(ui, |ui| self.draw_controls(ui));
            });

        if self.selected.is_some() {
            egui::SidePanel::left("details")
                .resizable(true)
                .default_width(360.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    /// Applies a new projection configuration. The selection resets to every
    /// module of the new projection and the running layout is replaced.
    pub(in crate::app) fn set_config(&mut self, config: ProjectionConfig) {
        if self.config == config {
            return;
        }

        tracing::info!(
            depth = config.depth,
            include_external = config.include_external,
            "projection configuration changed"
        );
        self.config = config;
        self.projected = Arc::new(project(&self.dataset, config));
        self.selection = Selection::all_of(&self.projected);
        self.graph_dirty = true;
    }

    pub(in crate::app) fn set_selection(&mut self, selection: Selection) {
        if self.selection == selection {
            return;
        }

        tracing::debug!(selected = selection.len(), "module selection changed");
        self.selection = selection;
        self.graph_dirty = true;
    }

    /// Click on a rendered node.
    pub(in crate::app) fn on_node_activated(&mut self, id: String) {
        tracing::debug!(module = %id, "node activated");
        self.selected = Some(id);
    }

    pub(in crate::app) fn current_details(&mut self) -> &ModuleDetails {
        let key = DetailsCacheKey {
            selected_id: self.selected.clone(),
            depth: self.config.depth,
        };

        let cache = match self.details_cache.take() {
            Some(cache) if cache.key == key => cache,
            _ => DetailsCache {
                details: module_details(key.selected_id.as_deref(), &self.dataset, key.depth),
                key,
            },
        };
        &self.details_cache.insert(cache).details
    }

    fn visible_graph_text(&self) -> Option<String> {
        self.graph_cache.as_ref().map(|cache| {
            format!(
                "visible graph: {} nodes / {} edges  |  alpha {:.3}  |  tick {}",
                self.visible_node_count.min(cache.nodes.len()),
                self.visible_edge_count.min(cache.edges.len()),
                cache.simulation.alpha(),
                cache.simulation.ticks()
            )
        })
    }
}
