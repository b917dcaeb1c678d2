use eframe::egui::{self, Align, Layout, Ui};

use crate::analysis::filter_module_names;
use crate::util::format_complexity;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Configuration");
        ui.separator();
        ui.add_space(4.0);

        let mut config = self.config;
        let max_depth = self.max_depth.max(config.depth);
        ui.add(egui::Slider::new(&mut config.depth, 1..=max_depth).text("Depth of packages shown"))
            .on_hover_text("Collapse modules to their first N dotted segments.");
        ui.checkbox(&mut config.include_external, "Show external dependencies")
            .on_hover_text("Include modules that live outside the analysed project.");
        self.set_config(config);

        ui.checkbox(&mut self.show_names, "Show names");
        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Keep stepping the force layout every frame.");

        ui.separator();
        egui::CollapsingHeader::new("Choose shown modules")
            .default_open(false)
            .show(ui, |ui| self.draw_module_checklist(ui));

        ui.separator();
        self.draw_trivia(ui);
    }

    fn draw_module_checklist(&mut self, ui: &mut Ui) {
        let projected = std::sync::Arc::clone(&self.projected);
        let mut selection = self.selection.clone();

        ui.horizontal_wrapped(|ui| {
            if ui.link("Toggle all").clicked() {
                selection.toggle_all(&projected);
            }
            if ui
                .link("Add dependencies")
                .on_hover_text("Also show every module required by a shown module.")
                .clicked()
            {
                selection.add_dependencies(&projected);
            }
            if ui
                .link("Add modules depending")
                .on_hover_text("Also show every module that requires a shown module.")
                .clicked()
            {
                selection.add_dependents(&projected);
            }
        });

        ui.add(
            egui::TextEdit::singleline(&mut self.module_filter).hint_text("Filter modules"),
        );
        ui.small(format!(
            "{} of {} modules shown",
            selection.len(),
            projected.modules.len()
        ));

        let rows = filter_module_names(&projected, &self.module_filter);
        egui::ScrollArea::vertical()
            .id_salt("module_checklist_scroll")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show_rows(ui, 20.0, rows.len(), |ui, row_range| {
                for name in &rows[row_range] {
                    let mut checked = selection.contains(name);
                    if ui.checkbox(&mut checked, *name).changed() {
                        selection.toggle(name);
                    }
                }
            });

        self.set_selection(selection);
    }

    fn draw_trivia(&mut self, ui: &mut Ui) {
        ui.heading("Trivia");
        ui.add_space(4.0);

        let mut activated = None;

        ui.label(egui::RichText::new("Top complex files").strong());
        for (name, complexity) in &self.top_modules {
            let clicked = ui
                .horizontal(|ui| {
                    let clicked = ui.link(name.as_str()).clicked();
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format_complexity(*complexity));
                    });
                    clicked
                })
                .inner;
            if clicked {
                activated = Some(name.clone());
            }
        }

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Top complex artifacts").strong());
        for (module_name, artifact, complexity) in &self.top_artifacts {
            ui.horizontal(|ui| {
                ui.label(format!("{module_name} - {artifact}"));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format_complexity(*complexity));
                });
            });
        }

        if let Some(name) = activated {
            self.on_node_activated(name);
        }
    }
}
