use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::util::format_complexity;

use super::super::ViewModel;

fn value_row(ui: &mut Ui, label: &str, value: f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(RichText::new(format_complexity(value)).strong());
        });
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let details = self.current_details().clone();

        ui.horizontal(|ui| {
            ui.heading(details.module_name.as_str());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("x").on_hover_text("Close details").clicked() {
                    self.selected = None;
                }
            });
        });
        if details.external {
            ui.small("external dependency");
        }
        ui.separator();

        value_row(ui, "Module McCabe complexity:", details.module_complexity);
        if !details.mccabe.is_empty() {
            egui::CollapsingHeader::new("Breakdown")
                .id_salt("module_breakdown")
                .show(ui, |ui| {
                    for artifact in &details.mccabe {
                        value_row(ui, &artifact.artifact, artifact.complexity);
                    }
                });
        }

        ui.add_space(6.0);
        value_row(
            ui,
            "Submodules McCabe complexity:",
            details.submodules_complexity(),
        );
        if !details.submodules.is_empty() {
            egui::CollapsingHeader::new("Breakdown")
                .id_salt("submodule_breakdown")
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("submodule_breakdown_scroll")
                        .max_height(360.0)
                        .show(ui, |ui| {
                            for submodule in &details.submodules {
                                value_row(ui, &submodule.module_name, submodule.mccabe_complexity);
                            }
                        });
                });
        }

        ui.separator();
        value_row(ui, "Node size weight:", details.node_total_complexity());
    }
}
