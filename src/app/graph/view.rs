use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::util::format_complexity;

use super::super::render_utils::{
    EDGE_COLOR, NODE_FILL, NODE_HOVER_FILL, clip_edge, draw_arrow, draw_background, edge_visible,
    world_to_screen,
};
use super::super::{RenderGraph, ViewModel};

impl ViewModel {
    fn update_screen_space(rect: egui::Rect, pan: egui::Vec2, zoom: f32, cache: &mut RenderGraph) {
        let scratch = &mut cache.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for node in &cache.nodes {
            scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, node.world_pos));
            scratch.screen_radii.push(node.radius * zoom);
        }

        scratch.visible_mask.clear();
        scratch.visible_mask.resize(cache.nodes.len(), false);
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);
        self.handle_graph_zoom(ui, rect, &response);

        let Some(cache) = self.graph_cache.as_mut() else {
            self.handle_graph_pan(&response);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No modules match the current configuration and selection.",
                FontId::proportional(14.0),
                Color32::from_gray(90),
            );
            return;
        };

        // Hit-test against the positions the user currently sees.
        Self::update_screen_space(rect, self.pan, self.zoom, cache);
        Self::visible_indices_into(
            rect,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
            &mut cache.view_scratch.visible_indices,
        );
        let hovered = Self::hovered_index(
            ui,
            &cache.view_scratch.visible_indices,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
        );
        let dragging = Self::handle_node_drag(
            &mut self.drag,
            cache,
            rect,
            self.pan,
            self.zoom,
            &response,
            hovered,
        );

        let mut simulation_hot = false;
        if self.live_physics {
            simulation_hot = cache.simulation.step(&mut cache.nodes);
        }
        if simulation_hot || dragging {
            ui.ctx().request_repaint();
        }

        Self::update_screen_space(rect, self.pan, self.zoom, cache);
        Self::visible_indices_into(
            rect,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
            &mut cache.view_scratch.visible_indices,
        );
        for &index in &cache.view_scratch.visible_indices {
            cache.view_scratch.visible_mask[index] = true;
        }
        self.visible_node_count = cache.view_scratch.visible_indices.len();

        if hovered.is_some() || dragging {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let edge_width = (3.0 * self.zoom).clamp(0.8, 6.0);
        let mut visible_edge_count = 0usize;
        for &(source, target) in &cache.edges {
            let (source_node, target_node) = (&cache.nodes[source], &cache.nodes[target]);
            if !source_node.is_finite() || !target_node.is_finite() {
                continue;
            }

            let Some((start, end)) = clip_edge(
                source_node.world_pos,
                source_node.radius,
                target_node.world_pos,
                target_node.radius,
            ) else {
                continue;
            };

            let start = world_to_screen(rect, self.pan, self.zoom, start);
            let end = world_to_screen(rect, self.pan, self.zoom, end);
            let either_visible =
                cache.view_scratch.visible_mask[source] || cache.view_scratch.visible_mask[target];
            if !either_visible && !edge_visible(rect, start, end, edge_width) {
                continue;
            }

            draw_arrow(&painter, start, end, edge_width, EDGE_COLOR);
            visible_edge_count += 1;
        }
        self.visible_edge_count = visible_edge_count;

        let selected_index = self
            .selected
            .as_ref()
            .and_then(|id| cache.index_by_id.get(id).copied());
        for &index in &cache.view_scratch.visible_indices {
            let node = &cache.nodes[index];
            let position = cache.view_scratch.screen_positions[index];
            let radius = cache.view_scratch.screen_radii[index];

            let fill = if hovered == Some(index) || self.drag == Some(index) {
                NODE_HOVER_FILL
            } else {
                NODE_FILL
            };
            painter.circle_filled(position, radius, fill);
            painter.circle_stroke(position, radius, Stroke::new(1.5, Color32::WHITE));
            if selected_index == Some(index) {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.5, Color32::from_rgb(40, 40, 40)),
                );
            }

            if self.show_names {
                let label_pos = position + vec2(radius + 4.0, 0.0);
                let font = FontId::proportional((8.0 * self.zoom).clamp(8.0, 16.0));
                for offset in [vec2(-1.0, 0.0), vec2(1.0, 0.0), vec2(0.0, -1.0), vec2(0.0, 1.0)] {
                    painter.text(
                        label_pos + offset,
                        Align2::LEFT_CENTER,
                        &node.id,
                        font.clone(),
                        Color32::WHITE,
                    );
                }
                painter.text(
                    label_pos,
                    Align2::LEFT_CENTER,
                    &node.id,
                    font,
                    Color32::from_gray(20),
                );
            }
        }

        if let Some(index) = hovered {
            let node = &cache.nodes[index];
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  complexity {}", node.id, format_complexity(node.complexity)),
                FontId::proportional(13.0),
                Color32::from_gray(30),
            );
        }

        let activated = if response.clicked_by(egui::PointerButton::Primary) {
            hovered.map(|index| cache.nodes[index].id.clone())
        } else {
            None
        };

        self.handle_graph_pan(&response);

        if let Some(id) = activated {
            self.on_node_activated(id);
        }
    }
}
