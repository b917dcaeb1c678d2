use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::render_utils::{circle_visible, screen_to_world};
use super::super::{Pin, RenderGraph, ViewModel};

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 8.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
            || (self.drag.is_none() && response.dragged_by(egui::PointerButton::Primary))
        {
            self.pan += response.drag_delta();
        }
    }

    /// Pins the grabbed node to the pointer and releases it on drop.
    ///
    /// Returns `true` while a node is held.
    pub(in crate::app) fn handle_node_drag(
        drag: &mut Option<usize>,
        cache: &mut RenderGraph,
        rect: Rect,
        pan: egui::Vec2,
        zoom: f32,
        response: &egui::Response,
        hovered: Option<usize>,
    ) -> bool {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
            && let Some(node) = cache.nodes.get_mut(index)
        {
            node.hold_at(node.world_pos);
            cache.simulation.begin_drag();
            *drag = Some(index);
            tracing::debug!(node = %node.id, "drag started");
        }

        let Some(index) = *drag else {
            return false;
        };

        if response.drag_stopped() || !response.is_pointer_button_down_on() {
            if let Some(node) = cache.nodes.get_mut(index) {
                node.pin = Pin::Free;
                tracing::debug!(node = %node.id, "drag ended");
            }
            cache.simulation.end_drag();
            *drag = None;
            return false;
        }

        if let Some(pointer) = response.interact_pointer_pos()
            && let Some(node) = cache.nodes.get_mut(index)
        {
            node.hold_at(screen_to_world(rect, pan, zoom, pointer));
        }
        true
    }

    pub(in crate::app) fn visible_indices_into(
        rect: Rect,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
        visible: &mut Vec<usize>,
    ) {
        visible.clear();
        visible.extend((0..screen_positions.len()).filter(|&index| {
            let position = screen_positions[index];
            position.is_finite() && circle_visible(rect, position, screen_radii[index])
        }));
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        visible_indices: &[usize],
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        visible_indices
            .iter()
            .filter_map(|&index| {
                let distance = screen_positions[index].distance(pointer);
                // small nodes get a slightly larger hit area
                (distance <= screen_radii[index].max(6.0)).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
