use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui::Vec2;

use crate::analysis::{ProjectedGraph, module_details, restrict_to_selection};

use super::super::physics::Simulation;
use super::super::render_utils::ComplexityRange;
use super::super::{
    DerivedGraph, DerivedGraphKey, Pin, RenderGraph, RenderNode, ViewModel, ViewScratch,
};

impl ViewModel {
    /// Projected graph narrowed to the current selection, recomputed only
    /// when the configuration or the selection changed.
    pub(in crate::app) fn derived_graph(&mut self) -> Arc<ProjectedGraph> {
        let key = DerivedGraphKey {
            config: self.config,
            selection: self.selection.names().clone(),
        };

        if let Some(cached) = &self.derived_cache
            && cached.key == key
        {
            return Arc::clone(&cached.graph);
        }

        let graph = Arc::new(restrict_to_selection(
            &self.projected,
            &key.selection,
            self.config,
        ));
        self.derived_cache = Some(DerivedGraph {
            key,
            graph: Arc::clone(&graph),
        });
        graph
    }

    /// Tears down the running layout and starts a fresh one.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.graph_cache = None;
        self.drag = None;
        self.render_graph_revision = self.render_graph_revision.wrapping_add(1);

        let graph = self.derived_graph();
        self.graph_dirty = false;

        if graph.modules.is_empty() {
            self.visible_node_count = 0;
            self.visible_edge_count = 0;
            tracing::debug!(revision = self.render_graph_revision, "nothing to lay out");
            return;
        }

        let complexities = graph
            .modules
            .iter()
            .map(|module| {
                module_details(Some(module.name.as_str()), &self.dataset, self.config.depth)
                    .node_total_complexity()
            })
            .collect::<Vec<_>>();
        let range = ComplexityRange::from_values(complexities.iter().copied());

        let mut nodes = graph
            .modules
            .iter()
            .zip(&complexities)
            .map(|(module, &complexity)| RenderNode {
                id: module.name.to_string(),
                complexity,
                radius: range.radius(complexity),
                world_pos: Vec2::ZERO,
                velocity: Vec2::ZERO,
                pin: Pin::Free,
            })
            .collect::<Vec<_>>();

        let index_by_id = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect::<HashMap<_, _>>();

        let edges = graph
            .requires
            .iter()
            .filter_map(|edge| {
                Some((*index_by_id.get(&edge.from)?, *index_by_id.get(&edge.to)?))
            })
            .collect::<Vec<_>>();

        let simulation = Simulation::new(&mut nodes, &edges);

        tracing::debug!(
            revision = self.render_graph_revision,
            nodes = nodes.len(),
            edges = edges.len(),
            "simulation run started"
        );

        self.visible_node_count = nodes.len();
        self.visible_edge_count = edges.len();
        self.graph_cache = Some(RenderGraph {
            nodes,
            edges,
            index_by_id,
            simulation,
            view_scratch: ViewScratch {
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
                visible_indices: Vec::new(),
                visible_mask: Vec::new(),
            },
        });
    }
}
