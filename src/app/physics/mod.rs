mod forces;
mod quadtree;

use std::collections::HashSet;
use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use super::{Pin, RenderNode};
use forces::{ChargeParams, Link, accumulate_charge_for_node, apply_links, build_links, centering};
use quadtree::QuadNode;

const LINK_DISTANCE: f32 = 65.0;
const CHARGE_STRENGTH: f32 = -300.0;
const CENTER_STRENGTH: f32 = 0.1;
const BARNES_HUT_THETA: f32 = 0.9;
const CHARGE_DISTANCE_MIN_SQ: f32 = 1.0;
const VELOCITY_DECAY: f32 = 0.4;
const ALPHA_MIN: f32 = 0.001;
const ALPHA_DECAY_STEPS: f32 = 300.0;
const DRAG_ALPHA_TARGET: f32 = 0.3;
const INITIAL_RADIUS: f32 = 10.0;

/// Force-directed layout state for one run.
///
/// `alpha` is the temperature. It moves toward `alpha_target` every step and
/// scales every force, so the layout settles once it falls under
/// [`ALPHA_MIN`]. Stepping a cold simulation is harmless.
pub(in crate::app) struct Simulation {
    alpha: f32,
    alpha_target: f32,
    alpha_decay: f32,
    links: Vec<Link>,
    ticks: u64,
    faulted: HashSet<usize>,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    usable: Vec<bool>,
}

impl Simulation {
    /// Places `nodes` on a phyllotaxis spiral and prepares link weights.
    pub(in crate::app) fn new(nodes: &mut [RenderNode], edges: &[(usize, usize)]) -> Self {
        let initial_angle = PI * (3.0 - 5.0_f32.sqrt());
        for (index, node) in nodes.iter_mut().enumerate() {
            let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
            let angle = index as f32 * initial_angle;
            node.world_pos = match node.pin {
                Pin::Pinned(position) => position,
                Pin::Free => vec2(radius * angle.cos(), radius * angle.sin()),
            };
            node.velocity = Vec2::ZERO;
        }

        Self {
            alpha: 1.0,
            alpha_target: 0.0,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / ALPHA_DECAY_STEPS),
            links: build_links(edges, nodes.len()),
            ticks: 0,
            faulted: HashSet::new(),
            positions: Vec::new(),
            velocities: Vec::new(),
            usable: Vec::new(),
        }
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Number of completed steps; each one is a "positions updated" event.
    pub(in crate::app) fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(in crate::app) fn is_hot(&self) -> bool {
        self.alpha >= ALPHA_MIN || self.alpha_target > 0.0
    }

    /// Keeps the layout warm while a node is held.
    pub(in crate::app) fn begin_drag(&mut self) {
        self.alpha_target = DRAG_ALPHA_TARGET;
    }

    /// Lets the layout cool back toward rest.
    pub(in crate::app) fn end_drag(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(in crate::app) fn step(&mut self, nodes: &mut [RenderNode]) -> bool {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        let alpha = self.alpha;

        self.positions.clear();
        self.velocities.clear();
        self.usable.clear();
        for (index, node) in nodes.iter_mut().enumerate() {
            if let Pin::Pinned(position) = node.pin {
                node.world_pos = position;
            }

            let usable = node.is_finite() && node.velocity.is_finite();
            if !usable && self.faulted.insert(index) {
                tracing::warn!(node = %node.id, "node position is not finite, leaving it out of the layout");
            }

            self.positions.push(node.world_pos);
            self.velocities.push(node.velocity);
            self.usable.push(usable);
        }

        apply_links(
            &self.links,
            &self.positions,
            &mut self.velocities,
            &self.usable,
            LINK_DISTANCE,
            alpha,
        );

        let tree_indices = (0..nodes.len())
            .filter(|&index| self.usable[index])
            .collect::<Vec<_>>();
        if let Some(tree) = QuadNode::build(&self.positions, tree_indices) {
            let params = ChargeParams {
                weighted_strength: CHARGE_STRENGTH * alpha,
                theta_sq: BARNES_HUT_THETA * BARNES_HUT_THETA,
                distance_min_sq: CHARGE_DISTANCE_MIN_SQ,
            };
            for (index, velocity) in self.velocities.iter_mut().enumerate() {
                if self.usable[index] {
                    accumulate_charge_for_node(&tree, index, &self.positions, params, velocity);
                }
            }
        }

        for (index, node) in nodes.iter_mut().enumerate() {
            if !self.usable[index] {
                continue;
            }

            match node.pin {
                Pin::Pinned(position) => {
                    node.world_pos = position;
                    node.velocity = Vec2::ZERO;
                }
                Pin::Free => {
                    let velocity = (self.velocities[index]
                        + centering(node.world_pos, CENTER_STRENGTH, alpha))
                        * (1.0 - VELOCITY_DECAY);
                    node.velocity = velocity;
                    node.world_pos += velocity;
                }
            }
        }

        self.ticks += 1;
        self.is_hot()
    }
}
