use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

/// Spring between two node indices with precomputed degree weighting.
#[derive(Clone, Copy, Debug)]
pub(super) struct Link {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) strength: f32,
    // Share of the correction applied to the target.
    pub(super) bias: f32,
}

pub(super) fn build_links(edges: &[(usize, usize)], node_count: usize) -> Vec<Link> {
    let mut degree = vec![0usize; node_count];
    for &(source, target) in edges {
        if source < node_count && target < node_count {
            degree[source] += 1;
            degree[target] += 1;
        }
    }

    edges
        .iter()
        .filter(|(source, target)| *source < node_count && *target < node_count && source != target)
        .map(|&(source, target)| {
            let source_degree = degree[source] as f32;
            let target_degree = degree[target] as f32;
            Link {
                source,
                target,
                strength: 1.0 / source_degree.min(target_degree),
                bias: source_degree / (source_degree + target_degree),
            }
        })
        .collect()
}

/// Tiny deterministic offset so coincident nodes can separate.
pub(super) fn jiggle(seed: usize) -> f32 {
    let angle = (seed as f32 * 0.618_034).fract() - 0.5;
    angle * 1e-6
}

pub(super) fn apply_links(
    links: &[Link],
    positions: &[Vec2],
    velocities: &mut [Vec2],
    usable: &[bool],
    distance: f32,
    alpha: f32,
) {
    for (link_index, link) in links.iter().enumerate() {
        let (source, target) = (link.source, link.target);
        if !usable[source] || !usable[target] {
            continue;
        }

        let mut delta = positions[target] + velocities[target] - positions[source] - velocities[source];
        if delta.x == 0.0 {
            delta.x = jiggle(link_index * 2 + 1);
        }
        if delta.y == 0.0 {
            delta.y = jiggle(link_index * 2 + 2);
        }

        let length = delta.length();
        let scale = (length - distance) / length * alpha * link.strength;
        let correction = delta * scale;

        velocities[target] -= correction * link.bias;
        velocities[source] += correction * (1.0 - link.bias);
    }
}

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    // Per-body charge already multiplied by alpha.
    pub(super) weighted_strength: f32,
    pub(super) theta_sq: f32,
    pub(super) distance_min_sq: f32,
}

pub(super) fn accumulate_charge_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    velocity: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }

            let mut delta = positions[other_index] - point;
            if delta.x == 0.0 {
                delta.x = jiggle(index * 31 + other_index);
            }
            if delta.y == 0.0 {
                delta.y = jiggle(other_index * 31 + index);
            }

            let distance_sq = softened(delta.length_sq(), params.distance_min_sq);
            *velocity += delta * (params.weighted_strength / distance_sq);
        }
        return;
    }

    let delta = node.center_of_mass - point;
    let distance_sq = delta.length_sq();
    let side = node.bounds.side_length();
    // A cell holding the point itself is always opened, so a node never
    // feels its own mass through the aggregate.
    let can_approximate =
        !node.bounds.contains(point) && (side * side / params.theta_sq) < distance_sq;

    if can_approximate {
        let distance_sq = softened(distance_sq, params.distance_min_sq);
        *velocity += delta * (params.weighted_strength * node.mass / distance_sq);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge_for_node(child, index, positions, params, velocity);
    }
}

fn softened(distance_sq: f32, distance_min_sq: f32) -> f32 {
    if distance_sq < distance_min_sq {
        (distance_min_sq * distance_sq).sqrt()
    } else {
        distance_sq
    }
}

/// Pull toward the origin on each axis independently.
pub(super) fn centering(position: Vec2, strength: f32, alpha: f32) -> Vec2 {
    vec2(-position.x * strength * alpha, -position.y * strength * alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_strength_uses_lower_degree() {
        let links = build_links(&[(0, 1), (0, 2), (0, 3)], 4);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].strength, 1.0);
        assert_eq!(links[0].bias, 0.75);
    }

    #[test]
    fn self_and_out_of_range_links_are_dropped() {
        assert!(build_links(&[(1, 1), (0, 5)], 2).is_empty());
    }

    #[test]
    fn stretched_link_pulls_endpoints_together() {
        let links = build_links(&[(0, 1)], 2);
        let positions = [vec2(0.0, 0.0), vec2(200.0, 0.0)];
        let mut velocities = [Vec2::ZERO; 2];
        apply_links(&links, &positions, &mut velocities, &[true, true], 65.0, 1.0);

        assert!(velocities[0].x > 0.0);
        assert!(velocities[1].x < 0.0);
    }

    #[test]
    fn negative_charge_repels() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let tree = QuadNode::build(&positions, vec![0, 1]).unwrap();
        let params = ChargeParams {
            weighted_strength: -300.0,
            theta_sq: 0.81,
            distance_min_sq: 1.0,
        };

        let mut velocity = Vec2::ZERO;
        accumulate_charge_for_node(&tree, 0, &positions, params, &mut velocity);
        assert!(velocity.x < 0.0);
        assert!((velocity.x + 30.0).abs() < 1e-3);
    }

    #[test]
    fn centering_acts_per_axis() {
        let push = centering(vec2(10.0, -20.0), 0.1, 0.5);
        assert_eq!(push, vec2(-0.5, 1.0));
    }
}
