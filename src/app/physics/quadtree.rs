use eframe::egui::{Vec2, vec2};

const QUADTREE_LEAF_CAPACITY: usize = 8;
const QUADTREE_MAX_DEPTH: usize = 12;

#[derive(Clone, Copy)]
pub(super) struct QuadBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl QuadBounds {
    fn from_points(positions: &[Vec2], indices: &[usize]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for &index in indices {
            let point = positions[index];
            min = min.min(point);
            max = max.max(point);
        }

        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span = (max - min).max_elem().max(1.0);

        Some(Self {
            center,
            half_extent: span * 0.5 + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        let offset = (point - self.center).abs();
        offset.x <= self.half_extent && offset.y <= self.half_extent
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };

        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        match (right, lower) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }
}

/// Barnes-Hut cell. Every body carries the same charge, so `mass` is the
/// body count and `center_of_mass` the plain centroid.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) center_of_mass: Vec2,
    pub(super) mass: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    /// Builds a tree over `indices`; `None` when there is nothing to place.
    pub(super) fn build(positions: &[Vec2], indices: Vec<usize>) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }
        let bounds = QuadBounds::from_points(positions, &indices)?;
        Some(Self::build_node(bounds, indices, positions, 0))
    }

    fn build_node(bounds: QuadBounds, indices: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mut center_of_mass = Vec2::ZERO;
        for &index in &indices {
            center_of_mass += positions[index];
        }

        let mass = indices.len() as f32;
        if mass > 0.0 {
            center_of_mass /= mass;
        }

        let mut node = Self {
            bounds,
            center_of_mass,
            mass,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            buckets[bounds.quadrant_for(positions[index])].push(index);
        }

        // coincident points stay together in one leaf
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            node.children[quadrant] = Some(Box::new(Self::build_node(
                bounds.child(quadrant),
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}
