use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

pub(super) const MIN_RADIUS: f32 = 3.0;
pub(super) const MAX_RADIUS: f32 = 15.0;
const EDGE_CLIP_FACTOR: f32 = 0.7;

pub(super) const NODE_FILL: Color32 = Color32::from_rgb(244, 162, 84);
pub(super) const NODE_HOVER_FILL: Color32 = Color32::from_rgb(179, 59, 0);
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(92, 92, 92, 153);

/// Observed complexity range of the current node set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ComplexityRange {
    bounds: Option<(f64, f64)>,
}

impl ComplexityRange {
    pub(super) fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let bounds = values.into_iter().fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        });
        Self { bounds }
    }

    /// Linear map of `complexity` onto `[MIN_RADIUS, MAX_RADIUS]`.
    pub(super) fn radius(self, complexity: f64) -> f32 {
        let Some((min, max)) = self.bounds else {
            return MIN_RADIUS;
        };
        if min == max {
            return MIN_RADIUS;
        }

        let span = f64::from(MAX_RADIUS - MIN_RADIUS);
        let radius = f64::from(MIN_RADIUS) + (complexity - min) * span / (max - min);
        radius.clamp(f64::from(MIN_RADIUS), f64::from(MAX_RADIUS)) as f32
    }
}

/// Segment between the two node boundaries, or `None` for coincident nodes.
pub(super) fn clip_edge(
    source: Vec2,
    source_radius: f32,
    target: Vec2,
    target_radius: f32,
) -> Option<(Vec2, Vec2)> {
    let direction = target - source;
    let length = direction.length();
    if !length.is_finite() || length <= f32::EPSILON {
        return None;
    }

    let unit = direction / length;
    Some((
        source + unit * (EDGE_CLIP_FACTOR * source_radius),
        target - unit * (EDGE_CLIP_FACTOR * target_radius),
    ))
}

pub(super) fn draw_arrow(painter: &Painter, start: Pos2, end: Pos2, width: f32, color: Color32) {
    let delta = end - start;
    let length = delta.length();
    if length <= f32::EPSILON {
        return;
    }

    let unit = delta / length;
    let head = (width * 2.2).min(length * 0.6);
    let base = end - unit * head;
    let side = unit.rot90() * (head * 0.5);

    painter.line_segment([start, base], Stroke::new(width, color));
    painter.add(Shape::convex_polygon(
        vec![end, base + side, base - side],
        color,
        Stroke::NONE,
    ));
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 250, 250));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(200, 205, 212, 90));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}
