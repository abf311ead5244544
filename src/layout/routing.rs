use crate::schema::TableId;

use super::{BoundingBox, ConnectorLayout, Side};

/// Midpoint of the box edge facing `side`.
pub fn anchor_point(bounds: &BoundingBox, side: Side) -> (f32, f32) {
    match side {
        Side::Left => (bounds.left(), bounds.center_y()),
        Side::Right => (bounds.right(), bounds.center_y()),
        Side::Top => (bounds.center_x(), bounds.top()),
        Side::Bottom => (bounds.center_x(), bounds.bottom()),
    }
}

/// Orthogonal step between two horizontal sides or two vertical sides, a
/// straight line otherwise.
pub fn route_points(
    from: (f32, f32),
    from_side: Side,
    to: (f32, f32),
    to_side: Side,
) -> Vec<(f32, f32)> {
    if from_side.is_horizontal() && to_side.is_horizontal() {
        let mid_x = (from.0 + to.0) / 2.0;
        vec![from, (mid_x, from.1), (mid_x, to.1), to]
    } else if from_side.is_vertical() && to_side.is_vertical() {
        let mid_y = (from.1 + to.1) / 2.0;
        vec![from, (from.0, mid_y), (to.0, mid_y), to]
    } else {
        vec![from, to]
    }
}

/// Midpoint of the middle segment of `points`.
pub fn label_anchor(points: &[(f32, f32)]) -> Option<(f32, f32)> {
    if points.len() < 2 {
        return None;
    }
    let end = points.len() / 2;
    let (p1, p2) = (points[end - 1], points[end]);
    Some(((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0))
}

pub fn route_connection(
    from: (TableId, &BoundingBox),
    to: (TableId, &BoundingBox),
    from_side: Side,
    to_side: Side,
    label: &str,
) -> ConnectorLayout {
    let start = anchor_point(from.1, from_side);
    let end = anchor_point(to.1, to_side);
    let points = route_points(start, from_side, end, to_side);
    let label_anchor = label_anchor(&points).unwrap_or(start);
    ConnectorLayout {
        from: from.0,
        to: to.0,
        from_side,
        to_side,
        points,
        label: label.to_string(),
        label_anchor,
    }
}
