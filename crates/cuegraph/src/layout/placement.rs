//! Depth assignment and pixel placement.

use std::collections::{BTreeMap, VecDeque};

use cuegraph_core::geometry::Point;

use super::lanes::SlotView;

/// Round half-up, towards positive infinity.
pub(super) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Longest distance of every node from a layout root.
///
/// A node is revisited whenever a longer path to it is found, so a shared
/// child ends up one column left of its deepest parent. Nodes not reachable
/// from `roots` get depth `0`.
pub(super) fn depths(view: &SlotView, roots: &[usize]) -> Vec<usize> {
    let mut depths: Vec<Option<usize>> = vec![None; view.len()];
    let mut queue = VecDeque::new();

    for &root in roots {
        depths[root] = Some(0);
        queue.push_back(root);
    }

    while let Some(current) = queue.pop_front() {
        let next = depths[current].unwrap_or(0) + 1;
        for child in view.children(current) {
            if depths[child].is_none_or(|depth| next > depth) {
                depths[child] = Some(next);
                queue.push_back(child);
            }
        }
    }

    depths.into_iter().map(|depth| depth.unwrap_or(0)).collect()
}

/// Maps lane numbers to vertical offsets around the center of all lanes.
#[derive(Debug, Clone, Copy)]
pub(super) struct LaneScale {
    center: f64,
    y_step: f64,
}

impl LaneScale {
    pub(super) fn new(min_lane: usize, max_lane: usize, y_step: i64) -> Self {
        Self {
            center: (min_lane + max_lane) as f64 / 2.0,
            y_step: y_step as f64,
        }
    }

    pub(super) fn lane_to_y(&self, lane: usize) -> i64 {
        round_half_up((lane as f64 - self.center) * self.y_step)
    }

    /// Average of the offsets of all lanes in `start..=end`.
    pub(super) fn span_to_y(&self, start: usize, end: usize) -> i64 {
        let sum: i64 = (start..=end).map(|lane| self.lane_to_y(lane)).sum();
        round_half_up(sum as f64 / (end - start + 1) as f64)
    }
}

/// Push nodes of the same column apart until consecutive nodes are at
/// least `min_gap` apart.
///
/// Nodes are sorted by `y`, ties broken by record index, and swept once from
/// top to bottom.
pub(super) fn resolve_collisions(positions: &mut [(usize, Point)], min_gap: i64) {
    let mut columns: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (slot, (_, position)) in positions.iter().enumerate() {
        columns.entry(position.x()).or_default().push(slot);
    }

    for column in columns.values_mut() {
        column.sort_by_key(|&slot| (positions[slot].1.y(), positions[slot].0));

        for pair in 1..column.len() {
            let previous = positions[column[pair - 1]].1.y();
            let current = &mut positions[column[pair]].1;
            if current.y() - previous < min_gap {
                *current = current.with_y(previous + min_gap);
            }
        }
    }
}

/// Shift all nodes vertically so the midpoint of the topmost and bottommost
/// node lies at `0`.
pub(super) fn recenter(positions: &mut [(usize, Point)]) {
    let Some(min_y) = positions.iter().map(|(_, point)| point.y()).min() else {
        return;
    };
    let max_y = positions
        .iter()
        .map(|(_, point)| point.y())
        .max()
        .unwrap_or(min_y);
    let mid = (min_y + max_y) as f64 / 2.0;

    for (_, point) in positions.iter_mut() {
        *point = point.with_y(round_half_up(point.y() as f64 - mid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
    }

    #[test]
    fn test_depth_takes_longest_path() {
        // 0 -> [1, 2], 1 -> [2]
        let view = SlotView::new(vec![vec![Some(1), Some(2)], vec![Some(2)], vec![]]);
        assert_eq!(depths(&view, &[0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_lane_scale_centers_lanes() {
        let scale = LaneScale::new(0, 1, 250);
        assert_eq!(scale.lane_to_y(0), -125);
        assert_eq!(scale.lane_to_y(1), 125);
        assert_eq!(scale.span_to_y(0, 1), 0);
    }

    #[test]
    fn test_lane_scale_rounds_half_up() {
        let scale = LaneScale::new(0, 1, 251);
        assert_eq!(scale.lane_to_y(0), -125);
        assert_eq!(scale.lane_to_y(1), 126);
    }

    #[test]
    fn test_collisions_push_down_in_order() {
        let mut positions = vec![
            (0, Point::new(0, 0)),
            (1, Point::new(0, 0)),
            (2, Point::new(0, 100)),
            (3, Point::new(420, 0)),
        ];
        resolve_collisions(&mut positions, 175);
        assert_eq!(positions[0].1.y(), 0);
        assert_eq!(positions[1].1.y(), 175);
        assert_eq!(positions[2].1.y(), 350);
        assert_eq!(positions[3].1.y(), 0);
    }

    #[test]
    fn test_recenter() {
        let mut positions = vec![(0, Point::new(0, 0)), (1, Point::new(0, 175))];
        recenter(&mut positions);
        assert_eq!(positions[0].1.y(), -87);
        assert_eq!(positions[1].1.y(), 88);
    }
}
