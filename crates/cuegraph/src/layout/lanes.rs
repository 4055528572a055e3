//! Subtree sizing and lane assignment.
//!
//! A lane is one row of the vertical grid. Every leaf occupies one lane and a
//! parent spans the lanes of all its slots, in slot order, so the vertical
//! order of the children in the editor follows their pin order.

use std::ops::RangeInclusive;

/// Child slots of every record with back edges and unresolved references
/// already removed. `None` marks a slot that occupies one empty lane.
#[derive(Debug, Clone)]
pub(super) struct SlotView {
    slots: Vec<Vec<Option<usize>>>,
}

impl SlotView {
    pub(super) fn new(slots: Vec<Vec<Option<usize>>>) -> Self {
        Self { slots }
    }

    pub(super) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(super) fn slots(&self, index: usize) -> &[Option<usize>] {
        &self.slots[index]
    }

    /// Laid-out children of the node at `index`, in slot order.
    pub(super) fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.slots[index].iter().flatten().copied()
    }
}

/// Compute the subtree height of every node reachable from `roots`.
///
/// Heights of nodes not reachable from a root stay `0`. Shared children are
/// computed once. The view must be acyclic.
pub(super) fn subtree_heights(view: &SlotView, roots: &[usize]) -> Vec<usize> {
    let mut heights = vec![0; view.len()];
    let mut stack = Vec::new();

    for &root in roots {
        stack.push((root, false));
        while let Some((index, expanded)) = stack.pop() {
            if heights[index] > 0 {
                continue;
            }
            if !expanded {
                stack.push((index, true));
                stack.extend(
                    view.children(index)
                        .filter(|&child| heights[child] == 0)
                        .map(|child| (child, false)),
                );
                continue;
            }

            let total: usize = view
                .slots(index)
                .iter()
                .map(|slot| match slot {
                    Some(child) => heights[*child].max(1),
                    None => 1,
                })
                .sum();
            heights[index] = total.max(1);
        }
    }

    heights
}

/// Assign an inclusive lane range to every node reachable from `roots`.
///
/// Roots are placed one after another; `region_lanes` empty lanes separate
/// the regions of consecutive roots. A node reached through several parents
/// keeps the range of its last assignment.
pub(super) fn assign_lanes(
    view: &SlotView,
    roots: &[usize],
    heights: &[usize],
    region_lanes: usize,
) -> Vec<Option<RangeInclusive<usize>>> {
    let mut lanes = vec![None; view.len()];
    let mut cursor = 0;

    for (position, &root) in roots.iter().enumerate() {
        if position > 0 {
            cursor += region_lanes;
        }
        assign(view, root, cursor, heights, &mut lanes);
        cursor += heights[root].max(1);
    }

    lanes
}

/// Assign the subtree of `root` downwards from lane `start`.
///
/// Children are visited in slot order, so a node reached twice ends up with
/// the range of its later slot.
fn assign(
    view: &SlotView,
    root: usize,
    start: usize,
    heights: &[usize],
    lanes: &mut [Option<RangeInclusive<usize>>],
) {
    let mut stack = vec![(root, start)];
    let mut children = Vec::new();

    while let Some((index, start)) = stack.pop() {
        lanes[index] = Some(start..=start + heights[index].max(1) - 1);

        let mut cursor = start;
        for &slot in view.slots(index) {
            match slot {
                Some(child) => {
                    children.push((child, cursor));
                    cursor += heights[child].max(1);
                }
                None => cursor += 1,
            }
        }
        stack.extend(children.drain(..).rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_sums_slots() {
        // 0 -> [1, None, 2], 2 -> [3, 4]
        let view = SlotView::new(vec![
            vec![Some(1), None, Some(2)],
            vec![],
            vec![Some(3), Some(4)],
            vec![],
            vec![],
        ]);
        let heights = subtree_heights(&view, &[0]);
        assert_eq!(heights, vec![4, 1, 2, 1, 1]);
    }

    #[test]
    fn test_unreachable_nodes_have_no_height() {
        let view = SlotView::new(vec![vec![], vec![]]);
        let heights = subtree_heights(&view, &[0]);
        assert_eq!(heights, vec![1, 0]);
    }

    #[test]
    fn test_lanes_follow_slot_order() {
        let view = SlotView::new(vec![vec![Some(2), Some(1)], vec![], vec![]]);
        let heights = subtree_heights(&view, &[0]);
        let lanes = assign_lanes(&view, &[0], &heights, 4);
        assert_eq!(lanes[0], Some(0..=1));
        assert_eq!(lanes[2], Some(0..=0));
        assert_eq!(lanes[1], Some(1..=1));
    }

    #[test]
    fn test_root_regions_are_separated() {
        let view = SlotView::new(vec![vec![], vec![Some(2), None], vec![]]);
        let roots = [0, 1];
        let heights = subtree_heights(&view, &roots);
        let lanes = assign_lanes(&view, &roots, &heights, 4);
        assert_eq!(lanes[0], Some(0..=0));
        assert_eq!(lanes[1], Some(5..=6));
        assert_eq!(lanes[2], Some(5..=5));
    }

    #[test]
    fn test_shared_child_keeps_last_assignment() {
        let view = SlotView::new(vec![vec![Some(1), Some(1)], vec![]]);
        let heights = subtree_heights(&view, &[0]);
        let lanes = assign_lanes(&view, &[0], &heights, 4);
        assert_eq!(heights[0], 2);
        assert_eq!(lanes[1], Some(1..=1));
    }

    #[test]
    fn test_deep_chain() {
        let depth = 50_000;
        let mut slots: Vec<Vec<Option<usize>>> =
            (1..depth).map(|child| vec![Some(child)]).collect();
        slots.push(vec![]);
        let view = SlotView::new(slots);

        let heights = subtree_heights(&view, &[0]);
        assert!(heights.iter().all(|&height| height == 1));

        let lanes = assign_lanes(&view, &[0], &heights, 4);
        assert_eq!(lanes[depth - 1], Some(0..=0));
        assert!(lanes.iter().all(|range| range == &Some(0..=0)));
    }

    #[test]
    fn test_diamond_heights_count_shared_child_per_slot() {
        // 0 -> [1, 2], 1 -> [3], 2 -> [3, None]
        let view = SlotView::new(vec![
            vec![Some(1), Some(2)],
            vec![Some(3)],
            vec![Some(3), None],
            vec![],
        ]);
        let heights = subtree_heights(&view, &[0]);
        assert_eq!(heights, vec![3, 1, 2, 1]);

        let lanes = assign_lanes(&view, &[0], &heights, 4);
        assert_eq!(lanes[0], Some(0..=2));
        assert_eq!(lanes[1], Some(0..=0));
        assert_eq!(lanes[2], Some(1..=2));
        assert_eq!(lanes[3], Some(1..=1));
    }
}
