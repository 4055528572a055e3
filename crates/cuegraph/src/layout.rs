//! Layout of the cue graph on the editor canvas.
//!
//! The engine places roots in the rightmost column and every child one column
//! further left per level of depth. Vertically, each leaf gets one lane and a
//! parent is centered on the lanes of its subtree.
//!
//! The pipeline is:
//!
//! 1. Classify edges; back edges are laid out like unresolved slots
//! 2. Compute subtree heights in lanes
//! 3. Assign lane ranges per layout root, separated by a region gap
//! 4. Compute depth as the longest distance from a layout root
//! 5. Convert depth and lanes to positions
//! 6. Resolve vertical collisions per column
//! 7. Recenter vertically around `0`

mod lanes;
mod placement;

use log::{debug, info};

use cuegraph_core::geometry::Point;

use crate::{config::LayoutConfig, structure::CueGraph};

use lanes::SlotView;
use placement::LaneScale;

/// Layout data of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLayout {
    subtree_height: usize,
    lane_start: usize,
    lane_end: usize,
    depth: usize,
    position: Point,
}

impl NodeLayout {
    /// Number of lanes the subtree of this node occupies.
    pub fn subtree_height(&self) -> usize {
        self.subtree_height
    }

    /// First lane of the node's range.
    pub fn lane_start(&self) -> usize {
        self.lane_start
    }

    /// Last lane of the node's range, inclusive.
    pub fn lane_end(&self) -> usize {
        self.lane_end
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// The computed layout of a cue, indexed by record index.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    nodes: Vec<Option<NodeLayout>>,
    max_depth: usize,
}

impl Layout {
    /// Layout of the record at `index`; `None` for the container.
    pub fn get(&self, index: usize) -> Option<&NodeLayout> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    /// Position of the record at `index`, the origin when it has no layout.
    pub fn position(&self, index: usize) -> Point {
        self.get(index).map(NodeLayout::position).unwrap_or_default()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Iterate over laid-out nodes with their record index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &NodeLayout)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.as_ref().map(|node| (index, node)))
    }
}

/// Computes [`Layout`]s.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    x_step: i64,
    y_step: i64,
    region_lanes: usize,
    min_gap: i64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// Create an engine from layout settings.
    ///
    /// The settings must have passed [`crate::config::AppConfig::validate`].
    pub fn new(config: &LayoutConfig) -> Self {
        let y_step = config.y_step().max(1);
        let region_lanes = (config.region_gap().max(0) as f64 / y_step as f64).ceil() as usize;
        let min_gap = placement::round_half_up(y_step as f64 * config.min_gap_ratio());

        Self {
            x_step: config.x_step(),
            y_step,
            region_lanes,
            min_gap,
        }
    }

    /// Empty lanes between the regions of consecutive roots.
    pub fn region_lanes(&self) -> usize {
        self.region_lanes
    }

    /// Minimum vertical distance between nodes of one column.
    pub fn min_gap(&self) -> i64 {
        self.min_gap
    }

    /// Calculate the layout of every renderable node of `graph`.
    pub fn calculate(&self, graph: &CueGraph) -> Layout {
        let cue = graph.cue();
        let classes = graph.classify_edges();

        let view = SlotView::new(
            cue.nodes()
                .iter()
                .map(|node| {
                    node.children()
                        .iter()
                        .map(|child| {
                            child
                                .index()
                                .filter(|&target| !classes.is_back_edge(node.index(), target))
                        })
                        .collect()
                })
                .collect(),
        );

        let roots = classes.layout_roots();
        info!(roots = roots.len(), back_edges = classes.back_edge_count(); "Calculating layout");

        let heights = lanes::subtree_heights(&view, roots);
        let lane_ranges = lanes::assign_lanes(&view, roots, &heights, self.region_lanes);
        let depths = placement::depths(&view, roots);

        let laid_out: Vec<usize> = lane_ranges
            .iter()
            .enumerate()
            .filter_map(|(index, range)| range.as_ref().map(|_| index))
            .collect();

        let max_depth = laid_out.iter().map(|&i| depths[i]).max().unwrap_or(0);
        let min_lane = lane_ranges.iter().flatten().map(|r| *r.start()).min().unwrap_or(0);
        let max_lane = lane_ranges.iter().flatten().map(|r| *r.end()).max().unwrap_or(0);
        let scale = LaneScale::new(min_lane, max_lane, self.y_step);

        let mut positions: Vec<(usize, Point)> = laid_out
            .iter()
            .filter_map(|&index| {
                let range = lane_ranges[index].as_ref()?;
                let x = (max_depth - depths[index]) as i64 * self.x_step;
                let y = scale.span_to_y(*range.start(), *range.end());
                Some((index, Point::new(x, y)))
            })
            .collect();

        placement::resolve_collisions(&mut positions, self.min_gap);
        placement::recenter(&mut positions);

        let mut nodes = vec![None; cue.len()];
        for (index, position) in positions {
            if let Some(range) = &lane_ranges[index] {
                nodes[index] = Some(NodeLayout {
                    subtree_height: heights[index].max(1),
                    lane_start: *range.start(),
                    lane_end: *range.end(),
                    depth: depths[index],
                    position,
                });
            }
        }

        debug!(nodes = laid_out.len(), max_depth; "Layout calculated");

        Layout { nodes, max_depth }
    }
}
