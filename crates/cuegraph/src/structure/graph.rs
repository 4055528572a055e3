//! Directed graph of a cue.
//!
//! Every record of the cue is a node of a [`petgraph`] [`DiGraph`], with the
//! node index equal to the record index. Each resolved child slot becomes an
//! edge from the parent to the child whose weight is the slot index.
//!
//! # Roots
//!
//! A root is a renderable node that no other node references. When every
//! renderable node is referenced by someone, the graph is cyclic at the top
//! and the first renderable node becomes the sole root.
//!
//! # Edge classification
//!
//! [`CueGraph::classify_edges`] runs a depth-first search from the roots, then
//! from every remaining renderable node in index order. Edges that close a
//! cycle are reported as back edges; nodes where a search tree starts become
//! layout roots.

use std::collections::HashSet;

use log::{debug, warn};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use cuegraph_core::semantic::{Cue, CueNode};

/// A parent-to-child reference through a specific slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub parent: usize,
    pub slot: usize,
    pub child: usize,
}

/// Result of the depth-first edge classification.
#[derive(Debug, Clone, Default)]
pub struct EdgeClasses {
    back_edges: HashSet<(usize, usize)>,
    layout_roots: Vec<usize>,
}

impl EdgeClasses {
    /// Returns `true` if the edge from `parent` to `child` closes a cycle.
    pub fn is_back_edge(&self, parent: usize, child: usize) -> bool {
        self.back_edges.contains(&(parent, child))
    }

    pub fn back_edge_count(&self) -> usize {
        self.back_edges.len()
    }

    /// Start nodes of the search trees: the roots first, then every node
    /// that was not reachable from an earlier tree, in index order.
    pub fn layout_roots(&self) -> &[usize] {
        &self.layout_roots
    }
}

/// Search state of a node during edge classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    /// On the current search path.
    Open,
    Closed,
}

/// The node graph of a single cue.
#[derive(Debug)]
pub struct CueGraph<'a> {
    cue: &'a Cue,
    graph: DiGraph<usize, usize>,
    roots: Vec<usize>,
}

impl<'a> CueGraph<'a> {
    /// Build the graph of `cue`.
    pub fn new(cue: &'a Cue) -> Self {
        let mut graph = DiGraph::with_capacity(cue.len(), cue.len());
        for node in cue.nodes() {
            graph.add_node(node.index());
        }

        for node in cue.nodes() {
            // `neighbors` yields edges in reverse insertion order, so adding
            // them back to front makes the search follow slot order.
            for (slot, child) in node.children().iter().enumerate().rev() {
                if let Some(child) = child.index() {
                    graph.add_edge(NodeIndex::new(node.index()), NodeIndex::new(child), slot);
                }
            }
        }

        let mut roots: Vec<usize> = cue
            .nodes()
            .iter()
            .filter(|node| !node.is_container())
            .map(CueNode::index)
            .filter(|&index| {
                graph
                    .neighbors_directed(NodeIndex::new(index), Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect();

        if roots.is_empty() {
            if let Some(first) = cue.nodes().iter().find(|node| !node.is_container()) {
                warn!(node = first.index(); "Every node is referenced, using the first node as root");
                roots.push(first.index());
            }
        }

        debug!(nodes = graph.node_count(), edges = graph.edge_count(), roots:?; "Graph built");

        Self { cue, graph, roots }
    }

    pub fn cue(&self) -> &'a Cue {
        self.cue
    }

    /// Returns the node of the record at `index`.
    pub fn node(&self, index: usize) -> Option<&'a CueNode> {
        self.cue.node(index)
    }

    /// Returns the renderable nodes in index order, skipping the container.
    pub fn renderable_nodes(&self) -> impl Iterator<Item = &'a CueNode> + 'a {
        self.cue.nodes().iter().filter(|node| !node.is_container())
    }

    /// Returns the root nodes in index order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn is_root(&self, index: usize) -> bool {
        self.roots.contains(&index)
    }

    /// Returns every edge, parents in index order and slots in order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + 'a {
        self.cue.nodes().iter().flat_map(|node| {
            node.children()
                .iter()
                .enumerate()
                .filter_map(move |(slot, child)| {
                    child.index().map(|child| Edge {
                        parent: node.index(),
                        slot,
                        child,
                    })
                })
        })
    }

    /// Classify edges with a depth-first search.
    ///
    /// The search keeps its own stack of open nodes, so arbitrarily deep
    /// chains are classified without recursion.
    pub fn classify_edges(&self) -> EdgeClasses {
        let starts = self
            .roots
            .iter()
            .copied()
            .chain(self.renderable_nodes().map(CueNode::index));

        let mut visits = vec![Visit::Unseen; self.graph.node_count()];
        let mut back_edges = HashSet::new();
        let mut layout_roots = Vec::new();
        let mut open = Vec::new();

        for start in starts {
            if visits[start] != Visit::Unseen {
                continue;
            }
            visits[start] = Visit::Open;
            layout_roots.push(start);
            open.push((start, self.graph.neighbors(NodeIndex::new(start))));

            while let Some((parent, children)) = open.last_mut() {
                let parent = *parent;
                let Some(child) = children.next() else {
                    visits[parent] = Visit::Closed;
                    open.pop();
                    continue;
                };

                let child = child.index();
                match visits[child] {
                    Visit::Unseen => {
                        visits[child] = Visit::Open;
                        open.push((child, self.graph.neighbors(NodeIndex::new(child))));
                    }
                    Visit::Open => {
                        back_edges.insert((parent, child));
                    }
                    Visit::Closed => {}
                }
            }
        }

        for &(parent, child) in &back_edges {
            warn!(parent, child; "Cycle detected, edge excluded from layout");
        }
        if layout_roots.len() > self.roots.len() {
            debug!(
                extra = layout_roots.len() - self.roots.len();
                "Unreachable nodes laid out as additional roots"
            );
        }

        EdgeClasses {
            back_edges,
            layout_roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use cuegraph_core::semantic::{ChildRef, DELAY_TYPE, NodeKind};

    use super::*;

    fn cue(source: &str) -> Cue {
        cuegraph_parser::parse(source).expect("valid cue")
    }

    #[test]
    fn test_roots_are_unreferenced_nodes() {
        let cue = cue(r#"[
            { "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["A.1", "A.2"] } },
            { "Type": "SoundNodeWavePlayer" },
            { "Type": "SoundNodeWavePlayer" },
            { "Type": "SoundNodeDelay" }
        ]"#);
        let graph = CueGraph::new(&cue);
        assert_eq!(graph.roots(), &[0, 3]);
        assert!(graph.is_root(3));
        assert!(!graph.is_root(1));
    }

    #[test]
    fn test_container_is_never_a_root() {
        let cue = cue(r#"[
            { "Type": "SoundCue" },
            { "Type": "SoundNodeWavePlayer" }
        ]"#);
        let graph = CueGraph::new(&cue);
        assert_eq!(graph.roots(), &[1]);
        assert_eq!(graph.renderable_nodes().count(), 1);
    }

    #[test]
    fn test_fully_cyclic_graph_falls_back_to_first_node() {
        let cue = cue(r#"[
            { "Type": "SoundNodeDelay", "Properties": { "ChildNodes": ["A.1"] } },
            { "Type": "SoundNodeDelay", "Properties": { "ChildNodes": ["A.0"] } }
        ]"#);
        let graph = CueGraph::new(&cue);
        assert_eq!(graph.roots(), &[0]);

        let classes = graph.classify_edges();
        assert!(classes.is_back_edge(1, 0));
        assert!(!classes.is_back_edge(0, 1));
        assert_eq!(classes.layout_roots(), &[0]);
    }

    #[test]
    fn test_edges_in_parent_then_slot_order() {
        let cue = cue(r#"[
            { "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["A.2", "Missing", "A.1"] } },
            { "Type": "SoundNodeWavePlayer" },
            { "Type": "SoundNodeDelay", "Properties": { "ChildNodes": ["A.1"] } }
        ]"#);
        let graph = CueGraph::new(&cue);
        let edges: Vec<_> = graph.edges().map(|e| (e.parent, e.slot, e.child)).collect();
        assert_eq!(edges, vec![(0, 0, 2), (0, 2, 1), (2, 0, 1)]);
    }

    #[test]
    fn test_self_loop_is_back_edge() {
        let cue = cue(r#"[
            { "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["A.0", "A.1"] } },
            { "Type": "SoundNodeWavePlayer" }
        ]"#);
        let graph = CueGraph::new(&cue);
        let classes = graph.classify_edges();
        assert!(classes.is_back_edge(0, 0));
        assert_eq!(classes.back_edge_count(), 1);
    }

    #[test]
    fn test_unreachable_cycle_adds_layout_root() {
        let cue = cue(r#"[
            { "Type": "SoundNodeWavePlayer" },
            { "Type": "SoundNodeDelay", "Properties": { "ChildNodes": ["A.2"] } },
            { "Type": "SoundNodeDelay", "Properties": { "ChildNodes": ["A.1"] } }
        ]"#);
        let graph = CueGraph::new(&cue);
        assert_eq!(graph.roots(), &[0]);

        let classes = graph.classify_edges();
        assert_eq!(classes.layout_roots(), &[0, 1]);
        assert!(classes.is_back_edge(2, 1));
    }

    #[test]
    fn test_acyclic_graph_has_no_back_edges() {
        let cue = cue(r#"[
            { "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["A.1", "A.1"] } },
            { "Type": "SoundNodeWavePlayer" }
        ]"#);
        let classes = CueGraph::new(&cue).classify_edges();
        assert_eq!(classes.back_edge_count(), 0);
        assert_eq!(classes.layout_roots(), &[0]);
    }

    #[test]
    fn test_deep_chain_is_classified() {
        let depth = 20_000;
        let nodes = (0..depth)
            .map(|index| {
                let children = if index + 1 < depth {
                    vec![ChildRef::Resolved(index + 1)]
                } else {
                    vec![ChildRef::Resolved(0)]
                };
                CueNode::new(index, DELAY_TYPE, NodeKind::Generic, children)
            })
            .collect();
        let cue = Cue::new(nodes, None);
        let graph = CueGraph::new(&cue);

        let classes = graph.classify_edges();
        assert_eq!(classes.layout_roots(), &[0]);
        assert_eq!(classes.back_edge_count(), 1);
        assert!(classes.is_back_edge(depth - 1, 0));
    }
}
