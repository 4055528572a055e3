//! Pin cross-references between nodes.
//!
//! Every edge is recorded twice: once on the parent's input pin of the slot,
//! and once on the child's output pin. Output pins of shared children
//! accumulate one entry per referencing slot.

use std::fmt;

use log::debug;

use cuegraph_core::identifier::Guid;

use crate::structure::CueGraph;

use super::identity::IdentityTable;

/// A reference to a pin of another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLink {
    node: usize,
    pin: Guid,
}

impl PinLink {
    pub fn new(node: usize, pin: Guid) -> Self {
        Self { node, pin }
    }

    /// Record index of the linked node.
    pub fn node(&self) -> usize {
        self.node
    }

    pub fn pin(&self) -> Guid {
        self.pin
    }
}

impl fmt::Display for PinLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoundCueGraphNode_{} {},", self.node, self.pin)
    }
}

/// Link lists of every pin, indexed by record index.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    inputs: Vec<Vec<Option<PinLink>>>,
    outputs: Vec<Vec<PinLink>>,
}

impl LinkTable {
    /// Resolve the links of every edge in `graph`.
    ///
    /// Edges are visited parents in index order and slots in order, which is
    /// also the order in which entries appear on shared output pins.
    pub fn build(graph: &CueGraph, identities: &IdentityTable) -> Self {
        let cue = graph.cue();
        let mut inputs: Vec<Vec<Option<PinLink>>> = cue
            .nodes()
            .iter()
            .map(|node| vec![None; node.slot_count()])
            .collect();
        let mut outputs = vec![Vec::new(); cue.len()];

        let mut linked = 0;
        for edge in graph.edges() {
            let (Some(parent), Some(child)) =
                (identities.get(edge.parent), identities.get(edge.child))
            else {
                continue;
            };
            let Some(parent_pin) = parent.input_pin(edge.slot) else {
                continue;
            };

            inputs[edge.parent][edge.slot] = Some(PinLink::new(edge.child, child.output_pin()));
            outputs[edge.child].push(PinLink::new(edge.parent, parent_pin));
            linked += 1;
        }

        debug!(links = linked; "Pin links resolved");

        Self { inputs, outputs }
    }

    /// Link of the input pin `slot` of node `index`, if the slot is connected.
    pub fn input(&self, index: usize, slot: usize) -> Option<PinLink> {
        self.inputs.get(index)?.get(slot).copied().flatten()
    }

    /// Links of the output pin of node `index`.
    pub fn output(&self, index: usize) -> &[PinLink] {
        self.outputs.get(index).map(Vec::as_slice).unwrap_or_default()
    }
}
