//! Names and identity tokens of every node, assigned before serialization.

use cuegraph_core::{identifier::Guid, semantic::Cue};

use super::context::ConversionContext;

/// Name, identity token and pin ids of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    name: String,
    node_guid: Guid,
    output_pin: Guid,
    input_pins: Vec<Guid>,
}

impl NodeIdentity {
    /// Rendered name of the engine object, e.g. `SoundNodeMixer_0`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_guid(&self) -> Guid {
        self.node_guid
    }

    pub fn output_pin(&self) -> Guid {
        self.output_pin
    }

    /// Input pin ids, one per slot.
    pub fn input_pins(&self) -> &[Guid] {
        &self.input_pins
    }

    /// Returns the input pin id of `slot`.
    pub fn input_pin(&self, slot: usize) -> Option<Guid> {
        self.input_pins.get(slot).copied()
    }
}

/// Editor name of the input pin at `slot`: `Input`, `Input2`, `Input3`, ...
pub fn input_pin_name(slot: usize) -> String {
    if slot == 0 {
        "Input".to_string()
    } else {
        format!("Input{}", slot + 1)
    }
}

/// Identities of all records of a cue, indexed by record index.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    nodes: Vec<NodeIdentity>,
}

impl IdentityTable {
    /// Assign identities to every record in index order.
    ///
    /// The container record is named like any other record but draws no
    /// tokens, since it is never rendered.
    pub fn build(cue: &Cue, context: &mut ConversionContext) -> Self {
        let nodes = cue
            .nodes()
            .iter()
            .map(|node| {
                let name = context.next_name(node.type_tag());
                if node.is_container() {
                    return NodeIdentity {
                        name,
                        node_guid: Guid::ZERO,
                        output_pin: Guid::ZERO,
                        input_pins: Vec::new(),
                    };
                }

                let node_guid = context.next_node_guid();
                let output_pin = context.next_pin();
                let input_pins = (0..node.slot_count()).map(|_| context.next_pin()).collect();

                NodeIdentity {
                    name,
                    node_guid,
                    output_pin,
                    input_pins,
                }
            })
            .collect();

        Self { nodes }
    }

    pub fn get(&self, index: usize) -> Option<&NodeIdentity> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
