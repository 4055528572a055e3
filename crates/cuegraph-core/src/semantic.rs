//! Semantic model of a SoundCue node graph.
//!
//! The parser turns the loosely typed JSON property bags of an export into
//! this model: one [`CueNode`] per record, each carrying a closed
//! [`NodeKind`] with named fields and an ordered list of child slots.
//!
//! Record indices are the identity of a node for the duration of one
//! conversion, so a [`Cue`] always holds exactly one node per input record,
//! including the top-level container that is never rendered.

/// Type tag of the top-level SoundCue container record.
pub const CONTAINER_TYPE: &str = "SoundCue";
/// Type tag of the wave player node.
pub const WAVE_PLAYER_TYPE: &str = "SoundNodeWavePlayer";
/// Type tag of the attenuation node.
pub const ATTENUATION_TYPE: &str = "SoundNodeAttenuation";
/// Type tag of the mixer node.
pub const MIXER_TYPE: &str = "SoundNodeMixer";
/// Type tag of the modulator node.
pub const MODULATOR_TYPE: &str = "SoundNodeModulator";
/// Type tag of the enveloper node.
pub const ENVELOPER_TYPE: &str = "SoundNodeEnveloper";
/// Type tag of the delay node.
pub const DELAY_TYPE: &str = "SoundNodeDelay";
/// Type tag of the random selection node.
pub const RANDOM_TYPE: &str = "SoundNodeRandom";
/// Type tag used for records that declare no type at all.
pub const UNKNOWN_TYPE: &str = "SoundNodeUnknown";

/// A single child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildRef {
    /// The slot points at the record with this index.
    Resolved(usize),
    /// The slot reference could not be mapped to a renderable record.
    Unresolved,
}

impl ChildRef {
    /// Returns the target record index, if the slot is resolved.
    pub fn index(self) -> Option<usize> {
        match self {
            ChildRef::Resolved(index) => Some(index),
            ChildRef::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, ChildRef::Resolved(_))
    }
}

/// A key of a rich curve, as stored in an enveloper's volume and pitch curves.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveKey {
    pub interp_mode: String,
    pub tangent_mode: String,
    pub tangent_weight_mode: String,
    pub time: f64,
    pub value: f64,
    pub arrive_tangent: f64,
    pub arrive_tangent_weight: f64,
    pub leave_tangent: f64,
    pub leave_tangent_weight: f64,
}

impl Default for CurveKey {
    fn default() -> Self {
        Self {
            interp_mode: "RCIM_Linear".to_string(),
            tangent_mode: "RCTM_Auto".to_string(),
            tangent_weight_mode: "RCTWM_WeightedNone".to_string(),
            time: 0.0,
            value: 0.0,
            arrive_tangent: 0.0,
            arrive_tangent_weight: 0.0,
            leave_tangent: 0.0,
            leave_tangent_weight: 0.0,
        }
    }
}

/// An ordered, piecewise curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichCurve {
    keys: Vec<CurveKey>,
}

impl RichCurve {
    pub fn new(keys: Vec<CurveKey>) -> Self {
        Self { keys }
    }

    /// Returns the keys in their declared order.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Loop and curve settings of an enveloper node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeSettings {
    pub loop_start: f64,
    pub loop_end: f64,
    pub duration_after_loop: f64,
    pub loop_count: i64,
    pub loop_indefinitely: bool,
    pub looping: bool,
    pub volume_curve: RichCurve,
    pub pitch_curve: RichCurve,
}

/// The category of a node together with the properties rendered for it.
///
/// Every supported node category has its own variant with named fields;
/// anything else is [`NodeKind::Generic`] and renders only the mandatory
/// lines of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plays an external sound wave asset.
    WavePlayer {
        /// Resolved asset path, `None` when no candidate property matched.
        asset: Option<String>,
        looping: bool,
    },
    /// Applies an external attenuation settings asset.
    Attenuation {
        /// Resolved settings path, `None` when no candidate property matched.
        settings: Option<String>,
    },
    /// Mixes its inputs with per-slot volumes.
    Mixer { input_volumes: Vec<f64> },
    /// Randomizes pitch and volume.
    Modulator {
        pitch_min: Option<f64>,
        pitch_max: Option<f64>,
        volume_min: Option<f64>,
        volume_max: Option<f64>,
    },
    /// Applies volume and pitch envelopes.
    Enveloper(Box<EnvelopeSettings>),
    /// Delays playback by a random amount.
    Delay { delay_min: f64, delay_max: f64 },
    /// Picks one of its inputs by weight.
    Random { weights: Vec<f64> },
    /// The top-level SoundCue record. It has no role in the pin graph and is
    /// never rendered.
    Container,
    /// Any other node type.
    Generic,
}

impl NodeKind {
    /// Returns `true` for node kinds that reference an external asset.
    pub fn references_asset(&self) -> bool {
        matches!(
            self,
            NodeKind::WavePlayer { .. } | NodeKind::Attenuation { .. }
        )
    }

    /// Returns the resolved external asset path, if this kind has one.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            NodeKind::WavePlayer { asset, .. } => asset.as_deref(),
            NodeKind::Attenuation { settings } => settings.as_deref(),
            _ => None,
        }
    }
}

/// One record of the export, typed and with its child slots resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CueNode {
    index: usize,
    type_tag: String,
    kind: NodeKind,
    children: Vec<ChildRef>,
}

impl CueNode {
    pub fn new(
        index: usize,
        type_tag: impl Into<String>,
        kind: NodeKind,
        children: Vec<ChildRef>,
    ) -> Self {
        Self {
            index,
            type_tag: type_tag.into(),
            kind,
            children,
        }
    }

    /// Index of the record in the input sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The engine class name of the node, e.g. `SoundNodeMixer`.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Child slots in declared order.
    pub fn children(&self) -> &[ChildRef] {
        &self.children
    }

    /// Number of input pins of the node: one per declared slot, at least one.
    pub fn slot_count(&self) -> usize {
        self.children.len().max(1)
    }

    /// Returns `true` for the top-level container record.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container)
    }
}

/// A fully parsed SoundCue export.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    nodes: Vec<CueNode>,
    base_path: Option<String>,
}

impl Cue {
    /// Creates a new cue.
    ///
    /// # Arguments
    ///
    /// * `nodes` - One node per input record, in record order.
    /// * `base_path` - Export path of the SoundCue asset, if the export names it.
    pub fn new(nodes: Vec<CueNode>, base_path: Option<String>) -> Self {
        Self { nodes, base_path }
    }

    pub fn nodes(&self) -> &[CueNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&CueNode> {
        self.nodes.get(index)
    }

    /// Number of records, the container included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Export path of the SoundCue asset as found in the export.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }
}
