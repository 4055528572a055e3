//! SoundCueGraph clipboard text.
//!
//! Each renderable record becomes one `SoundCueGraphNode` block holding the
//! engine sound node, its canvas position, comment, identity token and pins.
//! All links are known before the first block is written, so every block is
//! written exactly once.

use std::fmt::Write;

use log::debug;

use cuegraph_core::{
    identifier::Guid,
    semantic::{CueNode, EnvelopeSettings, NodeKind, RichCurve},
};
use cuegraph_parser::asset::short_name;

use crate::config::ExportConfig;

use super::{
    Error, Exporter, Scene,
    identity::{NodeIdentity, input_pin_name},
};

const GRAPH_NODE_CLASS: &str = "/Script/AudioEditor.SoundCueGraphNode";
const ENGINE_NAMESPACE: &str = "/Script/Engine";
const PERSISTENT_GUID: Guid = Guid::ZERO;

/// Writes a [`Scene`] as SoundCueGraph text.
#[derive(Debug, Clone)]
pub struct TextExporter {
    base_path: String,
    attenuation_fallback: String,
}

impl TextExporter {
    /// Create an exporter for a cue exported at `base_path`, falling back to
    /// the configured default when the cue names none.
    pub fn new(config: &ExportConfig, base_path: Option<&str>) -> Self {
        Self {
            base_path: base_path.unwrap_or(config.default_base_path()).to_string(),
            attenuation_fallback: config.attenuation_fallback().to_string(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn engine_path(&self, index: usize, type_tag: &str, name: &str) -> String {
        format!(
            "{ENGINE_NAMESPACE}.{type_tag}'{}:SoundCueGraph_0.SoundCueGraphNode_{index}.{name}'",
            self.base_path
        )
    }

    fn write_node(
        &self,
        out: &mut String,
        scene: &Scene<'_>,
        node: &CueNode,
        identity: &NodeIdentity,
    ) -> Result<(), Error> {
        let index = node.index();
        let type_tag = node.type_tag();
        let name = identity.name();
        let engine_path = self.engine_path(index, type_tag, name);

        writeln!(
            out,
            "Begin Object Class={GRAPH_NODE_CLASS} Name=\"SoundCueGraphNode_{index}\" \
             ExportPath=\"{GRAPH_NODE_CLASS}'{}:SoundCueGraph_0.SoundCueGraphNode_{index}'\"",
            self.base_path
        )?;
        writeln!(
            out,
            "   Begin Object Class={ENGINE_NAMESPACE}.{type_tag} Name=\"{name}\" ExportPath=\"{engine_path}\">"
        )?;
        writeln!(out, "   End Object")?;
        writeln!(out, "   Begin Object Name=\"{name}\" ExportPath=\"{engine_path}\"")?;

        self.write_properties(out, node.kind())?;
        writeln!(
            out,
            "      GraphNode=\"{GRAPH_NODE_CLASS}'SoundCueGraphNode_{index}'\""
        )?;

        for (slot, child) in node.children().iter().enumerate() {
            let child_path = child.index().and_then(|child| {
                let child_node = scene.graph.node(child)?;
                let child_identity = scene.identities.get(child)?;
                Some(self.engine_path(child, child_node.type_tag(), child_identity.name()))
            });
            match child_path {
                Some(path) => writeln!(out, "      ChildNodes({slot})=\"{path}\"")?,
                None => writeln!(out, "      ChildNodes({slot})=None")?,
            }
        }

        writeln!(out, "   End Object")?;
        writeln!(out, "   SoundNode=\"{ENGINE_NAMESPACE}.{type_tag}'{name}'\"")?;

        let position = scene.layout.position(index);
        writeln!(out, "   NodePosX={}", position.x())?;
        writeln!(out, "   NodePosY={}", position.y())?;

        let comment = node_comment(node, scene.graph.is_root(index));
        writeln!(out, "   bCommentBubbleVisible={}", bool_text(!comment.is_empty()))?;
        writeln!(out, "   NodeComment=\"{comment}\"")?;
        writeln!(out, "   NodeGuid={}", identity.node_guid())?;

        let output_links = link_list(scene.links.output(index).iter());
        writeln!(
            out,
            "   CustomProperties Pin (PinId={},PinName=\"Output\",Direction=\"EGPD_Output\",\
             PinType.PinCategory=\"SoundNode\",PinType.PinSubCategory=\"\",\
             LinkedTo=({output_links}),PersistentGuid={PERSISTENT_GUID},)",
            identity.output_pin()
        )?;

        for (slot, pin) in identity.input_pins().iter().enumerate() {
            let input_links = link_list(scene.links.input(index, slot).iter());
            writeln!(
                out,
                "   CustomProperties Pin (PinId={pin},PinName=\"{}\",PinFriendlyName=\" \",\
                 PinType.PinCategory=\"SoundNode\",PinType.PinSubCategory=\"\",\
                 LinkedTo=({input_links}),PersistentGuid={PERSISTENT_GUID},)",
                input_pin_name(slot)
            )?;
        }

        writeln!(out, "End Object")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_properties(&self, out: &mut String, kind: &NodeKind) -> Result<(), Error> {
        match kind {
            NodeKind::WavePlayer { asset, looping } => {
                match asset {
                    Some(asset) => writeln!(out, "      SoundWaveAssetPtr=\"{asset}\"")?,
                    None => writeln!(
                        out,
                        "      /* SoundWaveAssetPtr unresolved for this WavePlayer */"
                    )?,
                }
                writeln!(out, "      bLooping={}", bool_text(*looping))?;
            }
            NodeKind::Attenuation { settings } => {
                let path = settings.as_deref().unwrap_or(self.attenuation_fallback.as_str());
                writeln!(
                    out,
                    "      AttenuationSettings=\"{ENGINE_NAMESPACE}.SoundAttenuation'{path}'\""
                )?;
            }
            NodeKind::Mixer { input_volumes } => {
                for (slot, volume) in input_volumes.iter().enumerate() {
                    writeln!(out, "      InputVolume({slot})={volume:.6}")?;
                }
            }
            NodeKind::Modulator {
                pitch_min,
                pitch_max,
                volume_min,
                volume_max,
            } => {
                let fields = [
                    ("PitchMin", pitch_min),
                    ("PitchMax", pitch_max),
                    ("VolumeMin", volume_min),
                    ("VolumeMax", volume_max),
                ];
                for (field, value) in fields {
                    if let Some(value) = value {
                        writeln!(out, "      {field}={value:.6}")?;
                    }
                }
            }
            NodeKind::Enveloper(settings) => write_envelope(out, settings)?,
            NodeKind::Delay {
                delay_min,
                delay_max,
            } => {
                writeln!(out, "      DelayMin={delay_min:.6}")?;
                writeln!(out, "      DelayMax={delay_max:.6}")?;
            }
            NodeKind::Random { weights } => {
                for (slot, weight) in weights.iter().enumerate() {
                    writeln!(out, "      Weights({slot})={weight:.6}")?;
                }
            }
            NodeKind::Container | NodeKind::Generic => {}
        }
        Ok(())
    }
}

impl Exporter for TextExporter {
    fn export(&self, scene: &Scene<'_>) -> Result<String, Error> {
        let mut out = String::new();
        let mut blocks = 0;

        for node in scene.graph.renderable_nodes() {
            let identity = scene.identities.get(node.index()).ok_or_else(|| {
                Error::Render(format!("node {} has no identity", node.index()))
            })?;
            self.write_node(&mut out, scene, node, identity)?;
            blocks += 1;
        }

        debug!(blocks, bytes = out.len(); "Text exported");
        Ok(out)
    }
}

fn write_envelope(out: &mut String, settings: &EnvelopeSettings) -> Result<(), Error> {
    writeln!(out, "      LoopStart={:.6}", settings.loop_start)?;
    writeln!(out, "      LoopEnd={:.6}", settings.loop_end)?;
    writeln!(out, "      DurationAfterLoop={:.6}", settings.duration_after_loop)?;
    writeln!(out, "      LoopCount={}", settings.loop_count)?;
    writeln!(out, "      bLoopIndefinitely={}", bool_text(settings.loop_indefinitely))?;
    writeln!(out, "      bLoop={}", bool_text(settings.looping))?;
    // Empty curves keep the engine defaults.
    if !settings.volume_curve.is_empty() {
        writeln!(out, "      VolumeCurve={}", curve_text(&settings.volume_curve))?;
    }
    if !settings.pitch_curve.is_empty() {
        writeln!(out, "      PitchCurve={}", curve_text(&settings.pitch_curve))?;
    }
    Ok(())
}

fn curve_text(curve: &RichCurve) -> String {
    let keys: Vec<String> = curve
        .keys()
        .iter()
        .map(|key| {
            format!(
                "(InterpMode={},TangentMode={},TangentWeightMode={},Time={:.6},Value={:.6},\
                 ArriveTangent={:.6},ArriveTangentWeight={:.6},LeaveTangent={:.6},\
                 LeaveTangentWeight={:.6})",
                key.interp_mode,
                key.tangent_mode,
                key.tangent_weight_mode,
                key.time,
                key.value,
                key.arrive_tangent,
                key.arrive_tangent_weight,
                key.leave_tangent,
                key.leave_tangent_weight
            )
        })
        .collect();
    format!("(EditorCurveData=(Keys=({})))", keys.join(","))
}

/// Comment shown above a node in the editor.
///
/// Asset-referencing nodes show the short name of their asset, roots show
/// `Output`.
fn node_comment(node: &CueNode, is_root: bool) -> &str {
    if node.kind().references_asset() {
        return node.kind().asset_path().map(short_name).unwrap_or_default();
    }
    if is_root { "Output" } else { "" }
}

fn link_list<'a>(links: impl Iterator<Item = &'a super::PinLink>) -> String {
    links.map(ToString::to_string).collect()
}

fn bool_text(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
