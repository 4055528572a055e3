//! Cuegraph - Convert SoundCue JSON exports into SoundCueGraph editor text.
//!
//! Parsing, layout, and text export for SoundCue node graphs. The input is
//! the flat record list of a SoundCue export, where nodes reference their
//! children by a trailing record index; the output is the clipboard text the
//! audio editor pastes as a laid-out, fully linked node graph.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use cuegraph_core::{geometry, identifier, semantic};

pub use error::CueGraphError;

use log::{debug, info, trace};
use serde_json::Value;

use config::AppConfig;
use export::{ConversionContext, Exporter, IdentityTable, LinkTable, Scene, TextExporter};
use layout::LayoutEngine;
use structure::CueGraph;

/// Builder for parsing and rendering SoundCue graphs.
///
/// This provides an API for processing SoundCue exports through parsing,
/// layout, and export stages.
///
/// # Examples
///
/// ```rust
/// use cuegraph::{CueGraphBuilder, config::AppConfig};
///
/// let source = r#"[
///     { "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["Cue.1"] } },
///     { "Type": "SoundNodeWavePlayer" }
/// ]"#;
///
/// let builder = CueGraphBuilder::new(AppConfig::default());
///
/// // Parse source to semantic model
/// let cue = builder.parse(source).expect("Failed to parse");
///
/// // Render semantic model to editor text
/// let text = builder.render_text(&cue, true).expect("Failed to render");
/// assert_eq!(text.matches("Begin Object Class=/Script/AudioEditor").count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CueGraphBuilder {
    config: AppConfig,
}

impl CueGraphBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse the JSON text of a SoundCue export into a semantic cue.
    ///
    /// # Errors
    ///
    /// Returns `CueGraphError::Parse` if the text is not valid JSON or does not
    /// hold a non-empty list of records.
    pub fn parse(&self, source: &str) -> Result<semantic::Cue, CueGraphError> {
        info!("Parsing cue");

        let cue = cuegraph_parser::parse(source)
            .map_err(|err| CueGraphError::new_parse_error(err, source))?;

        debug!(nodes = cue.len(); "Cue parsed successfully");
        trace!(cue:?; "Parsed cue");

        Ok(cue)
    }

    /// Parse an already decoded SoundCue export.
    ///
    /// # Errors
    ///
    /// Returns `CueGraphError::Parse` if the document does not hold a
    /// non-empty list of records. The attached source is the document
    /// re-serialized as JSON.
    pub fn parse_value(&self, document: &Value) -> Result<semantic::Cue, CueGraphError> {
        info!("Parsing cue document");

        let cue = cuegraph_parser::parse_value(document)
            .map_err(|err| CueGraphError::new_parse_error(err, document.to_string()))?;

        debug!(nodes = cue.len(); "Cue parsed successfully");
        Ok(cue)
    }

    /// Render a semantic cue to SoundCueGraph text.
    ///
    /// # Arguments
    ///
    /// * `cue` - A parsed cue
    /// * `include_identity_tokens` - Emit a generated `NodeGuid` per node;
    ///   when `false` every `NodeGuid` is zero
    ///
    /// # Errors
    ///
    /// Returns `CueGraphError::Layout` for an invalid layout configuration and
    /// `CueGraphError::Export` if the text cannot be written.
    pub fn render_text(
        &self,
        cue: &semantic::Cue,
        include_identity_tokens: bool,
    ) -> Result<String, CueGraphError> {
        self.config.validate().map_err(CueGraphError::Layout)?;

        info!(nodes = cue.len(); "Building cue graph");
        let graph = CueGraph::new(cue);

        let engine = LayoutEngine::new(self.config.layout());
        let layout = engine.calculate(&graph);
        info!(max_depth = layout.max_depth(); "Layout calculated");

        let export_config = self.config.export();
        let mut context = ConversionContext::from_config(export_config, include_identity_tokens);
        let identities = IdentityTable::build(cue, &mut context);
        let links = LinkTable::build(&graph, &identities);

        let scene = Scene {
            graph: &graph,
            layout: &layout,
            identities: &identities,
            links: &links,
        };
        let exporter = TextExporter::new(export_config, cue.base_path());
        let text = exporter.export(&scene)?;

        info!(bytes = text.len(); "Text rendered successfully");
        Ok(text)
    }
}

/// Convert a decoded SoundCue export with the default configuration.
///
/// # Errors
///
/// Returns an input error when `records` is not a non-empty list of records.
///
/// # Examples
///
/// ```rust
/// let records = serde_json::json!([{ "Type": "SoundNodeAttenuation" }]);
/// let text = cuegraph::convert(&records, false).expect("Failed to convert");
/// assert!(text.contains("NodeGuid=00000000000000000000000000000000"));
/// ```
pub fn convert(records: &Value, include_identity_tokens: bool) -> Result<String, CueGraphError> {
    let builder = CueGraphBuilder::default();
    let cue = builder.parse_value(records)?;
    builder.render_text(&cue, include_identity_tokens)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn stable_builder() -> CueGraphBuilder {
        let mut config = AppConfig::default();
        config.export_mut().set_stable_tokens(true);
        CueGraphBuilder::new(config)
    }

    #[test]
    fn test_single_attenuation_block() {
        let builder = stable_builder();
        let cue = builder
            .parse_value(&json!([{ "Type": "SoundNodeAttenuation" }]))
            .expect("parse");
        let text = builder.render_text(&cue, true).expect("render");

        let expected = concat!(
            "Begin Object Class=/Script/AudioEditor.SoundCueGraphNode Name=\"SoundCueGraphNode_0\" ",
            "ExportPath=\"/Script/AudioEditor.SoundCueGraphNode'/Game/NewSoundCue.NewSoundCue:SoundCueGraph_0.SoundCueGraphNode_0'\"\n",
            "   Begin Object Class=/Script/Engine.SoundNodeAttenuation Name=\"SoundNodeAttenuation_0\" ",
            "ExportPath=\"/Script/Engine.SoundNodeAttenuation'/Game/NewSoundCue.NewSoundCue:SoundCueGraph_0.SoundCueGraphNode_0.SoundNodeAttenuation_0'\">\n",
            "   End Object\n",
            "   Begin Object Name=\"SoundNodeAttenuation_0\" ",
            "ExportPath=\"/Script/Engine.SoundNodeAttenuation'/Game/NewSoundCue.NewSoundCue:SoundCueGraph_0.SoundCueGraphNode_0.SoundNodeAttenuation_0'\"\n",
            "      AttenuationSettings=\"/Script/Engine.SoundAttenuation'/Game/Sounds/Attenuation/Default_Attenuation.Default_Attenuation'\"\n",
            "      GraphNode=\"/Script/AudioEditor.SoundCueGraphNode'SoundCueGraphNode_0'\"\n",
            "   End Object\n",
            "   SoundNode=\"/Script/Engine.SoundNodeAttenuation'SoundNodeAttenuation_0'\"\n",
            "   NodePosX=0\n",
            "   NodePosY=0\n",
            "   bCommentBubbleVisible=False\n",
            "   NodeComment=\"\"\n",
            "   NodeGuid=00000000000000000000000000000001\n",
            "   CustomProperties Pin (PinId=00000000000000000000000000000002,PinName=\"Output\",",
            "Direction=\"EGPD_Output\",PinType.PinCategory=\"SoundNode\",PinType.PinSubCategory=\"\",",
            "LinkedTo=(),PersistentGuid=00000000000000000000000000000000,)\n",
            "   CustomProperties Pin (PinId=00000000000000000000000000000003,PinName=\"Input\",",
            "PinFriendlyName=\" \",PinType.PinCategory=\"SoundNode\",PinType.PinSubCategory=\"\",",
            "LinkedTo=(),PersistentGuid=00000000000000000000000000000000,)\n",
            "End Object\n",
            "\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_stable_mode_is_reproducible() {
        let builder = stable_builder();
        let cue = builder
            .parse(r#"[{ "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["A.1"] } }, { "Type": "SoundNodeWavePlayer" }]"#)
            .expect("parse");
        let first = builder.render_text(&cue, true).expect("render");
        let second = builder.render_text(&cue, true).expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_layout_config_is_rejected() {
        let config = AppConfig::new(
            config::LayoutConfig::new(420, 0, 800, 0.7),
            config::ExportConfig::default(),
        );
        let builder = CueGraphBuilder::new(config);
        let cue = builder.parse("[{}]").expect("parse");
        assert!(matches!(builder.render_text(&cue, true), Err(CueGraphError::Layout(_))));
    }

    #[test]
    fn test_convert_rejects_empty_input() {
        let err = convert(&json!([]), true).unwrap_err();
        assert!(matches!(err, CueGraphError::Parse { .. }));
    }
}
