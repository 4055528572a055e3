//! Example: Creating a cue from the semantic model
//!
//! This example demonstrates how to build a cue programmatically using the
//! semantic model types directly, without parsing a JSON export.

use cuegraph::{
    CueGraphBuilder,
    config::{AppConfig, ExportConfig, LayoutConfig},
    semantic::{
        ATTENUATION_TYPE, ChildRef, Cue, CueNode, MIXER_TYPE, NodeKind, WAVE_PLAYER_TYPE,
    },
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building cue from semantic model...\n");

    // Attenuation -> Mixer -> two wave players
    let attenuation = CueNode::new(
        0,
        ATTENUATION_TYPE,
        NodeKind::Attenuation {
            settings: Some("/Game/Audio/Attenuation/Outdoor.Outdoor".to_string()),
        },
        vec![ChildRef::Resolved(1)],
    );
    let mixer = CueNode::new(
        1,
        MIXER_TYPE,
        NodeKind::Mixer {
            input_volumes: vec![1.0, 0.5],
        },
        vec![ChildRef::Resolved(2), ChildRef::Resolved(3)],
    );
    let rain = CueNode::new(
        2,
        WAVE_PLAYER_TYPE,
        NodeKind::WavePlayer {
            asset: Some("/Game/Audio/Rain.Rain".to_string()),
            looping: true,
        },
        vec![],
    );
    let wind = CueNode::new(
        3,
        WAVE_PLAYER_TYPE,
        NodeKind::WavePlayer {
            asset: Some("/Game/Audio/Wind.Wind".to_string()),
            looping: true,
        },
        vec![],
    );

    let cue = Cue::new(
        vec![attenuation, mixer, rain, wind],
        Some("/Game/Audio/Weather.Weather".to_string()),
    );

    println!("Created cue with {} nodes", cue.len());

    // Stable tokens make the output identical on every run
    let config = AppConfig::new(
        LayoutConfig::default(),
        ExportConfig::default().with_stable_tokens(true),
    );
    let builder = CueGraphBuilder::new(config);
    let text = builder.render_text(&cue, true)?;

    println!("{text}");

    Ok(())
}
