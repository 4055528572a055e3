//! Cuegraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the SoundCue parser
//! and the graph converter. It includes:
//!
//! - **Identifiers**: 128-bit identity tokens for nodes and pins ([`identifier::Guid`])
//! - **Geometry**: Integer editor coordinates ([`geometry::Point`])
//! - **Semantic**: The typed SoundCue node model ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
