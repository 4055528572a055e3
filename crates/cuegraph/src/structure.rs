//! Graph structures built from a parsed cue.
//!
//! The parser produces a flat list of nodes with ordered child slots; this
//! module turns it into a directed graph that the layout engine and the link
//! resolver can traverse.

mod graph;

pub use graph::{CueGraph, Edge, EdgeClasses};
