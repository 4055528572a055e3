//! Export of a laid-out cue.
//!
//! Exporting happens in two steps. First every node gets its identity (name,
//! identity token, pin ids) and every edge is resolved into pin links; then
//! an [`Exporter`] writes the complete [`Scene`] in one pass.

mod context;
mod identity;
mod links;
mod text;

pub use context::{ConversionContext, TokenSource};
pub use identity::{IdentityTable, NodeIdentity, input_pin_name};
pub use links::{LinkTable, PinLink};
pub use text::TextExporter;

use std::fmt;

use crate::{layout::Layout, structure::CueGraph};

/// Everything known about a cue once identities and links are resolved.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub graph: &'a CueGraph<'a>,
    pub layout: &'a Layout,
    pub identities: &'a IdentityTable,
    pub links: &'a LinkTable,
}

/// Writes a [`Scene`] in some output format.
pub trait Exporter {
    fn export(&self, scene: &Scene<'_>) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Format(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Format(err) => write!(f, "Format error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Format(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Format(err)
    }
}
