//! hyperdoc: a typed hypermedia (Siren) document engine.
//!
//! ## Crate layout
//! - `core`: documents, references, key producers, route registry,
//!   relation dictionaries, query codec, and navigation synthesis.
//! - `render`: the Siren renderer turning a document graph into the
//!   wire format.
//!
//! The `prelude` module mirrors the vocabulary used when declaring
//! documents; the renderer is imported separately.

pub use hyperdoc_core as core;

pub mod render;

pub use render::{RenderError, Renderer};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::render::Renderer;
}
