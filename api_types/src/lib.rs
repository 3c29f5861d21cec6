//! API Surface IR Definitions
//!
//! This crate contains the node types and registry for the intermediate
//! representation of a remote API surface. It provides pure data structures
//! built by the descriptor/document translators and consumed by the
//! resolution passes and the emission layer, without any file I/O or code
//! generation logic.

pub mod model;
pub mod types;

// Re-export commonly used types at the crate root
pub use model::*;
pub use types::*;
