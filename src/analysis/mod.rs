//! Analysis layer: structural feature extraction and similarity scoring.

pub mod similarity;
pub mod structure;

pub use similarity::similarity;
pub use structure::{LoopKind, StructuralFeatures};
