//! Analyzer engine: per-file structural index plus rule execution.

pub mod engine;
pub mod index;

pub use engine::analyze_file;
pub use index::{FunctionSpan, LoopSite, StructuralIndex};
