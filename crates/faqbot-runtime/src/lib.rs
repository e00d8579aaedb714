//! Faqbot Runtime: the FAQ creation pipeline.
//!
//! One code path serves every create variant: raw-command parsing and the
//! category-table lookup are switched by `PipelineOptions`.

pub mod classify;
pub mod orchestrator;
pub mod types;

pub use classify::resolve_category;
pub use orchestrator::{confirmation_message, FaqPipeline};
pub use types::*;
