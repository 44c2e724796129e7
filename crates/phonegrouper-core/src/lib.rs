pub mod domain;
pub mod dto;
pub mod error;
pub mod grouping;
pub mod pipeline;
pub mod rules;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use grouping::{group_by_key, link_by_columns};
pub use pipeline::{Pipeline, PipelineConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use rules::*;
