//! The nearby-resource pipeline: aggregate, resolve, rank.

pub mod error;
pub mod pipeline;
pub mod rank;
pub mod session;

pub use error::SearchError;
pub use pipeline::{find_nearby_resources, PipelineOptions};
pub use rank::{rank, RankOptions, RelevanceCheck};
pub use session::{RequestToken, SearchSession};
