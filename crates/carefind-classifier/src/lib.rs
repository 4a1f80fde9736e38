//! Domain relevance classification for enriched resources.
//!
//! A [`RelevanceClassifier`] answers a free-text yes/no prompt. The
//! [`RelevanceAdapter`] builds the prompt for a resource, bounds the call
//! with a timeout and turns the answer into a keep/drop decision, failing
//! open on any error.

pub mod adapter;
pub mod error;
pub mod gemini;
pub mod prompt;

use std::future::Future;

pub use adapter::{parse_answer, RelevanceAdapter};
pub use error::ClassifierError;
pub use gemini::GeminiClient;
pub use prompt::{build_prompt, Language};

/// An external text classifier answering a single prompt.
pub trait RelevanceClassifier: Send + Sync {
    /// Returns the raw answer text for `prompt`.
    fn classify(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ClassifierError>> + Send;
}
