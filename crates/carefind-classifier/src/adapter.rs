//! Fail-open relevance decisions on top of a [`RelevanceClassifier`].

use std::time::Duration;

use carefind_core::EnrichedResource;

use crate::error::ClassifierError;
use crate::prompt::{build_prompt, Language};
use crate::RelevanceClassifier;

/// Wraps a classifier with prompt building, a per-call timeout and the
/// fail-open policy: any error, timeout or empty answer keeps the resource.
pub struct RelevanceAdapter<C> {
    classifier: C,
    call_timeout: Duration,
}

impl<C: RelevanceClassifier> RelevanceAdapter<C> {
    pub fn new(classifier: C, call_timeout: Duration) -> Self {
        Self {
            classifier,
            call_timeout,
        }
    }

    /// Returns `false` only when the classifier gave a non-affirmative answer.
    pub async fn is_relevant(&self, resource: &EnrichedResource, language: Language) -> bool {
        let prompt = build_prompt(resource, language);

        let outcome = tokio::time::timeout(self.call_timeout, self.classifier.classify(&prompt))
            .await
            .unwrap_or_else(|_| {
                Err(ClassifierError::Timeout {
                    timeout_ms: self.call_timeout.as_millis(),
                })
            });

        match outcome {
            Ok(answer) => {
                let relevant = parse_answer(&answer);
                if !relevant {
                    tracing::debug!(id = %resource.id, name = %resource.name, "classified as not relevant");
                }
                relevant
            }
            Err(e) => {
                tracing::warn!(
                    id = %resource.id,
                    error = %e,
                    "relevance classification failed; keeping resource"
                );
                true
            }
        }
    }
}

/// Interprets a yes/no answer in any supported language.
///
/// An empty answer counts as relevant. Otherwise the answer is relevant when
/// its first character is `y` ("yes") or `s` ("sí").
#[must_use]
pub fn parse_answer(answer: &str) -> bool {
    let normalised = answer
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    match normalised.chars().next() {
        None => true,
        Some(first) => first == 'y' || first == 's',
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use carefind_core::{CategoryLabel, Coordinate};

    use super::*;

    enum Behaviour {
        Answer(&'static str),
        Fail,
        Hang,
    }

    struct ScriptedClassifier {
        behaviour: Behaviour,
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    impl ScriptedClassifier {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            }
        }
    }

    impl RelevanceClassifier for ScriptedClassifier {
        async fn classify(&self, prompt: &str) -> Result<String, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            match self.behaviour {
                Behaviour::Answer(a) => Ok(a.to_string()),
                Behaviour::Fail => Err(ClassifierError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("no".to_string())
                }
            }
        }
    }

    fn resource() -> EnrichedResource {
        EnrichedResource {
            id: "r1".to_string(),
            name: "City Counseling".to_string(),
            category: CategoryLabel::Counseling,
            location: Coordinate { lat: 1.0, lng: 1.0 },
            address: "5 Oak Ave".to_string(),
            city: "Riverton".to_string(),
            country: "United States".to_string(),
            phone: None,
            website: None,
            hours: None,
        }
    }

    fn adapter(behaviour: Behaviour) -> RelevanceAdapter<ScriptedClassifier> {
        RelevanceAdapter::new(ScriptedClassifier::new(behaviour), Duration::from_millis(100))
    }

    #[test]
    fn affirmative_answers() {
        for answer in ["yes", "Yes.", "  YES\n", "sí", "Si", "\"yes\"", "y"] {
            assert!(parse_answer(answer), "{answer:?} should be relevant");
        }
    }

    #[test]
    fn negative_answers() {
        for answer in ["no", "No.", "NO", "nope", "not related"] {
            assert!(!parse_answer(answer), "{answer:?} should not be relevant");
        }
    }

    #[test]
    fn empty_answer_is_relevant() {
        assert!(parse_answer(""));
        assert!(parse_answer("   "));
    }

    #[tokio::test]
    async fn negative_answer_drops() {
        let a = adapter(Behaviour::Answer("No"));
        assert!(!a.is_relevant(&resource(), Language::English).await);
        assert_eq!(a.classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn error_fails_open() {
        let a = adapter(Behaviour::Fail);
        assert!(a.is_relevant(&resource(), Language::English).await);
    }

    #[tokio::test]
    async fn timeout_fails_open() {
        let a = adapter(Behaviour::Hang);
        assert!(a.is_relevant(&resource(), Language::Spanish).await);
    }

    #[tokio::test]
    async fn prompt_follows_language() {
        let a = adapter(Behaviour::Answer("sí"));
        assert!(a.is_relevant(&resource(), Language::Spanish).await);
        let prompt = a.classifier.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("Nombre: City Counseling"));
    }
}
