//! High-level engine facade wiring scanner, store, and configuration
//!
//! One engine per session. All scanning, correlation, and index mutation run
//! as non-overlapping steps on the caller's thread; the only async seam is
//! the backend request in [`ReviewEngine::regenerate`]. Overlapping triggers
//! (e.g. rapid successive saves) are expected to be serialized by the
//! calling layer.

use crate::annotate;
use crate::backend::ReviewBackend;
use crate::config::ReviewConfig;
use crate::error::{BackendError, LensError};
use crate::scanner::FunctionScanner;
use crate::store::ReviewIndex;
use crate::types::{Annotation, FunctionOccurrence, ReviewRecord, ReviewRequest};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Main entry point for scanning, annotating, and recording reviews
///
/// # Example
///
/// ```no_run
/// use review_lens::config::ReviewConfig;
/// use review_lens::engine::ReviewEngine;
///
/// let mut engine = ReviewEngine::with_config(ReviewConfig::default());
/// let annotations = engine.scan_and_annotate(
///     "adder.go",
///     "func Add(a int, b int) int {\n  return a + b\n}",
///     "go",
/// );
/// assert_eq!(annotations.len(), 1);
/// ```
pub struct ReviewEngine {
    scanner: FunctionScanner,
    index: ReviewIndex,
    config: ReviewConfig,
    rng: StdRng,
}

impl ReviewEngine {
    /// Engine with the default configuration (loaded from the platform
    /// config location when present)
    pub fn new() -> Result<Self, LensError> {
        Ok(Self::with_config(ReviewConfig::load_or_default()?))
    }

    /// Engine with an explicit configuration; the review store loads from
    /// `config.store_path`
    pub fn with_config(config: ReviewConfig) -> Self {
        Self {
            scanner: FunctionScanner::new(),
            index: ReviewIndex::open(&config.store_path),
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a deterministic RNG, for reproducible placeholder titles
    pub fn with_config_and_seed(config: ReviewConfig, seed: u64) -> Self {
        Self {
            scanner: FunctionScanner::new(),
            index: ReviewIndex::open(&config.store_path),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Detected function occurrences for `text`, line-ordered
    pub fn scan(&self, text: &str, language_id: &str) -> Vec<FunctionOccurrence> {
        self.scanner.scan(text, language_id)
    }

    /// One annotation per detected function in `text`
    ///
    /// Occurrences with a stored review (by line, else by name) get its
    /// title; the rest get a randomized placeholder in the configured
    /// style. An unsupported language yields no annotations.
    pub fn scan_and_annotate(
        &mut self,
        file_path: &str,
        text: &str,
        language_id: &str,
    ) -> Vec<Annotation> {
        let occurrences = self.scanner.scan(text, language_id);
        annotate::correlate(
            &occurrences,
            self.index.get_reviews(file_path),
            &self.config.style,
            &mut self.rng,
        )
    }

    /// Replace `file_path`'s records wholesale and extend per-function
    /// history, persisting the store
    pub fn record_reviews(&mut self, file_path: &str, records: Vec<ReviewRecord>) {
        self.index.set_reviews(file_path, records);
    }

    /// Current review records for a file
    pub fn reviews(&self, file_path: &str) -> &[ReviewRecord] {
        self.index.get_reviews(file_path)
    }

    /// Drop a file's records; function histories are unaffected
    pub fn clear_reviews(&mut self, file_path: &str) {
        self.index.clear_reviews(file_path);
    }

    /// Everything ever said about a function, oldest first
    pub fn history(&self, function_name: &str) -> &[String] {
        self.index.history(function_name)
    }

    /// True iff detection patterns exist for the language and the session
    /// configuration enables it
    pub fn is_language_supported(&self, language_id: &str) -> bool {
        self.scanner.registry().supports(language_id)
            && self
                .config
                .enabled_languages
                .iter()
                .any(|language| language == language_id)
    }

    /// Request fresh reviews from `backend` and apply them all-or-nothing
    ///
    /// On success the file's record list is replaced and history extended;
    /// on failure the index is untouched and the backend's error category
    /// is surfaced verbatim.
    pub async fn regenerate(
        &mut self,
        file_path: &str,
        text: &str,
        backend: &dyn ReviewBackend,
    ) -> Result<Vec<ReviewRecord>, BackendError> {
        let request = ReviewRequest {
            file_path: file_path.to_string(),
            file_content: text.to_string(),
            style: self.config.style.clone(),
            api_key: (!self.config.api_key.is_empty()).then(|| self.config.api_key.clone()),
        };

        let response = backend.request_reviews(&request).await?;
        tracing::info!(
            "Backend generated {} reviews for {}",
            response.reviews.len(),
            file_path
        );
        self.record_reviews(file_path, response.reviews.clone());
        Ok(response.reviews)
    }
}
