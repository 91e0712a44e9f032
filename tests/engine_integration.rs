/// Integration tests for the review engine: persistence, history, and
/// backend application semantics across engine instances
use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use review_lens::backend::ReviewBackend;
use review_lens::config::ReviewConfig;
use review_lens::engine::ReviewEngine;
use review_lens::error::BackendError;
use review_lens::store::ReviewIndex;
use review_lens::types::{ReviewRecord, ReviewRequest, ReviewResponse};

const ADDER_GO: &str = "func Add(a int, b int) int {\n  return a + b\n}";

fn config_in(dir: &TempDir) -> ReviewConfig {
    let mut config = ReviewConfig::default();
    config.store_path = dir.path().join("reviews.json");
    config
}

fn record(line: usize, function: &str, review: &str, stars: &str) -> ReviewRecord {
    ReviewRecord {
        line,
        function: function.to_string(),
        style: "funny".to_string(),
        review: review.to_string(),
        stars: stars.to_string(),
    }
}

/// Backend returning a fixed response
struct CannedBackend(ReviewResponse);

#[async_trait]
impl ReviewBackend for CannedBackend {
    async fn request_reviews(
        &self,
        _request: &ReviewRequest,
    ) -> Result<ReviewResponse, BackendError> {
        Ok(self.0.clone())
    }
}

/// Backend that always fails with a quota error
struct FailingBackend;

#[async_trait]
impl ReviewBackend for FailingBackend {
    async fn request_reviews(
        &self,
        _request: &ReviewRequest,
    ) -> Result<ReviewResponse, BackendError> {
        Err(BackendError::QuotaExceeded("429".to_string()))
    }
}

#[test]
fn test_store_round_trip_across_engines() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(&dir);

    {
        let mut engine = ReviewEngine::with_config(config.clone());
        engine.record_reviews("adder.go", vec![record(1, "Add", "adds", "⭐⭐⭐⭐")]);
    }

    let engine = ReviewEngine::with_config(config.clone());
    assert_eq!(engine.reviews("adder.go").len(), 1);
    assert_eq!(engine.reviews("adder.go")[0].review, "adds");
    assert_eq!(engine.history("Add"), &["⭐⭐⭐⭐ adds"]);

    // The same file also reloads into a bare index identically.
    let index = ReviewIndex::open(&config.store_path);
    assert_eq!(index.get_reviews("adder.go"), engine.reviews("adder.go"));
    assert_eq!(index.history("Add"), engine.history("Add"));
    Ok(())
}

#[test]
fn test_history_grows_across_regenerations() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = ReviewEngine::with_config(config_in(&dir));

    engine.record_reviews(
        "adder.go",
        vec![
            record(1, "Add", "first pass", "⭐⭐⭐"),
            record(8, "Sub", "fine", "⭐⭐⭐⭐"),
        ],
    );
    engine.record_reviews("adder.go", vec![record(1, "Add", "second pass", "⭐⭐⭐⭐⭐")]);

    let history = engine.history("Add");
    assert_eq!(history, &["⭐⭐⭐ first pass", "⭐⭐⭐⭐⭐ second pass"]);
    // Sub's record was replaced, but its history survives.
    assert_eq!(engine.history("Sub"), &["⭐⭐⭐⭐ fine"]);
    Ok(())
}

#[test]
fn test_clear_reviews_preserves_history() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = ReviewEngine::with_config(config_in(&dir));

    engine.record_reviews("adder.go", vec![record(1, "Add", "adds", "⭐⭐⭐")]);
    engine.clear_reviews("adder.go");

    assert!(engine.reviews("adder.go").is_empty());
    assert_eq!(engine.history("Add").len(), 1);
    Ok(())
}

#[test]
fn test_matched_annotation_titles_are_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = ReviewEngine::with_config(config_in(&dir));

    engine.record_reviews("adder.go", vec![record(1, "Add", "adds", "⭐⭐⭐⭐")]);

    let first = engine.scan_and_annotate("adder.go", ADDER_GO, "go");
    let second = engine.scan_and_annotate("adder.go", ADDER_GO, "go");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, "⭐⭐⭐⭐ adds");
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_malformed_store_recovers_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(&dir);
    std::fs::write(&config.store_path, "{\"reviews\": [oops")?;

    let engine = ReviewEngine::with_config(config);
    assert!(engine.reviews("adder.go").is_empty());
    assert!(engine.history("Add").is_empty());
    Ok(())
}

#[tokio::test]
async fn test_regenerate_applies_backend_response() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = ReviewEngine::with_config(config_in(&dir));

    let backend = CannedBackend(ReviewResponse {
        file: "adder.go".to_string(),
        reviews: vec![record(1, "Add", "from backend", "⭐⭐⭐⭐⭐")],
    });

    let reviews = engine.regenerate("adder.go", ADDER_GO, &backend).await?;
    assert_eq!(reviews.len(), 1);
    assert_eq!(engine.reviews("adder.go")[0].review, "from backend");
    assert_eq!(engine.history("Add"), &["⭐⭐⭐⭐⭐ from backend"]);

    let annotations = engine.scan_and_annotate("adder.go", ADDER_GO, "go");
    assert_eq!(annotations[0].title, "⭐⭐⭐⭐⭐ from backend");
    Ok(())
}

#[tokio::test]
async fn test_failed_regeneration_leaves_index_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = ReviewEngine::with_config(config_in(&dir));
    engine.record_reviews("adder.go", vec![record(1, "Add", "kept", "⭐⭐⭐")]);

    let err = engine
        .regenerate("adder.go", ADDER_GO, &FailingBackend)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::QuotaExceeded(_)));

    // All-or-nothing: the failed request applied nothing.
    assert_eq!(engine.reviews("adder.go")[0].review, "kept");
    assert_eq!(engine.history("Add").len(), 1);
    Ok(())
}

#[test]
fn test_placeholders_differ_from_matched_titles() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = ReviewEngine::with_config_and_seed(config_in(&dir), 42);

    // No records at all: every annotation is a synthesized placeholder.
    let annotations = engine.scan_and_annotate("adder.go", ADDER_GO, "go");
    assert_eq!(annotations.len(), 1);
    let stars = annotations[0].title.chars().filter(|&c| c == '⭐').count();
    assert!((3..=5).contains(&stars));
    Ok(())
}
