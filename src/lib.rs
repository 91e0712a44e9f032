//! # Review Lens - Gamified Inline Code-Review Annotations
//!
//! A function-detection and review-annotation engine: a language-pluggable,
//! regex-based scanner locates function definitions in arbitrary source
//! text, correlates them with review records from an external
//! review-generation backend, and maintains a durable, append-only review
//! history keyed by function name.
//!
//! ## Key Features
//!
//! - **Function Detection**: ordered per-language regex heuristics with
//!   deduplication and control-flow false-positive suppression
//! - **Review Correlation**: line-exact matching with name-based fallback
//!   and randomized placeholder titles for unreviewed functions
//! - **Durable History**: append-only per-function review log persisted as
//!   a single JSON store, rewritten in full after every mutation
//! - **Pluggable Backend**: async trait over an external executable
//!   speaking JSON on stdin/stdout, with a typed failure taxonomy
//!
//! ## Architecture
//!
//! ```text
//! file text ──▶ FunctionScanner ──▶ occurrences ──▶ correlate ──▶ annotations
//!                    │                                  ▲
//!              PatternRegistry                     ReviewIndex ◀── backend
//!                                                       │
//!                                                 reviews.json
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: high-level facade wiring the components together
//! - [`scanner`]: function scanning over source text
//! - [`patterns`]: per-language detection patterns and path mapping
//! - [`store`]: persisted review index and history log
//! - [`annotate`]: occurrence/record correlation and placeholder titles
//! - [`styles`]: review template buckets
//! - [`backend`]: external review-generation backend client
//! - [`config`]: session configuration
//! - [`error`]: error types
//! - [`paths`]: platform path resolution
//!
//! ## Usage Example
//!
//! ```no_run
//! use review_lens::engine::ReviewEngine;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut engine = ReviewEngine::new()?;
//!     let annotations = engine.scan_and_annotate(
//!         "src/adder.go",
//!         "func Add(a int, b int) int {\n  return a + b\n}",
//!         "go",
//!     );
//!     for annotation in annotations {
//!         println!("line {}: {}", annotation.line, annotation.title);
//!     }
//!     Ok(())
//! }
//! ```

/// Occurrence/record correlation and placeholder synthesis
pub mod annotate;

/// External review-generation backend client
pub mod backend;

/// Session configuration with TOML load/save
pub mod config;

/// High-level engine facade
pub mod engine;

/// Error types and utilities
pub mod error;

/// Per-language function-detection patterns
pub mod patterns;

/// Platform path resolution for the store and config files
pub mod paths;

/// Function scanning over source text
pub mod scanner;

/// Persisted review index and per-function history
pub mod store;

/// Review template buckets keyed by style name
pub mod styles;

/// Core data model and backend wire types
pub mod types;
