use serde::{Deserialize, Serialize};

/// A detected function definition site, before any review is attached
///
/// Produced transiently by scanning; never persisted. No two occurrences in
/// one scan share the same `(name, line)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionOccurrence {
    /// Function or method name
    pub name: String,
    /// 0-based line of the declaration
    pub line: usize,
    /// Language the occurrence was detected under
    pub language_id: String,
}

/// One review attached to a function in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// 1-based line of the reviewed function
    pub line: usize,
    /// Name of the reviewed function
    pub function: String,
    /// Style tag the review was generated with
    pub style: String,
    /// Review text
    pub review: String,
    /// Star rating, e.g. "⭐⭐⭐⭐"
    pub stars: String,
}

/// Request sent to the external review-generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Path of the file under review
    pub file_path: String,
    /// Full text of the file
    pub file_content: String,
    /// Requested review style
    pub style: String,
    /// API key forwarded to the backend; absent means mock mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Response from the external review-generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// File the reviews apply to
    pub file: String,
    /// Generated reviews, in detection order
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
}

/// Per-line display unit combining an occurrence with a resolved or
/// synthesized review title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// 0-based line the annotation attaches to
    pub line: usize,
    /// Display title, `"{stars} {review}"`
    pub title: String,
    /// Function name the history affordance is keyed by
    pub function: String,
}
