//! Annotation correlation: join scanned occurrences with review records
//!
//! Each occurrence resolves to exactly one title — an exact line match
//! first, then a name match anywhere in the file's record list, else a
//! synthesized placeholder. Matched titles are stable across calls;
//! placeholder titles are deliberately randomized so "no review yet" never
//! reads as a stable reviewed status.

use crate::styles;
use crate::types::{Annotation, FunctionOccurrence, ReviewRecord};
use rand::Rng;
use std::collections::HashMap;

/// Display title for a matched record
fn title_for(record: &ReviewRecord) -> String {
    format!("{} {}", record.stars, record.review)
}

/// Produce one annotation per occurrence, in occurrence order
///
/// `records` is the file's current review list; `style` selects the
/// placeholder bucket for unmatched occurrences. The RNG is injected so
/// callers (and tests) control placeholder determinism.
pub fn correlate<R: Rng>(
    occurrences: &[FunctionOccurrence],
    records: &[ReviewRecord],
    style: &str,
    rng: &mut R,
) -> Vec<Annotation> {
    // Records carry 1-based lines; occurrences are 0-based.
    let by_line: HashMap<usize, &ReviewRecord> =
        records.iter().map(|record| (record.line, record)).collect();
    let by_name: HashMap<&str, &ReviewRecord> = records
        .iter()
        .map(|record| (record.function.as_str(), record))
        .collect();

    occurrences
        .iter()
        .map(|occurrence| {
            let title = by_line
                .get(&(occurrence.line + 1))
                .or_else(|| by_name.get(occurrence.name.as_str()))
                .map(|record| title_for(record))
                .unwrap_or_else(|| placeholder(style, rng));
            Annotation {
                line: occurrence.line,
                title,
                function: occurrence.name.clone(),
            }
        })
        .collect()
}

/// Synthesize a placeholder title: 3-5 stars plus a random template from
/// the style's bucket
pub fn placeholder<R: Rng>(style: &str, rng: &mut R) -> String {
    let bucket = styles::templates(style);
    let template = bucket[rng.gen_range(0..bucket.len())];
    let stars = "⭐".repeat(rng.gen_range(3..=5));
    format!("{stars} {template}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn occurrence(name: &str, line: usize) -> FunctionOccurrence {
        FunctionOccurrence {
            name: name.to_string(),
            line,
            language_id: "go".to_string(),
        }
    }

    fn record(line: usize, function: &str, review: &str) -> ReviewRecord {
        ReviewRecord {
            line,
            function: function.to_string(),
            style: "funny".to_string(),
            review: review.to_string(),
            stars: "⭐⭐⭐".to_string(),
        }
    }

    #[test]
    fn test_line_match_wins() {
        let mut rng = StdRng::seed_from_u64(7);
        let occurrences = [occurrence("Add", 0)];
        let records = [record(1, "Add", "exact"), record(9, "Add", "elsewhere")];

        let annotations = correlate(&occurrences, &records, "funny", &mut rng);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].title, "⭐⭐⭐ exact");
        assert_eq!(annotations[0].function, "Add");
        assert_eq!(annotations[0].line, 0);
    }

    #[test]
    fn test_name_fallback_when_line_moved() {
        let mut rng = StdRng::seed_from_u64(7);
        // Function slid down two lines since the reviews were generated.
        let occurrences = [occurrence("Add", 2)];
        let records = [record(1, "Add", "by name")];

        let annotations = correlate(&occurrences, &records, "funny", &mut rng);
        assert_eq!(annotations[0].title, "⭐⭐⭐ by name");
    }

    #[test]
    fn test_placeholder_when_unmatched() {
        let mut rng = StdRng::seed_from_u64(7);
        let occurrences = [occurrence("Orphan", 4)];

        let annotations = correlate(&occurrences, &[], "technical", &mut rng);
        let title = &annotations[0].title;
        let stars = title.chars().filter(|&c| c == '⭐').count();
        assert!((3..=5).contains(&stars), "stars out of range: {title}");
        assert!(
            styles::templates("technical")
                .iter()
                .any(|template| title.ends_with(template)),
            "template not from bucket: {title}"
        );
    }

    #[test]
    fn test_placeholder_deterministic_under_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(placeholder("roast", &mut a), placeholder("roast", &mut b));
    }

    #[test]
    fn test_matched_titles_idempotent() {
        let occurrences = [occurrence("Add", 0)];
        let records = [record(1, "Add", "stable")];

        let mut first_rng = StdRng::seed_from_u64(1);
        let mut second_rng = StdRng::seed_from_u64(2);
        let first = correlate(&occurrences, &records, "funny", &mut first_rng);
        let second = correlate(&occurrences, &records, "funny", &mut second_rng);
        assert_eq!(first[0].title, second[0].title);
    }

    #[test]
    fn test_unknown_style_uses_default_bucket() {
        let mut rng = StdRng::seed_from_u64(7);
        let title = placeholder("no-such-style", &mut rng);
        assert!(
            styles::templates(styles::DEFAULT_STYLE)
                .iter()
                .any(|template| title.ends_with(template))
        );
    }

    #[test]
    fn test_one_annotation_per_occurrence() {
        let mut rng = StdRng::seed_from_u64(7);
        let occurrences = [
            occurrence("One", 0),
            occurrence("Two", 3),
            occurrence("Three", 6),
        ];
        let records = [record(4, "Two", "matched")];

        let annotations = correlate(&occurrences, &records, "funny", &mut rng);
        assert_eq!(annotations.len(), 3);
        assert_eq!(annotations[1].title, "⭐⭐⭐ matched");
    }
}
