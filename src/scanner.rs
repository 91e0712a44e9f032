//! Function scanning over source text
//!
//! Applies a language's detection patterns to a text buffer and produces a
//! deduplicated, line-ordered list of function occurrences.

use crate::patterns::PatternRegistry;
use crate::types::FunctionOccurrence;
use std::collections::HashSet;

/// Scans source text for function definitions using per-language patterns
pub struct FunctionScanner {
    registry: PatternRegistry,
}

impl FunctionScanner {
    pub fn new() -> Self {
        Self {
            registry: PatternRegistry::new(),
        }
    }

    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Scan `text` for function definitions in the given language
    ///
    /// Every pattern registered for the language runs over the whole buffer;
    /// results are deduplicated on `(name, line)` and sorted by ascending
    /// line, stable in detection order for ties. An unsupported language or
    /// empty text yields an empty result, not an error.
    pub fn scan(&self, text: &str, language_id: &str) -> Vec<FunctionOccurrence> {
        let patterns = self.registry.patterns(language_id);
        if patterns.is_empty() || text.is_empty() {
            return Vec::new();
        }

        let line_starts = line_starts(text);
        let mut seen: HashSet<(String, usize)> = HashSet::new();
        let mut occurrences = Vec::new();

        for pattern in patterns {
            for caps in pattern.matcher.captures_iter(text) {
                let Some(name) = (pattern.extract)(&caps) else {
                    continue;
                };
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                // The declaration line is where the name itself sits, which
                // may differ from the match start for multi-token matches.
                let line = match whole.as_str().find(&name) {
                    Some(relative) => line_at(&line_starts, whole.start() + relative),
                    None => line_at(&line_starts, whole.start()),
                };
                if seen.insert((name.clone(), line)) {
                    occurrences.push(FunctionOccurrence {
                        name,
                        line,
                        language_id: language_id.to_string(),
                    });
                }
            }
        }

        occurrences.sort_by_key(|occurrence| occurrence.line);
        occurrences
    }
}

impl Default for FunctionScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of each line start, for offset → line translation
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (offset, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(offset + 1);
        }
    }
    starts
}

/// 0-based line containing the byte at `offset`
fn line_at(line_starts: &[usize], offset: usize) -> usize {
    line_starts.partition_point(|&start| start <= offset) - 1
}
