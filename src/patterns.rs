//! Per-language function-detection patterns
//!
//! Each supported language maps to an ordered list of regex heuristics for
//! a function or method definition anchored at line start. Ordering does not
//! express priority: the scanner applies every pattern for a language and
//! deduplicates the merged results, so overlapping variants (e.g. a generic
//! fallback plus a language-specific pattern) are harmless.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

/// Pure name extractor: match → optional function name
///
/// Returning `None` vetoes the match. The full matched text is available as
/// capture 0 for veto logic.
pub type NameExtractor = fn(&Captures) -> Option<String>;

/// A single function-detection heuristic
pub struct FunctionPattern {
    /// Multiline regex anchored at line start
    pub matcher: Regex,
    /// Extracts the function name, or vetoes the match
    pub extract: NameExtractor,
}

/// Registry mapping a language id to its ordered detection patterns
///
/// Populated once at construction and read-only thereafter. Adding a
/// language means adding one entry to the source table, not touching
/// scanner logic.
pub struct PatternRegistry {
    by_language: HashMap<&'static str, Vec<FunctionPattern>>,
}

fn capture_name(caps: &Captures) -> Option<String> {
    caps.get(1)
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
}

/// Extractor for the generic `identifier(...) {` fallback: rejects matches
/// that look like control flow rather than a definition.
fn reject_control_flow(caps: &Captures) -> Option<String> {
    let matched = caps.get(0)?.as_str();
    if ["if", "for", "while"].iter().any(|kw| matched.contains(kw)) {
        return None;
    }
    capture_name(caps)
}

const GO_PATTERNS: &[(&str, NameExtractor)] = &[(
    // func name(...) ret { — also methods: func (recv) name(...) ret {
    r"(?m)^[ \t]*func\s+(?:\([^)\n]+\)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*[^{\n]*\{",
    capture_name as NameExtractor,
)];

const JS_PATTERNS: &[(&str, NameExtractor)] = &[
    (
        r"(?m)^[ \t]*function\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*\([^)\n]*\)\s*\{",
        capture_name as NameExtractor,
    ),
    (
        // const name = (...) => {
        r"(?m)^[ \t]*(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*\([^)\n]*\)\s*=>\s*\{",
        capture_name as NameExtractor,
    ),
    (
        // generic name(...) { fallback, e.g. object/class methods
        r"(?m)^[ \t]*([A-Za-z_$][A-Za-z0-9_$]*)\s*\([^)\n]*\)\s*\{",
        reject_control_flow as NameExtractor,
    ),
];

const PYTHON_PATTERNS: &[(&str, NameExtractor)] = &[(
    r"(?m)^[ \t]*def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*:",
    capture_name as NameExtractor,
)];

const C_PATTERNS: &[(&str, NameExtractor)] = &[
    (
        // return_type name(...) {
        r"(?m)^[ \t]*[A-Za-z_][A-Za-z0-9_]*[ \t]+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        reject_control_flow as NameExtractor,
    ),
];

const CPP_PATTERNS: &[(&str, NameExtractor)] = &[
    (
        // return_type name(...) { — templated return types included
        r"(?m)^[ \t]*[A-Za-z_][A-Za-z0-9_<>]*[ \t]+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        reject_control_flow as NameExtractor,
    ),
];

// Dart's parameterized return types need increasingly permissive variants;
// overlap between them resolves in the scanner's dedup pass.
const DART_PATTERNS: &[(&str, NameExtractor)] = &[
    (
        r"(?m)^[ \t]*[A-Za-z_][A-Za-z0-9_<>]*[ \t]+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*[A-Za-z_][A-Za-z0-9_<>]*[ \t]+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*async\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*Future<[^>\n]*>\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*Future<[^>\n]*>\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*async\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*Future<[^<\n]*<[^>\n]*>>\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*Future<[^<\n]*<[^>\n]*>>\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*async\s*\{",
        capture_name as NameExtractor,
    ),
    (
        r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
        reject_control_flow as NameExtractor,
    ),
];

const JAVA_PATTERNS: &[(&str, NameExtractor)] = &[(
    r"(?m)^[ \t]*[A-Za-z_][A-Za-z0-9_<>]*[ \t]+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)\n]*\)\s*\{",
    capture_name as NameExtractor,
)];

const PATTERN_SOURCES: &[(&str, &[(&str, NameExtractor)])] = &[
    ("go", GO_PATTERNS),
    ("javascript", JS_PATTERNS),
    ("typescript", JS_PATTERNS),
    ("python", PYTHON_PATTERNS),
    ("c", C_PATTERNS),
    ("cpp", CPP_PATTERNS),
    ("dart", DART_PATTERNS),
    ("java", JAVA_PATTERNS),
];

impl PatternRegistry {
    /// Compile every registered pattern once
    ///
    /// A pattern whose regex fails to compile is logged and skipped so one
    /// bad pattern never disables the rest of its language.
    pub fn new() -> Self {
        let mut by_language = HashMap::new();
        for (language, sources) in PATTERN_SOURCES {
            let mut patterns = Vec::with_capacity(sources.len());
            for (source, extract) in *sources {
                match Regex::new(source) {
                    Ok(matcher) => patterns.push(FunctionPattern {
                        matcher,
                        extract: *extract,
                    }),
                    Err(err) => {
                        tracing::warn!("Skipping unparsable {language} pattern: {err}");
                    }
                }
            }
            by_language.insert(*language, patterns);
        }
        Self { by_language }
    }

    /// Ordered patterns for a language id; unknown languages yield an empty slice
    pub fn patterns(&self, language_id: &str) -> &[FunctionPattern] {
        self.by_language
            .get(language_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True iff at least one pattern is registered for the language
    pub fn supports(&self, language_id: &str) -> bool {
        !self.patterns(language_id).is_empty()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a file path to the language id its extension is scanned as
pub fn language_from_path(path: &str) -> Option<&'static str> {
    let extension = Path::new(path).extension()?.to_str()?.to_lowercase();
    let language = match extension.as_str() {
        "go" => "go",
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" => "python",
        "c" => "c",
        "cpp" | "cc" | "cxx" | "h" | "hpp" => "cpp",
        "dart" => "dart",
        "java" => "java",
        _ => return None,
    };
    Some(language)
}
