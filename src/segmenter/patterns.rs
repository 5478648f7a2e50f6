//! Compiled patterns used by clause segmentation

use once_cell::sync::Lazy;
use regex::Regex;

/// A structural boundary marker, matched at the start of a line.
///
/// Each regex begins with `\n` so a marker only opens a clause when it
/// starts a new line; the same marker mid-line is ordinary prose.
pub(crate) struct BoundaryPattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// Boundary patterns in priority order. The first pattern that yields more
/// than one surviving fragment wins; later ones are not tried.
pub(crate) static BOUNDARY_PATTERNS: Lazy<Vec<BoundaryPattern>> = Lazy::new(|| {
    [
        ("numeric", r"\n\d+\."),
        ("numeric-paren", r"\n\d+\)"),
        ("lettered", r"\n[A-Z]\."),
        ("roman", r"\n[IVX]+\."),
        ("section", r"\nSection \d+"),
        ("clause", r"\nClause \d+"),
        ("article", r"\nArticle \d+"),
    ]
    .iter()
    .map(|(name, pattern)| BoundaryPattern {
        name,
        regex: Regex::new(pattern).unwrap(),
    })
    .collect()
});

/// Sentence boundary: terminal punctuation, whitespace, then a capital.
/// Capture groups mark where the left sentence ends and the right begins.
pub(crate) static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])\s+([A-Z])").unwrap());

/// Header/footer shapes dropped during filtering. Whole-fragment match
/// against the lowercased text, never a substring search.
pub(crate) static HEADER_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:page \d+|\d+|confidential|draft|final|version \d+|revised|effective date:|execution date:)$",
    )
    .unwrap()
});

/// Phrases that signal a new provision inside unnumbered prose; hitting one
/// closes the current sentence group early.
pub(crate) const TRANSITION_PHRASES: [&str; 11] = [
    "provided that",
    "provided, however,",
    "further provided",
    "in addition",
    "moreover",
    "furthermore",
    "additionally",
    "notwithstanding",
    "subject to",
    "except as",
    "unless otherwise",
];
