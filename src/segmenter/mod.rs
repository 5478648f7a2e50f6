//! Clause segmentation
//!
//! Turns raw contract text into an ordered list of clause strings. A cascade
//! of structural boundary patterns is tried in priority order (numbered
//! markers, lettered markers, "Section N" style keywords); the first pattern
//! that produces more than one surviving fragment wins. Text with no usable
//! structure falls back to sentence splitting with keyword-aware grouping.

mod patterns;

use patterns::{BOUNDARY_PATTERNS, HEADER_FOOTER, SENTENCE_BOUNDARY, TRANSITION_PHRASES};
use regex::Regex;
use tracing::debug;

/// Fragments shorter than this (in chars, after trimming) are discarded.
const MIN_FRAGMENT_CHARS: usize = 10;
/// A sentence group must exceed this length (in chars) to become a clause.
const MIN_GROUP_CHARS: usize = 20;
/// Sentence groups close once they reach this many sentences.
const MAX_GROUP_SENTENCES: usize = 4;

/// Splits contract text into clauses.
///
/// Blank or whitespace-only input yields an empty list. Otherwise every
/// returned clause is a trimmed, non-trivial span of the source text, in
/// source order, with structural markers ("1.", "Section 2", ...) kept at
/// the head of their clause.
pub fn segment(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    for pattern in BOUNDARY_PATTERNS.iter() {
        let fragments = split_at_line_boundaries(text, &pattern.regex);
        if fragments.len() > 1 {
            let cleaned = filter_fragments(&fragments);
            if cleaned.len() > 1 {
                debug!(
                    pattern = pattern.name,
                    clauses = cleaned.len(),
                    "Structural split accepted"
                );
                return cleaned;
            }
        }
    }

    debug!("No structural pattern produced multiple clauses, grouping sentences");
    let sentences = filter_fragments(&split_sentences(text));
    group_sentences(sentences)
}

/// Splits at each newline that introduces a boundary marker. The newline is
/// consumed; the marker stays at the head of its fragment so no clause text
/// is lost.
fn split_at_line_boundaries<'a>(text: &'a str, boundary: &Regex) -> Vec<&'a str> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for m in boundary.find_iter(text) {
        fragments.push(&text[start..m.start()]);
        start = m.start() + 1;
    }
    fragments.push(&text[start..]);

    fragments
}

/// Trims fragments, then drops the too-short and the header/footer-shaped.
fn filter_fragments(fragments: &[&str]) -> Vec<String> {
    fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| fragment.chars().count() >= MIN_FRAGMENT_CHARS)
        .filter(|fragment| !is_header_or_footer(fragment))
        .map(|fragment| fragment.to_string())
        .collect()
}

fn is_header_or_footer(fragment: &str) -> bool {
    HEADER_FOOTER.is_match(&fragment.to_lowercase())
}

/// Splits on sentence boundaries. Terminal punctuation stays with the left
/// sentence, the capital letter opens the right one, the whitespace between
/// them is dropped.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for caps in SENTENCE_BOUNDARY.captures_iter(text) {
        if let (Some(punct), Some(capital)) = (caps.get(1), caps.get(2)) {
            sentences.push(&text[start..punct.end()]);
            start = capital.start();
        }
    }
    sentences.push(&text[start..]);

    sentences
}

/// Accumulates sentences into clause groups. A group closes when it reaches
/// `MAX_GROUP_SENTENCES` or when the latest sentence carries a transition
/// phrase; closed groups survive only above `MIN_GROUP_CHARS`.
fn group_sentences(sentences: Vec<String>) -> Vec<String> {
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut clauses = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for sentence in sentences {
        let breaks_here = contains_transition_phrase(&sentence);
        current.push(sentence);

        if current.len() >= MAX_GROUP_SENTENCES || breaks_here {
            close_group(&mut clauses, &current);
            current.clear();
        }
    }

    if !current.is_empty() {
        close_group(&mut clauses, &current);
    }

    clauses
}

fn close_group(clauses: &mut Vec<String>, group: &[String]) {
    let joined = group.join(" ");
    let trimmed = joined.trim();
    if trimmed.chars().count() > MIN_GROUP_CHARS {
        clauses.push(trimmed.to_string());
    }
}

fn contains_transition_phrase(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    TRANSITION_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}
