//! Reading-time estimation
//!
//! Per section: strip markup from the flattened body text, count
//! whitespace-separated words, take the ceiling of words / 200, and sum
//! across sections. Pure and deterministic; computed on every render.

use super::post::Section;

/// Assumed reading speed in words per minute
const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time in whole minutes for a post's sections
pub fn estimate_minutes(sections: &[Section]) -> u32 {
    sections
        .iter()
        .map(|section| {
            let text = section
                .body
                .iter()
                .map(|block| block.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let words = count_words(&strip_markup(&text));
            words.div_ceil(WORDS_PER_MINUTE) as u32
        })
        .sum()
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Remove anything between angle brackets, keeping the text content
fn strip_markup(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}
