//! Splitting free text into candidate task phrases.

/// Fragments shorter than this many characters (after trimming) are noise.
pub const MIN_FRAGMENT_CHARS: usize = 4;

fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ';' | '•' | '\n' | '\r')
}

/// Split a worker's free-text cell on commas, semicolons, bullets and line
/// breaks. Fragments are trimmed; short ones are dropped.
pub fn split_fragments(text: &str) -> Vec<&str> {
    text.split(is_delimiter)
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() >= MIN_FRAGMENT_CHARS)
        .collect()
}
