//! Word reversal

/// Reverse the characters of every whitespace-separated word, keeping word
/// order. Runs of whitespace collapse to a single space.
pub fn reverse_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.chars().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
