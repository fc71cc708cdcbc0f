//! Input tokenization for the REPL prompt.

/// Splits a prompt line into lowercase words.
///
/// Words are separated by whitespace; a trailing comma is stripped from each
/// word and words left empty are dropped.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .map(|word| word.strip_suffix(',').map(str::to_string).unwrap_or(word))
        .filter(|word| !word.is_empty())
        .collect()
}
