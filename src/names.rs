//! Name normalization.
//!
//! Directory listings spell the same person in several ways
//! (`Costan, Victor-Marius`, `Victor Marius Costan`, ...). A name vector
//! is the sorted list of word tokens in a name, so formatting variants
//! compare equal. Case is preserved.

/// Computes the name vector of a full name.
///
/// Every non-word character (anything other than a letter, digit or `_`)
/// separates tokens. Tokens are sorted but not de-duplicated.
pub fn name_vector(name: &str) -> Vec<String> {
    let mut tokens: Vec<String> = name
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    tokens.sort();
    tokens
}

/// True when both names produce the same name vector.
pub fn same_person(a: &str, b: &str) -> bool {
    name_vector(a) == name_vector(b)
}

/// Flips an official `Last, First Middle` name into `First Middle Last`.
///
/// Names without a comma are already in reading order and come back as-is.
pub fn flip_full_name(name: &str) -> String {
    match name.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => name.to_string(),
    }
}
