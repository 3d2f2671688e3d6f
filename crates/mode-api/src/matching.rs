//! Query tokenization and entry matching shared by every mode.
//!
//! A query is split on whitespace into tokens. An entry matches when every
//! token is a substring of at least one of its searchable fields. Matching is
//! performed on collation keys so case folding happens once per token rather
//! than once per comparison.

/// Normalize a string into the form used for comparisons.
///
/// Case-insensitive sessions fold to lowercase; case-sensitive sessions keep
/// the input untouched.
pub fn collate_key(input: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        input.to_string()
    } else {
        input.to_lowercase()
    }
}

/// Split a query into whitespace-separated tokens, each pre-normalized into
/// its collation key.
///
/// An empty or all-whitespace query yields no tokens, which callers treat as
/// "match everything".
pub fn tokenize(query: &str, case_sensitive: bool) -> Vec<String> {
    query
        .split_whitespace()
        .map(|token| collate_key(token, case_sensitive))
        .collect()
}

/// Check whether an entry matches a tokenized query.
///
/// Every token must be contained in at least one field. `ascii` is the
/// precomputed flag for the entry's fields; when set and the token is also
/// ASCII, comparison runs on raw bytes without allocating.
pub fn token_match(tokens: &[String], fields: &[&str], ascii: bool, case_sensitive: bool) -> bool {
    tokens
        .iter()
        .all(|token| fields.iter().any(|field| field_contains(field, token, ascii, case_sensitive)))
}

fn field_contains(field: &str, token: &str, ascii: bool, case_sensitive: bool) -> bool {
    if token.is_empty() {
        return true;
    }
    if case_sensitive {
        return field.contains(token);
    }
    if ascii && token.is_ascii() {
        let needle = token.as_bytes();
        let haystack = field.as_bytes();
        if needle.len() > haystack.len() {
            return false;
        }
        return haystack
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle));
    }
    field.to_lowercase().contains(token)
}

/// Edit distance between the query and an entry's completion text, used to
/// rank filtered results when score sorting is enabled. Lower is better.
pub fn levenshtein(needle: &str, haystack: &str) -> u32 {
    if needle.is_empty() {
        return haystack.chars().count() as u32;
    }

    let needle: Vec<char> = needle.chars().collect();
    let mut row: Vec<u32> = (0..=needle.len() as u32).collect();

    for (i, hay) in haystack.chars().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i as u32 + 1;
        for (j, nee) in needle.iter().enumerate() {
            let cost = if *nee == hay { 0 } else { 1 };
            let next = (previous_diagonal + cost)
                .min(row[j] + 1)
                .min(row[j + 1] + 1);
            previous_diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[needle.len()]
}
