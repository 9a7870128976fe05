//! Storage codec for the genre list. Genres are a proper ordered sequence of
//! strings in the domain, kept in a single text column as a JSON array.

/// Encodes a genre list for storage.
pub fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).expect("genre list serializes")
}

/// Decodes a stored genre list.
///
/// Rows written before the JSON encoding carry a single-quoted repr of the
/// list (e.g. `['Jazz', 'Funk']`), so that form is accepted as a fallback.
pub fn decode_genres(raw: &str) -> Vec<String> {
    if let Ok(genres) = serde_json::from_str::<Vec<String>>(raw) {
        return genres;
    }

    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');

    inner
        .split(',')
        .map(|part| part.trim().trim_matches('\'').trim_matches('"').to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
