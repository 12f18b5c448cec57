/// Marker that separates the team prefix from the city name in a chat title.
pub const CITY_MARKER: &str = "Vaffel:";

/// Reduces a free-text city name to its canonical comparison key.
///
/// Lower-cases, trims, folds `ё` into `е`, drops everything that is not a
/// word character, whitespace, or hyphen, turns hyphens into spaces, and
/// collapses whitespace runs. The same key must be produced for index keys
/// and for queries, or exact lookup silently fails.
pub fn normalize_city(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for c in raw.trim().to_lowercase().chars() {
        let c = if c == 'ё' { 'е' } else { c };
        let c = if c == '-' { ' ' } else { c };

        if c.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
        } else if c.is_alphanumeric() || c == '_' {
            out.push(c);
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }

    out
}

/// Extracts the city portion of a chat title.
///
/// The city is everything after the last `Vaffel:` marker, trimmed. Titles
/// without the marker carry no city at all.
pub fn city_from_title(title: &str) -> Option<&str> {
    title
        .rfind(CITY_MARKER)
        .map(|idx| title[idx + CITY_MARKER.len()..].trim())
}
