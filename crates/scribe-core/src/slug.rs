//! Slug derivation from post titles.

/// Derive a URL-safe slug from a title.
///
/// Lowercases the title, drops every character that is not a lowercase ASCII
/// letter, digit, space, or hyphen, collapses runs of whitespace and hyphens
/// into a single hyphen, and trims leading/trailing hyphens. Pure and
/// deterministic: equal input yields equal output on every call.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for ch in title.to_lowercase().chars() {
        let mapped = match ch {
            'a'..='z' | '0'..='9' => ch,
            '-' => '-',
            c if c.is_whitespace() => '-',
            _ => continue,
        };

        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }

    slug.trim_matches('-').to_string()
}
