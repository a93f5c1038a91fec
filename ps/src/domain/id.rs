//! Domain ID generation
//!
//! IDs use the format: `{type}-{slug}-{12-char-hex}`
//! Example: `item-sunscreen-7f3a9c01be42`

/// Generate a domain ID from a type and a title
///
/// The hex suffix comes from the random tail of a v7 UUID, so two IDs minted
/// for the same title within the same millisecond still differ.
pub fn generate_id(domain_type: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7().simple().to_string();
    let suffix = &uuid[uuid.len() - 12..];
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{}-{}", domain_type, suffix)
    } else {
        format!("{}-{}-{}", domain_type, slug, suffix)
    }
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .take(6)
        .collect::<Vec<_>>()
        .join("-")
}
