use crate::models::Title;

/// Titles containing `search_text`, case-insensitively, in catalog order.
///
/// At most `max` titles are returned. An empty search yields nothing rather
/// than the whole catalog.
pub fn filter_suggestions<'a>(catalog: &'a [Title], search_text: &str, max: usize) -> Vec<&'a Title> {
    if search_text.is_empty() {
        return Vec::new();
    }

    let needle = search_text.to_lowercase();
    catalog
        .iter()
        .filter(|title| title.contains_lowercase(&needle))
        .take(max)
        .collect()
}
