//! The selection control: its option set is every title in table order.
//!
//! A selection is either an exact title or a 1-based option number, so only
//! titles that exist in the table can ever reach the lookup.

use data_loader::DataIndex;

/// Resolve user input to a table position
pub fn resolve_selection(data_index: &DataIndex, input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(position) = data_index.position_of(input) {
        return Some(position);
    }

    match input.parse::<usize>() {
        Ok(number) if number >= 1 && number <= data_index.len() => Some(number - 1),
        _ => None,
    }
}

/// Case-insensitive title search: exact matches first, then substring
/// matches, each group in table order.
pub fn search_titles<'a>(
    data_index: &'a DataIndex,
    query: &str,
    limit: usize,
) -> Vec<(usize, &'a str)> {
    let query_lower = query.trim().to_lowercase();
    let mut matches: Vec<(u8, usize, &str)> = Vec::new();

    for (position, title) in data_index.titles().enumerate() {
        let title_lower = title.to_lowercase();
        if title_lower == query_lower {
            // Exact match
            matches.push((0, position, title));
        } else if title_lower.contains(&query_lower) {
            // Substring match
            matches.push((1, position, title));
        }
    }

    matches.sort_by_key(|(rank, position, _)| (*rank, *position));
    matches
        .into_iter()
        .take(limit)
        .map(|(_, position, title)| (position, title))
        .collect()
}
