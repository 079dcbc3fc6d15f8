//! Compact encoding of crafting recipes as inline icon markup.

use indexmap::IndexMap;

/// One `{{Crafting<value>}}` icon per ingredient, highest value first.
///
/// ```
/// use eidtext::crafting::table_to_crafting_icons_full;
///
/// assert_eq!(table_to_crafting_icons_full(&[1, 3, 2]), "{{Crafting3}}{{Crafting2}}{{Crafting1}}");
/// ```
pub fn table_to_crafting_icons_full(values: &[u32]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().map(|v| format!("{{{{Crafting{}}}}}", v)).collect()
}

/// Equal ingredients grouped as `<count>{{Crafting<value>}}`, highest value
/// first.
///
/// ```
/// use eidtext::crafting::table_to_crafting_icons_merged;
///
/// assert_eq!(
///     table_to_crafting_icons_merged(&[1, 1, 1, 2, 2, 3, 3, 3]),
///     "3{{Crafting3}}2{{Crafting2}}3{{Crafting1}}"
/// );
/// ```
pub fn table_to_crafting_icons_merged(values: &[u32]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut counts: IndexMap<u32, usize> = IndexMap::new();
    for value in sorted {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .iter()
        .map(|(value, count)| format!("{}{{{{Crafting{}}}}}", count, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_example() {
        assert_eq!(
            table_to_crafting_icons_merged(&[1, 1, 1, 2, 2, 3, 3, 3]),
            "3{{Crafting3}}2{{Crafting2}}3{{Crafting1}}"
        );
    }

    #[test]
    fn test_merged_is_order_independent() {
        assert_eq!(
            table_to_crafting_icons_merged(&[3, 1, 2, 1, 3, 2, 1, 3]),
            table_to_crafting_icons_merged(&[1, 1, 1, 2, 2, 3, 3, 3])
        );
    }

    #[test]
    fn test_merged_single_count_still_printed() {
        assert_eq!(table_to_crafting_icons_merged(&[8, 7]), "1{{Crafting8}}1{{Crafting7}}");
    }

    #[test]
    fn test_full_all_values() {
        assert_eq!(
            table_to_crafting_icons_full(&[1, 2, 3, 4, 5, 6, 7, 8]),
            "{{Crafting8}}{{Crafting7}}{{Crafting6}}{{Crafting5}}\
             {{Crafting4}}{{Crafting3}}{{Crafting2}}{{Crafting1}}"
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(table_to_crafting_icons_full(&[]), "");
        assert_eq!(table_to_crafting_icons_merged(&[]), "");
    }
}
