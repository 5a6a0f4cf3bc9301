//! Free-text and facet filtering over the monastery catalog

use super::{District, Monastery};

/// Filter the catalog by free-text query, district, and sect.
///
/// The query matches case-insensitively as a substring of the name, the
/// long description, or any tag. `None` for district or sect acts as the
/// wildcard. All three predicates are combined with AND. The result is the
/// ordered subsequence of the input; nothing is re-sorted.
#[must_use]
pub fn search_monasteries<'a>(
    monasteries: &'a [Monastery],
    query: &str,
    district: Option<District>,
    sect: Option<&str>,
) -> Vec<&'a Monastery> {
    let needle = query.to_lowercase();

    monasteries
        .iter()
        .filter(|monastery| {
            let matches_query = monastery.name.to_lowercase().contains(&needle)
                || monastery.description.to_lowercase().contains(&needle)
                || monastery
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle));

            let matches_district = district.map_or(true, |d| monastery.district == d);
            let matches_sect = sect.map_or(true, |s| monastery.sect == s);

            matches_query && matches_district && matches_sect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::load_embedded().unwrap()
    }

    #[test]
    fn test_no_op_filter_is_identity() {
        let catalog = catalog();
        let result = search_monasteries(catalog.all(), "", None, None);
        assert_eq!(result.len(), catalog.len());
        for (found, original) in result.iter().zip(catalog.all()) {
            assert_eq!(found.slug, original.slug);
        }
    }

    #[test]
    fn test_result_is_subsequence_satisfying_predicates() {
        let catalog = catalog();
        let result =
            search_monasteries(catalog.all(), "monastery", Some(District::West), None);
        let mut last_index = 0;
        for monastery in &result {
            assert_eq!(monastery.district, District::West);
            // subsequence: indices strictly increase over the source order
            let index = catalog
                .all()
                .iter()
                .position(|m| m.slug == monastery.slug)
                .unwrap();
            assert!(index >= last_index);
            last_index = index + 1;
        }
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let catalog = catalog();
        let upper = search_monasteries(catalog.all(), "RUMTEK", None, None);
        let lower = search_monasteries(catalog.all(), "rumtek", None, None);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper.len(), lower.len());
        assert_eq!(upper[0].slug, lower[0].slug);
    }

    #[test]
    fn test_tag_match() {
        let catalog = catalog();
        let result = search_monasteries(catalog.all(), "karmapa", None, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Rumtek Monastery");
    }

    #[test]
    fn test_predicates_combine_with_and_not_or() {
        let catalog = catalog();
        // "pilgrimage" tags Rumtek (East) and Tashiding (West); the district
        // facet must still exclude the East record
        let west = search_monasteries(catalog.all(), "pilgrimage", Some(District::West), None);
        assert_eq!(west.len(), 1);
        assert_eq!(west[0].slug, "tashiding-monastery");

        let north = search_monasteries(catalog.all(), "karmapa", Some(District::West), None);
        assert!(north.is_empty());
    }

    #[test]
    fn test_sect_filter_is_exact() {
        let catalog = catalog();
        let kagyu = search_monasteries(catalog.all(), "", None, Some("Kagyu"));
        assert_eq!(kagyu.len(), 2);
        assert!(kagyu.iter().all(|m| m.sect == "Kagyu"));

        // "Karma Kagyu" and "Zurmang Kagyu" are distinct labels
        let karma = search_monasteries(catalog.all(), "", None, Some("Karma Kagyu"));
        assert_eq!(karma.len(), 1);
        assert_eq!(karma[0].slug, "rumtek-monastery");
    }

    #[test]
    fn test_description_match() {
        let catalog = catalog();
        let result = search_monasteries(catalog.all(), "heart-shaped hill", None, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].slug, "tashiding-monastery");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = catalog();
        let once = search_monasteries(catalog.all(), "nyingma", Some(District::West), None);
        let owned: Vec<Monastery> = once.iter().map(|m| (*m).clone()).collect();
        let twice = search_monasteries(&owned, "nyingma", Some(District::West), None);
        assert_eq!(once.len(), twice.len());
    }
}
