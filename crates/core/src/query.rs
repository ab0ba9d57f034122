//! Derived views over the collection: filtered listings, folder sets, and
//! aggregate counts. Pure functions of the current photo list; nothing here
//! mutates or persists anything.

use std::collections::BTreeMap;

use crate::domain::{PhotoRecord, PhotoStats, Scope, UNTAGGED_ASPECT};

/// Stable filter over the collection.
///
/// A record matches when the search text is a case-insensitive substring of
/// its name or folder (empty search matches everything) and the record falls
/// inside the scope. Collection order is preserved, no resort.
pub fn filter<'a>(photos: &'a [PhotoRecord], search: &str, scope: &Scope) -> Vec<&'a PhotoRecord> {
    let needle = search.to_lowercase();
    photos
        .iter()
        .filter(|p| {
            let matches_search = needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.folder.to_lowercase().contains(&needle);
            matches_search && scope.matches(p)
        })
        .collect()
}

/// Aggregate counts, recomputed in full. Cheap by construction: the
/// collection is capacity-bounded.
pub fn stats(photos: &[PhotoRecord]) -> PhotoStats {
    let mut by_folder: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_aspect: BTreeMap<String, usize> = BTreeMap::new();

    for photo in photos {
        *by_folder.entry(photo.folder.clone()).or_insert(0) += 1;
        let bucket = photo.aspect.map(|a| a.as_str()).unwrap_or(UNTAGGED_ASPECT);
        *by_aspect.entry(bucket.to_string()).or_insert(0) += 1;
    }

    PhotoStats {
        total: photos.len(),
        by_folder,
        by_aspect,
    }
}

/// Distinct folder names in first-occurrence order. A folder exists only by
/// virtue of having photos; folders emptied by moves or deletes drop out on
/// the next call.
pub fn folder_set(photos: &[PhotoRecord]) -> Vec<String> {
    let mut folders: Vec<String> = Vec::new();
    for photo in photos {
        if !folders.iter().any(|f| f == &photo.folder) {
            folders.push(photo.folder.clone());
        }
    }
    folders
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{AspectClass, ARCHIVE_FOLDER, FAVORITES_FOLDER};

    fn record(id: &str, name: &str, folder: &str, aspect: Option<AspectClass>) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            name: name.to_string(),
            image_data: "data:image/jpeg;base64,AAAA".to_string(),
            folder: folder.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
            aspect,
        }
    }

    fn sample() -> Vec<PhotoRecord> {
        vec![
            record("1", "Sunset over the sea", "Nature", Some(AspectClass::Landscape)),
            record("2", "Mountain ridge", "Nature", Some(AspectClass::Wide)),
            record("3", "Portrait of a girl", "Portraits", Some(AspectClass::Portrait)),
            record("4", "City skyline", FAVORITES_FOLDER, None),
            record("5", "Old negatives", ARCHIVE_FOLDER, Some(AspectClass::Square)),
        ]
    }

    #[test]
    fn test_filter_empty_search_all_scope_returns_everything() {
        let photos = sample();
        let got = filter(&photos, "", &Scope::All);
        let ids: Vec<&str> = got.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_filter_search_matches_name_case_insensitive() {
        let photos = sample();
        let got = filter(&photos, "MOUNTAIN", &Scope::All);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "2");
    }

    #[test]
    fn test_filter_search_matches_folder_too() {
        let photos = sample();
        let got = filter(&photos, "portra", &Scope::All);
        // "Portrait of a girl" by name, and folder "Portraits" would match the same record
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].folder, "Portraits");
    }

    #[test]
    fn test_filter_scope_restricts() {
        let photos = sample();
        let got = filter(&photos, "", &Scope::Favorites);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "4");

        let got = filter(&photos, "", &Scope::Folder("nature".to_string()));
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn test_filter_search_and_scope_combine() {
        let photos = sample();
        let got = filter(&photos, "ridge", &Scope::Folder("Nature".to_string()));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "2");

        assert!(filter(&photos, "ridge", &Scope::Favorites).is_empty());
    }

    #[test]
    fn test_filter_is_subset_of_unsearched_scope() {
        let photos = sample();
        for scope in [
            Scope::All,
            Scope::Favorites,
            Scope::Archive,
            Scope::Folder("Nature".to_string()),
        ] {
            let broad: Vec<&str> = filter(&photos, "", &scope).iter().map(|p| p.id.as_str()).collect();
            let narrow = filter(&photos, "o", &scope);
            assert!(narrow.iter().all(|p| broad.contains(&p.id.as_str())));
        }
    }

    #[test]
    fn test_stats_totals_are_consistent() {
        let photos = sample();
        let stats = stats(&photos);

        assert_eq!(stats.total, photos.len());
        assert_eq!(stats.by_folder.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_aspect.values().sum::<usize>(), stats.total);
    }

    #[test]
    fn test_stats_buckets() {
        let photos = sample();
        let stats = stats(&photos);

        assert_eq!(stats.by_folder["Nature"], 2);
        assert_eq!(stats.by_folder[FAVORITES_FOLDER], 1);
        assert_eq!(stats.by_aspect["landscape"], 1);
        assert_eq!(stats.by_aspect[UNTAGGED_ASPECT], 1);
    }

    #[test]
    fn test_stats_empty_collection() {
        let stats = stats(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.by_folder.is_empty());
        assert!(stats.by_aspect.is_empty());
    }

    #[test]
    fn test_folder_set_first_occurrence_order() {
        let photos = vec![
            record("1", "a", "City", None),
            record("2", "b", "Nature", None),
            record("3", "c", "City", None),
            record("4", "d", "Macro", None),
        ];
        assert_eq!(folder_set(&photos), vec!["City", "Nature", "Macro"]);
    }

    #[test]
    fn test_folder_set_empty() {
        assert!(folder_set(&[]).is_empty());
    }
}
