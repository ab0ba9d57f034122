use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Folder a photo lands in when the caller supplies none (or a blank one).
pub const DEFAULT_FOLDER: &str = "General";

/// Reserved folder matched by the `favorites` scope.
pub const FAVORITES_FOLDER: &str = "Favorites";

/// Reserved folder matched by the `archive` scope.
pub const ARCHIVE_FOLDER: &str = "Archive";

/// Maximum number of photos retained in a collection. Inserts past this
/// bound evict the oldest records first.
pub const MAX_PHOTOS: usize = 100;

/// Stats bucket for photos without an aspect class.
pub const UNTAGGED_ASPECT: &str = "unknown";

/// Display aspect class of a photo. Governs display proportions only,
/// never the actual pixel dimensions of the stored payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    /// 2:3
    Portrait,
    /// 3:2
    Landscape,
    /// 1:1
    Square,
    /// 16:9
    Wide,
    /// 3:1
    Panorama,
    /// 21:9
    Cinema,
    /// 5:4
    Instant,
}

impl AspectClass {
    pub const ALL: [AspectClass; 7] = [
        AspectClass::Portrait,
        AspectClass::Landscape,
        AspectClass::Square,
        AspectClass::Wide,
        AspectClass::Panorama,
        AspectClass::Cinema,
        AspectClass::Instant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectClass::Portrait => "portrait",
            AspectClass::Landscape => "landscape",
            AspectClass::Square => "square",
            AspectClass::Wide => "wide",
            AspectClass::Panorama => "panorama",
            AspectClass::Cinema => "cinema",
            AspectClass::Instant => "instant",
        }
    }

    /// Parse a class name, case-insensitive. Returns `None` for unknown names.
    pub fn parse(raw: &str) -> Option<AspectClass> {
        let lower = raw.to_ascii_lowercase();
        AspectClass::ALL.iter().copied().find(|c| c.as_str() == lower)
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored photograph. Fully portable: the image payload is inlined,
/// so a record round-trips through the store without external files.
///
/// Serialized field names match the persisted slot layout (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Opaque unique identifier, assigned at ingestion, never reused.
    pub id: String,
    /// Display name, the original filename with its extension stripped.
    pub name: String,
    /// Inline `data:image/jpeg;base64,…` payload.
    #[serde(rename = "imageData")]
    pub image_data: String,
    /// Mutable classification label; never empty.
    pub folder: String,
    /// Ingestion date, calendar granularity.
    pub date: NaiveDate,
    /// Display aspect; absent means callers default to square.
    #[serde(
        rename = "aspectRatioClass",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub aspect: Option<AspectClass>,
}

/// Filter selector for listing and bulk deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Favorites,
    Archive,
    /// Any other folder name, matched case-insensitively.
    Folder(String),
}

impl Scope {
    /// Parse a scope string: the sentinels `all`, `favorites` and `archive`
    /// (case-insensitive) or an arbitrary folder name.
    pub fn parse(raw: &str) -> Scope {
        match raw.to_lowercase().as_str() {
            "all" => Scope::All,
            "favorites" => Scope::Favorites,
            "archive" => Scope::Archive,
            _ => Scope::Folder(raw.to_string()),
        }
    }

    /// Whether a record falls inside this scope. The reserved scopes match
    /// their folder labels exactly; named scopes match case-insensitively.
    pub fn matches(&self, record: &PhotoRecord) -> bool {
        match self {
            Scope::All => true,
            Scope::Favorites => record.folder == FAVORITES_FOLDER,
            Scope::Archive => record.folder == ARCHIVE_FOLDER,
            Scope::Folder(name) => record.folder.to_lowercase() == name.to_lowercase(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Favorites => f.write_str("favorites"),
            Scope::Archive => f.write_str("archive"),
            Scope::Folder(name) => f.write_str(name),
        }
    }
}

/// Aggregate counts derived from the collection. Always a pure function of
/// the current photo list, recomputed after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoStats {
    pub total: usize,
    pub by_folder: std::collections::BTreeMap<String, usize>,
    /// Keyed by `AspectClass::as_str`, untagged photos under [`UNTAGGED_ASPECT`].
    pub by_aspect: std::collections::BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(folder: &str) -> PhotoRecord {
        PhotoRecord {
            id: "1".to_string(),
            name: "test".to_string(),
            image_data: "data:image/jpeg;base64,".to_string(),
            folder: folder.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
            aspect: None,
        }
    }

    #[test]
    fn test_aspect_parse_roundtrip() {
        for class in AspectClass::ALL {
            assert_eq!(AspectClass::parse(class.as_str()), Some(class));
        }
    }

    #[test]
    fn test_aspect_parse_case_insensitive() {
        assert_eq!(AspectClass::parse("Portrait"), Some(AspectClass::Portrait));
        assert_eq!(AspectClass::parse("WIDE"), Some(AspectClass::Wide));
    }

    #[test]
    fn test_aspect_parse_unknown() {
        assert_eq!(AspectClass::parse("circular"), None);
        assert_eq!(AspectClass::parse(""), None);
    }

    #[test]
    fn test_scope_parse_sentinels() {
        assert_eq!(Scope::parse("all"), Scope::All);
        assert_eq!(Scope::parse("Favorites"), Scope::Favorites);
        assert_eq!(Scope::parse("ARCHIVE"), Scope::Archive);
    }

    #[test]
    fn test_scope_parse_folder() {
        assert_eq!(Scope::parse("Nature"), Scope::Folder("Nature".to_string()));
    }

    #[test]
    fn test_scope_matches_all() {
        assert!(Scope::All.matches(&record("anything")));
    }

    #[test]
    fn test_scope_matches_reserved_exactly() {
        assert!(Scope::Favorites.matches(&record(FAVORITES_FOLDER)));
        // The reserved scope matches the reserved label, not lookalikes
        assert!(!Scope::Favorites.matches(&record("favorites")));
        assert!(Scope::Archive.matches(&record(ARCHIVE_FOLDER)));
        assert!(!Scope::Archive.matches(&record("archives")));
    }

    #[test]
    fn test_scope_matches_folder_case_insensitive() {
        let scope = Scope::Folder("nature".to_string());
        assert!(scope.matches(&record("Nature")));
        assert!(scope.matches(&record("NATURE")));
        assert!(!scope.matches(&record("Nature Reserve")));
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let mut rec = record("Nature");
        rec.aspect = Some(AspectClass::Wide);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["imageData"], "data:image/jpeg;base64,");
        assert_eq!(json["aspectRatioClass"], "wide");
        assert_eq!(json["date"], "2025-04-26");
    }

    #[test]
    fn test_record_omits_absent_aspect() {
        let json = serde_json::to_value(record("Nature")).unwrap();
        assert!(json.get("aspectRatioClass").is_none());
    }
}
