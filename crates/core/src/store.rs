use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::PhotoRecord;
use crate::error::{Error, Result};

/// Slot key holding the serialized photo collection.
const COLLECTION_SLOT: &str = "photo_collection";

/// Payload layout version. Bump when the record shape changes.
const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct PayloadRef<'a> {
    version: u32,
    photos: &'a [PhotoRecord],
}

#[derive(Deserialize)]
struct Payload {
    version: u32,
    photos: Vec<PhotoRecord>,
}

/// Single-slot durable store for the photo collection.
///
/// The whole collection is one JSON document written under one key, so a
/// save either fully completes or leaves the previous payload in place;
/// there is no partial state to recover from.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the store at the given path with WAL mode.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slots (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Load the persisted collection. Absence, an unreadable payload, and an
    /// unknown payload version all yield `Ok(None)`: first run and corrupt
    /// data look the same to the caller, and neither crashes it.
    pub fn load(&self) -> Result<Option<Vec<PhotoRecord>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![COLLECTION_SLOT],
                |row| row.get(0),
            )
            .ok();

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<Payload>(&raw) {
            Ok(payload) if payload.version == SCHEMA_VERSION => Ok(Some(payload.photos)),
            Ok(payload) => {
                warn!(
                    version = payload.version,
                    "unsupported collection payload version, starting fresh"
                );
                Ok(None)
            }
            Err(err) => {
                warn!(%err, "discarding corrupt collection payload");
                Ok(None)
            }
        }
    }

    /// Persist the full collection into the slot. A rejected write (quota)
    /// surfaces as [`Error::QuotaExceeded`] so the caller can warn the user
    /// instead of silently losing data.
    pub fn save(&self, photos: &[PhotoRecord]) -> Result<()> {
        let payload = serde_json::to_string(&PayloadRef {
            version: SCHEMA_VERSION,
            photos,
        })?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                params![COLLECTION_SLOT, payload],
            )
            .map_err(map_write_err)?;
        Ok(())
    }
}

fn map_write_err(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::DiskFull => {
            Error::QuotaExceeded
        }
        other => Error::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::AspectClass;

    fn record(id: &str, folder: &str, aspect: Option<AspectClass>) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            name: format!("photo {id}"),
            image_data: "data:image/jpeg;base64,AAAA".to_string(),
            folder: folder.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
            aspect,
        }
    }

    #[test]
    fn test_load_empty_store_returns_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let photos = vec![
            record("1", "Nature", Some(AspectClass::Wide)),
            record("2", "Portraits", None),
        ];

        store.save(&photos).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, photos);
    }

    #[test]
    fn test_save_overwrites_previous_payload() {
        let store = Store::open_in_memory().unwrap();
        store.save(&[record("1", "Nature", None)]).unwrap();
        store.save(&[record("2", "City", None)]).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "2");
    }

    #[test]
    fn test_corrupt_payload_treated_as_absent() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                params![COLLECTION_SLOT, "{not json"],
            )
            .unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_unknown_version_treated_as_absent() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                params![COLLECTION_SLOT, r#"{"version":99,"photos":[]}"#],
            )
            .unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_data_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("library.db");

        {
            let store = Store::open(&path).unwrap();
            store.save(&[record("1", "Nature", None)]).unwrap();
        }
        {
            let store = Store::open(&path).unwrap();
            let loaded = store.load().unwrap().unwrap();
            assert_eq!(loaded[0].id, "1");
        }
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/library.db");
        let _store = Store::open(&path).unwrap();
        assert!(path.exists());
    }
}
