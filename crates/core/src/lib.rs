pub mod classify;
pub mod collection;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod query;
pub mod seed;
pub mod store;

use std::path::Path;

use chrono::Utc;

use classify::{FallbackClassifier, WeightedRandom};
use collection::{CollectionStore, InsertReport};
use domain::{AspectClass, PhotoRecord, PhotoStats, Scope};
use error::Result;
use ingest::UploadFile;
use store::Store;

/// Progress callback events for a batch upload.
pub enum UploadProgress {
    /// Starting a batch with the total file count.
    Start { total: usize },
    /// One file finished the pipeline. `completed` increases by exactly one
    /// per event; files are processed strictly in order.
    FileDone { completed: usize, total: usize },
    /// Batch committed and persisted.
    Complete { inserted: usize, evicted: usize },
}

/// The main entry point for the photofolio library.
///
/// Owns the photo collection and its durable store; every read and mutation
/// the presentation layer needs goes through here. The API is synchronous
/// and single-writer by construction: mutating methods take `&mut self`,
/// so a host cannot interleave a second mutation with an in-flight upload.
pub struct Gallery {
    collection: CollectionStore,
    fallback: Box<dyn FallbackClassifier>,
}

impl Gallery {
    /// Open the library at the given path, loading the persisted collection
    /// or seeding demo content on first run.
    pub fn open(library_path: &Path) -> Result<Self> {
        Self::with_fallback(Store::open(library_path)?, Box::new(WeightedRandom))
    }

    /// Open an in-memory library (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::with_fallback(Store::open_in_memory()?, Box::new(WeightedRandom))
    }

    /// Open over an existing store with a custom fallback aspect classifier.
    pub fn with_fallback(store: Store, fallback: Box<dyn FallbackClassifier>) -> Result<Self> {
        Ok(Self {
            collection: CollectionStore::load_or_seed(store)?,
            fallback,
        })
    }

    /// All photos in collection order.
    pub fn photos(&self) -> &[PhotoRecord] {
        self.collection.photos()
    }

    /// Ingest a batch of raw files into the target folder.
    ///
    /// Files run through the pipeline strictly sequentially, so the progress
    /// callback sees `completed` counts of `1..=total` in order. One
    /// unreadable file aborts the whole batch before anything is committed;
    /// on success the batch lands as a single collection mutation, so an
    /// abandoned in-flight batch never leaves a partial flush behind.
    pub fn upload(
        &mut self,
        files: &[UploadFile],
        target_folder: &str,
        format_override: Option<AspectClass>,
        mut progress_cb: Option<&mut dyn FnMut(UploadProgress)>,
    ) -> Result<InsertReport> {
        let total = files.len();
        if let Some(ref mut cb) = progress_cb {
            cb(UploadProgress::Start { total });
        }

        let today = Utc::now().date_naive();
        let batch_stamp = Utc::now().timestamp_millis();

        let mut records = Vec::with_capacity(total);
        for (index, file) in files.iter().enumerate() {
            let id = self.next_id(batch_stamp, index);
            let record = ingest::process_file(
                file,
                target_folder,
                format_override,
                self.fallback.as_mut(),
                id,
                today,
            )?;
            records.push(record);

            if let Some(ref mut cb) = progress_cb {
                cb(UploadProgress::FileDone {
                    completed: index + 1,
                    total,
                });
            }
        }

        let report = self.collection.insert_batch(records)?;
        if let Some(ref mut cb) = progress_cb {
            cb(UploadProgress::Complete {
                inserted: report.inserted,
                evicted: report.evicted,
            });
        }
        Ok(report)
    }

    /// Remove one photo by id; unknown ids are a no-op. Returns whether a
    /// photo was removed.
    pub fn delete_one(&mut self, id: &str) -> Result<bool> {
        self.collection.delete_one(id)
    }

    /// Remove every photo matching the scope. Destructive and irreversible;
    /// callers confirm with the user before invoking. Returns the removed
    /// count.
    pub fn delete_all_matching(&mut self, scope: &Scope) -> Result<usize> {
        self.collection.delete_all_matching(scope)
    }

    /// Move a photo into a folder, creating the folder implicitly.
    pub fn move_to_folder(&mut self, id: &str, folder: &str) -> Result<bool> {
        self.collection.move_to_folder(id, folder)
    }

    /// Search + scope filtered view, in collection order.
    pub fn filter(&self, search: &str, scope: &Scope) -> Vec<&PhotoRecord> {
        query::filter(self.collection.photos(), search, scope)
    }

    /// Aggregate counts over the current collection.
    pub fn stats(&self) -> PhotoStats {
        query::stats(self.collection.photos())
    }

    /// Distinct folders in first-occurrence order.
    pub fn folders(&self) -> Vec<String> {
        query::folder_set(self.collection.photos())
    }

    /// Batch-stamp-plus-index id, uniquified against the existing
    /// collection so ids are never reused even across same-millisecond
    /// batches.
    fn next_id(&self, batch_stamp: i64, index: usize) -> String {
        let mut stamp = batch_stamp;
        let mut id = format!("{stamp}-{index}");
        while self.collection.photos().iter().any(|p| p.id == id) {
            stamp += 1;
            id = format!("{stamp}-{index}");
        }
        id
    }
}
