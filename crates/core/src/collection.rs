use tracing::{info, warn};

use crate::domain::{PhotoRecord, Scope, DEFAULT_FOLDER, MAX_PHOTOS};
use crate::error::Result;
use crate::seed;
use crate::store::Store;

/// Outcome of a batch insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertReport {
    pub inserted: usize,
    /// Oldest photos dropped to keep the collection within [`MAX_PHOTOS`].
    pub evicted: usize,
}

/// The in-memory authoritative photo list, kept synchronized with its store.
///
/// Every mutation flushes the whole collection before returning. When a
/// flush fails, the in-memory state keeps the attempted change and the
/// returned error tells the caller the persisted copy is stale; the next
/// successful mutation re-persists everything, so no separate retry
/// machinery is needed.
pub struct CollectionStore {
    store: Store,
    photos: Vec<PhotoRecord>,
}

impl CollectionStore {
    /// Load the persisted collection, seeding demo content when the store
    /// holds no usable data. The seed is persisted immediately so later
    /// loads are idempotent; a failed seed write degrades to a warning.
    pub fn load_or_seed(store: Store) -> Result<Self> {
        let photos = match store.load()? {
            Some(photos) => photos,
            None => {
                let photos = seed::demo_photos();
                info!(count = photos.len(), "seeding empty library with demo photos");
                if let Err(err) = store.save(&photos) {
                    warn!(%err, "could not persist demo seed");
                }
                photos
            }
        };
        Ok(Self { store, photos })
    }

    /// All photos in collection order.
    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    /// Append a batch, evicting oldest-first once the capacity bound is
    /// crossed, then flush.
    pub fn insert_batch(&mut self, records: Vec<PhotoRecord>) -> Result<InsertReport> {
        if records.is_empty() {
            return Ok(InsertReport {
                inserted: 0,
                evicted: 0,
            });
        }

        let inserted = records.len();
        self.photos.extend(records);

        let evicted = self.photos.len().saturating_sub(MAX_PHOTOS);
        if evicted > 0 {
            self.photos.drain(..evicted);
            warn!(evicted, "collection at capacity, dropped oldest photos");
        }

        self.flush()?;
        Ok(InsertReport { inserted, evicted })
    }

    /// Remove the photo with the given id. Unknown ids are a no-op and do
    /// not touch the store. Returns whether a photo was removed.
    pub fn delete_one(&mut self, id: &str) -> Result<bool> {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != id);
        if self.photos.len() == before {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Remove every photo matching the scope, preserving the order of the
    /// survivors. Returns how many were removed.
    pub fn delete_all_matching(&mut self, scope: &Scope) -> Result<usize> {
        let before = self.photos.len();
        self.photos.retain(|p| !scope.matches(p));
        let removed = before - self.photos.len();
        if removed > 0 {
            self.flush()?;
        }
        Ok(removed)
    }

    /// Reassign a photo to a folder. Any target string is accepted; moving
    /// into a folder is what creates it. A blank target falls back to the
    /// default folder; unknown ids are a no-op.
    pub fn move_to_folder(&mut self, id: &str, folder: &str) -> Result<bool> {
        let folder = folder.trim();
        let folder = if folder.is_empty() { DEFAULT_FOLDER } else { folder };

        let Some(photo) = self.photos.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        if photo.folder == folder {
            return Ok(true);
        }
        photo.folder = folder.to_string();
        self.flush()?;
        Ok(true)
    }

    fn flush(&self) -> Result<()> {
        self.store.save(&self.photos)
    }
}
