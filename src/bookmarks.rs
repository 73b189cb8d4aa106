use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::store::KeyValueStore;

pub const SAVED_POSTS_KEY: &str = "savedPosts";

/// The set of saved story ids, stored as a JSON array under [`SAVED_POSTS_KEY`].
///
/// Every operation reads the persisted value fresh, so two views sharing a store
/// always agree.
#[derive(Clone)]
pub struct BookmarkStore {
    store: Arc<dyn KeyValueStore>,
}

impl BookmarkStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved ids in insertion order, duplicates collapsed.
    pub fn saved_ids(&self) -> Result<Vec<String>> {
        let Some(raw) = self.store.get(SAVED_POSTS_KEY)? else {
            return Ok(Vec::new());
        };
        let ids: Vec<String> = match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable saved posts value");
                return Ok(Vec::new());
            }
        };
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(unique)
    }

    #[allow(dead_code)]
    pub fn is_saved(&self, id: &str) -> bool {
        match self.saved_ids() {
            Ok(ids) => ids.iter().any(|saved| saved == id),
            Err(e) => {
                warn!(error = %e, "Failed to read saved posts");
                false
            }
        }
    }

    /// Adds or removes `id` and writes the whole set back. Returns the new saved state.
    pub fn toggle(&self, id: &str) -> Result<bool> {
        let mut ids = self.saved_ids()?;
        let now_saved = if let Some(pos) = ids.iter().position(|saved| saved == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.to_string());
            true
        };
        self.store
            .set(SAVED_POSTS_KEY, &serde_json::to_string(&ids)?)?;
        info!(id, saved = now_saved, "Toggled saved post");
        Ok(now_saved)
    }
}
