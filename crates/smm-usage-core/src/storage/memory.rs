use std::cell::Cell;

use super::models::{GenerationRecord, MediaId, MediaItem};
use super::MediaStore;
use crate::error::Error;
use crate::identity::UserId;

/// In-process store applying the same filters as the MongoDB queries.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    media: Vec<MediaItem>,
    generations: Vec<GenerationRecord>,
    queries: Cell<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media(mut self, item: MediaItem) -> Self {
        self.media.push(item);
        self
    }

    pub fn with_generation(mut self, record: GenerationRecord) -> Self {
        self.generations.push(record);
        self
    }

    /// Number of fetch calls served so far.
    pub fn queries_issued(&self) -> usize {
        self.queries.get()
    }

    fn count_query(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl MediaStore for InMemoryStore {
    fn fetch_media(&self, user_id: &UserId) -> Result<Vec<MediaItem>, Error> {
        self.count_query();
        Ok(self
            .media
            .iter()
            .filter(|item| !item.deleted && &item.user_id == user_id)
            .cloned()
            .collect())
    }

    fn fetch_generations(&self, media_id: &MediaId) -> Result<Vec<GenerationRecord>, Error> {
        self.count_query();
        Ok(self
            .generations
            .iter()
            .filter(|record| &record.media_id == media_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: &str, user: &str, deleted: bool) -> MediaItem {
        MediaItem {
            id: MediaId::new(id),
            user_id: UserId::new(user),
            media_path: Some(format!("{}.jpg", id)),
            deleted,
        }
    }

    #[test]
    fn test_fetch_media_skips_deleted_and_foreign_items() {
        let store = InMemoryStore::new()
            .with_media(media("m1", "u1", false))
            .with_media(media("m2", "u1", true))
            .with_media(media("m3", "u2", false));

        let items = store.fetch_media(&UserId::new("u1")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, MediaId::new("m1"));
        assert_eq!(store.queries_issued(), 1);
    }

    #[test]
    fn test_fetch_media_is_repeatable() {
        let store = InMemoryStore::new()
            .with_media(media("m1", "u1", false))
            .with_media(media("m2", "u1", false));
        let user = UserId::new("u1");
        assert_eq!(store.fetch_media(&user).unwrap(), store.fetch_media(&user).unwrap());
    }
}
