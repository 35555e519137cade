use mongodb::bson::{doc, Document};
use tracing::debug;

use super::models::{GenerationRecord, MediaId, MediaItem};
use super::mongo::Database;
use super::MediaStore;
use crate::error::Error;
use crate::identity::UserId;

/// Media owned by `user_id` whose `DeletedYN` is not `true`. A missing flag counts as not
/// deleted, matching [`MediaItem::from_document`].
pub(crate) fn media_filter(user_id: &UserId) -> Document {
    doc! { "UserId": user_id.as_str(), "DeletedYN": { "$ne": true } }
}

pub(crate) fn generations_filter(media_id: &MediaId) -> Document {
    doc! { "MediaId": media_id.as_bson().clone() }
}

impl Database {
    fn find_documents(&self, collection: &str, filter: Document) -> Result<Vec<Document>, Error> {
        debug!("find on '{}' with filter {}", collection, filter);
        let query_error = |source| Error::Query {
            collection: collection.to_string(),
            source,
        };
        let cursor = self
            .collection(collection)
            .find(filter, None)
            .map_err(query_error)?;
        cursor
            .collect::<Result<Vec<Document>, _>>()
            .map_err(query_error)
    }
}

impl MediaStore for Database {
    fn fetch_media(&self, user_id: &UserId) -> Result<Vec<MediaItem>, Error> {
        let collection = &self.collections().media;
        let docs = self.find_documents(collection, media_filter(user_id))?;
        debug!("{} media documents for user {}", docs.len(), user_id);
        docs.iter()
            .map(|doc| MediaItem::from_document(doc, collection))
            .collect()
    }

    fn fetch_generations(&self, media_id: &MediaId) -> Result<Vec<GenerationRecord>, Error> {
        let collection = &self.collections().generations;
        let docs = self.find_documents(collection, generations_filter(media_id))?;
        debug!("{} generation documents for media {}", docs.len(), media_id);
        docs.iter()
            .map(|doc| GenerationRecord::from_document(doc, collection))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStore, MediaStore};

    #[test]
    fn test_media_filter_keeps_items_without_deleted_flag() {
        let filter = media_filter(&UserId::new("u1"));
        assert_eq!(filter.get_str("UserId").unwrap(), "u1");
        assert_eq!(
            filter.get_document("DeletedYN").unwrap(),
            &doc! { "$ne": true }
        );
    }

    #[test]
    fn test_memory_store_and_filter_agree_on_missing_flag() {
        let unflagged = MediaItem::from_document(&doc! { "_id": "m1", "UserId": "u1" }, "media").unwrap();
        let deleted = MediaItem::from_document(
            &doc! { "_id": "m2", "UserId": "u1", "DeletedYN": true },
            "media",
        )
        .unwrap();
        let store = InMemoryStore::new().with_media(unflagged).with_media(deleted);

        let visible = store.fetch_media(&UserId::new("u1")).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, MediaId::new("m1"));
    }

    #[test]
    fn test_generations_filter_matches_stored_id() {
        let filter = generations_filter(&MediaId::new("m1"));
        assert_eq!(filter, doc! { "MediaId": "m1" });
    }
}
