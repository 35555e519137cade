pub mod memory;
pub mod models;
pub mod mongo;
mod queries;

pub use memory::InMemoryStore;
pub use models::{GenerationRecord, MediaId, MediaItem, OutputDescriptor, Timestamp};
pub use mongo::{CollectionNames, Database};

use crate::error::Error;
use crate::identity::UserId;

/// Read access to the two document collections.
///
/// Order of the returned items is whatever the backing store yields.
pub trait MediaStore {
    /// Media owned by `user_id` that are not soft-deleted.
    fn fetch_media(&self, user_id: &UserId) -> Result<Vec<MediaItem>, Error>;

    /// Generation records referencing `media_id`.
    fn fetch_generations(&self, media_id: &MediaId) -> Result<Vec<GenerationRecord>, Error>;
}

impl<S: MediaStore + ?Sized> MediaStore for &S {
    fn fetch_media(&self, user_id: &UserId) -> Result<Vec<MediaItem>, Error> {
        (**self).fetch_media(user_id)
    }

    fn fetch_generations(&self, media_id: &MediaId) -> Result<Vec<GenerationRecord>, Error> {
        (**self).fetch_generations(media_id)
    }
}
