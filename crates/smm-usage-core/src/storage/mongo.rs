use mongodb::bson::{doc, Document};
use mongodb::sync::{Client, Collection};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct CollectionNames {
    pub media: String,
    pub generations: String,
}

impl CollectionNames {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            media: config.media_collection.clone(),
            generations: config.generations_collection.clone(),
        }
    }
}

/// Long-lived, read-only handle on the MongoDB database holding the media collections.
pub struct Database {
    client: Client,
    db: mongodb::sync::Database,
    collections: CollectionNames,
}

impl Database {
    /// Build a client and verify the server answers a `ping` before returning, so an
    /// unreachable server fails here rather than on the first query.
    pub fn connect(uri: &str, db_name: &str, collections: CollectionNames) -> Result<Self, Error> {
        let client = Client::with_uri_str(uri).map_err(Error::Connection)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .map_err(Error::Connection)?;
        info!("Connected to MongoDB database '{}'", db_name);

        let db = client.database(db_name);
        Ok(Database {
            client,
            db,
            collections,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::connect(
            config.mongo_url()?,
            &config.db_name,
            CollectionNames::from_config(config),
        )
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }

    pub fn collections(&self) -> &CollectionNames {
        &self.collections
    }

    pub(crate) fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }

    /// Close the client's connection pools.
    pub fn close(self) {
        debug!("Shutting down MongoDB client");
        self.client.shutdown();
    }
}
