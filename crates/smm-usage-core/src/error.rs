use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to connect to MongoDB: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("Query against '{collection}' failed: {source}")]
    Query {
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Malformed document in '{collection}': {reason}")]
    MalformedDocument { collection: String, reason: String },
}

impl Error {
    /// Errors that leave the process unable to serve any lookup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::Connection(_))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
