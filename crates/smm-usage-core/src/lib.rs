pub mod config;
pub mod error;
pub mod gallery;
pub mod identity;
pub mod progress;
pub mod render;
pub mod service;
pub mod storage;
pub mod url;

pub use crate::config::AppConfig;
pub use crate::error::Error;
pub use crate::identity::{IdentityResolver, UserId};
pub use crate::progress::{ProgressReporter, SilentReporter};
pub use crate::service::{GalleryService, Lookup};
pub use crate::url::CdnUrlResolver;
