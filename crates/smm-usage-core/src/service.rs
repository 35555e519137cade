use std::time::Instant;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::Error;
use crate::gallery::{GalleryView, MediaSection};
use crate::identity::{IdentityResolver, UserId};
use crate::progress::ProgressReporter;
use crate::storage::MediaStore;
use crate::url::CdnUrlResolver;

/// Outcome of looking up an email. An unknown email is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    UnknownUser { email: String },
    Found { email: String, gallery: GalleryView },
}

impl Lookup {
    pub fn email(&self) -> &str {
        match self {
            Lookup::UnknownUser { email } | Lookup::Found { email, .. } => email,
        }
    }

    pub fn gallery(&self) -> Option<&GalleryView> {
        match self {
            Lookup::UnknownUser { .. } => None,
            Lookup::Found { gallery, .. } => Some(gallery),
        }
    }
}

/// Resolve → fetch media → fetch generations per item → lay out.
pub struct GalleryService<S> {
    store: S,
    identities: IdentityResolver,
    urls: CdnUrlResolver,
}

impl<S: MediaStore> GalleryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            identities: IdentityResolver::builtin(),
            urls: CdnUrlResolver::default(),
        }
    }

    pub fn from_config(store: S, config: &AppConfig) -> Self {
        Self {
            store,
            identities: IdentityResolver::with_entries(&config.identities),
            urls: CdnUrlResolver::new(config.cdn_base_url.as_str()),
        }
    }

    pub fn with_identities(mut self, identities: IdentityResolver) -> Self {
        self.identities = identities;
        self
    }

    pub fn with_urls(mut self, urls: CdnUrlResolver) -> Self {
        self.urls = urls;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Look up `email`. The store is not touched when the email has no mapping.
    /// A failed query is returned as an error, never as an empty gallery.
    pub fn lookup(&self, email: &str, reporter: &dyn ProgressReporter) -> Result<Lookup, Error> {
        match self.identities.resolve(email) {
            Some(user_id) => {
                debug!("Resolved {} to user {}", email, user_id);
                Ok(Lookup::Found {
                    email: email.to_string(),
                    gallery: self.gallery_for(user_id, reporter)?,
                })
            }
            None => {
                info!("No user mapped to '{}'", email);
                Ok(Lookup::UnknownUser {
                    email: email.to_string(),
                })
            }
        }
    }

    pub fn gallery_for(
        &self,
        user_id: &UserId,
        reporter: &dyn ProgressReporter,
    ) -> Result<GalleryView, Error> {
        reporter.on_media_fetch_start(user_id.as_str());
        let media_start = Instant::now();
        let media = self.store.fetch_media(user_id)?;
        reporter.on_media_fetch_complete(media.len(), media_start.elapsed().as_secs_f64());

        let total = media.len();
        let mut sections = Vec::with_capacity(total);
        for (index, item) in media.iter().enumerate() {
            reporter.on_generations_fetch_start(index + 1, total);
            let start = Instant::now();
            let generations = self.store.fetch_generations(&item.id)?;
            reporter.on_generations_fetch_complete(generations.len(), start.elapsed().as_secs_f64());
            debug!("Media {}: {} generations", item.id, generations.len());
            sections.push(MediaSection::new(item, &generations, &self.urls));
        }

        let view = GalleryView {
            user_id: user_id.clone(),
            sections,
        };
        info!(
            "User {}: {} media items, {} generations",
            user_id,
            view.sections.len(),
            view.generation_count()
        );
        Ok(view)
    }
}
