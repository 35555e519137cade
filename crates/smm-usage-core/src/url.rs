use crate::config::DEFAULT_CDN_BASE_URL;

/// Builds public CDN URLs from stored relative media paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnUrlResolver {
    base: String,
}

impl CdnUrlResolver {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Plain concatenation of the base and `relative_path`. The path is not checked for
    /// existence and no separator is added or removed.
    pub fn to_public_url(&self, relative_path: &str) -> String {
        format!("{}{}", self.base, relative_path)
    }

    /// Like [`to_public_url`](Self::to_public_url), but yields nothing for an absent or empty
    /// path so a base-only link is never produced.
    pub fn resolve(&self, relative_path: Option<&str>) -> Option<String> {
        match relative_path {
            Some(path) if !path.is_empty() => Some(self.to_public_url(path)),
            _ => None,
        }
    }
}

impl Default for CdnUrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE_URL)
    }
}
