use std::fmt;

use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};

use crate::error::Error;
use crate::identity::UserId;

/// Identifier of a media document, kept in its stored BSON form so it can be
/// matched against `MediaId` references exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaId(Bson);

impl MediaId {
    pub fn new(id: impl Into<Bson>) -> Self {
        MediaId(id.into())
    }

    pub fn as_bson(&self) -> &Bson {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Bson::ObjectId(oid) => write!(f, "{}", oid.to_hex()),
            Bson::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// An uploaded media document (`media` collection).
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: MediaId,
    pub user_id: UserId,
    /// Relative path under the CDN base; `None` when absent or not a string.
    pub media_path: Option<String>,
    pub deleted: bool,
}

/// One AI generation output (`ai_generations` collection).
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub id: Bson,
    pub media_id: MediaId,
    pub process_type: Option<String>,
    pub transformation_type: Option<String>,
    pub workflow_id: Option<String>,
    pub created_at: Option<Timestamp>,
    pub output: Option<OutputDescriptor>,
}

impl GenerationRecord {
    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.output_path.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub output_path: Option<String>,
}

/// Creation time as it was found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A native BSON datetime (or epoch milliseconds inside a `$date` wrapper).
    Native(DateTime<Utc>),
    /// A string, expected to be ISO-8601.
    Text(String),
    /// Any other value, kept in its display form.
    Other(String),
}

impl Timestamp {
    pub fn from_bson(value: &Bson) -> Option<Timestamp> {
        match value {
            Bson::Null | Bson::Undefined => None,
            Bson::DateTime(dt) => Some(from_millis(dt.timestamp_millis(), value)),
            Bson::String(s) => Some(Timestamp::Text(s.clone())),
            Bson::Document(doc) => match doc.get("$date") {
                Some(inner) => Some(unwrap_date(inner)),
                None => Some(Timestamp::Other(value.to_string())),
            },
            other => Some(Timestamp::Other(other.to_string())),
        }
    }
}

fn unwrap_date(inner: &Bson) -> Timestamp {
    match inner {
        Bson::String(s) => Timestamp::Text(s.clone()),
        Bson::DateTime(dt) => from_millis(dt.timestamp_millis(), inner),
        Bson::Int64(ms) => from_millis(*ms, inner),
        Bson::Int32(ms) => from_millis(i64::from(*ms), inner),
        Bson::Document(doc) => match doc.get_str("$numberLong").ok().and_then(|s| s.parse().ok()) {
            Some(ms) => from_millis(ms, inner),
            None => Timestamp::Other(inner.to_string()),
        },
        other => Timestamp::Other(other.to_string()),
    }
}

fn from_millis(ms: i64, original: &Bson) -> Timestamp {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => Timestamp::Native(dt),
        None => Timestamp::Other(original.to_string()),
    }
}

/// Display text of a loosely typed metadata value. Missing and null values are unknown.
fn metadata_text(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key)? {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn string_field(doc: &Document, key: &str) -> Option<String> {
    doc.get_str(key).ok().map(str::to_string)
}

fn required_id(doc: &Document, collection: &str) -> Result<Bson, Error> {
    doc.get("_id")
        .cloned()
        .ok_or_else(|| Error::MalformedDocument {
            collection: collection.to_string(),
            reason: "document has no _id".to_string(),
        })
}

impl MediaItem {
    pub fn from_document(doc: &Document, collection: &str) -> Result<MediaItem, Error> {
        Ok(MediaItem {
            id: MediaId(required_id(doc, collection)?),
            user_id: UserId::new(doc.get_str("UserId").unwrap_or_default()),
            media_path: string_field(doc, "MediaURL"),
            deleted: doc.get_bool("DeletedYN").unwrap_or(false),
        })
    }
}

impl GenerationRecord {
    pub fn from_document(doc: &Document, collection: &str) -> Result<GenerationRecord, Error> {
        Ok(GenerationRecord {
            id: required_id(doc, collection)?,
            media_id: MediaId(doc.get("MediaId").cloned().unwrap_or(Bson::Null)),
            process_type: metadata_text(doc, "ProcessType"),
            transformation_type: metadata_text(doc, "TransformationType"),
            workflow_id: metadata_text(doc, "GenerationWorkflowId"),
            created_at: doc.get("CreatedAt").and_then(Timestamp::from_bson),
            output: doc.get_document("Output").ok().map(|output| OutputDescriptor {
                output_path: string_field(output, "OutputURL"),
            }),
        })
    }
}
