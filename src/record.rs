//! Extracted credential record data model.
//!
//! One `ExtractedRecord` is produced per domain-scoped email match that also
//! yields a password; matches without a password are discarded by the engine
//! and never reach this type. Provenance fields are copied verbatim from the
//! owning archive entry's [`MetadataEntry`](crate::metadata::MetadataEntry).
use chrono::NaiveDate;

use crate::metadata::MetadataEntry;

/// Rendering of an absent or unparseable provenance date.
pub const UNKNOWN_DATE: &str = "Unknown Date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub email: String,
    pub password: String,
    pub filename: String,
    pub date: Option<NaiveDate>,
    pub phone: String,
    pub address: String,
    pub bucket: String,
    pub media: String,
    pub content_type: String,
    pub size: String,
}

impl ExtractedRecord {
    /// Build a record from a matched email/password plus best-effort phone
    /// and address strings, copying provenance from the owning entry.
    pub fn new(
        email: &str,
        password: String,
        phone: String,
        address: String,
        meta: &MetadataEntry,
    ) -> Self {
        Self {
            email: email.to_string(),
            password,
            filename: meta.name.clone(),
            date: meta.date,
            phone,
            address,
            bucket: meta.bucket.clone(),
            media: meta.media.clone(),
            content_type: meta.content_type.clone(),
            size: meta.size.clone(),
        }
    }

    /// `"email:password"` projection used for the flat credential list.
    pub fn credential_pair(&self) -> String {
        format!("{}:{}", self.email, self.password)
    }

    /// Date rendered as `YYYY-MM-DD`, or [`UNKNOWN_DATE`] when absent.
    pub fn date_display(&self) -> String {
        match self.date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => UNKNOWN_DATE.to_string(),
        }
    }
}
