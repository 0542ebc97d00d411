//! Metadata index loading and provenance modeling.
//!
//! Leak archives ship a fixed-name `Info.csv` entry mapping system
//! identifiers to human-readable provenance (origin file name, date, source
//! bucket, media and content type, size). This module parses that index into
//! a lookup keyed by normalized identifier and models each row as a typed
//! [`MetadataEntry`] with a tagged optional date instead of the sentinel
//! strings the raw index uses.
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use regex::Regex;
use serde::Deserialize;
use zip::ZipArchive;
use zip::result::ZipError;

/// Fixed name of the index entry inside the archive.
pub const INDEX_FILE_NAME: &str = "Info.csv";

static PART_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \[Part \d+ of \d+\]").expect("valid part-suffix regex"));

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index file Info.csv not found in archive")]
    Missing,
    #[error("malformed index: {0}")]
    Malformed(String),
}

/// Provenance attached to every record extracted from an archive entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataEntry {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub bucket: String,
    pub media: String,
    pub content_type: String,
    pub size: String,
}

impl MetadataEntry {
    /// Synthetic fallback for archive entries with no index row: the raw
    /// entry filename stands in for the name and the date is unknown.
    pub fn unknown(filename: &str) -> Self {
        Self {
            name: filename.to_string(),
            ..Self::default()
        }
    }
}

/// Raw index row as it appears in `Info.csv`. The first three columns are
/// required; the rest default to empty when the column is absent.
#[derive(Debug, Deserialize)]
struct IndexRow {
    #[serde(rename = "System ID")]
    system_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Bucket", default)]
    bucket: String,
    #[serde(rename = "Media", default)]
    media: String,
    #[serde(rename = "Content Type", default)]
    content_type: String,
    #[serde(rename = "Size", default)]
    size: String,
}

/// Normalize an entry identifier: everything before the first `.` (so
/// `123.txt` and the index key `123.csv` both resolve to `123`).
pub fn normalize_id(raw: &str) -> &str {
    raw.split('.').next().unwrap_or_default()
}

/// Strip every `" [Part N of M]"` suffix the provider appends to split
/// uploads, so all parts of one leak share a display name.
pub fn normalize_name(raw: &str) -> String {
    PART_SUFFIX_RE.replace_all(raw, "").into_owned()
}

/// Tolerant date parsing: a handful of common formats are attempted and
/// anything else (including the literal `Unknown Date`) maps to `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "Unknown Date" {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Locate and parse `Info.csv` inside the archive into a mapping from
/// normalized identifier to [`MetadataEntry`].
///
/// Fails with [`IndexError::Missing`] when the entry is absent and
/// [`IndexError::Malformed`] when a required column is missing or a row
/// cannot be deserialized.
pub fn load_index<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<HashMap<String, MetadataEntry>, IndexError> {
    let entry = match archive.by_name(INDEX_FILE_NAME) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(IndexError::Missing),
        Err(e) => return Err(IndexError::Malformed(e.to_string())),
    };
    let mut reader = csv::Reader::from_reader(entry);
    let headers = reader
        .headers()
        .map_err(|e| IndexError::Malformed(e.to_string()))?;
    for required in ["System ID", "Name", "Date"] {
        if !headers.iter().any(|h| h == required) {
            return Err(IndexError::Malformed(format!(
                "required column `{required}` is absent"
            )));
        }
    }
    let mut mapping = HashMap::new();
    for row in reader.deserialize::<IndexRow>() {
        let row = row.map_err(|e| IndexError::Malformed(e.to_string()))?;
        mapping.insert(
            normalize_id(&row.system_id).to_string(),
            MetadataEntry {
                name: normalize_name(&row.name),
                date: parse_date(&row.date),
                bucket: row.bucket,
                media: row.media,
                content_type: row.content_type,
                size: row.size,
            },
        );
    }
    info!("Info.csv mapping loaded successfully ({} rows)", mapping.len());
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn archive_with(files: &[(&str, &str)]) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        ZipArchive::new(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn normalizes_ids_and_part_suffixes() {
        assert_eq!(normalize_id("123.txt"), "123");
        assert_eq!(normalize_id("123"), "123");
        assert_eq!(normalize_name("Leak [Part 1 of 2]"), "Leak");
        assert_eq!(normalize_name("Plain Name"), "Plain Name");
    }

    #[test]
    fn parses_dates_and_maps_unknown_to_none() {
        assert_eq!(
            parse_date("2020-01-01"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(
            parse_date("2020-01-01 13:37:00"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(parse_date("Unknown Date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn loads_index_with_optional_columns_defaulted() {
        let mut archive = archive_with(&[(
            INDEX_FILE_NAME,
            "System ID,Name,Date\n123.csv,Leak [Part 1 of 2],2020-01-01\n",
        )]);
        let mapping = load_index(&mut archive).unwrap();
        let entry = mapping.get("123").unwrap();
        assert_eq!(entry.name, "Leak");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(entry.bucket, "");
        assert_eq!(entry.size, "");
    }

    #[test]
    fn loads_optional_columns_when_present() {
        let mut archive = archive_with(&[(
            INDEX_FILE_NAME,
            "System ID,Name,Date,Bucket,Media,Content Type,Size\n\
             9.txt,Dump,Unknown Date,pastes,Paste,text/plain,4 KB\n",
        )]);
        let mapping = load_index(&mut archive).unwrap();
        let entry = mapping.get("9").unwrap();
        assert_eq!(entry.date, None);
        assert_eq!(entry.bucket, "pastes");
        assert_eq!(entry.media, "Paste");
        assert_eq!(entry.content_type, "text/plain");
        assert_eq!(entry.size, "4 KB");
    }

    #[test]
    fn missing_index_is_reported() {
        let mut archive = archive_with(&[("123.txt", "whatever")]);
        assert!(matches!(load_index(&mut archive), Err(IndexError::Missing)));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let mut archive = archive_with(&[(INDEX_FILE_NAME, "System ID,Name\n1,Leak\n")]);
        assert!(matches!(
            load_index(&mut archive),
            Err(IndexError::Malformed(_))
        ));
    }

    #[test]
    fn header_only_index_missing_required_column_is_malformed() {
        let mut archive = archive_with(&[(INDEX_FILE_NAME, "System ID,Name\n")]);
        assert!(matches!(
            load_index(&mut archive),
            Err(IndexError::Malformed(_))
        ));
    }

    #[test]
    fn empty_index_file_is_malformed() {
        let mut archive = archive_with(&[(INDEX_FILE_NAME, "")]);
        assert!(matches!(
            load_index(&mut archive),
            Err(IndexError::Malformed(_))
        ));
    }
}
