//! Engine: orchestrates index loading, archive entry scanning, and record
//! accumulation. The scan is a single sequential pass over the archive;
//! per-entry failures are logged and skipped so one undecodable entry never
//! aborts a run.
//!
//! Typical usage:
//!
//! ```no_run
//! use xtract::engine::Engine;
//! # fn main() -> anyhow::Result<()> {
//! let mut engine = Engine::new();
//! engine.load_from_zip("/path/to/search.zip", "example.com")?;
//! println!("{} records", engine.records.len());
//! # Ok(())
//! # }
//! ```
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use regex::Regex;
use zip::ZipArchive;

use crate::extract::{email_regex, extract_address, extract_password, extract_phone};
use crate::metadata::{INDEX_FILE_NAME, MetadataEntry, load_index, normalize_id};
use crate::record::ExtractedRecord;

/// Accumulates the three parallel pipeline outputs: structured records, the
/// flat `email:password` list, and raw context lines for the audit dump.
#[derive(Debug, Default)]
pub struct Engine {
    pub records: Vec<ExtractedRecord>,
    pub credentials: Vec<String>,
    pub raw_lines: Vec<String>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the archive at `path` and extract every domain-scoped credential.
    /// Archive-open and index errors are fatal; see [`Engine::load_from_reader`].
    pub fn load_from_zip<P: AsRef<Path>>(&mut self, path: P, domain: &str) -> Result<()> {
        let file = File::open(&path)
            .with_context(|| format!("open archive {}", path.as_ref().display()))?;
        self.load_from_reader(file, domain)
    }

    /// Run the full pipeline over an already-open archive byte source.
    /// Intended for tests and programmatic integrations over in-memory
    /// archives.
    pub fn load_from_reader<R: Read + Seek>(&mut self, reader: R, domain: &str) -> Result<()> {
        let mut archive = ZipArchive::new(reader).context("read zip archive")?;
        let mapping = load_index(&mut archive)?;
        let email_re = email_regex(domain)?;

        for i in 0..archive.len() {
            let mut entry = match archive.by_index(i) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("could not read archive entry #{i}: {e}");
                    continue;
                }
            };
            if entry.is_dir() || entry.name() == INDEX_FILE_NAME {
                continue;
            }
            let filename = entry.name().to_string();
            let meta = mapping
                .get(normalize_id(&filename))
                .cloned()
                .unwrap_or_else(|| MetadataEntry::unknown(&filename));
            info!(
                "processing entry {} -> {}, date {:?}",
                filename, meta.name, meta.date
            );

            let mut bytes = Vec::new();
            if let Err(e) = entry.read_to_end(&mut bytes) {
                warn!("could not process entry {filename}: {e}");
                continue;
            }
            // Lossy decoding: undecodable byte sequences degrade to
            // replacement characters instead of failing the entry.
            let content = String::from_utf8_lossy(&bytes);
            self.scan_content(&content, domain, &email_re, &meta);
        }
        Ok(())
    }

    /// Scan one entry's text for domain-scoped email matches and accumulate
    /// a record per match that also yields a password. Matches whose
    /// password extraction comes back empty are discarded outright.
    pub fn scan_content(
        &mut self,
        content: &str,
        domain: &str,
        email_re: &Regex,
        meta: &MetadataEntry,
    ) {
        for line in content.lines() {
            if !line.contains(domain) {
                continue;
            }
            for m in email_re.find_iter(line) {
                let email = m.as_str();
                let password = extract_password(line, email);
                if password.is_empty() {
                    continue;
                }
                let record = ExtractedRecord::new(
                    email,
                    password,
                    extract_phone(line),
                    extract_address(line),
                    meta,
                );
                self.credentials.push(record.credential_pair());
                self.raw_lines.push(format!(
                    "Filename: {} | Date: {}\n{}",
                    meta.name,
                    record.date_display(),
                    line
                ));
                self.records.push(record);
            }
        }
    }
}
