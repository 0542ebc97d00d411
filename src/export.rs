//! Export helpers persisting the pipeline outputs to the output directory.
//!
//! - `save_results` writes the full and deduplicated record tables as xlsx
//!   workbooks plus the three plain-text credential lists.
//! - `raw_data.txt` is an audit-then-purge artifact: written last, read by
//!   nothing, and deleted once every other write has succeeded.
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use rust_xlsxwriter::Workbook;

use crate::engine::Engine;
use crate::filter::filter_oldest;
use crate::record::ExtractedRecord;

const TABLE_HEADERS: [&str; 10] = [
    "Email",
    "Password",
    "Filename",
    "Date",
    "Phone",
    "Address",
    "Bucket",
    "Media",
    "Content Type",
    "Size",
];

fn save_records_xlsx<P: AsRef<Path>>(records: &[ExtractedRecord], path: P) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in TABLE_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, r) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let date = r.date_display();
        let cells = [
            r.email.as_str(),
            r.password.as_str(),
            r.filename.as_str(),
            date.as_str(),
            r.phone.as_str(),
            r.address.as_str(),
            r.bucket.as_str(),
            r.media.as_str(),
            r.content_type.as_str(),
            r.size.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            sheet.write_string(row, col as u16, *value)?;
        }
    }
    workbook
        .save(path.as_ref())
        .with_context(|| format!("write {}", path.as_ref().display()))?;
    Ok(())
}

fn save_lines<'a, P, I>(path: P, lines: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a str>,
{
    let mut f =
        File::create(&path).with_context(|| format!("create {}", path.as_ref().display()))?;
    for line in lines {
        writeln!(f, "{line}")?;
    }
    Ok(())
}

/// Persist every output artifact into `outdir`, creating it (and missing
/// parents) first:
///
/// - `result.xlsx` — every extracted record, scan order.
/// - `filtered.xlsx` — one row per (email, password), earliest date kept.
/// - `credentials.txt` — `email:password` lines, scan order.
/// - `emails.txt` / `passwords.txt` — distinct values, one per line.
/// - `raw_data.txt` — raw context dump, deleted again before returning;
///   deletion failure is logged and does not fail the run.
pub fn save_results<P: AsRef<Path>>(outdir: P, engine: &Engine) -> Result<()> {
    let outdir = outdir.as_ref();
    fs::create_dir_all(outdir)
        .with_context(|| format!("create output directory {}", outdir.display()))?;

    save_records_xlsx(&engine.records, outdir.join("result.xlsx"))?;
    save_records_xlsx(&filter_oldest(&engine.records), outdir.join("filtered.xlsx"))?;

    save_lines(
        outdir.join("credentials.txt"),
        engine.credentials.iter().map(String::as_str),
    )?;
    let emails: BTreeSet<&str> = engine.records.iter().map(|r| r.email.as_str()).collect();
    save_lines(outdir.join("emails.txt"), emails)?;
    let passwords: BTreeSet<&str> = engine.records.iter().map(|r| r.password.as_str()).collect();
    save_lines(outdir.join("passwords.txt"), passwords)?;

    let raw_path = outdir.join("raw_data.txt");
    let mut raw = File::create(&raw_path)
        .with_context(|| format!("create {}", raw_path.display()))?;
    raw.write_all(engine.raw_lines.join("\n\n").as_bytes())?;
    drop(raw);
    info!("all results saved to {}", outdir.display());

    if let Err(e) = fs::remove_file(&raw_path) {
        warn!("failed to delete {}: {e}", raw_path.display());
    }
    Ok(())
}
