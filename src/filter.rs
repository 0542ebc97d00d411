//! Oldest-record deduplication over extracted records.
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::record::ExtractedRecord;

/// Reduce `records` to one row per distinct (email, password) pair, keeping
/// the earliest dated occurrence.
///
/// Records are stably sorted by date ascending; records with an absent date
/// sort after every dated record, so a dated duplicate always wins over an
/// undated one. Ties keep the first-scanned record.
pub fn filter_oldest(records: &[ExtractedRecord]) -> Vec<ExtractedRecord> {
    let mut sorted: Vec<&ExtractedRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.date.is_none(), r.date.unwrap_or(NaiveDate::MAX)));

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut out = Vec::new();
    for r in sorted {
        if seen.insert((r.email.as_str(), r.password.as_str())) {
            out.push(r.clone());
        }
    }
    out
}
