//! Human-readable summary rendering for terminal output.
use std::collections::{BTreeMap, HashSet};

use colored::*;

use crate::engine::Engine;
use crate::filter::filter_oldest;

fn section_header(title: &str) -> String {
    let mut s = String::new();
    s.push('\n');
    s.push_str(title);
    s.push('\n');
    s.push_str(&"─".repeat(title.chars().count()));
    s.push_str("\n\n");
    s
}

/// Render extraction totals and a per-source-file breakdown.
pub fn render_summary(engine: &Engine) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        "Xtract: Leak Archive Extraction Results".bold().cyan()
    ));

    let emails: HashSet<&str> = engine.records.iter().map(|r| r.email.as_str()).collect();
    let passwords: HashSet<&str> = engine.records.iter().map(|r| r.password.as_str()).collect();
    let filtered = filter_oldest(&engine.records);

    out.push_str(&section_header("Totals"));
    out.push_str(&format!("Extracted records: {}\n", engine.records.len()));
    out.push_str(&format!("Oldest per credential: {}\n", filtered.len()));
    out.push_str(&format!("Distinct emails: {}\n", emails.len()));
    out.push_str(&format!("Distinct passwords: {}\n", passwords.len()));

    let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
    for r in &engine.records {
        *by_source.entry(r.filename.as_str()).or_default() += 1;
    }
    out.push_str(&section_header("Source Breakdown"));
    if by_source.is_empty() {
        out.push_str("(No records extracted)\n");
    } else {
        for (name, count) in by_source {
            out.push_str(&format!("  {}: {}\n", name.bold().green(), count));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataEntry;
    use crate::record::ExtractedRecord;

    #[test]
    fn summary_counts_records_and_sources() {
        let meta = MetadataEntry {
            name: "Leak".to_string(),
            ..MetadataEntry::default()
        };
        let mut e = Engine::new();
        for (email, pw) in [("a@x.com", "p1"), ("b@x.com", "p2")] {
            e.records.push(ExtractedRecord::new(
                email,
                pw.to_string(),
                String::new(),
                String::new(),
                &meta,
            ));
        }
        let s = render_summary(&e);
        assert!(s.contains("Extracted records: 2"));
        assert!(s.contains("Distinct emails: 2"));
        assert!(s.contains("Leak"));
    }

    #[test]
    fn sections_have_blank_line_after_underline() {
        let s = render_summary(&Engine::new());
        assert!(s.contains("Totals\n──────\n\nExtracted records"));
    }

    #[test]
    fn summary_handles_empty_run() {
        let e = Engine::new();
        let s = render_summary(&e);
        assert!(s.contains("Extracted records: 0"));
        assert!(s.contains("(No records extracted)"));
    }
}
