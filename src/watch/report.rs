// src/watch/report.rs

//! Human-readable output: change reports and checksum listings.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local, SecondsFormat};

use crate::scan::{ChangeSet, Snapshot};

/// Changes detected by one poll cycle.
#[derive(Debug, Clone)]
pub struct ChangeReport {
    pub at: DateTime<Local>,
    pub changes: ChangeSet,
}

impl ChangeReport {
    /// Build a report stamped with the current local time. Paths are sorted
    /// so the printed lists are easy to scan.
    pub fn now(mut changes: ChangeSet) -> Self {
        changes.sort();
        Self {
            at: Local::now(),
            changes,
        }
    }
}

impl fmt::Display for ChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "files have changed at {}",
            self.at.to_rfc3339_opts(SecondsFormat::Millis, false)
        )?;
        writeln!(f, "\tadded: {}", quoted(&self.changes.added))?;
        writeln!(f, "\tedited: {}", quoted(&self.changes.edited))?;
        writeln!(f, "\tdeleted: {}", quoted(&self.changes.deleted))
    }
}

/// Render paths as a bracketed list of quoted strings, e.g. `["a", "b"]`.
fn quoted(paths: &[PathBuf]) -> String {
    let shown: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    format!("{shown:?}")
}

/// Write one line per file: `<hex>\t<path>`, or `ERROR: <reason>` for files
/// that could not be hashed. Lines are ordered by path.
pub fn write_checksums<W: Write + ?Sized>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    for fp in snapshot.sorted() {
        writeln!(out, "{fp}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Fingerprint;

    #[test]
    fn report_lists_each_category() {
        let changes = ChangeSet {
            added: vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")],
            edited: Vec::new(),
            deleted: vec![PathBuf::from("gone.txt")],
        };
        let text = ChangeReport::now(changes).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("files have changed at "));
        assert_eq!(lines[1], "\tadded: [\"a.txt\", \"b.txt\"]");
        assert_eq!(lines[2], "\tedited: []");
        assert_eq!(lines[3], "\tdeleted: [\"gone.txt\"]");
    }

    #[test]
    fn checksum_listing_is_sorted_and_marks_errors() {
        let snapshot: Snapshot = vec![
            Fingerprint::failed("z.txt", "permission denied"),
            Fingerprint::digest("a.txt", [0xab; 20]),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        write_checksums(&mut out, &snapshot).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\ta.txt\nERROR: permission denied\n", "ab".repeat(20))
        );
    }
}
