//! Append-only record of generated passphrases.

use crate::error::{Error, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC%:z";

pub fn format_entry<Tz>(timestamp: &DateTime<Tz>, passphrase: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{} - {}", timestamp.format(TIMESTAMP_FORMAT), passphrase)
}

#[derive(Debug)]
pub struct Journal<W: Write> {
    out: W,
}

impl Journal<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::LogOpen {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "opened passphrase log");
        Ok(Self::new(file))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, passphrase: &str) -> Result<()> {
        self.record_at(&Local::now(), passphrase)
    }

    pub fn record_at<Tz>(&mut self, timestamp: &DateTime<Tz>, passphrase: &str) -> Result<()>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        writeln!(self.out, "{}", format_entry(timestamp, passphrase)).map_err(Error::LogWrite)?;
        self.out.flush().map_err(Error::LogWrite)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::fs;

    fn jst(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_format_entry() {
        let line = format_entry(&jst(2025, 3, 7, 8, 5, 9), "Alpha-Bravo-0042");
        assert_eq!(line, "2025-03-07 08:05:09 UTC+09:00 - Alpha-Bravo-0042");
    }

    #[test]
    fn test_format_entry_negative_offset() {
        let ts = FixedOffset::west_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2024, 12, 31, 23, 59, 59)
            .unwrap();
        assert_eq!(
            format_entry(&ts, "x-0000"),
            "2024-12-31 23:59:59 UTC-05:30 - x-0000"
        );
    }

    #[test]
    fn test_record_writes_one_line_per_entry() {
        let mut journal = Journal::new(Vec::new());
        journal
            .record_at(&jst(2025, 1, 1, 0, 0, 0), "Alpha-Bravo-0001")
            .unwrap();
        journal
            .record_at(&jst(2025, 1, 1, 0, 0, 1), "Charlie-Delta-0002-N4M4")
            .unwrap();

        let text = String::from_utf8(journal.into_inner()).unwrap();
        assert_eq!(
            text,
            "2025-01-01 00:00:00 UTC+09:00 - Alpha-Bravo-0001\n\
             2025-01-01 00:00:01 UTC+09:00 - Charlie-Delta-0002-N4M4\n"
        );
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.log");
        fs::write(&path, "earlier line\n").unwrap();

        let mut journal = Journal::open(&path).unwrap();
        journal.record("Alpha-Bravo-0042").unwrap();
        drop(journal);

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "earlier line");
        assert!(lines[1].ends_with(" - Alpha-Bravo-0042"));
        assert!(lines[1].contains(" UTC"));
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("generator.log");

        let err = Journal::open(&path).unwrap_err();
        assert!(matches!(err, Error::LogOpen { .. }));
        assert!(err.to_string().contains("generator.log"));
    }
}
