//! # Download Sink
//!
//! Saves the summary as a UTF-8 text file named after the date:
//! `drawer-kun-YYYY-MM-DD.txt`. An existing file is never overwritten;
//! the next free ` (n)` suffix is used instead, the way browsers number
//! repeated downloads.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::ExportError;

/// File name prefix for saved summaries.
pub const FILE_PREFIX: &str = "drawer-kun";

/// Highest ` (n)` suffix tried before giving up.
const MAX_SUFFIX: u32 = 999;

/// Writes summaries into a directory.
#[derive(Debug, Clone)]
pub struct DownloadSink {
    dir: PathBuf,
}

impl DownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DownloadSink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `drawer-kun-2024-03-15.txt`
    pub fn file_name(date: NaiveDate) -> String {
        format!("{}-{}.txt", FILE_PREFIX, date.format("%Y-%m-%d"))
    }

    fn numbered_name(date: NaiveDate, n: u32) -> String {
        format!("{}-{} ({}).txt", FILE_PREFIX, date.format("%Y-%m-%d"), n)
    }

    /// Saves `text` and returns the path written.
    ///
    /// The directory is created if missing.
    pub async fn save(&self, text: &str, date: NaiveDate) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExportError::Io {
                path: self.dir.clone(),
                source,
            })?;

        for n in 0..=MAX_SUFFIX {
            let name = if n == 0 {
                Self::file_name(date)
            } else {
                Self::numbered_name(date, n)
            };
            let path = self.dir.join(&name);

            let open = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let mut file = match open {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "File exists, trying next name");
                    continue;
                }
                Err(source) => return Err(ExportError::Io { path, source }),
            };

            let written = async {
                file.write_all(text.as_bytes()).await?;
                file.flush().await
            }
            .await;

            if let Err(source) = written {
                return Err(ExportError::Io { path, source });
            }

            info!(path = %path.display(), bytes = text.len(), "Summary saved");
            return Ok(path);
        }

        Err(ExportError::NameExhausted(Self::file_name(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(DownloadSink::file_name(date()), "drawer-kun-2024-03-15.txt");
    }

    #[tokio::test]
    async fn test_save_writes_utf8_text() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DownloadSink::new(dir.path());

        let path = sink.save("総合計: 91,500円", date()).await.unwrap();

        assert_eq!(path, dir.path().join("drawer-kun-2024-03-15.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "総合計: 91,500円");
    }

    #[tokio::test]
    async fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DownloadSink::new(dir.path());

        let first = sink.save("first", date()).await.unwrap();
        let second = sink.save("second", date()).await.unwrap();
        let third = sink.save("third", date()).await.unwrap();

        assert_eq!(
            second.file_name().unwrap().to_str(),
            Some("drawer-kun-2024-03-15 (1).txt")
        );
        assert_eq!(
            third.file_name().unwrap().to_str(),
            Some("drawer-kun-2024-03-15 (2).txt")
        );
        assert_eq!(std::fs::read_to_string(first).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(second).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = DownloadSink::new(&nested);

        let path = sink.save("x", date()).await.unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
