//! Append-only request log file.
//!
//! The file is opened in append mode for every entry, so it can be rotated
//! or removed while the server runs.

use std::path::{Path, PathBuf};

use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

/// Writer for the request log file
#[derive(Debug)]
pub struct RequestLogFile {
    path: PathBuf,
    /// serializes appends so lines from concurrent requests never interleave
    write_lock: Mutex<()>,
}

impl RequestLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line. A trailing newline is added.
    pub async fn append(&self, line: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{line}\n").as_bytes()).await?;
        file.flush().await
    }
}
