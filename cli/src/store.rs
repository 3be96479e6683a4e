//! Session persisted to a JSON file between CLI invocations.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use resources::{SessionError, SessionStore};

const DEFAULT_FILE: &str = ".tourdesk/session.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$HOME/.tourdesk/session.json`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME").map_or_else(|| PathBuf::from(DEFAULT_FILE), |home| Path::new(&home).join(DEFAULT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn save(&self, raw: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SessionError::Storage(e.to_string()))?;
        }
        fs::write(&self.path, raw).map_err(|e| SessionError::Storage(e.to_string()))
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove session file");
            }
        }
    }
}
