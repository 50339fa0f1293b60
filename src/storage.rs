//! Key/value persistence for the single training session.
//!
//! The browser build kept everything in localStorage under `catflex-*` keys;
//! the backend keeps the same keys in one JSON file so a restart resumes the
//! session where it left off. `KvStore` is the seam: `FileStore` backs the
//! server process, `MemoryStore` backs tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{error, info};

pub const KEY_USERNAME: &str = "catflex-username";
pub const KEY_DARK_MODE: &str = "catflex-dark-mode";
pub const KEY_LANGUAGE: &str = "catflex-language";
pub const KEY_THEME: &str = "catflex-theme";
pub const KEY_PROGRESS: &str = "catflex-progress";

/// Storage contract: string keys to string values, localStorage-style.
/// Values are stored verbatim; callers decide whether a value is raw text
/// or serialized JSON.
pub trait KvStore: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str);
  fn remove(&self, key: &str);
}

/// File-backed store. The whole map is rewritten on every mutation, which is
/// plenty for a handful of small keys.
pub struct FileStore {
  path: PathBuf,
  values: Mutex<HashMap<String, String>>,
}

impl FileStore {
  /// Open the store at `path`. A missing file means a fresh session; an
  /// unreadable or unparsable file is logged and treated as empty rather
  /// than refusing to start.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let values = match std::fs::read_to_string(&path) {
      Ok(s) => match serde_json::from_str::<HashMap<String, String>>(&s) {
        Ok(values) => {
          info!(target: "catflex_backend", path = %path.display(), entries = values.len(), "Loaded session state");
          values
        }
        Err(e) => {
          error!(target: "catflex_backend", path = %path.display(), error = %e, "Corrupt session state file, starting empty");
          HashMap::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
      Err(e) => {
        error!(target: "catflex_backend", path = %path.display(), error = %e, "Failed to read session state file, starting empty");
        HashMap::new()
      }
    };
    Self { path, values: Mutex::new(values) }
  }

  fn persist(&self, values: &HashMap<String, String>) {
    match serde_json::to_string_pretty(values) {
      Ok(json) => {
        if let Err(e) = std::fs::write(&self.path, json) {
          error!(target: "catflex_backend", path = %self.path.display(), error = %e, "Failed to write session state file");
        }
      }
      Err(e) => {
        error!(target: "catflex_backend", error = %e, "Failed to serialize session state");
      }
    }
  }
}

impl KvStore for FileStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().ok().and_then(|values| values.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) {
    if let Ok(mut values) = self.values.lock() {
      values.insert(key.to_string(), value.to_string());
      self.persist(&values);
    }
  }

  fn remove(&self, key: &str) {
    if let Ok(mut values) = self.values.lock() {
      if values.remove(key).is_some() {
        self.persist(&values);
      }
    }
  }
}

/// In-memory store for tests. Same contract, nothing touches disk.
#[derive(Default)]
pub struct MemoryStore {
  values: Mutex<HashMap<String, String>>,
}

impl KvStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().ok().and_then(|values| values.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) {
    if let Ok(mut values) = self.values.lock() {
      values.insert(key.to_string(), value.to_string());
    }
  }

  fn remove(&self, key: &str) {
    if let Ok(mut values) = self.values.lock() {
      values.remove(key);
    }
  }
}
