//! Recently submitted queries.
//!
//! [`Recents`] is the list logic: most recent first, exact-match dedupe, and a
//! fixed cap. Storage is behind [`PersistedRecents`]; [`JsonFileRecents`]
//! keeps the list as a JSON array on disk and [`MemoryRecents`] keeps it in
//! process.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

/// Errors from loading or saving recents.
#[derive(Debug, Error)]
pub enum RecentsError {
	#[error("I/O error on {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },
	#[error("malformed recents file {path}: {error}")]
	Json { path: PathBuf, error: serde_json::Error },
}

/// Storage contract for the recents list.
pub trait PersistedRecents: Send + Sync {
	fn load(&self) -> Result<Vec<String>, RecentsError>;
	fn save(&self, entries: &[String]) -> Result<(), RecentsError>;
}

/// Most-recent-first list of submitted queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recents {
	entries: Vec<String>,
	limit: usize,
}

impl Recents {
	/// Creates an empty list holding at most `limit` entries (minimum 1).
	pub fn new(limit: usize) -> Self {
		Self {
			entries: Vec::new(),
			limit: limit.max(1),
		}
	}

	/// Builds a list from stored entries, normalizing order, duplicates and cap.
	pub fn from_entries(entries: impl IntoIterator<Item = String>, limit: usize) -> Self {
		let mut recents = Self::new(limit);
		for entry in entries {
			if recents.entries.len() == recents.limit {
				break;
			}
			if !entry.is_empty() && !recents.entries.contains(&entry) {
				recents.entries.push(entry);
			}
		}
		recents
	}

	/// Records `query` as the most recent entry.
	///
	/// Returns false for an empty query.
	pub fn push(&mut self, query: impl Into<String>) -> bool {
		let query = query.into();
		if query.is_empty() {
			return false;
		}
		self.entries.retain(|e| *e != query);
		self.entries.insert(0, query);
		self.entries.truncate(self.limit);
		true
	}

	pub fn remove(&mut self, query: &str) -> bool {
		let before = self.entries.len();
		self.entries.retain(|e| e != query);
		self.entries.len() != before
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn limit(&self) -> usize {
		self.limit
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Recents stored as a JSON array of strings.
#[derive(Debug, Clone)]
pub struct JsonFileRecents {
	path: PathBuf,
}

impl JsonFileRecents {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `<data dir>/sift/recents.json`.
	pub fn default_path() -> Option<PathBuf> {
		dirs::data_dir().map(|dir| dir.join("sift").join("recents.json"))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn io_error(&self, error: std::io::Error) -> RecentsError {
		RecentsError::Io {
			path: self.path.clone(),
			error,
		}
	}
}

impl PersistedRecents for JsonFileRecents {
	/// A missing file is an empty list.
	fn load(&self) -> Result<Vec<String>, RecentsError> {
		let content = match std::fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(self.io_error(e)),
		};
		serde_json::from_str(&content).map_err(|error| RecentsError::Json {
			path: self.path.clone(),
			error,
		})
	}

	fn save(&self, entries: &[String]) -> Result<(), RecentsError> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
		}
		let json = serde_json::to_string_pretty(entries).map_err(|error| RecentsError::Json {
			path: self.path.clone(),
			error,
		})?;
		std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
		debug!(path = %self.path.display(), count = entries.len(), "recents.saved");
		Ok(())
	}
}

/// Process-local recents store.
#[derive(Debug, Default)]
pub struct MemoryRecents {
	entries: Mutex<Vec<String>>,
}

impl MemoryRecents {
	pub fn new(entries: Vec<String>) -> Self {
		Self {
			entries: Mutex::new(entries),
		}
	}

	/// Snapshot of the stored list.
	pub fn snapshot(&self) -> Vec<String> {
		self.entries.lock().clone()
	}
}

impl PersistedRecents for MemoryRecents {
	fn load(&self) -> Result<Vec<String>, RecentsError> {
		Ok(self.snapshot())
	}

	fn save(&self, entries: &[String]) -> Result<(), RecentsError> {
		*self.entries.lock() = entries.to_vec();
		Ok(())
	}
}
