//! Configuration for the sift search coordinator.
//!
//! Configuration is written in TOML:
//!
//! ```toml
//! [search]
//! debounce-ms = 300
//! announce-clear-ms = 1000
//! announcements = true
//! recents-limit = 10
//! locale = "en"
//!
//! # Chord → action name, matched first to last.
//! [shortcuts]
//! "cmd+k" = "focus"
//! "ctrl+n" = "next"
//! ```
//!
//! # Configuration Files
//!
//! Sift looks for `$XDG_CONFIG_HOME/sift/config.toml` (or the platform
//! equivalent). A missing file yields the defaults.
//!
//! Shortcut entries whose chord does not parse are dropped and reported in
//! [`Config::warnings`]. Action names are resolved by the coordinator, which
//! owns the action vocabulary.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, ConfigWarning, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// Default debounce quiescence window.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Default live-region display window before the announcement is cleared.
pub const DEFAULT_ANNOUNCE_CLEAR_MS: u64 = 1000;
/// Default number of recent queries kept.
pub const DEFAULT_RECENTS_LIMIT: usize = 10;

/// Search coordinator tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
	/// Quiescence window before a query is fetched.
	pub debounce_ms: u64,
	/// How long an announcement stays in the live region.
	pub announce_clear_ms: u64,
	/// Global switch for assistive-technology announcements.
	pub announcements: bool,
	/// Maximum number of recent queries persisted.
	pub recents_limit: usize,
	/// Initial locale tag.
	pub locale: String,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
			announce_clear_ms: DEFAULT_ANNOUNCE_CLEAR_MS,
			announcements: true,
			recents_limit: DEFAULT_RECENTS_LIMIT,
			locale: "en".to_string(),
		}
	}
}

impl SearchConfig {
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	pub fn announce_clear(&self) -> Duration {
		Duration::from_millis(self.announce_clear_ms)
	}
}

/// `[search]` keys as written in a file. Keys the file leaves out stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct SearchOverrides {
	debounce_ms: Option<u64>,
	announce_clear_ms: Option<u64>,
	announcements: Option<bool>,
	recents_limit: Option<usize>,
	locale: Option<String>,
}

impl SearchOverrides {
	fn apply(&self, search: &mut SearchConfig) {
		if let Some(ms) = self.debounce_ms {
			search.debounce_ms = ms;
		}
		if let Some(ms) = self.announce_clear_ms {
			search.announce_clear_ms = ms;
		}
		if let Some(enabled) = self.announcements {
			search.announcements = enabled;
		}
		if let Some(limit) = self.recents_limit {
			search.recents_limit = limit;
		}
		if let Some(locale) = &self.locale {
			search.locale.clone_from(locale);
		}
	}

	/// Layers `other` on top; its set keys win.
	fn extend(&mut self, other: Self) {
		self.debounce_ms = other.debounce_ms.or(self.debounce_ms);
		self.announce_clear_ms = other.announce_clear_ms.or(self.announce_clear_ms);
		self.announcements = other.announcements.or(self.announcements);
		self.recents_limit = other.recents_limit.or(self.recents_limit);
		self.locale = other.locale.or(self.locale.take());
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	search: SearchOverrides,
	shortcuts: IndexMap<String, String>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
	pub search: SearchConfig,
	/// Chord string → action name, in file order. Every chord here parses.
	pub shortcuts: IndexMap<String, String>,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
	/// `[search]` keys explicitly set by the parsed files.
	overrides: SearchOverrides,
}

impl Config {
	/// Parses a TOML string into a [`Config`].
	///
	/// Invalid shortcut chords and out-of-range values are reported in
	/// `warnings` rather than failing the parse.
	pub fn parse(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;
		let mut warnings = Vec::new();

		let mut overrides = raw.search;
		if overrides.recents_limit == Some(0) {
			warnings.push(ConfigWarning::OutOfRange {
				option: "recents-limit",
				min: 1,
				default: DEFAULT_RECENTS_LIMIT as u64,
			});
			overrides.recents_limit = None;
		}
		let mut search = SearchConfig::default();
		overrides.apply(&mut search);

		let mut shortcuts = IndexMap::with_capacity(raw.shortcuts.len());
		for (chord, action) in raw.shortcuts {
			match sift_keymap::parse_chord(&chord) {
				Ok(_) => {
					shortcuts.insert(chord, action);
				}
				Err(e) => warnings.push(ConfigWarning::InvalidChord {
					chord,
					reason: e.to_string(),
				}),
			}
		}

		for warning in &warnings {
			warn!(%warning, "config.warning");
		}

		Ok(Self {
			search,
			shortcuts,
			warnings,
			overrides,
		})
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		debug!(path = %path.display(), "config.load");
		Self::parse(&content)
	}

	/// Loads the user config file, falling back to defaults when it does not exist.
	pub fn load_default() -> Result<Self> {
		match default_path() {
			Some(path) if path.exists() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}

	/// Layers another config on top of this one.
	///
	/// Only the `[search]` keys `other` actually set replace ours. Shortcuts
	/// are appended, so chords already bound here keep precedence.
	pub fn merge(&mut self, other: Config) {
		other.overrides.apply(&mut self.search);
		self.overrides.extend(other.overrides);
		for (chord, action) in other.shortcuts {
			self.shortcuts.entry(chord).or_insert(action);
		}
		self.warnings.extend(other.warnings);
	}
}

/// Platform config path: `<config dir>/sift/config.toml`.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("sift").join("config.toml"))
}
