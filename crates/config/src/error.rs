//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Non-fatal problems found while loading; the offending entry is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
	/// A shortcut chord did not parse.
	#[error("ignoring shortcut '{chord}': {reason}")]
	InvalidChord { chord: String, reason: String },

	/// A numeric option was out of range and replaced with its default.
	#[error("'{option}' must be at least {min}; using default {default}")]
	OutOfRange {
		option: &'static str,
		min: u64,
		default: u64,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
