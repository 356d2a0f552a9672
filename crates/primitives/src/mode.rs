//! Search mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the backend should interpret a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
	/// Lexical term matching.
	#[default]
	Keyword,
	/// Embedding similarity.
	Semantic,
	/// Fused lexical and semantic ranking.
	Hybrid,
}

/// Error returned for an unrecognized mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search mode: '{0}' (expected keyword, semantic or hybrid)")]
pub struct SearchModeError(pub String);

impl SearchMode {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Keyword => "keyword",
			Self::Semantic => "semantic",
			Self::Hybrid => "hybrid",
		}
	}
}

impl fmt::Display for SearchMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SearchMode {
	type Err = SearchModeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"keyword" => Ok(Self::Keyword),
			"semantic" => Ok(Self::Semantic),
			"hybrid" => Ok(Self::Hybrid),
			_ => Err(SearchModeError(s.to_string())),
		}
	}
}
