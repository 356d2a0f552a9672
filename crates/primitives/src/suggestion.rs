//! Suggestion model returned by suggestion sources.
//!
//! A result set is a `Vec<Suggestion>` whose ids are unique within the set.
//! Lists are replaced wholesale by the coordinator, never patched.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
	/// A query completion.
	Query,
	Document,
	Collection,
	User,
	Tag,
	/// A previously submitted query.
	Recent,
	/// A popular query across users.
	Trending,
}

/// What happens when a suggestion is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activation {
	/// Navigate to an application path.
	Navigate { path: String },
	/// Replace the query text and submit it.
	Query { text: String },
}

/// Optional ranking and provenance details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionMetadata {
	/// Source confidence in `[0, 1]`, read through [`Self::confidence`].
	#[serde(deserialize_with = "deserialize_confidence")]
	confidence: Option<f32>,
	pub last_modified: Option<DateTime<Utc>>,
	pub author: Option<String>,
	pub tags: Option<BTreeSet<String>>,
	pub relevance: Option<f32>,
	pub popularity: Option<f32>,
}

impl SuggestionMetadata {
	/// Sets the confidence, clamped to `[0, 1]`. NaN is dropped.
	#[must_use]
	pub fn with_confidence(mut self, confidence: f32) -> Self {
		self.confidence = clamp_confidence(confidence);
		self
	}

	pub fn confidence(&self) -> Option<f32> {
		self.confidence
	}

	#[must_use]
	pub fn with_author(mut self, author: impl Into<String>) -> Self {
		self.author = Some(author.into());
		self
	}

	#[must_use]
	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = Some(tags.into_iter().map(Into::into).collect());
		self
	}
}

fn clamp_confidence(confidence: f32) -> Option<f32> {
	(!confidence.is_nan()).then(|| confidence.clamp(0.0, 1.0))
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<f32>::deserialize(deserializer)?.and_then(clamp_confidence))
}

/// One entry of a suggestion list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
	/// Unique within a result set.
	pub id: String,
	pub kind: SuggestionKind,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<SuggestionMetadata>,
	pub activation: Activation,
}

impl Suggestion {
	/// Creates a suggestion that navigates to `path` when committed.
	pub fn navigate(id: impl Into<String>, kind: SuggestionKind, title: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind,
			title: title.into(),
			description: None,
			metadata: None,
			activation: Activation::Navigate { path: path.into() },
		}
	}

	/// Creates a query completion that submits its own title.
	pub fn query(id: impl Into<String>, text: impl Into<String>) -> Self {
		let text = text.into();
		Self {
			id: id.into(),
			kind: SuggestionKind::Query,
			title: text.clone(),
			description: None,
			metadata: None,
			activation: Activation::Query { text },
		}
	}

	#[must_use]
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	#[must_use]
	pub fn with_metadata(mut self, metadata: SuggestionMetadata) -> Self {
		self.metadata = Some(metadata);
		self
	}
}
