//! In-process suggestion source over a list of titles.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sift_primitives::{BoxFutureStatic, SearchMode, Suggestion, SuggestionKind, SuggestionMetadata};
use sift_search::SuggestionSource;

/// Maximum suggestions returned per query.
pub const MAX_SUGGESTIONS: usize = 8;

/// Reads a newline-separated title list, skipping blank lines.
pub fn load(path: &Path) -> anyhow::Result<Vec<String>> {
	let content = std::fs::read_to_string(path).with_context(|| format!("reading corpus {}", path.display()))?;
	Ok(parse(&content))
}

pub fn parse(content: &str) -> Vec<String> {
	content
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(String::from)
		.collect()
}

/// Matches titles against the query.
///
/// Keyword mode scores case-insensitive substring hits, semantic mode scores
/// the share of query words that prefix a title word, hybrid takes the better
/// of the two.
#[derive(Debug, Clone)]
pub struct CorpusSource {
	titles: Arc<[String]>,
	latency: Duration,
}

impl CorpusSource {
	pub fn new(titles: Vec<String>) -> Self {
		Self {
			titles: titles.into(),
			latency: Duration::ZERO,
		}
	}

	/// Delays every answer by `latency`.
	#[must_use]
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}

	pub fn len(&self) -> usize {
		self.titles.len()
	}

	/// Ranked matches for `query`.
	pub fn search(&self, query: &str, mode: SearchMode) -> Vec<Suggestion> {
		let query = query.trim().to_lowercase();
		if query.is_empty() {
			return Vec::new();
		}
		let mut hits: Vec<(f32, usize)> = self
			.titles
			.iter()
			.enumerate()
			.filter_map(|(i, title)| score(&title.to_lowercase(), &query, mode).map(|s| (s, i)))
			.collect();
		hits.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
		hits.truncate(MAX_SUGGESTIONS);

		hits.into_iter()
			.map(|(score, i)| {
				Suggestion::navigate(format!("doc-{i}"), SuggestionKind::Document, self.titles[i].clone(), format!("/doc/{i}"))
					.with_metadata(SuggestionMetadata::default().with_confidence(score))
			})
			.collect()
	}
}

impl SuggestionSource for CorpusSource {
	fn fetch(&self, query: &str, mode: SearchMode) -> BoxFutureStatic<anyhow::Result<Vec<Suggestion>>> {
		let results = self.search(query, mode);
		let latency = self.latency;
		Box::pin(async move {
			if !latency.is_zero() {
				tokio::time::sleep(latency).await;
			}
			Ok(results)
		})
	}
}

fn score(title: &str, query: &str, mode: SearchMode) -> Option<f32> {
	match mode {
		SearchMode::Keyword => keyword_score(title, query),
		SearchMode::Semantic => word_score(title, query),
		SearchMode::Hybrid => match (keyword_score(title, query), word_score(title, query)) {
			(Some(a), Some(b)) => Some(a.max(b)),
			(a, b) => a.or(b),
		},
	}
}

fn keyword_score(title: &str, query: &str) -> Option<f32> {
	let pos = title.find(query)?;
	Some(if pos == 0 { 1.0 } else { 0.8 })
}

fn word_score(title: &str, query: &str) -> Option<f32> {
	let words: Vec<&str> = query.split_whitespace().collect();
	let matched = words
		.iter()
		.filter(|w| title.split_whitespace().any(|t| t.starts_with(**w)))
		.count();
	(matched > 0).then(|| 0.9 * matched as f32 / words.len() as f32)
}
