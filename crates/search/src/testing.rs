//! Fakes shared by unit tests.

use std::sync::Arc;

use anyhow::anyhow;
use parking_lot::Mutex;
use sift_primitives::{BoxFutureStatic, SearchMode, Suggestion, SuggestionKind};
use tokio::sync::{mpsc, oneshot};

use crate::fetch::SuggestionSource;
use crate::voice::{SpeechCapability, VoiceError, VoiceEvent};

type Reply = oneshot::Sender<anyhow::Result<Vec<Suggestion>>>;

/// Source whose fetches stay pending until the test resolves them.
#[derive(Default)]
pub(crate) struct ScriptedSource {
	log: Mutex<Vec<(String, SearchMode)>>,
	pending: Mutex<Vec<(String, Reply)>>,
}

impl ScriptedSource {
	pub(crate) fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Every query fetched so far, in issue order.
	pub(crate) fn queries(&self) -> Vec<String> {
		self.log.lock().iter().map(|(q, _)| q.clone()).collect()
	}

	pub(crate) fn modes(&self) -> Vec<SearchMode> {
		self.log.lock().iter().map(|(_, m)| *m).collect()
	}

	/// Resolves the oldest pending fetch for `query` with one suggestion per title.
	pub(crate) fn resolve(&self, query: &str, titles: &[&str]) {
		self.reply_with(query, suggestions(titles));
	}

	/// Fails the oldest pending fetch for `query`.
	pub(crate) fn fail(&self, query: &str) {
		self.reply(query, Err(anyhow!("backend unavailable")));
	}

	/// Resolves the oldest pending fetch for `query` with `list`.
	pub(crate) fn reply_with(&self, query: &str, list: Vec<Suggestion>) {
		self.reply(query, Ok(list));
	}

	fn reply(&self, query: &str, result: anyhow::Result<Vec<Suggestion>>) {
		let mut pending = self.pending.lock();
		let pos = pending.iter().position(|(q, _)| q == query).expect("no pending fetch for query");
		let (_, tx) = pending.remove(pos);
		let _ = tx.send(result);
	}
}

impl SuggestionSource for ScriptedSource {
	fn fetch(&self, query: &str, mode: SearchMode) -> BoxFutureStatic<anyhow::Result<Vec<Suggestion>>> {
		let (tx, rx) = oneshot::channel();
		self.log.lock().push((query.to_string(), mode));
		self.pending.lock().push((query.to_string(), tx));
		Box::pin(async move { rx.await.unwrap_or_else(|_| Err(anyhow!("fetch abandoned"))) })
	}
}

/// Document suggestions navigating to `/doc/<i>`.
pub(crate) fn suggestions(titles: &[&str]) -> Vec<Suggestion> {
	titles
		.iter()
		.enumerate()
		.map(|(i, title)| Suggestion::navigate(format!("doc-{i}"), SuggestionKind::Document, *title, format!("/doc/{i}")))
		.collect()
}

/// Speech capability whose event sender the test drives directly.
#[derive(Clone, Default)]
pub(crate) struct FakeSpeech {
	pub(crate) available: bool,
	pub(crate) fail_start: bool,
	pub(crate) tx: Arc<Mutex<Option<mpsc::UnboundedSender<VoiceEvent>>>>,
	pub(crate) stops: Arc<Mutex<usize>>,
}

impl FakeSpeech {
	pub(crate) fn available() -> Self {
		Self {
			available: true,
			..Self::default()
		}
	}

	pub(crate) fn send(&self, event: VoiceEvent) {
		let tx = self.tx.lock();
		tx.as_ref().expect("not listening").send(event).expect("session receiver dropped");
	}
}

impl SpeechCapability for FakeSpeech {
	fn is_available(&self) -> bool {
		self.available
	}

	fn start(&mut self, events: mpsc::UnboundedSender<VoiceEvent>) -> Result<(), VoiceError> {
		if self.fail_start {
			return Err(VoiceError::Start("microphone denied".into()));
		}
		*self.tx.lock() = Some(events);
		Ok(())
	}

	fn stop(&mut self) {
		*self.stops.lock() += 1;
	}
}
