//! Debounced, sequence-gated suggestion fetching.
//!
//! Keystrokes restart a trailing-edge [`Debouncer`]. When it settles, the
//! coordinator takes a fresh sequence number from the [`SuggestionFetcher`]
//! and issues a fetch tagged with it. Fetches run on the worker runtime and
//! report back as [`FetchCompletion`]s over a channel.
//!
//! # Sequence gate
//!
//! Completions may arrive in any order. A completion is accepted only if
//! its sequence is still the fetcher's current one; anything older is
//! dropped. Clearing the query also advances the sequence, so a fetch that
//! was in flight when the box was emptied can never repopulate the list.
//! There is no transport-level cancellation: superseded fetches run to
//! completion and are discarded. Dropping the fetcher cancels its
//! outstanding tasks.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sift_primitives::{BoxFutureStatic, SearchMode, Suggestion};
use sift_worker::{GenerationClock, TaskClass, TaskScope};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;


/// Backend that answers a settled query with suggestions.
pub trait SuggestionSource: Send + Sync {
	/// Looks up suggestions for `query` under `mode`.
	///
	/// An error is treated like an empty result.
	fn fetch(&self, query: &str, mode: SearchMode) -> BoxFutureStatic<anyhow::Result<Vec<Suggestion>>>;
}

impl<S: SuggestionSource + ?Sized> SuggestionSource for Arc<S> {
	fn fetch(&self, query: &str, mode: SearchMode) -> BoxFutureStatic<anyhow::Result<Vec<Suggestion>>> {
		(**self).fetch(query, mode)
	}
}

/// Query text as typed and as last settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	/// Current input value.
	pub raw: String,
	/// Value at the last debounce settle.
	pub debounced: String,
	/// Sequence of the last settle; monotonically increasing.
	pub sequence: u64,
}

/// Trailing-edge debounce deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
	window: Duration,
	deadline: Option<Instant>,
}

impl Debouncer {
	pub fn new(window: Duration) -> Self {
		Self { window, deadline: None }
	}

	pub fn window(&self) -> Duration {
		self.window
	}

	/// Restarts the window from `now`.
	pub fn touch(&mut self, now: Instant) {
		self.deadline = Some(now + self.window);
	}

	pub fn cancel(&mut self) {
		self.deadline = None;
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	pub fn is_pending(&self) -> bool {
		self.deadline.is_some()
	}

	/// Consumes the deadline if it has passed.
	pub fn take_due(&mut self, now: Instant) -> bool {
		if self.deadline.is_some_and(|at| now >= at) {
			self.deadline = None;
			true
		} else {
			false
		}
	}
}

/// Result of one fetch, tagged with the sequence it was issued under.
#[derive(Debug)]
pub struct FetchCompletion {
	pub sequence: u64,
	pub query: String,
	pub result: anyhow::Result<Vec<Suggestion>>,
}

/// Issues fetches and gates their completions by sequence.
pub struct SuggestionFetcher {
	source: Arc<dyn SuggestionSource>,
	clock: GenerationClock,
	scope: TaskScope,
	completion_tx: mpsc::UnboundedSender<FetchCompletion>,
	completion_rx: mpsc::UnboundedReceiver<FetchCompletion>,
	in_flight: usize,
}

impl fmt::Debug for SuggestionFetcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SuggestionFetcher")
			.field("sequence", &self.clock.current())
			.field("in_flight", &self.in_flight)
			.finish_non_exhaustive()
	}
}

impl SuggestionFetcher {
	pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
		let (completion_tx, completion_rx) = mpsc::unbounded_channel();
		Self {
			source,
			clock: GenerationClock::new(),
			scope: TaskScope::new(),
			completion_tx,
			completion_rx,
			in_flight: 0,
		}
	}

	/// Current sequence; only completions carrying it are accepted.
	pub fn sequence(&self) -> u64 {
		self.clock.current()
	}

	/// Advances the sequence, invalidating every outstanding fetch.
	pub fn advance(&mut self) -> u64 {
		self.clock.next()
	}

	/// Spawns a fetch for `query` tagged with `sequence`.
	pub fn issue(&mut self, sequence: u64, query: &str, mode: SearchMode) {
		debug!(sequence, query = %query, mode = %mode, "search.fetch.issued");
		let fut = self.source.fetch(query, mode);
		let tx = self.completion_tx.clone();
		let query = query.to_string();
		self.in_flight += 1;
		sift_worker::spawn_scoped(TaskClass::Interactive, self.scope.token(sequence), async move {
			let result = fut.await;
			let _ = tx.send(FetchCompletion { sequence, query, result });
		});
	}

	/// Whether `completion` belongs to the current sequence.
	pub fn accepts(&self, completion: &FetchCompletion) -> bool {
		self.clock.is_current(completion.sequence)
	}

	/// Number of fetches issued but not yet received.
	pub fn in_flight(&self) -> usize {
		self.in_flight
	}

	/// Takes a finished completion without waiting.
	pub fn try_recv(&mut self) -> Option<FetchCompletion> {
		let completion = self.completion_rx.try_recv().ok()?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Some(completion)
	}

	/// Waits for the next completion. Returns `None` when nothing is in flight.
	pub async fn recv(&mut self) -> Option<FetchCompletion> {
		if self.in_flight == 0 {
			return None;
		}
		let completion = self.completion_rx.recv().await?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Some(completion)
	}
}
