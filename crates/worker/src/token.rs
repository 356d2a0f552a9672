use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::{CancellationToken, DropGuard};

/// Monotonic generation clock.
///
/// Generations start at 1; 0 means "nothing issued yet".
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	current: Arc<AtomicU64>,
}

impl GenerationClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances the clock and returns the new generation.
	pub fn next(&self) -> u64 {
		self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}

	/// Returns the most recently issued generation.
	pub fn current(&self) -> u64 {
		self.current.load(Ordering::Acquire)
	}

	/// Returns true if `generation` is still the latest one.
	pub fn is_current(&self, generation: u64) -> bool {
		self.current() == generation
	}
}

/// Generation-scoped cancellation token for task lifecycles.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub fn new(generation: u64, cancel: CancellationToken) -> Self {
		Self { generation, cancel }
	}

	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}

/// Owner of a group of tasks; cancels all of them when dropped.
pub struct TaskScope {
	root: CancellationToken,
	_guard: DropGuard,
}

impl std::fmt::Debug for TaskScope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TaskScope").field("cancelled", &self.root.is_cancelled()).finish()
	}
}

impl Default for TaskScope {
	fn default() -> Self {
		Self::new()
	}
}

impl TaskScope {
	pub fn new() -> Self {
		let root = CancellationToken::new();
		let guard = root.clone().drop_guard();
		Self { root, _guard: guard }
	}

	/// Creates a child token tagged with `generation`.
	pub fn token(&self, generation: u64) -> GenerationToken {
		GenerationToken::new(generation, self.root.child_token())
	}

	/// Cancels every task in the scope.
	pub fn cancel_all(&self) {
		self.root.cancel();
	}

	pub fn is_cancelled(&self) -> bool {
		self.root.is_cancelled()
	}
}
