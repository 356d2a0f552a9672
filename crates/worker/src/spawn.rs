use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::TaskClass;

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("sift-worker-global")
			.build()
			.expect("failed to build sift-worker global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns an async task tagged with `class`.
///
/// Uses the ambient tokio runtime when called from one, otherwise a lazily
/// built global runtime.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	runtime_handle().spawn(fut)
}

/// Spawns `fut` so that it is abandoned once `token` is cancelled.
///
/// Resolves to `None` if cancellation won the race.
pub fn spawn_scoped<F>(class: TaskClass, token: crate::GenerationToken, fut: F) -> JoinHandle<Option<F::Output>>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	spawn(class, async move {
		tokio::select! {
			biased;
			_ = token.cancelled() => {
				tracing::trace!(generation = token.generation(), "worker.scoped.cancelled");
				None
			}
			out = fut => Some(out),
		}
	})
}
