//! Task spawning for the search coordinator.
//!
//! * [`spawn`] / [`spawn_scoped`]: run futures on the tokio runtime, tagged by [`TaskClass`]
//! * [`GenerationClock`]: monotonic sequence numbers for gating stale results
//! * [`TaskScope`]: lifecycle-scoped cancellation for a group of tasks

mod class;
mod spawn;
mod token;

pub use class::TaskClass;
pub use spawn::{spawn, spawn_scoped};
pub use token::{GenerationClock, GenerationToken, TaskScope};
