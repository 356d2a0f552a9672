//! Live-region announcements for assistive technology.
//!
//! [`AnnouncementChannel`] owns a single live region. Each announcement
//! clears the region and then writes the new message, so a screen reader
//! perceives two identical consecutive messages as two events. The message
//! stays visible for the display window and is cleared on the first
//! [`AnnouncementChannel::poll`] past its deadline.
//!
//! There is no queue: a new announcement replaces both the pending content
//! and its clear deadline.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;


/// Urgency of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
	/// Read when the user is idle.
	#[default]
	Polite,
	/// Interrupts current speech.
	Assertive,
}

impl Priority {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Polite => "polite",
			Self::Assertive => "assertive",
		}
	}
}

impl fmt::Display for Priority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Host-side live region the channel mirrors its content into.
pub trait AnnouncementSink {
	/// Empties the region.
	fn clear(&mut self);
	/// Sets the region's content and politeness.
	fn write(&mut self, priority: Priority, message: &str);
}

/// Message currently shown in the live region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
	pub message: String,
	pub priority: Priority,
}

/// Serializes status messages into one live region.
pub struct AnnouncementChannel {
	sink: Option<Box<dyn AnnouncementSink>>,
	enabled: bool,
	clear_after: Duration,
	live: Option<Announcement>,
	clear_at: Option<Instant>,
	/// Bumped on every write, so repeated identical messages stay distinct.
	revision: u64,
}

impl fmt::Debug for AnnouncementChannel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnnouncementChannel")
			.field("enabled", &self.enabled)
			.field("clear_after", &self.clear_after)
			.field("live", &self.live)
			.field("clear_at", &self.clear_at)
			.field("revision", &self.revision)
			.finish_non_exhaustive()
	}
}

impl AnnouncementChannel {
	/// Creates a channel with no host sink.
	pub fn new(clear_after: Duration, enabled: bool) -> Self {
		Self {
			sink: None,
			enabled,
			clear_after,
			live: None,
			clear_at: None,
			revision: 0,
		}
	}

	/// Mirrors every clear and write into `sink`.
	#[must_use]
	pub fn with_sink(mut self, sink: Box<dyn AnnouncementSink>) -> Self {
		self.sink = Some(sink);
		self
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Enables or disables announcements. Disabling clears the live region.
	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
		if !enabled {
			self.clear();
		}
	}

	/// Announces `message`, replacing whatever is live.
	///
	/// Returns false when announcements are disabled.
	pub fn announce(&mut self, message: impl Into<String>, priority: Priority) -> bool {
		if !self.enabled {
			return false;
		}
		let message = message.into();
		trace!(%priority, message = %message, "announce");

		if let Some(sink) = self.sink.as_mut() {
			sink.clear();
			sink.write(priority, &message);
		}
		self.revision = self.revision.wrapping_add(1);
		self.clear_at = Some(Instant::now() + self.clear_after);
		self.live = Some(Announcement { message, priority });
		true
	}

	/// Clears the live region once its display window has elapsed.
	///
	/// Returns true if the region was cleared.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.clear_at {
			Some(at) if now >= at => {
				self.clear();
				true
			}
			_ => false,
		}
	}

	/// When the live message is due to be cleared.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.clear_at
	}

	/// The message currently in the live region.
	pub fn live(&self) -> Option<&Announcement> {
		self.live.as_ref()
	}

	/// Number of writes so far.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	fn clear(&mut self) {
		self.clear_at = None;
		if self.live.take().is_some()
			&& let Some(sink) = self.sink.as_mut()
		{
			sink.clear();
		}
	}
}

impl Drop for AnnouncementChannel {
	fn drop(&mut self) {
		self.clear();
	}
}
