//! Voice dictation session.
//!
//! [`VoiceSession`] wraps a host [`SpeechCapability`] as an exclusive
//! `idle → listening → {idle, error}` lifecycle. The capability reports
//! recognition results over a channel created per session; the coordinator
//! drains it and turns each [`VoiceUpdate`] into query changes and
//! announcements.

use std::fmt;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};


/// Lifecycle state of the dictation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoiceState {
	#[default]
	Idle,
	Listening,
	/// The last session ended with a recognition error.
	Error,
}

/// Events a speech capability sends while listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
	/// Final recognized text for the utterance.
	Transcript(String),
	/// Recognition failed; the session is over.
	Error(String),
	/// End of utterance.
	End,
}

/// Errors from starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
	#[error("speech recognition is not available")]
	Unavailable,
	#[error("a voice session is already listening")]
	AlreadyListening,
	#[error("speech recognition failed to start: {0}")]
	Start(String),
}

/// Host speech-recognition capability.
pub trait SpeechCapability {
	fn is_available(&self) -> bool;

	/// Begins recognition, reporting through `events` until [`VoiceEvent::End`]
	/// or [`VoiceEvent::Error`].
	fn start(&mut self, events: mpsc::UnboundedSender<VoiceEvent>) -> Result<(), VoiceError>;

	/// Stops recognition. Further events are ignored.
	fn stop(&mut self);
}

/// State change the coordinator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceUpdate {
	Transcript(String),
	Failed(String),
	Ended,
}

/// Single-owner dictation session.
#[derive(Default)]
pub struct VoiceSession {
	capability: Option<Box<dyn SpeechCapability>>,
	state: VoiceState,
	events: Option<mpsc::UnboundedReceiver<VoiceEvent>>,
}

impl fmt::Debug for VoiceSession {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VoiceSession")
			.field("has_capability", &self.capability.is_some())
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

impl VoiceSession {
	/// Creates a session without a speech capability; every start fails.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capability(capability: Box<dyn SpeechCapability>) -> Self {
		Self {
			capability: Some(capability),
			..Self::default()
		}
	}

	pub fn state(&self) -> VoiceState {
		self.state
	}

	pub fn is_listening(&self) -> bool {
		self.state == VoiceState::Listening
	}

	pub fn is_available(&self) -> bool {
		self.capability.as_ref().is_some_and(|c| c.is_available())
	}

	/// Starts listening.
	///
	/// Without a usable capability, or while already listening, the state is
	/// left untouched. A capability that fails to start puts the session in
	/// [`VoiceState::Error`].
	pub fn start(&mut self) -> Result<(), VoiceError> {
		if self.is_listening() {
			return Err(VoiceError::AlreadyListening);
		}
		let Some(capability) = self.capability.as_mut().filter(|c| c.is_available()) else {
			return Err(VoiceError::Unavailable);
		};

		let (tx, rx) = mpsc::unbounded_channel();
		if let Err(e) = capability.start(tx) {
			warn!(error = %e, "voice.start_failed");
			self.state = VoiceState::Error;
			self.events = None;
			return Err(e);
		}
		debug!("voice.listening");
		self.state = VoiceState::Listening;
		self.events = Some(rx);
		Ok(())
	}

	/// Ends the session. Returns [`VoiceUpdate::Ended`] if one was listening.
	pub fn stop(&mut self) -> Option<VoiceUpdate> {
		if !self.is_listening() {
			return None;
		}
		if let Some(capability) = self.capability.as_mut() {
			capability.stop();
		}
		self.finish(VoiceState::Idle);
		Some(VoiceUpdate::Ended)
	}

	/// Drains one pending capability event without waiting.
	pub fn try_next(&mut self) -> Option<VoiceUpdate> {
		if !self.is_listening() {
			return None;
		}
		match self.events.as_mut()?.try_recv() {
			Ok(event) => self.apply(event),
			Err(mpsc::error::TryRecvError::Empty) => None,
			Err(mpsc::error::TryRecvError::Disconnected) => self.disconnected(),
		}
	}

	/// Waits for the next capability event. Pending forever when not listening.
	pub async fn recv(&mut self) -> Option<VoiceEvent> {
		match self.events.as_mut() {
			Some(rx) if self.state == VoiceState::Listening => rx.recv().await,
			_ => std::future::pending().await,
		}
	}

	/// Applies a capability event to the lifecycle.
	///
	/// Events arriving outside a listening session are dropped.
	pub fn apply(&mut self, event: VoiceEvent) -> Option<VoiceUpdate> {
		if !self.is_listening() {
			return None;
		}
		match event {
			VoiceEvent::Transcript(text) => {
				debug!(len = text.len(), "voice.transcript");
				Some(VoiceUpdate::Transcript(text))
			}
			VoiceEvent::Error(message) => {
				warn!(error = %message, "voice.error");
				self.finish(VoiceState::Error);
				Some(VoiceUpdate::Failed(message))
			}
			VoiceEvent::End => {
				debug!("voice.ended");
				self.finish(VoiceState::Idle);
				Some(VoiceUpdate::Ended)
			}
		}
	}

	/// Marks the session ended after the capability's channel closed.
	pub fn disconnected(&mut self) -> Option<VoiceUpdate> {
		if !self.is_listening() {
			return None;
		}
		debug!("voice.disconnected");
		self.finish(VoiceState::Idle);
		Some(VoiceUpdate::Ended)
	}

	fn finish(&mut self, state: VoiceState) {
		self.state = state;
		self.events = None;
	}
}
