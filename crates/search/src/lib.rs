//! Interactive search-input coordination.
//!
//! * [`SearchCoordinator`]: query, suggestions, selection, shortcuts, voice
//! * [`SuggestionFetcher`]: debounced fetches gated by sequence number
//! * [`AnnouncementChannel`]: single live region for assistive technology
//! * [`VoiceSession`]: exclusive dictation lifecycle
//! * [`Recents`]: recently submitted queries

pub mod action;
pub mod announce;
pub mod coordinator;
pub mod fetch;
pub mod navigation;
pub mod recents;
pub mod voice;

#[cfg(test)]
mod testing;

pub use action::{SearchAction, UnknownAction, default_bindings};
pub use announce::{Announcement, AnnouncementChannel, AnnouncementSink, Priority};
pub use coordinator::{CoordinatorBuilder, KeyResult, SearchCoordinator, Submission};
pub use fetch::{Debouncer, FetchCompletion, Query, SuggestionFetcher, SuggestionSource};
pub use navigation::{ChannelNavigator, NavigationService, search_path};
pub use recents::{JsonFileRecents, MemoryRecents, PersistedRecents, Recents, RecentsError};
pub use voice::{SpeechCapability, VoiceError, VoiceEvent, VoiceSession, VoiceState, VoiceUpdate};
