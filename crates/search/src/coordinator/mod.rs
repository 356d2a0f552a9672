//! The search-input coordinator.
//!
//! [`SearchCoordinator`] owns every piece of search-box state and is driven by
//! a single event loop through `&mut self`:
//!
//! - input callbacks ([`on_query_change`], [`handle_key`], [`on_submit`], ...)
//!   mutate state synchronously
//! - [`poll`] services everything time- or task-driven: a due debounce, fetch
//!   completions, voice events, locale changes, and the announcement clear
//! - [`run_once`] sleeps until one of those is ready, then polls
//!
//! # Ordering
//!
//! Suggestion lists are applied in acceptance order. A fetch completion is
//! accepted only if it carries the latest query sequence, so a slow response
//! for an older prefix never replaces a newer list. Clearing the query is
//! synchronous and also advances the sequence.
//!
//! [`on_query_change`]: SearchCoordinator::on_query_change
//! [`handle_key`]: SearchCoordinator::handle_key
//! [`on_submit`]: SearchCoordinator::on_submit
//! [`poll`]: SearchCoordinator::poll
//! [`run_once`]: SearchCoordinator::run_once

use std::fmt;
use std::sync::Arc;

use sift_config::Config;
use sift_input::{DirectionResolver, SelectionState};
use sift_keymap::{Binding, Chord, Dispatch, Registration, ShortcutDispatcher, parse_chord};
use sift_primitives::{Activation, KeyEvent, SearchMode, Suggestion, SuggestionKind, TextDirection};
use sift_worker::TaskClass;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::action::{SearchAction, default_bindings};
use crate::announce::{Announcement, AnnouncementChannel, AnnouncementSink, Priority};
use crate::fetch::{Debouncer, FetchCompletion, Query, SuggestionFetcher, SuggestionSource};
use crate::navigation::{NavigationService, search_path};
use crate::recents::{PersistedRecents, Recents};
use crate::voice::{SpeechCapability, VoiceError, VoiceEvent, VoiceSession, VoiceState, VoiceUpdate};


/// How the host should treat a key event after [`SearchCoordinator::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
	/// The coordinator acted on the key.
	Consumed { prevent_default: bool },
	/// A focus shortcut fired; the host should focus the search box.
	Focus { prevent_default: bool },
	/// Not handled; the key keeps its native behavior.
	Unhandled,
}

impl KeyResult {
	pub fn prevent_default(self) -> bool {
		match self {
			Self::Consumed { prevent_default } | Self::Focus { prevent_default } => prevent_default,
			Self::Unhandled => false,
		}
	}
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
	/// The highlighted suggestion was activated.
	Activated { id: String },
	/// The query was submitted as a plain search.
	Searched { query: String },
	/// Nothing highlighted and the query is blank.
	Ignored,
}

enum Wake {
	Fetch(FetchCompletion),
	Voice(Option<VoiceEvent>),
	Locale(bool),
	Timer,
}

/// Builder for [`SearchCoordinator`].
pub struct CoordinatorBuilder {
	source: Arc<dyn SuggestionSource>,
	navigator: Box<dyn NavigationService>,
	config: Config,
	speech: Option<Box<dyn SpeechCapability>>,
	sink: Option<Box<dyn AnnouncementSink>>,
	recents_store: Option<Arc<dyn PersistedRecents>>,
	locale_rx: Option<watch::Receiver<String>>,
}

impl CoordinatorBuilder {
	#[must_use]
	pub fn config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	#[must_use]
	pub fn speech(mut self, speech: Box<dyn SpeechCapability>) -> Self {
		self.speech = Some(speech);
		self
	}

	/// Mirrors announcements into a host live region.
	#[must_use]
	pub fn sink(mut self, sink: Box<dyn AnnouncementSink>) -> Self {
		self.sink = Some(sink);
		self
	}

	#[must_use]
	pub fn recents_store(mut self, store: Arc<dyn PersistedRecents>) -> Self {
		self.recents_store = Some(store);
		self
	}

	/// Follows the locale published on `rx`; it overrides the configured locale.
	#[must_use]
	pub fn locale_provider(mut self, rx: watch::Receiver<String>) -> Self {
		self.locale_rx = Some(rx);
		self
	}

	pub fn build(self) -> SearchCoordinator {
		let Self {
			source,
			navigator,
			config,
			speech,
			sink,
			recents_store,
			mut locale_rx,
		} = self;
		let search = &config.search;

		let mut shortcuts = ShortcutDispatcher::new();
		for (chord, name) in &config.shortcuts {
			let action = match name.parse::<SearchAction>() {
				Ok(action) => action,
				Err(e) => {
					warn!(chord = %chord, error = %e, "shortcut.unknown_action");
					continue;
				}
			};
			match parse_chord(chord) {
				Ok(chord) => {
					shortcuts.register(Binding::new(chord, action));
				}
				Err(e) => warn!(chord = %chord, error = %e, "shortcut.invalid"),
			}
		}
		for binding in default_bindings() {
			shortcuts.register(binding);
		}

		let locale = match locale_rx.as_mut() {
			Some(rx) => rx.borrow_and_update().clone(),
			None => search.locale.clone(),
		};

		let stored = match &recents_store {
			Some(store) => store.load().unwrap_or_else(|e| {
				warn!(error = %e, "recents.load_failed");
				Vec::new()
			}),
			None => Vec::new(),
		};

		let mut announcer = AnnouncementChannel::new(search.announce_clear(), search.announcements);
		if let Some(sink) = sink {
			announcer = announcer.with_sink(sink);
		}

		let voice = match speech {
			Some(speech) => VoiceSession::with_capability(speech),
			None => VoiceSession::new(),
		};

		debug!(
			debounce_ms = search.debounce_ms,
			locale = %locale,
			bindings = shortcuts.len(),
			recents = stored.len(),
			"search.coordinator.built"
		);

		SearchCoordinator {
			query: Query::default(),
			mode: SearchMode::default(),
			debounce: Debouncer::new(search.debounce()),
			fetcher: SuggestionFetcher::new(source),
			suggestions: Vec::new(),
			selection: SelectionState::new(),
			shortcuts,
			direction: DirectionResolver::new(locale),
			locale_rx,
			announcer,
			voice,
			navigator,
			recents: Recents::from_entries(stored, search.recents_limit),
			recents_store,
			pending_save: None,
			focused: false,
		}
	}
}

/// Composes fetching, selection, shortcuts, direction, voice and
/// announcements into the search box's behavior.
pub struct SearchCoordinator {
	query: Query,
	mode: SearchMode,
	debounce: Debouncer,
	fetcher: SuggestionFetcher,
	suggestions: Vec<Suggestion>,
	selection: SelectionState,
	shortcuts: ShortcutDispatcher<SearchAction>,
	direction: DirectionResolver,
	locale_rx: Option<watch::Receiver<String>>,
	announcer: AnnouncementChannel,
	voice: VoiceSession,
	navigator: Box<dyn NavigationService>,
	recents: Recents,
	recents_store: Option<Arc<dyn PersistedRecents>>,
	pending_save: Option<JoinHandle<()>>,
	focused: bool,
}

impl fmt::Debug for SearchCoordinator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchCoordinator")
			.field("query", &self.query)
			.field("mode", &self.mode)
			.field("suggestions", &self.suggestions.len())
			.field("selection", &self.selection)
			.field("direction", &self.direction)
			.field("voice", &self.voice)
			.field("focused", &self.focused)
			.finish_non_exhaustive()
	}
}

impl SearchCoordinator {
	pub fn builder(source: Arc<dyn SuggestionSource>, navigator: Box<dyn NavigationService>) -> CoordinatorBuilder {
		CoordinatorBuilder {
			source,
			navigator,
			config: Config::default(),
			speech: None,
			sink: None,
			recents_store: None,
			locale_rx: None,
		}
	}

	/// Creates a coordinator with default configuration.
	pub fn new(source: Arc<dyn SuggestionSource>, navigator: Box<dyn NavigationService>) -> Self {
		Self::builder(source, navigator).build()
	}

	/// Records a new input value.
	///
	/// A blank value clears the list immediately; anything else restarts the
	/// debounce window.
	pub fn on_query_change(&mut self, value: impl Into<String>) {
		self.query.raw = value.into();
		if self.query.raw.trim().is_empty() {
			self.debounce.cancel();
			self.settle_empty();
		} else {
			self.debounce.touch(Instant::now());
		}
	}

	/// Commits the highlighted suggestion, or submits the query as a search.
	pub fn on_submit(&mut self) -> Submission {
		let Some(index) = self.selection.commit() else {
			return self.submit_query();
		};
		let Some(suggestion) = self.suggestions.get(index) else {
			return self.submit_query();
		};
		let id = suggestion.id.clone();
		let activation = suggestion.activation.clone();
		debug!(id = %id, index, "search.activate");

		match activation {
			Activation::Navigate { path } => {
				self.announcer.announce(format!("Opening {}", suggestion_title(&self.suggestions, index)), Priority::Polite);
				self.navigator.navigate_to(&path);
			}
			Activation::Query { text } => {
				self.query.raw = text;
				self.submit_query();
			}
		}
		Submission::Activated { id }
	}

	/// Switches the search mode and re-runs the current query under it.
	///
	/// Returns false if `mode` is already active.
	pub fn on_mode_change(&mut self, mode: SearchMode) -> bool {
		if mode == self.mode {
			return false;
		}
		info!(mode = %mode, "search.mode");
		self.mode = mode;
		self.announcer.announce(format!("Search mode: {mode}"), Priority::Polite);
		if !self.query.raw.trim().is_empty() {
			self.debounce.cancel();
			self.settle();
		}
		true
	}

	pub fn register_shortcut(&mut self, binding: Binding<SearchAction>) -> Registration {
		self.shortcuts.register(binding)
	}

	pub fn unregister_shortcut(&mut self, chord: &Chord) -> Option<Binding<SearchAction>> {
		self.shortcuts.unregister(chord)
	}

	/// Announces a host-supplied message through the live region.
	pub fn announce(&mut self, message: impl Into<String>, priority: Priority) -> bool {
		self.announcer.announce(message, priority)
	}

	pub fn set_announcements_enabled(&mut self, enabled: bool) {
		self.announcer.set_enabled(enabled);
	}

	/// Routes a key event through shortcuts, then direction-aware arrows.
	pub fn handle_key(&mut self, event: &KeyEvent) -> KeyResult {
		let matched = match self.shortcuts.dispatch(&event.key) {
			Dispatch::Matched { action, prevent_default } => Some((*action, prevent_default)),
			Dispatch::Unhandled => None,
		};
		if let Some((action, prevent_default)) = matched {
			return self.run_action(action, prevent_default);
		}

		let Some(step) = self.direction.remap(event) else {
			return KeyResult::Unhandled;
		};
		if self.move_selection(|s| s.step(step)) {
			KeyResult::Consumed { prevent_default: true }
		} else {
			KeyResult::Unhandled
		}
	}

	/// Highlights the next suggestion. Returns false if the list is empty.
	pub fn select_next(&mut self) -> bool {
		self.move_selection(SelectionState::next)
	}

	/// Highlights the previous suggestion. Returns false if the list is empty.
	pub fn select_prev(&mut self) -> bool {
		self.move_selection(SelectionState::prev)
	}

	/// Pointer hover over `index`.
	pub fn hover(&mut self, index: usize) {
		self.selection.select(index);
	}

	/// Drops the highlight if there is one, otherwise the list.
	///
	/// Returns false if there was nothing to dismiss.
	pub fn dismiss(&mut self) -> bool {
		if self.selection.index().is_some() {
			self.selection.reset();
			true
		} else if !self.suggestions.is_empty() {
			self.replace_suggestions(Vec::new());
			true
		} else {
			false
		}
	}

	pub fn on_focus(&mut self) {
		self.focused = true;
	}

	pub fn on_blur(&mut self) {
		self.focused = false;
		self.selection.reset();
	}

	/// Starts voice dictation.
	///
	/// Failures are announced assertively and returned.
	pub fn start_voice(&mut self) -> Result<(), VoiceError> {
		match self.voice.start() {
			Ok(()) => {
				self.announcer.announce("Listening started", Priority::Polite);
				Ok(())
			}
			Err(VoiceError::AlreadyListening) => Err(VoiceError::AlreadyListening),
			Err(e) => {
				let message = match &e {
					VoiceError::Unavailable => "Voice input is not available".to_string(),
					e => format!("Voice input error: {e}"),
				};
				self.announcer.announce(message, Priority::Assertive);
				Err(e)
			}
		}
	}

	pub fn stop_voice(&mut self) {
		if let Some(update) = self.voice.stop() {
			self.apply_voice_update(update);
		}
	}

	/// Switches locale. Returns true if the writing direction changed.
	pub fn set_locale(&mut self, locale: impl Into<String>) -> bool {
		self.direction.set_locale(locale)
	}

	/// Services everything that is ready now, without waiting.
	pub fn poll(&mut self) {
		let now = Instant::now();
		self.poll_locale();
		if self.debounce.take_due(now) {
			self.settle();
		}
		while let Some(completion) = self.fetcher.try_recv() {
			self.apply_completion(completion);
		}
		while let Some(update) = self.voice.try_next() {
			self.apply_voice_update(update);
		}
		self.announcer.poll(now);
	}

	/// Earliest pending timer: debounce settle or announcement clear.
	pub fn next_deadline(&self) -> Option<Instant> {
		[self.debounce.deadline(), self.announcer.next_deadline()].into_iter().flatten().min()
	}

	/// Waits for the next timer, fetch completion, voice event or locale
	/// change, then polls.
	///
	/// Never resolves while there is nothing to wait for. Cancel-safe.
	pub async fn run_once(&mut self) {
		let deadline = self.next_deadline();
		let wake = tokio::select! {
			Some(completion) = self.fetcher.recv() => Wake::Fetch(completion),
			event = self.voice.recv() => Wake::Voice(event),
			changed = locale_changed(self.locale_rx.as_mut()) => Wake::Locale(changed),
			_ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => Wake::Timer,
		};

		match wake {
			Wake::Fetch(completion) => {
				self.apply_completion(completion);
			}
			Wake::Voice(Some(event)) => {
				if let Some(update) = self.voice.apply(event) {
					self.apply_voice_update(update);
				}
			}
			Wake::Voice(None) => {
				if let Some(update) = self.voice.disconnected() {
					self.apply_voice_update(update);
				}
			}
			Wake::Locale(true) => {
				if let Some(locale) = self.locale_rx.as_mut().map(|rx| rx.borrow_and_update().clone()) {
					self.set_locale(locale);
				}
			}
			Wake::Locale(false) => self.locale_rx = None,
			Wake::Timer => {}
		}
		self.poll();
	}

	/// Waits for the next fetch completion and applies it through the gate.
	///
	/// Returns `None` if nothing is in flight, otherwise whether the
	/// completion was accepted.
	pub async fn resolve_next(&mut self) -> Option<bool> {
		let completion = self.fetcher.recv().await?;
		Some(self.apply_completion(completion))
	}

	/// Waits for queued recents writes to finish.
	pub async fn flush_recents(&mut self) {
		if let Some(handle) = self.pending_save.take() {
			let _ = handle.await;
		}
	}

	pub fn query(&self) -> &Query {
		&self.query
	}

	pub fn mode(&self) -> SearchMode {
		self.mode
	}

	pub fn suggestions(&self) -> &[Suggestion] {
		&self.suggestions
	}

	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	pub fn highlighted(&self) -> Option<&Suggestion> {
		self.selection.index().and_then(|i| self.suggestions.get(i))
	}

	pub fn direction(&self) -> TextDirection {
		self.direction.direction()
	}

	pub fn locale(&self) -> &str {
		self.direction.locale()
	}

	pub fn voice_state(&self) -> VoiceState {
		self.voice.state()
	}

	/// Message currently in the live region.
	pub fn announcement(&self) -> Option<&Announcement> {
		self.announcer.live()
	}

	/// Count of announcement writes, including repeats of the same message.
	pub fn announcement_revision(&self) -> u64 {
		self.announcer.revision()
	}

	pub fn recents(&self) -> &[String] {
		self.recents.entries()
	}

	/// Recent queries as suggestions, for an empty search box.
	pub fn recent_suggestions(&self) -> Vec<Suggestion> {
		self.recents
			.entries()
			.iter()
			.enumerate()
			.map(|(i, q)| Suggestion {
				kind: SuggestionKind::Recent,
				..Suggestion::query(format!("recent-{i}"), q.clone())
			})
			.collect()
	}

	pub fn shortcuts(&self) -> &ShortcutDispatcher<SearchAction> {
		&self.shortcuts
	}

	pub fn is_focused(&self) -> bool {
		self.focused
	}

	fn run_action(&mut self, action: SearchAction, prevent_default: bool) -> KeyResult {
		let handled = match action {
			SearchAction::Next => self.select_next(),
			SearchAction::Prev => self.select_prev(),
			SearchAction::First => self.selection.index().is_some() && self.move_selection(SelectionState::first),
			SearchAction::Last => self.selection.index().is_some() && self.move_selection(SelectionState::last),
			SearchAction::Submit => self.on_submit() != Submission::Ignored,
			SearchAction::Dismiss => self.dismiss(),
			SearchAction::Focus => {
				self.focused = true;
				return KeyResult::Focus { prevent_default };
			}
			SearchAction::Voice => {
				let _ = self.start_voice();
				true
			}
		};
		if handled {
			KeyResult::Consumed { prevent_default }
		} else {
			KeyResult::Unhandled
		}
	}

	fn move_selection(&mut self, step: impl FnOnce(&mut SelectionState) -> Option<usize>) -> bool {
		if self.suggestions.is_empty() {
			return false;
		}
		if let Some(index) = step(&mut self.selection) {
			let message = format!(
				"{}, {} of {}",
				suggestion_title(&self.suggestions, index),
				index + 1,
				self.suggestions.len()
			);
			self.announcer.announce(message, Priority::Polite);
		}
		true
	}

	fn settle(&mut self) {
		let text = self.query.raw.trim().to_string();
		if text.is_empty() {
			self.settle_empty();
			return;
		}
		self.query.debounced = self.query.raw.clone();
		self.query.sequence = self.fetcher.advance();
		self.fetcher.issue(self.query.sequence, &text, self.mode);
	}

	fn settle_empty(&mut self) {
		self.query.debounced.clear();
		self.query.sequence = self.fetcher.advance();
		debug!(sequence = self.query.sequence, "search.query.cleared");
		self.replace_suggestions(Vec::new());
	}

	fn apply_completion(&mut self, completion: FetchCompletion) -> bool {
		if !self.fetcher.accepts(&completion) {
			debug!(
				sequence = completion.sequence,
				current = self.query.sequence,
				query = %completion.query,
				"search.fetch.stale"
			);
			return false;
		}
		match completion.result {
			Ok(list) => {
				let count = list.len();
				debug!(sequence = completion.sequence, count, "search.fetch.applied");
				self.replace_suggestions(list);
				self.announcer.announce(count_message(count), Priority::Polite);
			}
			Err(e) => {
				warn!(sequence = completion.sequence, query = %completion.query, error = %e, "search.fetch.failed");
				self.replace_suggestions(Vec::new());
			}
		}
		true
	}

	fn replace_suggestions(&mut self, list: Vec<Suggestion>) {
		self.selection.replace(list.len());
		self.suggestions = list;
	}

	fn submit_query(&mut self) -> Submission {
		let query = self.query.raw.trim().to_string();
		if query.is_empty() {
			return Submission::Ignored;
		}
		self.debounce.cancel();
		if self.recents.push(query.clone()) {
			self.persist_recents();
		}
		info!(query = %query, mode = %self.mode, "search.submit");
		self.navigator.navigate_to(&search_path(&query, self.mode));
		self.announcer.announce(format!("Searching for {query}"), Priority::Polite);
		Submission::Searched { query }
	}

	/// Queues a write of the current recents list behind any earlier write.
	fn persist_recents(&mut self) {
		let Some(store) = self.recents_store.clone() else {
			return;
		};
		let entries = self.recents.entries().to_vec();
		let previous = self.pending_save.take();
		self.pending_save = Some(sift_worker::spawn(TaskClass::Background, async move {
			if let Some(previous) = previous {
				let _ = previous.await;
			}
			if let Err(e) = store.save(&entries) {
				warn!(error = %e, "recents.save_failed");
			}
		}));
	}

	fn apply_voice_update(&mut self, update: VoiceUpdate) {
		match update {
			VoiceUpdate::Transcript(text) => {
				self.announcer.announce(format!("Heard: {text}"), Priority::Polite);
				self.on_query_change(text);
			}
			VoiceUpdate::Failed(message) => {
				self.announcer.announce(format!("Voice input error: {message}"), Priority::Assertive);
			}
			VoiceUpdate::Ended => {
				self.announcer.announce("Listening ended", Priority::Polite);
			}
		}
	}

	fn poll_locale(&mut self) {
		let Some(rx) = self.locale_rx.as_mut() else {
			return;
		};
		match rx.has_changed() {
			Ok(true) => {
				let locale = rx.borrow_and_update().clone();
				self.set_locale(locale);
			}
			Ok(false) => {}
			Err(_) => {
				debug!("locale.provider_closed");
				self.locale_rx = None;
			}
		}
	}
}

async fn locale_changed(rx: Option<&mut watch::Receiver<String>>) -> bool {
	match rx {
		Some(rx) => rx.changed().await.is_ok(),
		None => std::future::pending().await,
	}
}

fn suggestion_title(suggestions: &[Suggestion], index: usize) -> &str {
	suggestions.get(index).map_or("", |s| s.title.as_str())
}

fn count_message(count: usize) -> String {
	match count {
		0 => "No suggestions".to_string(),
		1 => "1 suggestion available".to_string(),
		n => format!("{n} suggestions available"),
	}
}
