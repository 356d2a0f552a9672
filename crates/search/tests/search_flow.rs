//! End-to-end behavior of the coordinator through its public API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sift_config::Config;
use sift_primitives::{BoxFutureStatic, FocusTarget, Key, KeyCode, KeyEvent, SearchMode, Suggestion, TextDirection};
use sift_search::{
	AnnouncementSink, ChannelNavigator, JsonFileRecents, PersistedRecents, Priority, SearchCoordinator, SuggestionSource,
};
use tokio::sync::mpsc;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Answers every query after a per-query delay with `"<query> 0..n"` titles.
struct TimedSource {
	delays: HashMap<&'static str, u64>,
	results: usize,
}

impl TimedSource {
	fn new(delays: &[(&'static str, u64)]) -> Arc<Self> {
		Arc::new(Self {
			delays: delays.iter().copied().collect(),
			results: 3,
		})
	}
}

impl SuggestionSource for TimedSource {
	fn fetch(&self, query: &str, _mode: SearchMode) -> BoxFutureStatic<anyhow::Result<Vec<Suggestion>>> {
		let delay = Duration::from_millis(self.delays.get(query).copied().unwrap_or(10));
		let list = (0..self.results)
			.map(|i| Suggestion::query(format!("{query}-{i}"), format!("{query} {i}")))
			.collect();
		Box::pin(async move {
			tokio::time::sleep(delay).await;
			Ok(list)
		})
	}
}

fn coordinator(source: Arc<TimedSource>) -> (SearchCoordinator, mpsc::UnboundedReceiver<String>) {
	let (navigator, rx) = ChannelNavigator::new();
	(SearchCoordinator::new(source, Box::new(navigator)), rx)
}

async fn settle(search: &mut SearchCoordinator, text: &str) {
	search.on_query_change(text);
	tokio::time::advance(DEBOUNCE).await;
	search.poll();
}

async fn drain(search: &mut SearchCoordinator) {
	while search.resolve_next().await.is_some() {}
}

fn first_title(search: &SearchCoordinator) -> Option<&str> {
	search.suggestions().first().map(|s| s.title.as_str())
}

#[tokio::test(start_paused = true)]
async fn latest_query_wins_regardless_of_resolution_order() {
	for (slow, fast) in [(500, 20), (20, 500), (100, 100)] {
		let source = TimedSource::new(&[("ru", slow), ("rust", fast)]);
		let (mut search, _nav) = coordinator(source);

		settle(&mut search, "ru").await;
		settle(&mut search, "rust").await;
		drain(&mut search).await;

		assert_eq!(first_title(&search), Some("rust 0"), "delays ru={slow} rust={fast}");
		assert_eq!(search.query().sequence, 2);
	}
}

#[tokio::test(start_paused = true)]
async fn result_landing_after_newer_settle_is_discarded() {
	let source = TimedSource::new(&[("doc", 200)]);
	let (mut search, _nav) = coordinator(source);

	settle(&mut search, "doc").await;
	settle(&mut search, "docs").await;
	assert!(search.suggestions().is_empty());

	drain(&mut search).await;
	assert_eq!(first_title(&search), Some("docs 0"));
	assert_eq!(search.query().debounced, "docs");
}

#[tokio::test(start_paused = true)]
async fn next_applied_len_times_is_identity() {
	let source = TimedSource::new(&[]);
	let (mut search, _nav) = coordinator(source);
	settle(&mut search, "a").await;
	drain(&mut search).await;
	let len = search.suggestions().len();

	for start in 0..len {
		search.hover(start);
		for _ in 0..len {
			search.select_next();
		}
		assert_eq!(search.selection().index(), Some(start));
	}
}

#[tokio::test(start_paused = true)]
async fn direction_follows_locale_tags() {
	let (mut search, _nav) = coordinator(TimedSource::new(&[]));
	for (locale, expected) in [
		("he", TextDirection::Rtl),
		("ar", TextDirection::Rtl),
		("fa-IR", TextDirection::Rtl),
		("en", TextDirection::Ltr),
		("es-MX", TextDirection::Ltr),
		("ur_PK", TextDirection::Rtl),
	] {
		search.set_locale(locale);
		assert_eq!(search.direction(), expected, "{locale}");
	}
}

#[derive(Clone, Default)]
struct Transcript(Rc<RefCell<Vec<String>>>);

impl AnnouncementSink for Transcript {
	fn clear(&mut self) {
		self.0.borrow_mut().push(String::new());
	}

	fn write(&mut self, priority: Priority, message: &str) {
		self.0.borrow_mut().push(format!("{priority}: {message}"));
	}
}

#[tokio::test(start_paused = true)]
async fn identical_announcements_are_each_perceivable() {
	let sink = Transcript::default();
	let log = sink.0.clone();
	let (navigator, _nav) = ChannelNavigator::new();
	let mut search = SearchCoordinator::builder(TimedSource::new(&[]), Box::new(navigator))
		.sink(Box::new(sink))
		.build();

	search.announce("Copied", Priority::Polite);
	search.announce("Copied", Priority::Polite);
	assert_eq!(*log.borrow(), ["", "polite: Copied", "", "polite: Copied"]);
}

#[tokio::test(start_paused = true)]
async fn event_loop_session_persists_recents() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("recents.json");
	let store = Arc::new(JsonFileRecents::new(&path));

	let config = Config::parse("[search]\ndebounce-ms = 150\nrecents-limit = 2\n").unwrap();
	let (navigator, mut nav) = ChannelNavigator::new();
	let mut search = SearchCoordinator::builder(TimedSource::new(&[("tok", 40)]), Box::new(navigator))
		.config(config)
		.recents_store(store.clone())
		.build();

	search.on_query_change("tok");
	while first_title(&search).is_none() {
		search.run_once().await;
	}
	assert_eq!(search.suggestions().len(), 3);

	let down = KeyEvent::in_input(Key::new(KeyCode::Down));
	search.handle_key(&down);
	search.handle_key(&down);
	search.handle_key(&KeyEvent::new(Key::new(KeyCode::Enter), FocusTarget::TextInput));
	assert_eq!(nav.try_recv().unwrap(), "/search?q=tok+1&mode=keyword");

	for q in ["alpha", "beta"] {
		search.on_query_change(q);
		search.on_submit();
	}
	search.flush_recents().await;

	assert_eq!(search.recents(), ["beta", "alpha"]);
	assert_eq!(store.load().unwrap(), ["beta", "alpha"]);
}
