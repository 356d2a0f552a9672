//! Applies stdin commands to the coordinator and renders its state.

use std::fmt;

use sift_primitives::{FocusTarget, Key, KeyCode, KeyEvent, TextDirection};
use sift_search::{Priority, SearchCoordinator};
use tracing::debug;

use crate::cli::{Command, HELP};

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Quit,
}

/// Applies one command. Informational output is returned for printing.
pub fn apply(search: &mut SearchCoordinator, command: Command) -> (Flow, Option<String>) {
	debug!(?command, "term.command");
	match command {
		Command::Query(text) => search.on_query_change(text),
		Command::Key(code) => {
			let result = search.handle_key(&key_event(code));
			debug!(?result, "term.key");
		}
		Command::Mode(mode) => {
			search.on_mode_change(mode);
		}
		Command::Locale(locale) => {
			search.set_locale(locale);
		}
		Command::Voice => {
			let _ = search.start_voice();
		}
		Command::Recents => {
			let recents = search.recents();
			let text = if recents.is_empty() {
				"(no recent searches)".to_string()
			} else {
				recents.join("\n")
			};
			return (Flow::Continue, Some(text));
		}
		Command::Help => return (Flow::Continue, Some(HELP.to_string())),
		Command::Quit => return (Flow::Quit, None),
	}
	(Flow::Continue, None)
}

/// Horizontal arrows act on the suggestion list, everything else on the input.
fn key_event(code: KeyCode) -> KeyEvent {
	let target = match code {
		KeyCode::Left | KeyCode::Right => FocusTarget::Other,
		_ => FocusTarget::TextInput,
	};
	KeyEvent::new(Key::new(code), target)
}

/// Snapshot of what the terminal shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
	query: String,
	mode: &'static str,
	direction: TextDirection,
	rows: Vec<String>,
	selected: Option<usize>,
	announcement: Option<(Priority, String)>,
}

impl View {
	pub fn capture(search: &SearchCoordinator) -> Self {
		Self {
			query: search.query().raw.clone(),
			mode: search.mode().as_str(),
			direction: search.direction(),
			rows: search.suggestions().iter().map(|s| s.title.clone()).collect(),
			selected: search.selection().index(),
			announcement: search.announcement().map(|a| (a.priority, a.message.clone())),
		}
	}
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "[{} {}] > {}", self.mode, self.direction, self.query)?;
		for (i, row) in self.rows.iter().enumerate() {
			let marker = if self.selected == Some(i) { '>' } else { ' ' };
			writeln!(f, " {marker} {row}")?;
		}
		if let Some((priority, message)) = &self.announcement {
			writeln!(f, "   ({priority}) {message}")?;
		}
		Ok(())
	}
}
