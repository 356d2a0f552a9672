//! Actions the search box binds to shortcuts.

use std::fmt;
use std::str::FromStr;

use sift_keymap::{Binding, Chord};
use sift_primitives::{KeyCode, Modifiers};
use thiserror::Error;

/// A coordinator action reachable from a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAction {
	/// Highlight the next suggestion.
	Next,
	/// Highlight the previous suggestion.
	Prev,
	/// Highlight the first suggestion; only while one is highlighted.
	First,
	/// Highlight the last suggestion; only while one is highlighted.
	Last,
	/// Commit the highlight, or submit the query.
	Submit,
	/// Drop the highlight, then the list.
	Dismiss,
	/// Move focus to the search box.
	Focus,
	/// Start voice dictation.
	Voice,
}

/// Error returned for an unrecognized action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search action: '{0}'")]
pub struct UnknownAction(pub String);

impl SearchAction {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Next => "next",
			Self::Prev => "prev",
			Self::First => "first",
			Self::Last => "last",
			Self::Submit => "submit",
			Self::Dismiss => "dismiss",
			Self::Focus => "focus",
			Self::Voice => "voice",
		}
	}
}

impl fmt::Display for SearchAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SearchAction {
	type Err = UnknownAction;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.trim().to_ascii_lowercase().as_str() {
			"next" | "down" => Self::Next,
			"prev" | "previous" | "up" => Self::Prev,
			"first" | "home" => Self::First,
			"last" | "end" => Self::Last,
			"submit" | "enter" => Self::Submit,
			"dismiss" | "escape" | "close" => Self::Dismiss,
			"focus" => Self::Focus,
			"voice" => Self::Voice,
			_ => return Err(UnknownAction(s.to_string())),
		})
	}
}

/// Built-in bindings, registered after any user shortcuts.
pub fn default_bindings() -> Vec<Binding<SearchAction>> {
	vec![
		Binding::new(Chord::key(KeyCode::Down), SearchAction::Next),
		Binding::new(Chord::key(KeyCode::Up), SearchAction::Prev),
		Binding::new(Chord::key(KeyCode::Enter), SearchAction::Submit),
		Binding::new(Chord::key(KeyCode::Escape), SearchAction::Dismiss),
		Binding::new(Chord::key(KeyCode::Home), SearchAction::First),
		Binding::new(Chord::key(KeyCode::End), SearchAction::Last),
		Binding::new(Chord::new(KeyCode::Char('k'), Modifiers::META), SearchAction::Focus),
		Binding::new(Chord::new(KeyCode::Char('k'), Modifiers::CTRL), SearchAction::Focus),
	]
}
