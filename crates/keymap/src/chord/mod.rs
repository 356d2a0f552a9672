//! # Chords
//!
//! A [`Chord`] is a key plus the exact set of modifier flags that must be held.
//! Chords are written as `+`-separated strings:
//!
//! ```text
//! chord     = (modifier "+")* key
//! modifier  = "ctrl" | "control" | "shift" | "alt" | "option"
//!           | "meta" | "cmd" | "command" | "super"
//! key       = named-key | char
//! named-key = "enter" | "escape" | "arrowdown" | "f1" | ...
//! ```
//!
//! The last token is always the key; a trailing `++` names the plus key
//! (`ctrl++`). Modifier and key names are case-insensitive.

use std::fmt;
use std::str::FromStr;

use sift_primitives::{Key, KeyCode, Modifiers};
use thiserror::Error;


/// Separator between chord segments.
pub const CHORD_SEP: char = '+';

/// Errors produced while parsing a chord string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordParseError {
	/// The chord string was empty or whitespace.
	#[error("empty chord")]
	Empty,
	/// The chord ended with a separator and named no key.
	#[error("chord '{chord}' names no key")]
	MissingKey { chord: String },
	/// Two separators appeared back to back before the key.
	#[error("chord '{chord}' has an empty modifier segment")]
	EmptySegment { chord: String },
	/// A segment before the key is not a modifier name.
	#[error("unknown modifier '{name}' in chord '{chord}'")]
	UnknownModifier { chord: String, name: String },
	/// The final segment is not a key name.
	#[error("unknown key '{name}' in chord '{chord}'")]
	UnknownKey { chord: String, name: String },
}

/// A key plus the exact modifiers that must accompany it.
///
/// Character keys are stored lowercased, so two chords that differ only in
/// letter case compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
	code: KeyCode,
	modifiers: Modifiers,
}

impl Chord {
	/// Creates a chord, folding character keys to lowercase.
	pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		let code = match code {
			KeyCode::Char(c) => KeyCode::Char(c.to_lowercase().next().unwrap_or(c)),
			other => other,
		};
		Self { code, modifiers }
	}

	/// Creates an unmodified chord.
	pub fn key(code: KeyCode) -> Self {
		Self::new(code, Modifiers::NONE)
	}

	pub fn code(&self) -> KeyCode {
		self.code
	}

	pub fn modifiers(&self) -> Modifiers {
		self.modifiers
	}

	/// Returns true if `key` triggers this chord.
	///
	/// The key comparison folds case; modifier comparison is exact.
	pub fn matches(&self, key: &Key) -> bool {
		self.modifiers == key.modifiers && self.code.eq_ignore_case(&key.code)
	}
}

impl From<Key> for Chord {
	fn from(key: Key) -> Self {
		Self::new(key.code, key.modifiers)
	}
}

/// Applies a modifier name to `mods`, returning false for unknown names.
fn apply_modifier(mods: &mut Modifiers, name: &str) -> bool {
	match name.to_ascii_lowercase().as_str() {
		"ctrl" | "control" => mods.ctrl = true,
		"shift" => mods.shift = true,
		"alt" | "option" => mods.alt = true,
		"meta" | "cmd" | "command" | "super" => mods.meta = true,
		_ => return false,
	}
	true
}

/// Parses a chord string such as `"cmd+k"` or `"ctrl+shift+enter"`.
///
/// # Errors
///
/// Returns a [`ChordParseError`] for empty input, a missing key, or unknown
/// modifier and key names.
pub fn parse_chord(input: &str) -> Result<Chord, ChordParseError> {
	let chord = input.trim();
	if chord.is_empty() {
		return Err(ChordParseError::Empty);
	}

	let (prefix, key_name) = if chord == "+" {
		("", "+")
	} else if let Some(prefix) = chord.strip_suffix("++") {
		(prefix, "+")
	} else {
		chord.rsplit_once(CHORD_SEP).unwrap_or(("", chord))
	};

	if key_name.is_empty() {
		return Err(ChordParseError::MissingKey { chord: chord.to_string() });
	}

	let mut modifiers = Modifiers::NONE;
	if !prefix.is_empty() {
		for name in prefix.split(CHORD_SEP) {
			let name = name.trim();
			if name.is_empty() {
				return Err(ChordParseError::EmptySegment { chord: chord.to_string() });
			}
			if !apply_modifier(&mut modifiers, name) {
				return Err(ChordParseError::UnknownModifier {
					chord: chord.to_string(),
					name: name.to_string(),
				});
			}
		}
	}

	let code = key_name.parse::<KeyCode>().map_err(|e| ChordParseError::UnknownKey {
		chord: chord.to_string(),
		name: e.name,
	})?;

	Ok(Chord::new(code, modifiers))
}

impl FromStr for Chord {
	type Err = ChordParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_chord(s)
	}
}

impl fmt::Display for Chord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (held, name) in [
			(self.modifiers.ctrl, "ctrl"),
			(self.modifiers.shift, "shift"),
			(self.modifiers.alt, "alt"),
			(self.modifiers.meta, "meta"),
		] {
			if held {
				write!(f, "{name}{CHORD_SEP}")?;
			}
		}
		write!(f, "{}", self.code)
	}
}
