//! Key event types shared by the shortcut dispatcher and the coordinator.

mod modifiers;

use std::fmt;
use std::str::FromStr;

pub use modifiers::Modifiers;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A physical key, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
	/// A printable character.
	Char(char),
	Enter,
	Escape,
	Tab,
	Backspace,
	Delete,
	Space,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
	PageUp,
	PageDown,
	/// Function key `F1` through `F24`.
	F(u8),
}

/// Error returned when a key name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key name: '{name}'")]
pub struct KeyNameError {
	/// The rejected name.
	pub name: String,
}

impl KeyCode {
	/// Compares two key codes, folding character case.
	pub fn eq_ignore_case(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Char(a), Self::Char(b)) => a.to_lowercase().eq(b.to_lowercase()),
			(a, b) => a == b,
		}
	}
}

impl FromStr for KeyCode {
	type Err = KeyNameError;

	/// Parses a key name such as `k`, `enter`, `ArrowDown` or `f5`.
	///
	/// Names are case-insensitive; single characters are kept as typed.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut chars = s.chars();
		if let (Some(ch), None) = (chars.next(), chars.next()) {
			return Ok(if ch == ' ' { Self::Space } else { Self::Char(ch) });
		}

		let lower = s.to_ascii_lowercase();
		let code = match lower.as_str() {
			"enter" | "return" => Self::Enter,
			"esc" | "escape" => Self::Escape,
			"tab" => Self::Tab,
			"backspace" => Self::Backspace,
			"del" | "delete" => Self::Delete,
			"space" | "spacebar" => Self::Space,
			"up" | "arrowup" => Self::Up,
			"down" | "arrowdown" => Self::Down,
			"left" | "arrowleft" => Self::Left,
			"right" | "arrowright" => Self::Right,
			"home" => Self::Home,
			"end" => Self::End,
			"pageup" | "pgup" => Self::PageUp,
			"pagedown" | "pgdn" => Self::PageDown,
			"plus" => Self::Char('+'),
			other => match other.strip_prefix('f').map(str::parse::<u8>) {
				Some(Ok(n)) if (1..=24).contains(&n) => Self::F(n),
				_ => return Err(KeyNameError { name: s.to_string() }),
			},
		};
		Ok(code)
	}
}

impl fmt::Display for KeyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Char(c) => write!(f, "{c}"),
			Self::Enter => f.write_str("enter"),
			Self::Escape => f.write_str("escape"),
			Self::Tab => f.write_str("tab"),
			Self::Backspace => f.write_str("backspace"),
			Self::Delete => f.write_str("delete"),
			Self::Space => f.write_str("space"),
			Self::Up => f.write_str("up"),
			Self::Down => f.write_str("down"),
			Self::Left => f.write_str("left"),
			Self::Right => f.write_str("right"),
			Self::Home => f.write_str("home"),
			Self::End => f.write_str("end"),
			Self::PageUp => f.write_str("pageup"),
			Self::PageDown => f.write_str("pagedown"),
			Self::F(n) => write!(f, "f{n}"),
		}
	}
}

/// A key press: key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates a key with no modifiers.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Creates an unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Creates a Ctrl+character key.
	pub const fn ctrl(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::CTRL,
		}
	}

	/// Creates a Meta+character key.
	pub const fn meta(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::META,
		}
	}

	/// Returns a copy with the given modifiers.
	pub const fn with_modifiers(self, modifiers: Modifiers) -> Self {
		Self { modifiers, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn with_shift(self) -> Self {
		Self {
			modifiers: self.modifiers.shift(),
			..self
		}
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::new(code)
	}
}

/// The kind of element holding keyboard focus when a key event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
	/// A single-line text input.
	TextInput,
	/// A multi-line text area.
	TextArea,
	/// A content-editable region.
	ContentEditable,
	/// Anything else (buttons, list items, the document body).
	#[default]
	Other,
}

impl FocusTarget {
	/// Returns true when arrow keys move a text caret on this target.
	pub fn is_text_editing(self) -> bool {
		matches!(self, Self::TextInput | Self::TextArea | Self::ContentEditable)
	}
}

/// A key press together with the focus target it was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
	pub key: Key,
	pub target: FocusTarget,
}

impl KeyEvent {
	/// Creates an event delivered to `target`.
	pub const fn new(key: Key, target: FocusTarget) -> Self {
		Self { key, target }
	}

	/// Creates an event delivered to the search text input.
	pub const fn in_input(key: Key) -> Self {
		Self::new(key, FocusTarget::TextInput)
	}
}
