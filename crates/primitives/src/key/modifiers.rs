//! Key modifier flags (Ctrl, Shift, Alt, Meta).

use serde::{Deserialize, Serialize};

/// Modifier flags held during a key press.
///
/// Chord matching compares all four flags exactly, so a binding for `ctrl+k`
/// does not fire for `ctrl+shift+k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Alt (Option) is held.
	pub alt: bool,
	/// Whether Meta (Cmd, Super) is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		shift: false,
		alt: false,
		meta: false,
	};

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Only Shift pressed.
	pub const SHIFT: Self = Self { shift: true, ..Self::NONE };

	/// Only Alt pressed.
	pub const ALT: Self = Self { alt: true, ..Self::NONE };

	/// Only Meta pressed.
	pub const META: Self = Self { meta: true, ..Self::NONE };

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.shift && !self.alt && !self.meta
	}
}
