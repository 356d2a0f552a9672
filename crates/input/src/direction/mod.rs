//! Locale → writing direction, and direction-aware arrow keys.
//!
//! Direction comes only from the primary language subtag of the locale tag;
//! text content is never inspected. In right-to-left locales the physical
//! left arrow means "forward" for focus movement, mirroring reading order.
//! Text-editing focus targets keep their native caret behavior.

use sift_primitives::{KeyCode, KeyEvent, SeqDirection, TextDirection};
use tracing::debug;


/// Primary language subtags written right-to-left.
///
/// Arabic, Persian, Hebrew (and legacy `iw`), Urdu, Yiddish (and legacy `ji`).
pub const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "iw", "ji", "ur", "yi"];

/// Returns the primary language subtag of a locale tag.
///
/// Everything before the first `-` (BCP 47) or `_` (POSIX) separator.
pub fn primary_subtag(locale: &str) -> &str {
	let locale = locale.trim();
	locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Resolves the writing direction of a locale tag.
pub fn resolve(locale: &str) -> TextDirection {
	let primary = primary_subtag(locale);
	if RTL_LANGUAGES.iter().any(|code| code.eq_ignore_ascii_case(primary)) {
		TextDirection::Rtl
	} else {
		TextDirection::Ltr
	}
}

/// Maps a horizontal arrow key to a logical step for `direction`.
///
/// Returns `None` for non-horizontal keys and for events delivered to
/// text-editing targets.
pub fn remap_arrow(direction: TextDirection, event: &KeyEvent) -> Option<SeqDirection> {
	if event.target.is_text_editing() {
		return None;
	}
	match (event.key.code, direction) {
		(KeyCode::Right, TextDirection::Ltr) | (KeyCode::Left, TextDirection::Rtl) => Some(SeqDirection::Next),
		(KeyCode::Left, TextDirection::Ltr) | (KeyCode::Right, TextDirection::Rtl) => Some(SeqDirection::Prev),
		_ => None,
	}
}

/// Tracks the active locale and its derived direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionResolver {
	locale: String,
	direction: TextDirection,
}

impl Default for DirectionResolver {
	fn default() -> Self {
		Self::new("en")
	}
}

impl DirectionResolver {
	pub fn new(locale: impl Into<String>) -> Self {
		let locale = locale.into();
		let direction = resolve(&locale);
		Self { locale, direction }
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	pub fn direction(&self) -> TextDirection {
		self.direction
	}

	/// Switches locale and recomputes the direction.
	///
	/// Returns true if the direction changed.
	pub fn set_locale(&mut self, locale: impl Into<String>) -> bool {
		let locale = locale.into();
		let direction = resolve(&locale);
		let changed = direction != self.direction;
		if changed {
			debug!(locale = %locale, direction = %direction, "direction.changed");
		}
		self.locale = locale;
		self.direction = direction;
		changed
	}

	/// Maps a horizontal arrow event to a logical step under the current direction.
	pub fn remap(&self, event: &KeyEvent) -> Option<SeqDirection> {
		remap_arrow(self.direction, event)
	}
}
