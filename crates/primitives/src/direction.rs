//! Directional types for text layout and list navigation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Writing direction of the active locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
	/// Left-to-right.
	#[default]
	Ltr,
	/// Right-to-left.
	Rtl,
}

impl TextDirection {
	/// Returns the attribute value used by hosts (`"ltr"` / `"rtl"`).
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Ltr => "ltr",
			Self::Rtl => "rtl",
		}
	}

	pub const fn is_rtl(self) -> bool {
		matches!(self, Self::Rtl)
	}
}

impl fmt::Display for TextDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Logical movement through an ordered sequence, independent of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqDirection {
	/// Toward later items in reading order.
	Next,
	/// Toward earlier items in reading order.
	Prev,
}
