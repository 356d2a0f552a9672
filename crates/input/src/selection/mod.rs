//! Keyboard highlight cursor over the suggestion list.

use sift_primitives::SeqDirection;

#[cfg(test)]
mod tests;

/// Which suggestion, if any, is keyboard-highlighted.
///
/// The index is `None` (no highlight) or strictly less than the current list
/// length. Every length change goes through [`SelectionState::set_len`], which
/// re-validates the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
	index: Option<usize>,
	len: usize,
}

impl SelectionState {
	/// Creates an empty selection with no highlight.
	pub const fn new() -> Self {
		Self { index: None, len: 0 }
	}

	/// Highlighted index, `None` when nothing is highlighted.
	pub const fn index(&self) -> Option<usize> {
		self.index
	}

	/// Highlighted index with `-1` meaning "none", as hosts render it.
	pub fn signed_index(&self) -> isize {
		self.index.map_or(-1, |i| i as isize)
	}

	/// Length of the list the cursor ranges over.
	pub const fn len(&self) -> usize {
		self.len
	}

	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Re-validates against a new list length.
	///
	/// Resets the highlight if the old index no longer fits.
	pub fn set_len(&mut self, len: usize) {
		self.len = len;
		if self.index.is_some_and(|i| i >= len) {
			self.index = None;
		}
	}

	/// Replaces the list: records the new length and clears the highlight.
	pub fn replace(&mut self, len: usize) {
		self.len = len;
		self.index = None;
	}

	/// Advances the highlight, wrapping from last to first.
	///
	/// From no highlight, lands on the first item. No-op on an empty list.
	pub fn next(&mut self) -> Option<usize> {
		if self.len == 0 {
			return self.index;
		}
		let next = match self.index {
			Some(i) => (i + 1) % self.len,
			None => 0,
		};
		self.index = Some(next);
		self.index
	}

	/// Retreats the highlight, wrapping from first to last.
	///
	/// From no highlight, lands on the last item. No-op on an empty list.
	pub fn prev(&mut self) -> Option<usize> {
		if self.len == 0 {
			return self.index;
		}
		let prev = match self.index {
			Some(i) => (i + self.len - 1) % self.len,
			None => self.len - 1,
		};
		self.index = Some(prev);
		self.index
	}

	/// Moves one step in `direction`.
	pub fn step(&mut self, direction: SeqDirection) -> Option<usize> {
		match direction {
			SeqDirection::Next => self.next(),
			SeqDirection::Prev => self.prev(),
		}
	}

	/// Highlights the first item, if any.
	pub fn first(&mut self) -> Option<usize> {
		self.index = (self.len > 0).then_some(0);
		self.index
	}

	/// Highlights the last item, if any.
	pub fn last(&mut self) -> Option<usize> {
		self.index = self.len.checked_sub(1);
		self.index
	}

	/// Highlights `index`; out-of-range values clear the highlight.
	pub fn select(&mut self, index: usize) -> Option<usize> {
		self.index = (index < self.len).then_some(index);
		self.index
	}

	/// Clears the highlight.
	pub fn reset(&mut self) {
		self.index = None;
	}

	/// Takes the highlighted index for activation and clears the highlight.
	///
	/// Returns `None` when nothing is highlighted; the caller then falls
	/// through to a plain query submission.
	pub fn commit(&mut self) -> Option<usize> {
		self.index.take()
	}
}
