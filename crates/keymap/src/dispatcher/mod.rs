//! First-match shortcut dispatch.
//!
//! [`ShortcutDispatcher`] holds an ordered binding list. Both constructors,
//! [`ShortcutDispatcher::from_bindings`] for structured lists and
//! [`ShortcutDispatcher::from_chord_map`] for chord-string maps, converge on
//! the same list.
//!
//! Dispatch scans in registration order and returns the first binding whose
//! chord matches. A later binding with the same chord is shadowed until the
//! earlier one is unregistered. Dispatch borrows the dispatcher immutably, so
//! an action cannot re-enter dispatch or mutate the list mid-event; changes
//! made afterwards apply to the next event.

use sift_primitives::Key;
use tracing::trace;

use crate::chord::{Chord, ChordParseError, parse_chord};


/// A chord bound to an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<A> {
	pub chord: Chord,
	pub action: A,
	/// Whether the host should suppress the key's default behavior.
	pub prevent_default: bool,
}

impl<A> Binding<A> {
	/// Creates a binding that suppresses the default key behavior.
	pub fn new(chord: Chord, action: A) -> Self {
		Self {
			chord,
			action,
			prevent_default: true,
		}
	}

	/// Lets the host's default behavior run alongside the action.
	#[must_use]
	pub fn allow_default(mut self) -> Self {
		self.prevent_default = false;
		self
	}
}

/// Outcome of dispatching one key.
#[derive(Debug, PartialEq)]
pub enum Dispatch<'a, A> {
	/// A binding matched.
	Matched {
		action: &'a A,
		/// Suppress the default behavior before running the action.
		prevent_default: bool,
	},
	/// No binding matched; the event passes through untouched.
	Unhandled,
}

impl<'a, A> Dispatch<'a, A> {
	/// Returns the matched action, if any.
	pub fn action(&self) -> Option<&'a A> {
		match self {
			Self::Matched { action, .. } => Some(action),
			Self::Unhandled => None,
		}
	}
}

/// Whether a newly registered binding is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
	/// No earlier binding uses the chord.
	Active,
	/// An earlier binding with the same chord wins; this one is inert.
	Shadowed,
}

/// Ordered chord → action bindings with first-match resolution.
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher<A> {
	bindings: Vec<Binding<A>>,
}

impl<A> Default for ShortcutDispatcher<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A> ShortcutDispatcher<A> {
	/// Creates an empty dispatcher.
	pub fn new() -> Self {
		Self { bindings: Vec::new() }
	}

	/// Creates a dispatcher from an explicit binding list, preserving order.
	pub fn from_bindings(bindings: Vec<Binding<A>>) -> Self {
		let mut dispatcher = Self::new();
		for binding in bindings {
			dispatcher.register(binding);
		}
		dispatcher
	}

	/// Creates a dispatcher from `(chord string, action)` pairs, in iteration order.
	///
	/// # Errors
	///
	/// Fails on the first chord string that does not parse.
	pub fn from_chord_map<I, S>(entries: I) -> Result<Self, ChordParseError>
	where
		I: IntoIterator<Item = (S, A)>,
		S: AsRef<str>,
	{
		let mut dispatcher = Self::new();
		for (chord, action) in entries {
			dispatcher.register(Binding::new(parse_chord(chord.as_ref())?, action));
		}
		Ok(dispatcher)
	}

	/// Appends a binding. Returns [`Registration::Shadowed`] if an earlier
	/// binding already owns the chord.
	pub fn register(&mut self, binding: Binding<A>) -> Registration {
		let registration = if self.bindings.iter().any(|b| b.chord == binding.chord) {
			trace!(chord = %binding.chord, "shortcut.shadowed");
			Registration::Shadowed
		} else {
			Registration::Active
		};
		self.bindings.push(binding);
		registration
	}

	/// Removes the active binding for `chord`.
	///
	/// The next binding registered for the same chord, if any, becomes active.
	pub fn unregister(&mut self, chord: &Chord) -> Option<Binding<A>> {
		let pos = self.bindings.iter().position(|b| b.chord == *chord)?;
		Some(self.bindings.remove(pos))
	}

	/// Resolves `key` to at most one action.
	pub fn dispatch(&self, key: &Key) -> Dispatch<'_, A> {
		match self.bindings.iter().find(|b| b.chord.matches(key)) {
			Some(binding) => {
				trace!(chord = %binding.chord, prevent_default = binding.prevent_default, "shortcut.matched");
				Dispatch::Matched {
					action: &binding.action,
					prevent_default: binding.prevent_default,
				}
			}
			None => Dispatch::Unhandled,
		}
	}

	/// Returns the binding that currently answers for `chord`.
	pub fn active_binding(&self, chord: &Chord) -> Option<&Binding<A>> {
		self.bindings.iter().find(|b| b.chord == *chord)
	}

	/// All bindings in registration order, shadowed ones included.
	pub fn bindings(&self) -> &[Binding<A>] {
		&self.bindings
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}
