//! Shortcut handling for the search coordinator.
//!
//! - Chords: a key plus exact modifiers, parsed from strings like `cmd+k`
//! - Dispatch: ordered bindings, first match wins, one action per keystroke

pub use chord::{CHORD_SEP, Chord, ChordParseError, parse_chord};
pub use dispatcher::{Binding, Dispatch, Registration, ShortcutDispatcher};

pub mod chord;
pub mod dispatcher;
