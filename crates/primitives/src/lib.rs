//! Core types for the search coordinator: keys, direction, modes, suggestions.

/// Directional types for layout and list navigation.
pub mod direction;
/// Async future aliases.
pub mod future;
/// Key event types.
pub mod key;
/// Search mode definitions.
pub mod mode;
/// Suggestion model.
pub mod suggestion;

pub use direction::{SeqDirection, TextDirection};
pub use future::BoxFutureStatic;
pub use key::{FocusTarget, Key, KeyCode, KeyEvent, KeyNameError, Modifiers};
pub use mode::{SearchMode, SearchModeError};
pub use suggestion::{Activation, Suggestion, SuggestionKind, SuggestionMetadata};
