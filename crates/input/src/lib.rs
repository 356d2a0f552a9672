//! Input state for the search box.
//!
//! * [`SelectionState`]: wrap-around highlight cursor over the suggestion list
//! * [`DirectionResolver`]: locale direction and RTL-aware arrow semantics

pub mod direction;
pub mod selection;

pub use direction::{DirectionResolver, RTL_LANGUAGES, primary_subtag, remap_arrow, resolve};
pub use selection::SelectionState;
