use proptest::prelude::*;

use super::*;

fn with_len(len: usize) -> SelectionState {
	let mut s = SelectionState::new();
	s.replace(len);
	s
}

#[test]
fn starts_with_no_highlight() {
	let s = SelectionState::new();
	assert_eq!(s.index(), None);
	assert_eq!(s.signed_index(), -1);
}

#[test]
fn next_wraps_from_last_to_first() {
	let mut s = with_len(3);
	assert_eq!(s.next(), Some(0));
	assert_eq!(s.next(), Some(1));
	assert_eq!(s.next(), Some(2));
	assert_eq!(s.next(), Some(0));
}

#[test]
fn prev_wraps_from_first_to_last() {
	let mut s = with_len(3);
	assert_eq!(s.prev(), Some(2));
	assert_eq!(s.prev(), Some(1));
	assert_eq!(s.prev(), Some(0));
	assert_eq!(s.prev(), Some(2));
}

#[test]
fn movement_on_empty_list_is_noop() {
	let mut s = with_len(0);
	assert_eq!(s.next(), None);
	assert_eq!(s.prev(), None);
	assert_eq!(s.first(), None);
	assert_eq!(s.last(), None);
}

#[test]
fn replacing_list_resets_highlight() {
	let mut s = with_len(3);
	s.select(1);
	s.replace(1);
	assert_eq!(s.index(), None);
	assert_eq!(s.len(), 1);
}

#[test]
fn shrinking_below_index_resets() {
	let mut s = with_len(5);
	s.select(3);
	s.set_len(4);
	assert_eq!(s.index(), Some(3));
	s.set_len(3);
	assert_eq!(s.index(), None);
}

#[test]
fn commit_takes_index_and_resets() {
	let mut s = with_len(2);
	s.next();
	assert_eq!(s.commit(), Some(0));
	assert_eq!(s.index(), None);
	assert_eq!(s.commit(), None);
}

#[test]
fn select_out_of_range_clears() {
	let mut s = with_len(2);
	s.select(1);
	assert_eq!(s.select(7), None);
	assert_eq!(s.index(), None);
}

proptest! {
	#[test]
	fn next_n_times_is_identity(len in 1usize..64, start_seed in 0usize..64) {
		let start = start_seed % len;
		let mut s = with_len(len);
		s.select(start);
		for _ in 0..len {
			s.next();
		}
		prop_assert_eq!(s.index(), Some(start));
	}

	#[test]
	fn prev_undoes_next(len in 1usize..64, start_seed in 0usize..64) {
		let start = start_seed % len;
		let mut s = with_len(len);
		s.select(start);
		s.next();
		s.prev();
		prop_assert_eq!(s.index(), Some(start));
	}

	#[test]
	fn index_always_in_bounds(ops in prop::collection::vec(0u8..6, 0..40), lens in prop::collection::vec(0usize..8, 1..6)) {
		let mut s = with_len(lens[0]);
		for (i, op) in ops.into_iter().enumerate() {
			match op {
				0 => { s.next(); }
				1 => { s.prev(); }
				2 => { s.set_len(lens[i % lens.len()]); }
				3 => { s.first(); }
				4 => { s.last(); }
				_ => { s.reset(); }
			}
			prop_assert!(s.index().is_none_or(|idx| idx < s.len()));
		}
	}
}
