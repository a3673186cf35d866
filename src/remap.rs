//! Linear range remapping.

use crate::float_type::float;

/// Affinely rescales `value` from `[from_lo, from_hi]` to `[to_lo, to_hi]`.
///
/// Values outside the source interval are extrapolated, not clamped.
/// A degenerate source interval maps everything to `to_lo`.
pub fn map_to(value: float, from_lo: float, from_hi: float, to_lo: float, to_hi: float) -> float {
	let from_span = from_hi - from_lo;
	if from_span == 0. {
		return to_lo;
	}
	to_lo + (value - from_lo) / from_span * (to_hi - to_lo)
}
