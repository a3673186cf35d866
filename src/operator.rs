//! Operator catalogue: arity and numeric rule of every operator.
//!
//! Every rule is total: given finite inputs it returns a finite output, and
//! operators whose natural output is unbounded are clamped to [`OUTPUT_BOUND`].
//! For inputs with magnitude at most `M`, outputs have magnitude at most `max(1, M)`.

use std::f64::consts::PI;
use std::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};

use crate::float_type::float;
use crate::typesafe_rng::impl_variants;


/// Largest magnitude an unbounded operator is allowed to emit.
pub const OUTPUT_BOUND: float = 1.;
/// Divisors closer to zero than this count as zero.
pub const DIVISION_EPSILON: float = 1e-9;
/// Reciprocal of a (near) zero divisor.
pub const DIVISION_FALLBACK: float = 0.;
/// Replaces NaN and infinities.
pub const NON_FINITE_FALLBACK: float = 0.;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum Arity {
	#[num_enum(default)]
	Unary,
	Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum UnaryOp {
	#[num_enum(default)]
	Sin,
	Cos,
	Abs,
	Sqrt,
	Ln,
	Recip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum BinaryOp {
	#[num_enum(default)]
	Add,
	Sub,
	Mul,
	Avg,
	Pow,
}

impl_variants!(
	Arity => 2,
	UnaryOp => 6,
	BinaryOp => 5,
);

impl Arity {
	pub const fn children(self) -> usize {
		match self {
			Self::Unary => 1,
			Self::Binary => 2,
		}
	}
}

impl UnaryOp {
	pub const ALL: [UnaryOp; 6] = [Self::Sin, Self::Cos, Self::Abs, Self::Sqrt, Self::Ln, Self::Recip];

	pub fn apply(self, a: float) -> float {
		match self {
			Self::Sin => (PI * a).sin(),
			Self::Cos => (PI * a).cos(),
			Self::Abs => a.abs(),
			Self::Sqrt => a.abs().sqrt(),
			Self::Ln => clamp_to_bound(a.abs().ln()),
			Self::Recip => {
				if a.abs() < DIVISION_EPSILON {
					DIVISION_FALLBACK
				} else {
					clamp_to_bound(1. / a)
				}
			}
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Sin => "sin",
			Self::Cos => "cos",
			Self::Abs => "abs",
			Self::Sqrt => "sqrt",
			Self::Ln => "ln",
			Self::Recip => "recip",
		}
	}
}

impl BinaryOp {
	pub const ALL: [BinaryOp; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Avg, Self::Pow];

	pub fn apply(self, a: float, b: float) -> float {
		match self {
			Self::Add => clamp_to_bound(a + b),
			Self::Sub => clamp_to_bound(a - b),
			Self::Mul => clamp_to_bound(a * b),
			// no overflow
			Self::Avg => a / 2. + b / 2.,
			Self::Pow => clamp_to_bound(a.abs().powf(b)),
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Add => "add",
			Self::Sub => "sub",
			Self::Mul => "mul",
			Self::Avg => "avg",
			Self::Pow => "pow",
		}
	}
}

impl fmt::Display for UnaryOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
impl fmt::Display for BinaryOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}


pub fn finite_or_fallback(v: float) -> float {
	if v.is_finite() { v } else { NON_FINITE_FALLBACK }
}

/// Non-finite values become the fallback, everything else is clamped to [`OUTPUT_BOUND`].
pub fn clamp_to_bound(v: float) -> float {
	finite_or_fallback(v).clamp(-OUTPUT_BOUND, OUTPUT_BOUND)
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn catalogue_sizes_match_variant_counts() {
		use crate::typesafe_rng::Variants;
		assert_eq!(UnaryOp::ALL.len(), UnaryOp::COUNT as usize);
		assert_eq!(BinaryOp::ALL.len(), BinaryOp::COUNT as usize);
		for (i, op) in UnaryOp::ALL.into_iter().enumerate() {
			assert_eq!(u8::from(op) as usize, i);
		}
		for (i, op) in BinaryOp::ALL.into_iter().enumerate() {
			assert_eq!(u8::from(op) as usize, i);
		}
	}

	#[test]
	fn arity_children() {
		assert_eq!(Arity::Unary.children(), 1);
		assert_eq!(Arity::Binary.children(), 2);
	}

	#[test]
	fn recip_of_zero_is_fallback() {
		assert_eq!(UnaryOp::Recip.apply(0.), DIVISION_FALLBACK);
		assert_eq!(UnaryOp::Recip.apply(-0.), DIVISION_FALLBACK);
		assert_eq!(UnaryOp::Recip.apply(1e-12), DIVISION_FALLBACK);
	}

	#[test]
	fn recip_is_clamped() {
		assert_eq!(UnaryOp::Recip.apply(0.01), OUTPUT_BOUND);
		assert_eq!(UnaryOp::Recip.apply(-0.01), -OUTPUT_BOUND);
		assert_eq!(UnaryOp::Recip.apply(4.), 0.25);
	}

	#[test]
	fn sqrt_and_ln_use_absolute_value() {
		assert_eq!(UnaryOp::Sqrt.apply(-0.25), 0.5);
		assert_eq!(UnaryOp::Ln.apply(-1.), 0.);
		assert_eq!(UnaryOp::Ln.apply(-1.), UnaryOp::Ln.apply(1.));
	}

	#[test]
	fn ln_of_zero_is_fallback() {
		assert_eq!(UnaryOp::Ln.apply(0.), NON_FINITE_FALLBACK);
	}

	#[test]
	fn ln_of_tiny_is_clamped() {
		assert_eq!(UnaryOp::Ln.apply(1e-3), -OUTPUT_BOUND);
	}

	#[test]
	fn pow_blowup_is_handled() {
		// 0^-1 is infinite
		assert_eq!(BinaryOp::Pow.apply(0., -1.), NON_FINITE_FALLBACK);
		assert_eq!(BinaryOp::Pow.apply(0.1, -1.), OUTPUT_BOUND);
		assert_eq!(BinaryOp::Pow.apply(-0.5, 2.), 0.25);
	}

	#[test]
	fn arithmetic_is_clamped() {
		assert_eq!(BinaryOp::Add.apply(0.9, 0.9), OUTPUT_BOUND);
		assert_eq!(BinaryOp::Sub.apply(-0.9, 0.9), -OUTPUT_BOUND);
		assert_eq!(BinaryOp::Mul.apply(1.25, 1.25), OUTPUT_BOUND);
		assert_eq!(BinaryOp::Add.apply(0.25, 0.5), 0.75);
	}

	#[test]
	fn overflow_is_replaced() {
		assert_eq!(BinaryOp::Add.apply(float::MAX, float::MAX), NON_FINITE_FALLBACK);
		assert_eq!(BinaryOp::Mul.apply(float::MAX, 2.), NON_FINITE_FALLBACK);
		assert_eq!(BinaryOp::Avg.apply(float::MAX, float::MAX), float::MAX);
	}

	#[test]
	fn trig_maps_unit_interval_to_full_period() {
		assert!((UnaryOp::Sin.apply(0.5) - 1.).abs() < 1e-12);
		assert!((UnaryOp::Cos.apply(1.) + 1.).abs() < 1e-12);
	}

	#[test]
	fn clamp_to_bound_handles_nan() {
		assert_eq!(clamp_to_bound(float::NAN), NON_FINITE_FALLBACK);
		assert_eq!(clamp_to_bound(float::NEG_INFINITY), NON_FINITE_FALLBACK);
	}
}
