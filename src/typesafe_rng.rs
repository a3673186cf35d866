//! RNG utils.

use std::marker::PhantomData;

use num_enum::FromPrimitive;
use rand::Rng;
use rand_distr::{Distribution, WeightedError, WeightedIndex};


/// Small `#[repr(u8)]` enum that can be drawn at random.
pub trait Variants: FromPrimitive<Primitive = u8> {
	const COUNT: u8;
	/// `[u32; COUNT]`, so weights of the wrong length don't compile.
	type Weights: AsRef<[u32]>;
}

pub trait TypesafeRNG {
	fn gen_typesafe_number<T: Variants>(&mut self) -> T;
	fn gen_typesafe_from<T: Variants>(&mut self, weights: &TypedWeights<T>) -> T;
}

impl<R: Rng + ?Sized> TypesafeRNG for R {
	fn gen_typesafe_number<T: Variants>(&mut self) -> T {
		let n: u8 = self.gen_range(0..T::COUNT);
		T::from_primitive(n)
	}
	fn gen_typesafe_from<T: Variants>(&mut self, weights: &TypedWeights<T>) -> T {
		// below `COUNT`, so it fits in `u8`
		let n = weights.index.sample(self) as u8;
		T::from_primitive(n)
	}
}

/// Weights for the variants of `T`, validated once and reused for every draw.
#[derive(Debug, Clone)]
pub struct TypedWeights<T> {
	index: WeightedIndex<u32>,
	_variant: PhantomData<fn() -> T>,
}

impl<T: Variants> TypedWeights<T> {
	pub fn new(weights: T::Weights) -> Result<Self, WeightedError> {
		Ok(Self {
			index: WeightedIndex::new(weights.as_ref())?,
			_variant: PhantomData,
		})
	}
}

macro_rules! impl_variants {
	($($name:ty => $num:literal),* $(,)?) => {
		$(
			impl $crate::typesafe_rng::Variants for $name {
				const COUNT: u8 = $num;
				type Weights = [u32; $num];
			}
		)*
	};
}
pub(crate) use impl_variants;
