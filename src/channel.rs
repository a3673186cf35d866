//! Channels: named scalar roles, each owning one function tree.

use std::fmt;

use clap::ValueEnum;
use rand::Rng;

use crate::error::TreeResult;
use crate::float_type::float;
use crate::function_tree::{build, ExpressionNode};
use crate::remap::map_to;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChannelRole {
	Hue,
	Saturation,
	Value,
	Red,
	Green,
	Blue,
	FieldAngle,
}

impl ChannelRole {
	pub const HSV: [ChannelRole; 3] = [Self::Hue, Self::Saturation, Self::Value];
	pub const RGB: [ChannelRole; 3] = [Self::Red, Self::Green, Self::Blue];

	/// RNG stream of this role, see [`crate::seed::Seed::rng_for`].
	pub const fn stream(self) -> u64 {
		match self {
			Self::Hue => 0,
			Self::Saturation => 1,
			Self::Value => 2,
			Self::Red => 3,
			Self::Green => 4,
			Self::Blue => 5,
			Self::FieldAngle => 6,
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Hue => "hue",
			Self::Saturation => "saturation",
			Self::Value => "value",
			Self::Red => "red",
			Self::Green => "green",
			Self::Blue => "blue",
			Self::FieldAngle => "field angle",
		}
	}
}

impl fmt::Display for ChannelRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}


#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
	role: ChannelRole,
	tree: ExpressionNode,
	/// 0 ..= 255
	shift: u8,
	/// 1 ..= 256
	range: u16,
	visible: bool,
}

impl Channel {
	/// Builds the tree first, then draws shift and range from the same generator.
	pub fn new<R: Rng + ?Sized>(role: ChannelRole, complexity: float, rng: &mut R) -> TreeResult<Self> {
		let tree = build(complexity, rng)?;
		Ok(Self {
			role,
			tree,
			shift: rng.gen_range(0 ..= 255),
			range: rng.gen_range(1 ..= 256),
			visible: true,
		})
	}

	/// Replaces the tree with a brand-new one; shift, range and visibility are kept.
	pub fn regenerate<R: Rng + ?Sized>(&mut self, complexity: float, rng: &mut R) -> TreeResult<()> {
		self.tree = build(complexity, rng)?;
		tracing::debug!(role = %self.role, tree = %self.tree, "regenerated channel");
		Ok(())
	}

	pub fn role(&self) -> ChannelRole { self.role }
	pub fn tree(&self) -> &ExpressionNode { &self.tree }
	pub fn shift(&self) -> u8 { self.shift }
	pub fn range(&self) -> u16 { self.range }
	pub fn is_visible(&self) -> bool { self.visible }

	pub fn set_shift(&mut self, shift: u8) {
		self.shift = shift;
	}
	/// Clamped to `1 ..= 256`.
	pub fn set_range(&mut self, range: u16) {
		self.range = range.clamp(1, 256);
	}
	pub fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
	}

	/// Band byte of a tree output: `[-1, 1]` spread over `range`, shifted, wrapped to a byte.
	pub fn band_value(&self, v: float) -> u8 {
		let spread = map_to(v, -1., 1., 0., self.range as float);
		(spread + self.shift as float).round().rem_euclid(256.) as u8
	}

	/// Tile colour component of a tree output, saturating at the byte range.
	pub fn tile_value(&self, v: float) -> u8 {
		let shift = (self.shift % 255) as float;
		((v + 1.) * self.range as float / 2. + shift).clamp(0., 255.) as u8
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	fn channel(shift: u8, range: u16) -> Channel {
		Channel { role: ChannelRole::Hue, tree: ExpressionNode::x(), shift, range, visible: true }
	}

	#[test]
	fn new_draws_shift_and_range_in_bounds() {
		let mut rng = ChaCha8Rng::seed_from_u64(11);
		for _ in 0..50 {
			let c = Channel::new(ChannelRole::Value, 0.6, &mut rng).unwrap();
			assert!((1..=256).contains(&c.range()));
			assert!(c.is_visible());
			assert_eq!(c.role(), ChannelRole::Value);
		}
	}

	#[test]
	fn new_rejects_bad_complexity() {
		let mut rng = ChaCha8Rng::seed_from_u64(11);
		assert!(Channel::new(ChannelRole::Red, 0., &mut rng).is_err());
	}

	#[test]
	fn regenerate_installs_new_tree_and_keeps_params() {
		let mut rng = ChaCha8Rng::seed_from_u64(12);
		let mut c = Channel::new(ChannelRole::Hue, 0.6, &mut rng).unwrap();
		let (shift, range) = (c.shift(), c.range());
		let old = c.tree().clone();
		let mut changed = false;
		for _ in 0..10 {
			c.regenerate(0.6, &mut rng).unwrap();
			changed |= *c.tree() != old;
		}
		assert!(changed);
		assert_eq!((c.shift(), c.range()), (shift, range));
	}

	#[test]
	fn band_value_spreads_and_wraps() {
		let c = channel(0, 256);
		assert_eq!(c.band_value(-1.), 0);
		assert_eq!(c.band_value(0.), 128);
		// 256 wraps around
		assert_eq!(c.band_value(1.), 0);
		let c = channel(200, 100);
		assert_eq!(c.band_value(1.), 44);
		// slightly below the domain still lands on a byte
		assert_eq!(channel(0, 100).band_value(-1.1), 251);
	}

	#[test]
	fn tile_value_saturates() {
		let c = channel(255, 256);
		// shift 255 % 255 == 0
		assert_eq!(c.tile_value(-1.), 0);
		assert_eq!(c.tile_value(1.), 255);
		assert_eq!(channel(100, 200).tile_value(1.), 255);
		assert_eq!(channel(10, 100).tile_value(0.), 60);
	}

	#[test]
	fn set_range_clamps() {
		let mut c = channel(0, 10);
		c.set_range(0);
		assert_eq!(c.range(), 1);
		c.set_range(1000);
		assert_eq!(c.range(), 256);
	}
}
