//! Sampling a tree over a pixel grid.

use rayon::prelude::*;

use crate::float_type::float;
use crate::function_tree::ExpressionNode;
use crate::remap::map_to;


/// Rectangle of the function's input plane that a grid is stretched over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
	pub x: (float, float),
	pub y: (float, float),
}

impl Domain {
	pub const UNIT: Domain = Domain { x: (-1., 1.), y: (-1., 1.) };

	/// `[-1 - bleed, 1 + bleed]` on both axes.
	pub fn with_bleed(bleed: float) -> Self {
		Self { x: (-1. - bleed, 1. + bleed), y: (-1. - bleed, 1. + bleed) }
	}

	pub fn point(&self, px: float, py: float, width: float, height: float) -> (float, float) {
		(
			map_to(px, 0., width, self.x.0, self.x.1),
			map_to(py, 0., height, self.y.0, self.y.1),
		)
	}
}

impl Default for Domain {
	fn default() -> Self {
		Self::UNIT
	}
}


/// Values of `tree` at every pixel, row-major.
pub fn sample_grid(tree: &ExpressionNode, width: u32, height: u32, domain: Domain) -> Vec<float> {
	let (w, h) = (width as float, height as float);
	let n = width as usize * height as usize;
	(0..n).into_par_iter()
		.map(|i| {
			let px = (i % width as usize) as float;
			let py = (i / width as usize) as float;
			let (x, y) = domain.point(px, py, w, h);
			tree.eval(x, y)
		})
		.collect()
}
