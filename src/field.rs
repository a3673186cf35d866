//! Force field: a grid of directions driven by one field-angle tree.
//!
//! Nodes are spaced `node_step` pixels apart and cover the image plus a margin of
//! an eighth of its size on every side; each node's angle is the tree output at
//! the node, mapped from `[-1, 1]` to a full turn.

use rayon::prelude::*;

use crate::angle::{AngleDeg, AngleRad};
use crate::channel::{Channel, ChannelRole};
use crate::color::Hsv;
use crate::error::{TreeError, TreeResult};
use crate::float_type::float;
use crate::remap::map_to;
use crate::seed::Seed;


pub const FIELD_COMPLEXITY: float = 0.99;


#[derive(Debug, Clone)]
pub struct AngleField {
	channel: Channel,
	width: i64,
	height: i64,
	step: i64,
	force: float,
	/// first node on each axis
	origin: (i64, i64),
	/// exclusive end of the node grid on each axis
	end: (i64, i64),
	cols: usize,
	rows: usize,
	angles: Vec<AngleRad>,
}

impl AngleField {
	pub fn new(width: u32, height: u32, node_step: u32, force: float, seed: &Seed) -> TreeResult<Self> {
		if width == 0 || height == 0 || node_step == 0 {
			return Err(TreeError::invalid_argument(format!(
				"field needs non-zero sizes, but it is {width}x{height} with step {node_step}"
			)));
		}
		if !force.is_finite() {
			return Err(TreeError::invalid_argument(format!("force must be finite, but it is {force}")));
		}
		let channel = Channel::new(ChannelRole::FieldAngle, FIELD_COMPLEXITY, &mut seed.rng_for(ChannelRole::FieldAngle))?;
		let (w, h, step) = (width as i64, height as i64, node_step as i64);
		let origin = (
			(-w).div_euclid(8 * step) * step,
			(-h).div_euclid(8 * step) * step,
		);
		let end = (9 * w / 8, 9 * h / 8);
		let cols = (end.0 - origin.0 + step - 1) / step;
		let rows = (end.1 - origin.1 + step - 1) / step;
		let (cols, rows) = (cols as usize, rows as usize);

		let tree = channel.tree();
		let angles = (0..cols * rows).into_par_iter()
			.map(|i| {
				let nx = origin.0 + (i % cols) as i64 * step;
				let ny = origin.1 + (i / cols) as i64 * step;
				let x = map_to(nx as float, origin.0 as float, end.0 as float, -1., 1.);
				let y = map_to(ny as float, origin.1 as float, end.1 as float, -1., 1.);
				AngleRad::from_unit(tree.eval(x, y))
			})
			.collect();
		tracing::debug!(cols, rows, tree = %tree, "built angle field");

		Ok(Self { channel, width: w, height: h, step, force, origin, end, cols, rows, angles })
	}

	pub fn channel(&self) -> &Channel { &self.channel }
	pub fn cols(&self) -> usize { self.cols }
	pub fn rows(&self) -> usize { self.rows }

	/// Angle of the node at pixel coordinates `(nx, ny)`, if there is a node there.
	pub fn angle_at(&self, nx: i64, ny: i64) -> Option<AngleRad> {
		if nx < self.origin.0 || ny < self.origin.1 || nx >= self.end.0 || ny >= self.end.1 {
			return None;
		}
		if (nx - self.origin.0) % self.step != 0 || (ny - self.origin.1) % self.step != 0 {
			return None;
		}
		let col = ((nx - self.origin.0) / self.step) as usize;
		let row = ((ny - self.origin.1) / self.step) as usize;
		self.angles.get(row * self.cols + col).copied()
	}

	/// Nodes on the corners of the grid cell containing `(x, y)`.
	fn effectors(&self, x: float, y: float) -> impl Iterator<Item = (i64, i64, AngleRad)> + '_ {
		let cell_x = (x / self.step as float).floor() as i64 * self.step;
		let cell_y = (y / self.step as float).floor() as i64 * self.step;
		let (w, h) = (self.width, self.height);
		[cell_y, cell_y + self.step].into_iter()
			.flat_map(move |ny| [cell_x, cell_x + self.step].into_iter().map(move |nx| (nx, ny)))
			.filter(move |&(nx, ny)| {
				(-h).div_euclid(8) <= ny && ny < 9 * h / 8 && (-w).div_euclid(8) <= nx && nx < 9 * w / 8
			})
			.filter_map(move |(nx, ny)| self.angle_at(nx, ny).map(|angle| (nx, ny, angle)))
	}

	/// Sum of the pushes of the surrounding nodes; closer nodes push harder.
	pub fn force_at(&self, x: float, y: float) -> (float, float) {
		let step = self.step as float;
		self.effectors(x, y).fold((0., 0.), |(fx, fy), (nx, ny, angle)| {
			let distance = (x - nx as float).powi(2) + (y - ny as float).powi(2);
			let magnitude = map_to(distance, 0., step * step * 2., self.force * 2., self.force / 2.);
			(fx + magnitude * angle.cos(), fy + magnitude * angle.sin())
		})
	}

	/// Direction of the net force as hue, its strength as value.
	pub fn render(&self) -> image::RgbImage {
		let mut img = image::RgbImage::new(self.width as u32, self.height as u32);
		let max_magnitude = (self.force * 8.).abs();
		img.par_enumerate_pixels_mut().for_each(|(px, py, pixel)| {
			let (fx, fy) = self.force_at(px as float, py as float);
			let hue = AngleDeg::from(AngleRad::of_vector(fx, fy)).to_hue_byte();
			let value = map_to(fx.hypot(fy), 0., max_magnitude, 64., 255.).clamp(0., 255.) as u8;
			*pixel = Hsv::new(hue, 255, value).to_image_rgb();
		});
		tracing::info!(width = self.width, height = self.height, "rendered angle field");
		img
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grid_covers_image_with_margin() {
		let field = AngleField::new(80, 40, 5, 1., &Seed::from_u64(1)).unwrap();
		// x: -10 .. 90, y: -5 .. 45
		assert_eq!(field.cols(), 20);
		assert_eq!(field.rows(), 10);
		assert!(field.angle_at(-10, -5).is_some());
		assert!(field.angle_at(85, 40).is_some());
		assert!(field.angle_at(90, 40).is_none());
		assert!(field.angle_at(-15, 0).is_none());
		assert!(field.angle_at(1, 0).is_none());
	}

	#[test]
	fn angles_are_within_a_turn() {
		let field = AngleField::new(40, 40, 4, 1., &Seed::from_name("field")).unwrap();
		let mut nodes = 0;
		for ny in (-8..45).step_by(4) {
			for nx in (-8..45).step_by(4) {
				if let Some(angle) = field.angle_at(nx, ny) {
					assert!((0. ..=std::f64::consts::TAU).contains(&angle.radians()));
					nodes += 1;
				}
			}
		}
		assert_eq!(nodes, field.cols() * field.rows());
	}

	#[test]
	fn force_on_node_sums_four_neighbours() {
		let field = AngleField::new(40, 40, 5, 1., &Seed::from_u64(3)).unwrap();
		// (10, 10) is a node: it pushes with 2f, its cell neighbours with lesser force
		let expected = [(10, 10), (15, 10), (10, 15), (15, 15)].into_iter()
			.map(|(nx, ny)| {
				let angle = field.angle_at(nx, ny).unwrap();
				let d2 = ((10 - nx).pow(2) + (10 - ny).pow(2)) as float;
				let m = map_to(d2, 0., 50., 2., 0.5);
				(m * angle.cos(), m * angle.sin())
			})
			.fold((0., 0.), |(ax, ay), (x, y)| (ax + x, ay + y));
		let (fx, fy) = field.force_at(10., 10.);
		assert!((fx - expected.0).abs() < 1e-12);
		assert!((fy - expected.1).abs() < 1e-12);
	}

	#[test]
	fn margin_nodes_push_when_size_is_not_a_multiple_of_eight() {
		// 44 / 8 floors to -6, so the top margin row sits at y = -6
		let field = AngleField::new(8, 44, 1, 1., &Seed::from_u64(5)).unwrap();
		assert!(field.angle_at(0, -6).is_some());
		let (x, y) = (0., -5.5);
		let expected = [(0, -6), (1, -6), (0, -5), (1, -5)].into_iter()
			.map(|(nx, ny)| {
				let angle = field.angle_at(nx, ny).unwrap();
				let d2 = (x - nx as float).powi(2) + (y - ny as float).powi(2);
				let m = map_to(d2, 0., 2., 2., 0.5);
				(m * angle.cos(), m * angle.sin())
			})
			.fold((0., 0.), |(ax, ay), (fx, fy)| (ax + fx, ay + fy));
		let (fx, fy) = field.force_at(x, y);
		assert!((fx - expected.0).abs() < 1e-12, "{fx} vs {}", expected.0);
		assert!((fy - expected.1).abs() < 1e-12, "{fy} vs {}", expected.1);
	}

	#[test]
	fn force_is_zero_far_outside() {
		let field = AngleField::new(40, 40, 5, 1., &Seed::from_u64(3)).unwrap();
		assert_eq!(field.force_at(-1000., -1000.), (0., 0.));
	}

	#[test]
	fn same_seed_same_field() {
		let a = AngleField::new(30, 20, 5, 1., &Seed::from_name("w")).unwrap();
		let b = AngleField::new(30, 20, 5, 1., &Seed::from_name("w")).unwrap();
		assert_eq!(a.channel().tree(), b.channel().tree());
		assert_eq!(a.force_at(7.5, 3.2), b.force_at(7.5, 3.2));
	}

	#[test]
	fn rejects_zero_sizes() {
		assert!(AngleField::new(0, 10, 5, 1., &Seed::from_u64(0)).is_err());
		assert!(AngleField::new(10, 10, 0, 1., &Seed::from_u64(0)).is_err());
		assert!(AngleField::new(10, 10, 5, float::NAN, &Seed::from_u64(0)).is_err());
	}

	#[test]
	fn render_has_image_size() {
		let field = AngleField::new(16, 12, 4, 1., &Seed::from_u64(9)).unwrap();
		let img = field.render();
		assert_eq!(img.dimensions(), (16, 12));
	}
}
