//! Tiled colour grid: every `box_size` tile gets one colour from red, green and blue trees.

use rayon::prelude::*;

use crate::channel::{Channel, ChannelRole};
use crate::error::{TreeError, TreeResult};
use crate::float_type::float;
use crate::seed::Seed;


#[derive(Debug, Clone)]
pub struct SquaresImage {
	width: u32,
	height: u32,
	box_size: u32,
	/// red, green, blue
	channels: [Channel; 3],
}

impl SquaresImage {
	pub fn new(width: u32, height: u32, box_size: u32, seed: &Seed, complexity: float) -> TreeResult<Self> {
		if box_size == 0 {
			return Err(TreeError::invalid_argument("box size must be at least 1"));
		}
		let channels: Vec<Channel> = ChannelRole::RGB.into_par_iter()
			.map(|role| Channel::new(role, complexity, &mut seed.rng_for(role)))
			.collect::<TreeResult<_>>()?;
		let channels: [Channel; 3] = channels.try_into()
			.map_err(|_| TreeError::invalid_argument("expected exactly three rgb channels"))?;
		Ok(Self { width, height, box_size, channels })
	}

	pub fn channels(&self) -> &[Channel; 3] {
		&self.channels
	}

	pub fn tiles(&self) -> (u32, u32) {
		(self.width.div_ceil(self.box_size), self.height.div_ceil(self.box_size))
	}

	/// Colour of the tile at (`col`, `row`), sampled at its top-left corner.
	pub fn tile_color(&self, col: u32, row: u32) -> image::Rgb<u8> {
		let x = 2. * (col * self.box_size) as float / self.width as float - 1.;
		let y = 2. * (row * self.box_size) as float / self.height as float - 1.;
		image::Rgb(self.channels.each_ref().map(|c| c.tile_value(c.tree().eval(x, y))))
	}

	pub fn render(&self) -> image::RgbImage {
		let (cols, rows) = self.tiles();
		let colors: Vec<image::Rgb<u8>> = (0..cols * rows).into_par_iter()
			.map(|i| self.tile_color(i % cols, i / cols))
			.collect();
		let mut img = image::RgbImage::new(self.width, self.height);
		img.par_enumerate_pixels_mut().for_each(|(px, py, pixel)| {
			let (col, row) = (px / self.box_size, py / self.box_size);
			*pixel = colors[(row * cols + col) as usize];
		});
		tracing::info!(width = self.width, height = self.height, cols, rows, "rendered squares");
		img
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tiles_cover_partial_edges() {
		let img = SquaresImage::new(100, 45, 20, &Seed::from_u64(1), 0.6).unwrap();
		assert_eq!(img.tiles(), (5, 3));
	}

	#[test]
	fn tiles_are_flat() {
		let squares = SquaresImage::new(40, 20, 10, &Seed::from_name("squares"), 0.6).unwrap();
		let img = squares.render();
		for (px, py, pixel) in img.enumerate_pixels() {
			assert_eq!(*pixel, squares.tile_color(px / 10, py / 10));
		}
	}

	#[test]
	fn zero_box_size_is_rejected() {
		assert!(SquaresImage::new(40, 20, 0, &Seed::from_u64(1), 0.6).is_err());
	}

	#[test]
	fn channels_are_rgb() {
		let squares = SquaresImage::new(10, 10, 5, &Seed::from_u64(2), 0.6).unwrap();
		let roles = squares.channels().each_ref().map(|c| c.role());
		assert_eq!(roles, ChannelRole::RGB);
	}
}
