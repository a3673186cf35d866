//! HSV image: hue, saturation and value each driven by its own tree.

use rand::Rng;
use rayon::prelude::*;

use crate::channel::{Channel, ChannelRole};
use crate::color::Hsv;
use crate::error::{TreeError, TreeResult};
use crate::float_type::float;
use crate::sampling::{sample_grid, Domain};
use crate::seed::Seed;


pub const DEFAULT_COMPLEXITY: float = 0.6;


#[derive(Debug, Clone)]
pub struct HsvImage {
	width: u32,
	height: u32,
	/// hue, saturation, value
	channels: [Channel; 3],
}

impl HsvImage {
	/// Builds the three channels concurrently, each from its own stream of `seed`.
	pub fn new(width: u32, height: u32, seed: &Seed, complexities: [float; 3]) -> TreeResult<Self> {
		let channels: Vec<Channel> = ChannelRole::HSV.into_par_iter()
			.zip(complexities)
			.map(|(role, complexity)| Channel::new(role, complexity, &mut seed.rng_for(role)))
			.collect::<TreeResult<_>>()?;
		let [hue, saturation, value]: [Channel; 3] = channels.try_into()
			.map_err(|_| TreeError::invalid_argument("expected exactly three hsv channels"))?;
		for c in [&hue, &saturation, &value] {
			tracing::debug!(role = %c.role(), shift = c.shift(), range = c.range(), tree = %c.tree(), "hsv channel");
		}
		Ok(Self { width, height, channels: [hue, saturation, value] })
	}

	pub fn width(&self) -> u32 { self.width }
	pub fn height(&self) -> u32 { self.height }

	pub fn channel(&self, role: ChannelRole) -> Option<&Channel> {
		self.channels.iter().find(|c| c.role() == role)
	}

	pub fn channel_mut(&mut self, role: ChannelRole) -> Option<&mut Channel> {
		self.channels.iter_mut().find(|c| c.role() == role)
	}

	fn channel_mut_or_err(&mut self, role: ChannelRole) -> TreeResult<&mut Channel> {
		self.channel_mut(role)
			.ok_or_else(|| TreeError::invalid_argument(format!("hsv image has no {role} channel")))
	}

	/// Replaces one channel's tree, leaving the others untouched.
	pub fn regenerate<R: Rng + ?Sized>(&mut self, role: ChannelRole, complexity: float, rng: &mut R) -> TreeResult<()> {
		self.channel_mut_or_err(role)?.regenerate(complexity, rng)
	}

	pub fn set_visible(&mut self, role: ChannelRole, visible: bool) -> TreeResult<()> {
		self.channel_mut_or_err(role)?.set_visible(visible);
		Ok(())
	}

	/// Band bytes of `channel`; a hidden channel is a flat band of its shift.
	fn band(&self, channel: &Channel) -> Vec<u8> {
		if !channel.is_visible() {
			return vec![channel.shift(); self.width as usize * self.height as usize];
		}
		sample_grid(channel.tree(), self.width, self.height, Domain::UNIT)
			.into_par_iter()
			.map(|v| channel.band_value(v))
			.collect()
	}

	pub fn bands(&self) -> [Vec<u8>; 3] {
		let [hue, saturation, value] = &self.channels;
		let (hue, (saturation, value)) = rayon::join(
			|| self.band(hue),
			|| rayon::join(|| self.band(saturation), || self.band(value)),
		);
		[hue, saturation, value]
	}

	pub fn render(&self) -> image::RgbImage {
		let [hue, saturation, value] = self.bands();
		let mut img = image::RgbImage::new(self.width, self.height);
		let width = self.width as usize;
		img.par_enumerate_pixels_mut().for_each(|(px, py, pixel)| {
			let i = py as usize * width + px as usize;
			*pixel = Hsv::new(hue[i], saturation[i], value[i]).to_image_rgb();
		});
		tracing::info!(width = self.width, height = self.height, "rendered hsv image");
		img
	}
}
