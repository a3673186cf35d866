//! Byte HSV, as stored in an 8-bit HSV image, and its conversion to RGB.

use crate::float_type::float;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
	/// full turn over 0 ..= 255
	pub h: u8,
	pub s: u8,
	pub v: u8,
}

impl Hsv {
	pub const fn new(h: u8, s: u8, v: u8) -> Self {
		Self { h, s, v }
	}

	pub fn to_image_rgb(self) -> image::Rgb<u8> {
		let h = self.h as float / 255.;
		let s = self.s as float / 255.;
		let v = self.v as float / 255.;
		if s == 0. {
			return to_bytes(v, v, v);
		}
		let ht = h * 6.;
		let sector = ht.floor();
		let f = ht - sector;
		let p = v * (1. - s);
		let q = v * (1. - s * f);
		let t = v * (1. - s * (1. - f));
		let (r, g, b) = match sector as u8 % 6 {
			0 => (v, t, p),
			1 => (q, v, p),
			2 => (p, v, t),
			3 => (p, q, v),
			4 => (t, p, v),
			_ => (v, p, q),
		};
		to_bytes(r, g, b)
	}
}

fn to_bytes(r: float, g: float, b: float) -> image::Rgb<u8> {
	image::Rgb([
		(r * 255.).round() as u8,
		(g * 255.).round() as u8,
		(b * 255.).round() as u8,
	])
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn greys_have_no_saturation() {
		assert_eq!(Hsv::new(123, 0, 0).to_image_rgb(), image::Rgb([0, 0, 0]));
		assert_eq!(Hsv::new(17, 0, 200).to_image_rgb(), image::Rgb([200, 200, 200]));
	}

	#[test]
	fn primaries() {
		assert_eq!(Hsv::new(0, 255, 255).to_image_rgb(), image::Rgb([255, 0, 0]));
		assert_eq!(Hsv::new(85, 255, 255).to_image_rgb(), image::Rgb([0, 255, 0]));
		assert_eq!(Hsv::new(170, 255, 255).to_image_rgb(), image::Rgb([0, 0, 255]));
	}

	#[test]
	fn full_turn_wraps_to_red() {
		assert_eq!(Hsv::new(255, 255, 255).to_image_rgb(), image::Rgb([255, 0, 0]));
	}
}
