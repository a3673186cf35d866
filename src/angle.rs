//! Wrappers for angle in deg and rad to not confuse them.

use std::f64::consts::TAU;

use crate::float_type::float;
use crate::remap::map_to;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleDeg(float);
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRad(float);

impl From<AngleDeg> for AngleRad {
	fn from(angle_in_deg: AngleDeg) -> AngleRad {
		AngleRad(angle_in_deg.0.to_radians())
	}
}
impl From<AngleRad> for AngleDeg {
	fn from(angle_in_rad: AngleRad) -> AngleDeg {
		AngleDeg(angle_in_rad.0.to_degrees())
	}
}

impl AngleDeg {
	pub fn new(degrees: float) -> AngleDeg {
		AngleDeg(degrees.rem_euclid(360.))
	}
	pub fn degrees(self) -> float {
		self.0
	}
	/// Hue byte of an 8-bit HSV pixel pointing this way.
	pub fn to_hue_byte(self) -> u8 {
		(AngleDeg::new(self.0).0 / 360. * 255.).round() as u8
	}
}

impl AngleRad {
	pub fn new(radians: float) -> AngleRad {
		AngleRad(radians)
	}
	/// Tree output in `[-1, 1]` to a direction in `[0, 2pi]`.
	pub fn from_unit(v: float) -> AngleRad {
		AngleRad(map_to(v, -1., 1., 0., TAU))
	}
	/// Direction of the vector `(x, y)`.
	pub fn of_vector(x: float, y: float) -> AngleRad {
		AngleRad(y.atan2(x))
	}
	pub fn radians(self) -> float {
		self.0
	}
	pub fn cos(self) -> float {
		self.0.cos()
	}
	pub fn sin(self) -> float {
		self.0.sin()
	}
}
