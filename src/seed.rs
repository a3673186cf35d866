//! Reproducible randomness: one seed per image, one independent stream per channel.

use std::fmt;

use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::channel::ChannelRole;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 32]);

impl Seed {
	pub const fn from_bytes(bytes: [u8; 32]) -> Self {
		Self(bytes)
	}

	/// Same name, same image.
	pub fn from_name(name: &str) -> Self {
		Self(Sha256::digest(name.as_bytes()).into())
	}

	/// Matches `ChaCha8Rng::seed_from_u64(value)`.
	pub fn from_u64(value: u64) -> Self {
		Self(ChaCha8Rng::seed_from_u64(value).get_seed())
	}

	pub fn random() -> Self {
		Self(thread_rng().gen())
	}

	pub fn rng(&self) -> ChaCha8Rng {
		ChaCha8Rng::from_seed(self.0)
	}

	/// Generator dedicated to `role`, independent of every other role's one.
	pub fn rng_for(&self, role: ChannelRole) -> ChaCha8Rng {
		let mut rng = self.rng();
		rng.set_stream(role.stream());
		rng
	}
}

impl fmt::Display for Seed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.0 {
			write!(f, "{byte:02x}")?;
		}
		Ok(())
	}
}
