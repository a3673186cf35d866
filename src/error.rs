use crate::float_type::float;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TreeError {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

impl TreeError {
	pub fn invalid_argument(msg: impl Into<String>) -> Self {
		Self::InvalidArgument(msg.into())
	}

	pub fn invalid_complexity(complexity: float) -> Self {
		Self::invalid_argument(format!("complexity must be in (0, 1], but it is {complexity}"))
	}
}

impl From<rand_distr::WeightedError> for TreeError {
	fn from(err: rand_distr::WeightedError) -> Self {
		Self::invalid_argument(format!("bad weights: {err}"))
	}
}
