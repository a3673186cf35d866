//! Random function trees: synthesis and evaluation.
//!
//! A tree is built once from a `complexity` in `(0, 1]` and then evaluated at every
//! sample point. Evaluation is pure and total: any finite `(x, y)` gives a finite result.

use std::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};
use rand::Rng;

use crate::error::{TreeError, TreeResult};
use crate::float_type::float;
use crate::operator::{finite_or_fallback, Arity, BinaryOp, UnaryOp};
use crate::typesafe_rng::{impl_variants, TypedWeights, TypesafeRNG};


#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal {
	X,
	Y,
	Constant(float),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum TerminalKind {
	#[num_enum(default)]
	X,
	Y,
	Constant,
}
impl_variants!(TerminalKind => 3);

impl Terminal {
	pub fn eval(self, x: float, y: float) -> float {
		match self {
			Self::X => x,
			Self::Y => y,
			Self::Constant(c) => c,
		}
	}
}


/// Node of an immutable expression tree, exclusively owning its children.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
	Terminal(Terminal),
	Unary(UnaryOp, Box<ExpressionNode>),
	Binary(BinaryOp, Box<ExpressionNode>, Box<ExpressionNode>),
}

impl ExpressionNode {
	pub const fn x() -> Self {
		Self::Terminal(Terminal::X)
	}
	pub const fn y() -> Self {
		Self::Terminal(Terminal::Y)
	}
	pub const fn constant(value: float) -> Self {
		Self::Terminal(Terminal::Constant(value))
	}
	pub fn unary(op: UnaryOp, arg: ExpressionNode) -> Self {
		Self::Unary(op, Box::new(arg))
	}
	pub fn binary(op: BinaryOp, lhs: ExpressionNode, rhs: ExpressionNode) -> Self {
		Self::Binary(op, Box::new(lhs), Box::new(rhs))
	}

	/// Value of the function at `(x, y)`.
	///
	/// Children are always evaluated, then the operator rule is applied and any
	/// non-finite result is replaced by the fallback.
	pub fn eval(&self, x: float, y: float) -> float {
		let value = match self {
			Self::Terminal(terminal) => terminal.eval(x, y),
			Self::Unary(op, arg) => op.apply(arg.eval(x, y)),
			Self::Binary(op, lhs, rhs) => op.apply(lhs.eval(x, y), rhs.eval(x, y)),
		};
		finite_or_fallback(value)
	}

	pub fn arity(&self) -> Option<Arity> {
		match self {
			Self::Terminal(_) => None,
			Self::Unary(..) => Some(Arity::Unary),
			Self::Binary(..) => Some(Arity::Binary),
		}
	}

	/// Edges on the longest root-to-leaf path; a lone terminal has depth 0.
	pub fn depth(&self) -> u32 {
		match self {
			Self::Terminal(_) => 0,
			Self::Unary(_, arg) => 1 + arg.depth(),
			Self::Binary(_, lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
		}
	}

	pub fn node_count(&self) -> usize {
		match self {
			Self::Terminal(_) => 1,
			Self::Unary(_, arg) => 1 + arg.node_count(),
			Self::Binary(_, lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
		}
	}
}

impl fmt::Display for ExpressionNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Terminal(Terminal::X) => f.write_str("x"),
			Self::Terminal(Terminal::Y) => f.write_str("y"),
			Self::Terminal(Terminal::Constant(c)) => write!(f, "{c}"),
			Self::Unary(op, arg) => write!(f, "{op}({arg})"),
			Self::Binary(op, lhs, rhs) => write!(f, "{op}({lhs}, {rhs})"),
		}
	}
}


/// Deepest tree a [`Synthesizer`] accepts; recursion depth of build, eval and drop.
pub const MAX_DEPTH_LIMIT: u32 = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
	/// Nodes at this depth are always terminals. At most [`MAX_DEPTH_LIMIT`].
	pub max_depth: u32,
	/// `[unary, binary]`; equal to the operator counts, so every operator is equally likely.
	pub arity_weights: [u32; 2],
	/// `[x, y, constant]`.
	pub terminal_weights: [u32; 3],
	/// Constants are drawn uniformly from this closed interval.
	pub constant_range: (float, float),
}

impl Default for SynthesisConfig {
	fn default() -> Self {
		Self {
			max_depth: 8,
			arity_weights: [UnaryOp::ALL.len() as u32, BinaryOp::ALL.len() as u32],
			terminal_weights: [1, 1, 1],
			constant_range: (-1., 1.),
		}
	}
}


/// Builds random trees under a validated [`SynthesisConfig`].
#[derive(Debug, Clone)]
pub struct Synthesizer {
	max_depth: u32,
	arity_weights: TypedWeights<Arity>,
	terminal_weights: TypedWeights<TerminalKind>,
	constant_range: (float, float),
}

impl Synthesizer {
	pub fn new(config: SynthesisConfig) -> TreeResult<Self> {
		let SynthesisConfig { max_depth, arity_weights, terminal_weights, constant_range } = config;
		if !(1 ..= MAX_DEPTH_LIMIT).contains(&max_depth) {
			return Err(TreeError::invalid_argument(format!(
				"max depth must be in 1..={MAX_DEPTH_LIMIT}, but it is {max_depth}"
			)));
		}
		let (lo, hi) = constant_range;
		// rand scales the width up by a hair, so twice the width must stay finite
		if !(lo.is_finite() && hi.is_finite() && lo <= hi && (2. * (hi - lo)).is_finite()) {
			return Err(TreeError::invalid_argument(format!(
				"constant range must be finite and ordered, but it is [{lo}, {hi}]"
			)));
		}
		Ok(Self {
			max_depth,
			arity_weights: TypedWeights::new(arity_weights)?,
			terminal_weights: TypedWeights::new(terminal_weights)?,
			constant_range,
		})
	}

	pub fn max_depth(&self) -> u32 {
		self.max_depth
	}

	/// Builds a tree whose root is always an operator.
	///
	/// A node at depth `d` (`0 < d < max_depth`) becomes an operator with probability
	/// `complexity^d`, so higher complexity gives bigger trees and depth `max_depth`
	/// caps the recursion even for `complexity == 1`.
	pub fn build<R: Rng + ?Sized>(&self, complexity: float, rng: &mut R) -> TreeResult<ExpressionNode> {
		if !(complexity > 0. && complexity <= 1.) {
			return Err(TreeError::invalid_complexity(complexity));
		}
		let tree = self.grow(complexity, 0, rng);
		tracing::debug!(complexity, depth = tree.depth(), nodes = tree.node_count(), "built function tree");
		Ok(tree)
	}

	fn grow<R: Rng + ?Sized>(&self, complexity: float, depth: u32, rng: &mut R) -> ExpressionNode {
		let is_branch = depth == 0
			|| (depth < self.max_depth && rng.gen_bool(complexity.powi(depth as i32)));
		if !is_branch {
			return self.terminal(rng);
		}
		match rng.gen_typesafe_from(&self.arity_weights) {
			Arity::Unary => {
				let op: UnaryOp = rng.gen_typesafe_number();
				ExpressionNode::unary(op, self.grow(complexity, depth + 1, rng))
			}
			Arity::Binary => {
				let op: BinaryOp = rng.gen_typesafe_number();
				let lhs = self.grow(complexity, depth + 1, rng);
				let rhs = self.grow(complexity, depth + 1, rng);
				ExpressionNode::binary(op, lhs, rhs)
			}
		}
	}

	fn terminal<R: Rng + ?Sized>(&self, rng: &mut R) -> ExpressionNode {
		match rng.gen_typesafe_from(&self.terminal_weights) {
			TerminalKind::X => ExpressionNode::x(),
			TerminalKind::Y => ExpressionNode::y(),
			TerminalKind::Constant => {
				let (lo, hi) = self.constant_range;
				ExpressionNode::constant(rng.gen_range(lo ..= hi))
			}
		}
	}
}


/// Builds a tree with the default [`SynthesisConfig`].
pub fn build<R: Rng + ?Sized>(complexity: float, rng: &mut R) -> TreeResult<ExpressionNode> {
	Synthesizer::new(SynthesisConfig::default())?.build(complexity, rng)
}

pub fn eval(tree: &ExpressionNode, x: float, y: float) -> float {
	tree.eval(x, y)
}
