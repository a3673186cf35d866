//! Procedural images from random function trees.
//!
//! A channel (hue, red, field angle, ...) owns one randomly built expression tree,
//! which is evaluated at every pixel or grid node to get a scalar.
//! [`function_tree`] is the engine; the image modules are thin renderers on top of it.

pub mod angle;
pub mod channel;
pub mod color;
pub mod error;
pub mod field;
pub mod float_type;
pub mod function_tree;
pub mod hsv_image;
pub mod operator;
pub mod remap;
pub mod sampling;
pub mod seed;
pub mod squares;
pub mod typesafe_rng;

pub use channel::{Channel, ChannelRole};
pub use error::{TreeError, TreeResult};
pub use float_type::float;
pub use function_tree::{build, eval, ExpressionNode, SynthesisConfig, Synthesizer, Terminal};
pub use operator::{Arity, BinaryOp, UnaryOp};
pub use remap::map_to;
pub use seed::Seed;
