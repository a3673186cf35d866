//! Precision of every number flowing through trees and renderers.

#[allow(non_camel_case_types)]
pub type float = f64;
