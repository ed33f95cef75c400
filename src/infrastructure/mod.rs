//! Infrastructure layer - Parameter source implementations and logging

pub mod logging;
pub mod source;

pub use source::{LayeredParamSource, StaticParamSource};
