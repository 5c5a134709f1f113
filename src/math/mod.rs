//! Numeric building blocks: matrix containers and calendar boundary math.

pub mod calendar;
pub mod matrix;

pub use calendar::*;
pub use matrix::*;
