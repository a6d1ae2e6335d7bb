//! Exact planar predicates.
//!
//! Purpose
//! - Integer points and the orientation test every higher-level routine is
//!   built on. Arithmetic is done in `i128`, so `turn` never reports a false
//!   collinearity.
//! - Angular sorting around a pivot and general-position checks.
//!
//! Conventions
//! - `Turn::Left` is counterclockwise.
//! - "Lowest" means smallest in `(y, x)` order.

mod predicates;
mod types;

pub use predicates::{
    angular_cmp, check_general_position, cross, extends_general_position, in_triangle,
    is_general_position, sort_around_point, turn,
};
pub use types::{Point, Turn, MAX_COORD};
