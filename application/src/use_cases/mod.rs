//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_image;
pub mod edit_image;
pub mod enhance_image;
pub mod route;
pub(crate) mod shared;
#[cfg(test)]
pub(crate) mod test_support;
