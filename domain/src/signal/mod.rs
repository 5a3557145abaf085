//! Signal model: what the detector found and how the face looks.
//!
//! - [`entities::Signal`] - one detected AI artifact
//! - [`expression::ExpressionState`] - facial expression analysis result
//! - [`expression::ExpressionMode`] - whether the expression is kept or fixed

pub mod entities;
pub mod expression;
