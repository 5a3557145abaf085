//! Core domain concepts shared across all subdomains.
//!
//! - [`image::ImageData`] - an opaque, cheaply cloneable image handle
//! - [`scene`] - scene labels and the eligibility rules agents use
//! - [`json`] - lenient JSON extraction from model replies
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod image;
pub mod json;
pub mod scene;
pub mod text;
