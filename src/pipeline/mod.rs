//! Pipeline orchestration
//!
//! [`extractor`] wires the stages together; [`observer`] exposes hooks at
//! each stage boundary.

pub mod extractor;
pub mod observer;
