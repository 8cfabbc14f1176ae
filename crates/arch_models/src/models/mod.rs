//! Bound variance models.
//!
//! This module provides:
//! - `VarianceModelEnum`: Static dispatch enum over the recursions
//! - `dispatch`: Specification to (layout, recursion) binding
//!
//! ## Design Philosophy
//!
//! All models use:
//! - Static dispatch via enum (not `Box<dyn Trait>`)
//! - A single per-step recursion shared by every driver
//! - Hard clamping into [`Bounds`](arch_core::types::Bounds) at every step

pub mod model_enum;

pub use model_enum::{dispatch, VarianceModelEnum};
