//! # arch_core: Foundation for Volatility Kernels
//!
//! ## Layer 1 (Foundation) Role
//!
//! arch_core is the bottom layer of the workspace, providing:
//! - Error taxonomy: `KernelError`, `ErrorKind` (`types::error`)
//! - Variance clamp: `Bounds` (`types::bounds`)
//! - Backcast computation (`math::backcast`)
//! - Sample moments (`math::moments`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other arch_* crates, with minimal external
//! dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use arch_core::math::compute_backcast;
//! use arch_core::types::Bounds;
//!
//! let resids = [0.3, -1.2, 0.8, -0.1, 2.1];
//! let backcast = compute_backcast(&resids).unwrap();
//! let bounds = Bounds::from_residuals(&resids).unwrap();
//! assert!(bounds.contains(backcast));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Bounds`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
