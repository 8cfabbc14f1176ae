//! # arch_models (L2: Variance Recursions)
//!
//! Conditional variance recursions for the ARCH family of volatility models.
//!
//! This crate provides:
//! - Model specifications and tag parsing (`spec`)
//! - Parameter layouts (`layout`)
//! - Per-variant single-step recursions (`recursions`)
//! - Static dispatch and the path/forecast drivers (`models`)
//! - Specification-level convenience functions (`kernel`)
//!
//! ## Supported variants
//!
//! | Tag | Parameters |
//! |-----|------------|
//! | `constant` | `σ²` |
//! | `arch` | `ω, α_1..α_p` |
//! | `garch` | `ω, α_1..α_p, β_1..β_q` |
//! | `gjr-garch` | `ω, α_1..α_p, γ_1..γ_o, β_1..β_q` |
//! | `tarch` | as GJR-GARCH, on `σ` rather than `σ²` |
//! | `egarch` | `ω, α_1..α_p, γ_1..γ_o, β_1..β_q` on `ln σ²` |
//! | `harch` | `ω, α_1..α_m` over lag windows |
//! | `ewma` | `λ` |
//!
//! ## Design Principles
//!
//! - **Enum-based dispatch** for static dispatch in the inner loop
//! - **Causal history**: step `t` never reads `r_t` or later
//! - **Total over parameter space**: outputs are clamped, never errors
//!
//! ## Example
//!
//! ```
//! use arch_core::math::compute_backcast;
//! use arch_core::types::Bounds;
//! use arch_models::{dispatch, ModelSpec};
//!
//! let resids = [0.4, -1.1, 0.3, 2.0, -0.7];
//! let (layout, model) = dispatch(&ModelSpec::gjr(1, 1, 1)).unwrap();
//! assert_eq!(layout.names(), &["omega", "alpha[1]", "gamma[1]", "beta[1]"]);
//!
//! let backcast = compute_backcast(&resids).unwrap();
//! let bounds = Bounds::from_residuals(&resids).unwrap();
//! let sigma2 = model
//!     .compute_variance(&[0.05, 0.05, 0.1, 0.85], &resids, backcast, bounds)
//!     .unwrap();
//! assert!(sigma2.iter().all(|v| bounds.contains(*v)));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `ModelSpec`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod kernel;
pub mod layout;
pub mod models;
pub mod recursions;
pub mod spec;

pub use kernel::{compute_variance, compute_variance_into, forecast_step};
pub use layout::ParameterLayout;
pub use models::{dispatch, VarianceModelEnum};
pub use spec::{ModelSpec, RawOrders, VariantTag};
