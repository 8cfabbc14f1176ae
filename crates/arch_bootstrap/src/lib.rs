//! # arch_bootstrap (L3: Bootstrap Engine)
//!
//! Seeded random streams and index samplers for resampling dependent
//! time series.
//!
//! This crate provides:
//! - Random streams with explicit, isolated state (`rng`)
//! - Resampling schemes and validated configuration (`config`)
//! - The per-run index sampler (`sampler`)
//! - Seed mixing and parallel replication (`replicate`)
//!
//! ## Concurrency
//!
//! Nothing in this crate is shared between replications. A sampler owns its
//! stream exclusively; parallel helpers build one stream per replication
//! from a mixed seed, so results do not depend on thread scheduling.
//!
//! ## Example
//!
//! ```rust
//! use arch_bootstrap::rng::SeededStream;
//! use arch_bootstrap::replicate::resample;
//! use arch_bootstrap::{BootstrapConfig, BootstrapScheme, IndexSampler};
//!
//! let data: Vec<f64> = (0..20).map(|i| i as f64).collect();
//! let config = BootstrapConfig::builder()
//!     .scheme(BootstrapScheme::MovingBlock { block_length: 5 })
//!     .data_length(data.len())
//!     .replications(10)
//!     .build()
//!     .unwrap();
//!
//! let mut sampler = IndexSampler::new(config, SeededStream::from_seed(42)).unwrap();
//! for indices in sampler.replications() {
//!     let sample = resample(&data, &indices).unwrap();
//!     assert_eq!(sample.len(), data.len());
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `BootstrapScheme` and `BootstrapConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod replicate;
pub mod rng;
pub mod sampler;

pub use config::{BootstrapConfig, BootstrapConfigBuilder, BootstrapScheme};
pub use error::{BootstrapError, BootstrapResult};
pub use sampler::{sample_indices, IndexSampler, Replications};
