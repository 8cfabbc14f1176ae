//! # Random Streams
//!
//! This module provides the random number source consumed by the bootstrap
//! samplers.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every stream is constructed from an explicit seed
//! - **Isolation**: no global or thread-local generator; each stream owns its
//!   state, so two streams with the same seed agree regardless of what other
//!   streams have done
//! - **Static dispatch**: samplers are generic over [`RandomStream`]
//!
//! ## Module Structure
//!
//! - [`stream`]: the [`RandomStream`] trait with inversion-based defaults
//! - [`prng`]: [`SeededStream`], the `StdRng`-backed implementation
//!
//! ## Usage Example
//!
//! ```rust
//! use arch_bootstrap::rng::{RandomStream, SeededStream};
//!
//! let mut stream = SeededStream::from_seed(12345);
//!
//! let u = stream.next_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let i = stream.next_index(10);
//! assert!(i < 10);
//!
//! let k = stream.next_geometric(0.25);
//! assert!(k >= 1);
//! ```

pub mod prng;
pub mod stream;

pub use prng::SeededStream;
pub use stream::RandomStream;
