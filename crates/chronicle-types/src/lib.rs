//! Foundation types for Chronicle.
//!
//! Every other Chronicle crate depends on `chronicle-types`.
//!
//! # Key Types
//!
//! - [`ChronicleId`]: UUID v7 identifier handed to append hooks for correlation
//! - [`Isolation`]: Whether stored values are deep-copied on the way in and out
//! - [`Snapshot`]: Explicit deep-copy operation used by [`Isolation::Snapshot`]

pub mod error;
pub mod id;
pub mod isolation;
pub mod snapshot;

pub use error::TypeError;
pub use id::ChronicleId;
pub use isolation::Isolation;
pub use snapshot::Snapshot;
