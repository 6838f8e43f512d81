//! In-memory event history for Chronicle.
//!
//! This crate provides:
//! - [`Chronicle`], a current value plus a newest-first log of every value
//!   that was current before it
//! - [`ChronicleOptions`] for membership comparators, append hooks and the
//!   isolation mode
//! - Map-then-commit bulk transforms that leave the history untouched when
//!   the mapper fails
//! - [`TimerRegistry`], labelled stopwatches reported through `tracing`
//!
//! ```
//! use chronicle_core::Chronicle;
//!
//! let mut chronicle = Chronicle::new("First event");
//! chronicle.append("Second event").unwrap();
//!
//! assert_eq!(chronicle.all_events(), vec!["Second event", "First event"]);
//! assert!(chronicle.includes(&"First event"));
//! ```

pub mod chronicle;
pub mod config;
pub mod error;
pub mod options;
pub mod timer;

pub use chronicle::Chronicle;
pub use chronicle_types::{ChronicleId, Isolation, Snapshot};
pub use config::ChronicleConfig;
pub use error::{HistoryError, Result};
pub use options::{AppendHook, ChronicleOptions, Comparator, HookError, HookResult};
pub use timer::TimerRegistry;
