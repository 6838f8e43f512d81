//! Error values that carry the history leading up to them.
//!
//! A [`ChronicleError`] is an ordinary `std::error::Error` (a message plus
//! an optional cause) that owns a [`Chronicle`]. Code that fails part-way
//! through a sequence of steps can record each step as an event and return
//! the whole trail with the error:
//!
//! ```
//! use chronicle_error::ChronicleError;
//!
//! fn import(rows: &[&str]) -> Result<(), ChronicleError<String>> {
//!     let mut trail = ChronicleError::new("import started".to_string(), "import failed");
//!     for row in rows {
//!         if row.is_empty() {
//!             return Err(trail.caused_by("empty row"));
//!         }
//!         trail
//!             .append(format!("imported {row}"))
//!             .expect("no append hook installed");
//!     }
//!     Ok(())
//! }
//!
//! let err = import(&["a", "b", ""]).unwrap_err();
//! assert_eq!(err.current_event(), "imported b");
//! assert_eq!(err.all_events().len(), 3);
//! ```

use std::error::Error;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use chronicle_core::{Chronicle, ChronicleOptions, HookResult, Result};
use chronicle_types::{ChronicleId, Isolation, Snapshot};

/// Boxed cause wrapped by a [`ChronicleError`].
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// An error value that owns a [`Chronicle`].
///
/// Every history operation forwards to the owned chronicle with the same
/// contract, including the append hook running once at construction.
pub struct ChronicleError<T, P: ?Sized = T> {
    message: String,
    cause: Option<Cause>,
    chronicle: Chronicle<T, P>,
}

impl<T: Snapshot + PartialEq + 'static> ChronicleError<T, T> {
    pub fn new(initial: T, message: impl Into<String>) -> Self {
        Self::from_chronicle(Chronicle::new(initial), message.into())
    }
}

impl<T: Snapshot, P: ?Sized> ChronicleError<T, P> {
    /// Create the error and its chronicle with the given options.
    ///
    /// Fails only when the append hook rejects the initial value.
    pub fn with_options(
        initial: T,
        message: impl Into<String>,
        options: ChronicleOptions<T, P>,
    ) -> Result<Self> {
        let chronicle = Chronicle::with_options(initial, options)?;
        Ok(Self::from_chronicle(chronicle, message.into()))
    }

    /// Wrap an existing chronicle.
    pub fn from_chronicle(chronicle: Chronicle<T, P>, message: String) -> Self {
        debug!(chronicle = %chronicle.id(), %message, "chronicle error created");
        Self {
            message,
            cause: None,
            chronicle,
        }
    }

    /// Attach the underlying cause reported by [`Error::source`].
    pub fn caused_by(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn chronicle(&self) -> &Chronicle<T, P> {
        &self.chronicle
    }

    pub fn chronicle_mut(&mut self) -> &mut Chronicle<T, P> {
        &mut self.chronicle
    }

    pub fn into_chronicle(self) -> Chronicle<T, P> {
        self.chronicle
    }

    // ---- Forwarded history operations ----

    pub fn append(&mut self, event: T) -> Result<()> {
        self.chronicle.append(event)
    }

    pub fn append_with<F>(&mut self, event: T, callback: F) -> Result<()>
    where
        F: FnOnce(&T, &ChronicleId) -> HookResult,
    {
        self.chronicle.append_with(event, callback)
    }

    pub fn current_event(&self) -> T {
        self.chronicle.current_event()
    }

    pub fn past_events(&self) -> Vec<T> {
        self.chronicle.past_events()
    }

    pub fn all_events(&self) -> Vec<T> {
        self.chronicle.all_events()
    }

    pub fn includes(&self, probe: &P) -> bool {
        self.chronicle.includes(probe)
    }

    pub fn transform_all<F>(&mut self, mapper: F) -> Vec<T>
    where
        F: FnMut(T) -> T,
    {
        self.chronicle.transform_all(mapper)
    }

    pub fn try_transform_all<E, F>(&mut self, mapper: F) -> std::result::Result<Vec<T>, E>
    where
        F: FnMut(T) -> std::result::Result<T, E>,
    {
        self.chronicle.try_transform_all(mapper)
    }

    pub fn id(&self) -> &ChronicleId {
        self.chronicle.id()
    }

    pub fn isolation(&self) -> Isolation {
        self.chronicle.isolation()
    }

    pub fn timer_start(&mut self, label: &str) {
        self.chronicle.timer_start(label);
    }

    pub fn timer_log(&self, label: &str, info: impl fmt::Display) -> Option<Duration> {
        self.chronicle.timer_log(label, info)
    }

    pub fn timer_end(&mut self, label: &str) -> Option<Duration> {
        self.chronicle.timer_end(label)
    }
}

impl<T, P: ?Sized> fmt::Display for ChronicleError<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<T: fmt::Debug, P: ?Sized> fmt::Debug for ChronicleError<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChronicleError")
            .field("message", &self.message)
            .field("cause", &self.cause)
            .field("chronicle", &self.chronicle)
            .finish()
    }
}

impl<T: fmt::Debug, P: ?Sized> Error for ChronicleError<T, P> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
