use std::collections::vec_deque;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use chronicle_types::{ChronicleId, Isolation, Snapshot};

use crate::error::{HistoryError, Result};
use crate::options::{AppendHook, ChronicleOptions, Comparator, HookResult};
use crate::timer::TimerRegistry;

/// A current value plus every value that was current before it.
///
/// The full history is `[current] ++ past`, newest first: `past[0]` is the
/// value that was current immediately before the present one. The history
/// always holds at least the initial value.
///
/// Values are only added by [`append`](Self::append) and only rewritten by
/// [`transform_all`](Self::transform_all). Under [`Isolation::Snapshot`]
/// (the default) every value crossing the boundary in either direction is a
/// [`Snapshot`] copy; the borrowing views ([`current`](Self::current),
/// [`past`](Self::past), [`iter`](Self::iter)) hand out shared references
/// instead and never copy.
///
/// A chronicle is single-writer: mutation needs `&mut self`, so no hook,
/// comparator or other observer can see `current` and `past` mid-update.
/// Callers sharing one across threads wrap the whole value in a lock.
pub struct Chronicle<T, P: ?Sized = T> {
    id: ChronicleId,
    current: T,
    past: VecDeque<T>,
    isolation: Isolation,
    comparator: Comparator<T, P>,
    on_append: Option<AppendHook<T>>,
    timers: TimerRegistry,
}

impl<T: Snapshot + PartialEq + 'static> Chronicle<T, T> {
    /// Create a chronicle with default options: `PartialEq` membership, no
    /// append hook, snapshot isolation.
    pub fn new(initial: T) -> Self {
        Self::from_options(initial, ChronicleOptions::default())
    }
}

impl<T: Snapshot, P: ?Sized> Chronicle<T, P> {
    /// Create a chronicle and run the append hook, if any, with the initial
    /// value.
    ///
    /// Construction completes only once the hook returns; a failing hook
    /// fails construction with [`HistoryError::Hook`].
    pub fn with_options(initial: T, options: ChronicleOptions<T, P>) -> Result<Self> {
        let mut chronicle = Self::from_options(initial, options);
        chronicle.notify()?;
        Ok(chronicle)
    }

    fn from_options(initial: T, options: ChronicleOptions<T, P>) -> Self {
        let isolation = options.config.isolation;
        let chronicle = Self {
            id: ChronicleId::new(),
            current: isolation.intake(initial),
            past: VecDeque::new(),
            isolation,
            comparator: options.comparator,
            on_append: options.on_append,
            timers: TimerRegistry::new(),
        };
        debug!(chronicle = %chronicle.id, ?isolation, "chronicle created");
        chronicle
    }

    /// Install `event` as the current value, moving the previous current
    /// value to the front of the past, then run the append hook.
    ///
    /// The history is updated before the hook runs. If the hook fails, the
    /// error is returned but the append stands.
    pub fn append(&mut self, event: T) -> Result<()> {
        let incoming = self.isolation.intake(event);
        // The outgoing value goes to the head of `past` in the same step that
        // replaces `current`; nothing observes the chronicle in between.
        let outgoing = std::mem::replace(&mut self.current, incoming);
        self.past.push_front(outgoing);
        debug!(chronicle = %self.id, past = self.past.len(), "event appended");

        self.notify()
    }

    /// [`append`](Self::append), then run `callback` with the new value.
    ///
    /// The callback is skipped when the instance hook fails.
    pub fn append_with<F>(&mut self, event: T, callback: F) -> Result<()>
    where
        F: FnOnce(&T, &ChronicleId) -> HookResult,
    {
        self.append(event)?;

        let appended = self.isolation.emit(&self.current);
        callback(&appended, &self.id).map_err(|source| {
            warn!(chronicle = %self.id, error = %source, "append callback failed");
            HistoryError::LocalHook {
                id: self.id.clone(),
                source,
            }
        })
    }

    fn notify(&mut self) -> Result<()> {
        let Some(hook) = self.on_append.as_mut() else {
            return Ok(());
        };
        let appended = self.isolation.emit(&self.current);
        hook(&appended, &self.id).map_err(|source| {
            warn!(chronicle = %self.id, error = %source, "append hook failed");
            HistoryError::Hook {
                id: self.id.clone(),
                source,
            }
        })
    }

    /// Copy of the current value.
    pub fn current_event(&self) -> T {
        self.isolation.emit(&self.current)
    }

    /// Copies of the past values, newest first.
    pub fn past_events(&self) -> Vec<T> {
        self.past.iter().map(|e| self.isolation.emit(e)).collect()
    }

    /// Copies of the full history, newest first.
    pub fn all_events(&self) -> Vec<T> {
        self.iter().map(|e| self.isolation.emit(e)).collect()
    }

    /// Whether the comparator matches any value in the full history.
    pub fn includes(&self, probe: &P) -> bool {
        self.iter().any(|stored| (self.comparator)(stored, probe))
    }

    /// Replace every value in the history with `mapper(value)`, keeping
    /// order, and return copies of the new history.
    pub fn transform_all<F>(&mut self, mut mapper: F) -> Vec<T>
    where
        F: FnMut(T) -> T,
    {
        match self.try_transform_all(|event| Ok::<T, Infallible>(mapper(event))) {
            Ok(events) => events,
            Err(never) => match never {},
        }
    }

    /// Fallible [`transform_all`](Self::transform_all).
    ///
    /// The whole history is mapped before anything is stored. When `mapper`
    /// fails (or panics) on any value, the history is left exactly as it
    /// was and the mapper's error is returned unchanged.
    pub fn try_transform_all<E, F>(&mut self, mut mapper: F) -> std::result::Result<Vec<T>, E>
    where
        F: FnMut(T) -> std::result::Result<T, E>,
    {
        let isolation = self.isolation;
        let transformed = self
            .iter()
            .map(|event| mapper(isolation.emit(event)))
            .collect::<std::result::Result<Vec<T>, E>>()?;

        let copies = transformed.iter().map(|e| isolation.emit(e)).collect();
        let mut events: VecDeque<T> = transformed
            .into_iter()
            .map(|e| isolation.intake(e))
            .collect();
        if let Some(current) = events.pop_front() {
            self.current = current;
            self.past = events;
        }
        debug!(chronicle = %self.id, events = self.len(), "history transformed");

        Ok(copies)
    }

    /// Identifier generated at construction.
    pub fn id(&self) -> &ChronicleId {
        &self.id
    }

    pub fn isolation(&self) -> Isolation {
        self.isolation
    }

    /// Borrow the current value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Borrow the past values, newest first.
    pub fn past(&self) -> vec_deque::Iter<'_, T> {
        self.past.iter()
    }

    /// Borrow the full history, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        std::iter::once(&self.current).chain(self.past.iter())
    }

    /// Number of values in the full history; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.past.len()
    }

    /// Consume the chronicle, returning the full history newest first.
    pub fn into_events(self) -> Vec<T> {
        std::iter::once(self.current).chain(self.past).collect()
    }

    // ---- Timers ----

    pub fn timer_start(&mut self, label: &str) {
        self.timers.start(label);
    }

    pub fn timer_log(&self, label: &str, info: impl fmt::Display) -> Option<Duration> {
        self.timers.log(label, info)
    }

    pub fn timer_end(&mut self, label: &str) -> Option<Duration> {
        self.timers.end(label)
    }
}

impl<T: fmt::Debug, P: ?Sized> fmt::Debug for Chronicle<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chronicle")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("past", &self.past.len())
            .field("isolation", &self.isolation)
            .finish_non_exhaustive()
    }
}
