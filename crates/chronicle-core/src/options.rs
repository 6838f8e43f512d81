use std::fmt;

use chronicle_types::{ChronicleId, Isolation};

use crate::config::ChronicleConfig;

/// Error type returned by caller-supplied hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by caller-supplied hooks.
pub type HookResult = Result<(), HookError>;

/// Instance-level hook run with each newly installed value and the
/// chronicle's identifier: once at construction, once per append.
pub type AppendHook<T> = Box<dyn FnMut(&T, &ChronicleId) -> HookResult + Send + Sync>;

/// Membership predicate: `(stored value, probe) -> matches`.
pub type Comparator<T, P> = Box<dyn Fn(&T, &P) -> bool + Send + Sync>;

/// Construction options for a [`Chronicle`](crate::Chronicle).
///
/// `P` is the probe type accepted by `includes`. The default options compare
/// probes of the stored type with `PartialEq`; [`ChronicleOptions::comparator`]
/// switches to any other probe type.
pub struct ChronicleOptions<T, P: ?Sized = T> {
    pub(crate) config: ChronicleConfig,
    pub(crate) comparator: Comparator<T, P>,
    pub(crate) on_append: Option<AppendHook<T>>,
}

impl<T: PartialEq + 'static> Default for ChronicleOptions<T, T> {
    fn default() -> Self {
        Self::with_comparator(|stored: &T, probe: &T| stored == probe)
    }
}

impl<T: PartialEq + 'static> ChronicleOptions<T, T> {
    /// Default options: `PartialEq` membership, no hook, snapshot isolation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: 'static, P: ?Sized + 'static> ChronicleOptions<T, P> {
    /// Options for stored types without a usable `PartialEq`, or for probes
    /// of a different type.
    pub fn with_comparator<F>(comparator: F) -> Self
    where
        F: Fn(&T, &P) -> bool + Send + Sync + 'static,
    {
        Self {
            config: ChronicleConfig::default(),
            comparator: Box::new(comparator),
            on_append: None,
        }
    }

    /// Replace the membership comparator, changing the probe type.
    pub fn comparator<Q: ?Sized, F>(self, comparator: F) -> ChronicleOptions<T, Q>
    where
        F: Fn(&T, &Q) -> bool + Send + Sync + 'static,
    {
        ChronicleOptions {
            config: self.config,
            comparator: Box::new(comparator),
            on_append: self.on_append,
        }
    }

    /// Install the instance-level append hook.
    pub fn on_append<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T, &ChronicleId) -> HookResult + Send + Sync + 'static,
    {
        self.on_append = Some(Box::new(hook));
        self
    }

    pub fn isolation(mut self, isolation: Isolation) -> Self {
        self.config.isolation = isolation;
        self
    }

    pub fn config(mut self, config: ChronicleConfig) -> Self {
        self.config = config;
        self
    }
}

impl<T, P: ?Sized> fmt::Debug for ChronicleOptions<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChronicleOptions")
            .field("config", &self.config)
            .field("on_append", &self.on_append.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_partial_eq() {
        let opts = ChronicleOptions::<String>::default();
        assert!((opts.comparator)(&"a".to_string(), &"a".to_string()));
        assert!(!(opts.comparator)(&"a".to_string(), &"b".to_string()));
        assert!(opts.on_append.is_none());
        assert_eq!(opts.config.isolation, Isolation::Snapshot);
    }

    #[test]
    fn comparator_changes_probe_type() {
        let opts = ChronicleOptions::<(u32, String)>::new()
            .comparator(|stored: &(u32, String), probe: &u32| stored.0 == *probe);
        assert!((opts.comparator)(&(7, "x".into()), &7));
        assert!(!(opts.comparator)(&(7, "x".into()), &8));
    }

    #[test]
    fn unsized_probe_types_are_supported() {
        let opts = ChronicleOptions::<String>::new()
            .comparator(|stored: &String, probe: &str| stored.eq_ignore_ascii_case(probe));
        assert!((opts.comparator)(&"Alpha".to_string(), "ALPHA"));
    }

    #[test]
    fn builder_keeps_hook_and_config_across_comparator_swap() {
        let opts = ChronicleOptions::<u32>::new()
            .on_append(|_, _| Ok(()))
            .isolation(Isolation::Shared)
            .comparator(|stored: &u32, probe: &i64| i64::from(*stored) == *probe);
        assert!(opts.on_append.is_some());
        assert_eq!(opts.config.isolation, Isolation::Shared);
    }

    #[test]
    fn debug_reports_hook_presence() {
        let opts = ChronicleOptions::<u8>::new().on_append(|_, _| Ok(()));
        let rendered = format!("{opts:?}");
        assert!(rendered.contains("on_append: true"));
    }
}
