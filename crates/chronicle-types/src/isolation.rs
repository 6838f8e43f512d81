use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// How a chronicle shares values with its callers.
///
/// `Snapshot` is the default: every value entering storage and every value
/// handed back out is an independent deep copy made with
/// [`Snapshot::snapshot`]. `Shared` stores values as given and hands out
/// `Clone::clone` copies, which alias for shared-ownership types such as
/// `Rc<RefCell<_>>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Isolation {
    #[default]
    Snapshot,
    Shared,
}

impl Isolation {
    /// Returns `true` when values are deep-copied.
    pub fn is_isolated(self) -> bool {
        matches!(self, Self::Snapshot)
    }

    /// Prepare a caller-supplied value for storage.
    pub fn intake<T: Snapshot>(self, value: T) -> T {
        match self {
            Self::Snapshot => value.snapshot(),
            Self::Shared => value,
        }
    }

    /// Produce the copy handed to a caller for a stored value.
    pub fn emit<T: Snapshot>(self, value: &T) -> T {
        match self {
            Self::Snapshot => value.snapshot(),
            Self::Shared => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn default_is_snapshot() {
        assert_eq!(Isolation::default(), Isolation::Snapshot);
        assert!(Isolation::default().is_isolated());
        assert!(!Isolation::Shared.is_isolated());
    }

    #[test]
    fn snapshot_emit_detaches_shared_cells() {
        let stored = Rc::new(RefCell::new(vec![1, 2]));
        let out = Isolation::Snapshot.emit(&stored);
        out.borrow_mut().push(3);
        assert_eq!(*stored.borrow(), vec![1, 2]);
    }

    #[test]
    fn shared_emit_aliases_shared_cells() {
        let stored = Rc::new(RefCell::new(vec![1, 2]));
        let out = Isolation::Shared.emit(&stored);
        out.borrow_mut().push(3);
        assert_eq!(*stored.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_intake_detaches_from_caller() {
        let caller = Rc::new(RefCell::new(String::from("a")));
        let stored = Isolation::Snapshot.intake(Rc::clone(&caller));
        caller.borrow_mut().push('b');
        assert_eq!(*stored.borrow(), "a");
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Isolation::Shared).unwrap();
        assert_eq!(json, "\"shared\"");
        let parsed: Isolation = serde_json::from_str("\"snapshot\"").unwrap();
        assert_eq!(parsed, Isolation::Snapshot);
    }
}
