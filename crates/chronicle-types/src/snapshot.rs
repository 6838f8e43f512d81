use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// Explicit deep copy.
///
/// For plain data `snapshot` is the same as `clone`, which is what the
/// default method does; implement the trait with an empty body for such
/// types:
///
/// ```
/// use chronicle_types::Snapshot;
///
/// #[derive(Clone)]
/// struct Reading {
///     sensor: String,
///     celsius: f64,
/// }
///
/// impl Snapshot for Reading {}
/// ```
///
/// Shared-ownership wrappers override it so the copy owns a fresh
/// allocation: snapshotting an `Rc<RefCell<T>>` yields a new cell that no
/// longer observes writes through the original. Function pointers and other
/// opaque handles cannot be deep-copied meaningfully and have no impl.
pub trait Snapshot: Clone {
    /// Return a copy that shares no mutable state with `self`.
    fn snapshot(&self) -> Self {
        self.clone()
    }
}

macro_rules! snapshot_by_clone {
    ($($ty:ty),* $(,)?) => {
        $(impl Snapshot for $ty {})*
    };
}

snapshot_by_clone!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
    std::time::Duration,
    std::time::SystemTime,
    std::path::PathBuf,
    serde_json::Value,
    crate::id::ChronicleId,
);

impl<T: Snapshot> Snapshot for Option<T> {
    fn snapshot(&self) -> Self {
        self.as_ref().map(Snapshot::snapshot)
    }
}

impl<T: Snapshot> Snapshot for Box<T> {
    fn snapshot(&self) -> Self {
        Box::new((**self).snapshot())
    }
}

impl<T: Snapshot> Snapshot for Rc<T> {
    fn snapshot(&self) -> Self {
        Rc::new((**self).snapshot())
    }
}

impl<T: Snapshot> Snapshot for Arc<T> {
    fn snapshot(&self) -> Self {
        Arc::new((**self).snapshot())
    }
}

impl<T: Snapshot> Snapshot for RefCell<T> {
    fn snapshot(&self) -> Self {
        RefCell::new(self.borrow().snapshot())
    }
}

impl<T: Copy> Snapshot for Cell<T> {}

impl<T: Snapshot> Snapshot for Vec<T> {
    fn snapshot(&self) -> Self {
        self.iter().map(Snapshot::snapshot).collect()
    }
}

impl<T: Snapshot> Snapshot for VecDeque<T> {
    fn snapshot(&self) -> Self {
        self.iter().map(Snapshot::snapshot).collect()
    }
}

impl<T: Snapshot, const N: usize> Snapshot for [T; N] {
    fn snapshot(&self) -> Self {
        std::array::from_fn(|i| self[i].snapshot())
    }
}

impl<K: Snapshot + Ord, V: Snapshot> Snapshot for BTreeMap<K, V> {
    fn snapshot(&self) -> Self {
        self.iter().map(|(k, v)| (k.snapshot(), v.snapshot())).collect()
    }
}

impl<T: Snapshot + Ord> Snapshot for BTreeSet<T> {
    fn snapshot(&self) -> Self {
        self.iter().map(Snapshot::snapshot).collect()
    }
}

impl<K: Snapshot + Eq + Hash, V: Snapshot> Snapshot for HashMap<K, V> {
    fn snapshot(&self) -> Self {
        self.iter().map(|(k, v)| (k.snapshot(), v.snapshot())).collect()
    }
}

impl<T: Snapshot + Eq + Hash> Snapshot for HashSet<T> {
    fn snapshot(&self) -> Self {
        self.iter().map(Snapshot::snapshot).collect()
    }
}

macro_rules! snapshot_tuple {
    ($($name:ident),+) => {
        impl<$($name: Snapshot),+> Snapshot for ($($name,)+) {
            #[allow(non_snake_case)]
            fn snapshot(&self) -> Self {
                let ($($name,)+) = self;
                ($($name.snapshot(),)+)
            }
        }
    };
}

snapshot_tuple!(A);
snapshot_tuple!(A, B);
snapshot_tuple!(A, B, C);
snapshot_tuple!(A, B, C, D);
