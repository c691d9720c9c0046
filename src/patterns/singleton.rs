//! # Singleton container.
//!
//! [`Singletons`] enforces one instance per type inside an explicit container.
//! There is no global default: create a container where the scope starts and
//! pass it (or an `Arc` of it) to whoever needs the instances.
//!
//! ## Rules
//! - The initializer of a type runs at most once per container.
//! - Every lookup of a type returns the same `Arc`.
//! - Containers are independent of each other.
//! - An initializer may request other types from the same container.
//!
//! ```rust
//! use std::sync::Arc;
//! use patternkit::Singletons;
//!
//! #[derive(Default)]
//! struct ObjectDict(std::sync::Mutex<Vec<&'static str>>);
//!
//! let scope = Singletons::new();
//! let first = scope.get_or_init(ObjectDict::default);
//! first.0.lock().unwrap().push("a");
//! let second = scope.get_or_init(ObjectDict::default);
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(*second.0.lock().unwrap(), vec!["a"]);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type Instance = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceLock<Instance>>;

/// Thread-safe container holding at most one instance per type.
///
/// Each type owns its own once-cell; the map lock only guards slot lookup, so
/// an initializer may request other singletons from the same container.
#[derive(Default)]
pub struct Singletons {
    slots: RwLock<HashMap<TypeId, Slot>>,
}

impl Singletons {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the instance of `T`, creating it with `init` if absent.
    ///
    /// Concurrent callers for the same type observe a single construction.
    /// An `init` that requests `T` itself never completes.
    pub fn get_or_init<T, F>(&self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let slot = self.slot::<T>();
        let instance = slot.get_or_init(|| {
            tracing::debug!(singleton = std::any::type_name::<T>(), "singleton created");
            let instance: Instance = Arc::new(init());
            instance
        });
        downcast::<T>(Arc::clone(instance))
    }

    /// Returns the instance of `T`, if created.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let slot = self.read_slot(TypeId::of::<T>())?;
        slot.get().cloned().map(downcast::<T>)
    }

    /// True if an instance of `T` exists.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.read_slot(TypeId::of::<T>())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of types with an instance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// True if no instance exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_slot(&self, id: TypeId) -> Option<Slot> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Finds or inserts the slot of `T`; the map lock is released on return.
    fn slot<T: Any>(&self) -> Slot {
        let id = TypeId::of::<T>();
        if let Some(slot) = self.read_slot(id) {
            return slot;
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id).or_default())
    }
}

/// Entries are keyed by `TypeId::of::<T>()`, so the cast cannot fail.
fn downcast<T: Any + Send + Sync>(instance: Instance) -> Arc<T> {
    match instance.downcast::<T>() {
        Ok(typed) => typed,
        Err(_) => unreachable!("singleton stored under a foreign TypeId"),
    }
}

impl fmt::Debug for Singletons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Singletons")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Config(u32);

    #[test]
    fn init_runs_once() {
        let calls = AtomicUsize::new(0);
        let scope = Singletons::new();
        for _ in 0..3 {
            let cfg = scope.get_or_init(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Config(7)
            });
            assert_eq!(cfg.0, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn containers_are_isolated() {
        let a = Singletons::new();
        let b = Singletons::new();
        a.get_or_init(|| Config(1));
        assert!(a.contains::<Config>());
        assert!(!b.contains::<Config>());
        assert!(b.get::<Config>().is_none());
        assert_eq!(b.get_or_init(|| Config(2)).0, 2);
        assert_eq!(a.get::<Config>().map(|c| c.0), Some(1));
    }

    #[test]
    fn shared_across_threads() {
        let scope = Arc::new(Singletons::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let scope = Arc::clone(&scope);
                std::thread::spawn(move || scope.get_or_init(|| Config(i)).0)
            })
            .collect();
        let seen: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(seen.windows(2).all(|w| w[0] == w[1]));
    }

    struct Pool(u32);
    struct Service(Arc<Config>, Arc<Pool>);

    #[test]
    fn initializer_can_request_other_singletons() {
        let scope = Arc::new(Singletons::new());
        let (tx, rx) = std::sync::mpsc::channel();
        let worker = Arc::clone(&scope);
        std::thread::spawn(move || {
            let service = worker.get_or_init(|| {
                Service(
                    worker.get_or_init(|| Config(3)),
                    worker.get_or_init(|| Pool(8)),
                )
            });
            let _ = tx.send(service.0 .0 + service.1 .0);
        });

        let total = rx
            .recv_timeout(std::time::Duration::from_secs(3))
            .expect("nested initialization finished");
        assert_eq!(total, 11);
        assert_eq!(scope.len(), 3);
        assert!(Arc::ptr_eq(
            &scope.get::<Config>().unwrap(),
            &scope.get_or_init(|| Config(0))
        ));
    }

    #[test]
    fn unfinished_slot_is_not_counted() {
        let scope = Singletons::new();
        let _ = scope.slot::<Config>();
        assert!(!scope.contains::<Config>());
        assert!(scope.get::<Config>().is_none());
        assert!(scope.is_empty());
    }
}
