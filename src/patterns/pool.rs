//! # Object pool keyed by constructor arguments.
//!
//! [`ObjectPool`] memoizes construction: the first request for a set of
//! arguments builds an object, every later request with equal arguments gets
//! the same shared instance back.
//!
//! ```rust
//! use std::sync::Arc;
//! use patternkit::ObjectPool;
//!
//! let mut pool = ObjectPool::new(|&(a, b): &(i32, i32)| a * 10 + b);
//! let first = pool.get_object(&(1, 2));
//! let other = pool.get_object(&(1, 3));
//! let again = pool.get_object(&(1, 2));
//!
//! assert!(Arc::ptr_eq(&first, &again));
//! assert_eq!(*other, 13);
//! assert_eq!(pool.len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

type Ctor<A, T> = Box<dyn Fn(&A) -> T + Send + Sync>;
type KeyFn<A, K> = Box<dyn Fn(&A) -> K + Send + Sync>;

/// Cache of objects built from runtime arguments.
///
/// - `A`: constructor arguments
/// - `T`: pooled object
/// - `K`: lookup key derived from `A` (defaults to `A` itself)
pub struct ObjectPool<A, T, K = A> {
    ctor: Ctor<A, T>,
    key: KeyFn<A, K>,
    objects: HashMap<K, Arc<T>>,
}

impl<A, T> ObjectPool<A, T, A>
where
    A: Clone + Hash + Eq + 'static,
{
    /// Creates a pool keyed by the arguments themselves.
    pub fn new<F>(ctor: F) -> Self
    where
        F: Fn(&A) -> T + Send + Sync + 'static,
    {
        Self::with_key(ctor, A::clone)
    }
}

impl<A, T, K> ObjectPool<A, T, K>
where
    K: Hash + Eq,
{
    /// Creates a pool with a custom key computation.
    ///
    /// Arguments mapping to the same key share one object.
    pub fn with_key<F, G>(ctor: F, key: G) -> Self
    where
        F: Fn(&A) -> T + Send + Sync + 'static,
        G: Fn(&A) -> K + Send + Sync + 'static,
    {
        Self {
            ctor: Box::new(ctor),
            key: Box::new(key),
            objects: HashMap::new(),
        }
    }

    /// Returns the pooled object for `args`, constructing it on first request.
    pub fn get_object(&mut self, args: &A) -> Arc<T> {
        let key = (self.key)(args);
        let ctor = &self.ctor;
        let object = self.objects.entry(key).or_insert_with(|| {
            tracing::trace!("object pool miss");
            Arc::new(ctor(args))
        });
        Arc::clone(object)
    }

    /// True if an object for `args` is already pooled.
    #[must_use]
    pub fn contains(&self, args: &A) -> bool {
        self.objects.contains_key(&(self.key)(args))
    }

    /// Number of pooled objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if nothing is pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drops every pooled object; outstanding `Arc`s stay valid.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl<A, T, K> fmt::Debug for ObjectPool<A, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("len", &self.objects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn constructs_once_per_key() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let mut pool = ObjectPool::new(move |name: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            name.to_uppercase()
        });

        let a = pool.get_object(&"a".to_string());
        let b = pool.get_object(&"b".to_string());
        let a2 = pool.get_object(&"a".to_string());

        assert!(Arc::ptr_eq(&a, &a2));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert!(pool.contains(&"a".to_string()));
    }

    #[test]
    fn custom_key_merges_arguments() {
        let mut pool: ObjectPool<(u8, &'static str), String, u8> =
            ObjectPool::with_key(
                |v: &(u8, &'static str)| v.1.to_string(),
                |v: &(u8, &'static str)| v.0,
            );
        let first = pool.get_object(&(1, "first"));
        let second = pool.get_object(&(1, "second"));
        assert_eq!(*second, "first");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clear_keeps_handed_out_objects() {
        let mut pool = ObjectPool::new(|n: &u32| n * 2);
        let kept = pool.get_object(&4);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(*kept, 8);
        assert!(!Arc::ptr_eq(&kept, &pool.get_object(&4)));
    }
}
