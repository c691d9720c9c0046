//! # Delegation proxy.
//!
//! [`Proxy`] wraps a value and exposes it through `Deref`, so it can stand in
//! wherever the proxied value is used by reference. [`Intercept`] adds a call
//! operation that runs user logic around the proxied value.
//!
//! ```rust
//! use patternkit::Proxy;
//!
//! fn plus_one(x: i32) -> i32 { x + 1 }
//!
//! let plus_ten = Proxy::intercept(plus_one as fn(i32) -> i32, |inner: &fn(i32) -> i32, x: i32| inner(x + 10));
//! assert_eq!(plus_ten.call(2), 13);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

/// Transparent wrapper delegating to the proxied value.
///
/// `Display` and `Hash` are forwarded to the proxied value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Proxy<T> {
    subject: T,
}

impl<T> Proxy<T> {
    /// Wraps `subject`.
    pub fn new(subject: T) -> Self {
        Self { subject }
    }

    /// Wraps `subject` together with an interceptor.
    pub fn intercept<F>(subject: T, f: F) -> Intercept<T, F> {
        Intercept {
            proxy: Self::new(subject),
            f,
        }
    }

    /// Proxied value.
    pub fn proxied(&self) -> &T {
        &self.subject
    }

    /// Unwraps the proxied value.
    pub fn into_inner(self) -> T {
        self.subject
    }
}

impl<T> Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.subject
    }
}

impl<T> DerefMut for Proxy<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.subject
    }
}

impl<T: fmt::Display> fmt::Display for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.subject.fmt(f)
    }
}

impl<T: Hash> Hash for Proxy<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
    }
}

/// Proxy whose [`call`](Intercept::call) runs an interceptor with the proxied value.
pub struct Intercept<T, F> {
    proxy: Proxy<T>,
    f: F,
}

impl<T, F> Intercept<T, F> {
    /// Runs the interceptor with the proxied value and `input`.
    pub fn call<X, R>(&self, input: X) -> R
    where
        F: Fn(&T, X) -> R,
    {
        (self.f)(&self.proxy.subject, input)
    }

    /// Drops the interceptor, keeping the plain proxy.
    pub fn into_proxy(self) -> Proxy<T> {
        self.proxy
    }
}

impl<T, F> Deref for Intercept<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.proxy.subject
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Intercept<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intercept")
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}
