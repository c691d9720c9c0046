//! # Candidates, the capability check and resolved observer handles.
//!
//! A [`Candidate`] is an observer shape offered to a subject but not yet accepted.
//! [`is_observer`] decides whether it exposes a callable [`UPDATE`] operation.
//! Accepted candidates become [`Observer`]s: the uniform handle stored by the
//! registry, resolved once so dispatch never repeats the lookup.
//!
//! ## Rules
//! - Trait shapes and closures are always compatible.
//! - A [`Record`] is compatible only if its `update` member is a method; a data
//!   field named `update` does not count.
//! - Identity ([`ObserverKey`]) is the address of the shared handle, or the
//!   `TypeId` for type-level observers.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::observer::{Observe, ObserveAsync, ObserveStatic};
use super::record::Record;
use crate::error::DispatchError;
use crate::subject::Subject;

/// Name of the capability every observer must expose.
pub const UPDATE: &str = "update";

/// Shared synchronous `update` callable.
pub type UpdateFn<S> = Arc<dyn Fn(&Subject<S>) -> anyhow::Result<()> + Send + Sync>;

/// Resolved `update` capability.
pub(crate) enum Handler<S> {
    Sync(UpdateFn<S>),
    Async(Arc<dyn ObserveAsync<S>>),
}

impl<S> Clone for Handler<S> {
    fn clone(&self) -> Self {
        match self {
            Handler::Sync(f) => Handler::Sync(Arc::clone(f)),
            Handler::Async(o) => Handler::Async(Arc::clone(o)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Identity {
    Ptr(usize),
    Type(TypeId),
}

/// Identity of an observer, used by [`Subject::detach`].
///
/// Two keys are equal when they refer to the same shared allocation (instances,
/// closures, records) or to the same type (type-level observers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverKey(Identity);

impl ObserverKey {
    /// Key of a shared handle, by address.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use patternkit::ObserverKey;
    ///
    /// let a = Arc::new(1u8);
    /// let b = Arc::new(1u8);
    /// assert_eq!(ObserverKey::of(&a), ObserverKey::of(&a.clone()));
    /// assert_ne!(ObserverKey::of(&a), ObserverKey::of(&b));
    /// ```
    pub fn of<T: ?Sized>(handle: &Arc<T>) -> Self {
        Self(Identity::Ptr(Arc::as_ptr(handle) as *const () as usize))
    }

    /// Key of a type-level observer.
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Self(Identity::Type(TypeId::of::<T>()))
    }
}

enum Shape<S> {
    Bound(Handler<S>),
    Record(Arc<Record<S>>),
}

impl<S> Clone for Shape<S> {
    fn clone(&self) -> Self {
        match self {
            Shape::Bound(h) => Shape::Bound(h.clone()),
            Shape::Record(r) => Shape::Record(Arc::clone(r)),
        }
    }
}

/// Observer shape offered to [`Subject::attach`] or [`Subject::add`].
pub struct Candidate<S> {
    key: ObserverKey,
    name: Cow<'static, str>,
    shape: Shape<S>,
}

impl<S> Clone for Candidate<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            name: self.name.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl<S> fmt::Debug for Candidate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("compatible", &self.is_observer())
            .finish()
    }
}

impl<S: Send + Sync + 'static> Candidate<S> {
    /// Instance with a synchronous `update`.
    pub fn instance<T: Observe<S>>(observer: Arc<T>) -> Self {
        let key = ObserverKey::of(&observer);
        let name = Cow::Borrowed(observer.name());
        let f: UpdateFn<S> = Arc::new(move |subject: &Subject<S>| observer.update(subject));
        Self {
            key,
            name,
            shape: Shape::Bound(Handler::Sync(f)),
        }
    }

    /// Instance with an asynchronous `update`.
    pub fn instance_async<T: ObserveAsync<S>>(observer: Arc<T>) -> Self {
        let key = ObserverKey::of(&observer);
        let name = Cow::Borrowed(observer.name());
        let observer: Arc<dyn ObserveAsync<S>> = observer;
        Self {
            key,
            name,
            shape: Shape::Bound(Handler::Async(observer)),
        }
    }

    /// Type-level observer; `T` itself is notified.
    pub fn of_type<T: ObserveStatic<S>>() -> Self {
        let f: UpdateFn<S> = Arc::new(|subject: &Subject<S>| T::update(subject));
        Self {
            key: ObserverKey::of_type::<T>(),
            name: Cow::Borrowed(T::name()),
            shape: Shape::Bound(Handler::Sync(f)),
        }
    }

    /// Plain callable. Its identity is the returned candidate's [`key`](Self::key).
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Subject<S>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let f: UpdateFn<S> = Arc::new(f);
        Self {
            key: ObserverKey::of(&f),
            name: name.into(),
            shape: Shape::Bound(Handler::Sync(f)),
        }
    }

    /// Structural record; compatible only if it has an `update` method.
    pub fn record(record: Arc<Record<S>>) -> Self {
        Self {
            key: ObserverKey::of(&record),
            name: Cow::Owned(record.name().to_owned()),
            shape: Shape::Record(record),
        }
    }
}

impl<S> Candidate<S> {
    /// Identity this candidate will have once attached.
    pub fn key(&self) -> ObserverKey {
        self.key
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability check; see [`is_observer`].
    pub fn is_observer(&self) -> bool {
        self.handler().is_some()
    }

    fn handler(&self) -> Option<Handler<S>> {
        match &self.shape {
            Shape::Bound(h) => Some(h.clone()),
            Shape::Record(r) => r.method(UPDATE).map(|f| Handler::Sync(Arc::clone(f))),
        }
    }

    /// Resolves the capability into an [`Observer`], or hands the candidate back.
    ///
    /// A record stays owned by the observer so its key cannot be reused by
    /// another allocation while subscribed.
    pub fn into_observer(self) -> Result<Observer<S>, Candidate<S>> {
        let Some(handler) = self.handler() else {
            return Err(self);
        };
        let record = match self.shape {
            Shape::Record(record) => Some(record),
            Shape::Bound(_) => None,
        };
        Ok(Observer {
            key: self.key,
            name: self.name,
            handler,
            record,
        })
    }
}

/// Returns `true` if `candidate` exposes a callable `update`.
///
/// Has no side effects and never fails.
pub fn is_observer<S>(candidate: &Candidate<S>) -> bool {
    candidate.is_observer()
}

/// Resolved observer stored by a subject.
pub struct Observer<S> {
    key: ObserverKey,
    name: Cow<'static, str>,
    handler: Handler<S>,
    record: Option<Arc<Record<S>>>,
}

impl<S> Clone for Observer<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            name: self.name.clone(),
            handler: self.handler.clone(),
            record: self.record.clone(),
        }
    }
}

impl<S> fmt::Debug for Observer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("async", &self.is_async())
            .finish()
    }
}

impl<S> Observer<S> {
    /// Identity of this observer.
    pub fn key(&self) -> ObserverKey {
        self.key
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structural record backing this observer, if it was attached as one.
    pub fn record(&self) -> Option<&Arc<Record<S>>> {
        self.record.as_ref()
    }

    /// True if `update` can only be driven asynchronously.
    pub fn is_async(&self) -> bool {
        matches!(self.handler, Handler::Async(_))
    }
}

impl<S: Send + Sync + 'static> Observer<S> {
    /// Invokes `update` synchronously.
    pub(crate) fn call(&self, subject: &Subject<S>) -> anyhow::Result<()> {
        match &self.handler {
            Handler::Sync(f) => f(subject),
            Handler::Async(_) => Err(DispatchError::AsyncOnly {
                observer: self.name.to_string(),
            }
            .into()),
        }
    }

    /// Builds the `update` future; a synchronous handler runs on first poll.
    pub(crate) fn call_async<'a>(
        &'a self,
        subject: &'a Subject<S>,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        match &self.handler {
            Handler::Sync(f) => Box::pin(async move { f(subject) }),
            Handler::Async(o) => o.update(subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Typed;

    impl Observe<()> for Typed {
        fn update(&self, _: &Subject<()>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Level;

    impl ObserveStatic<()> for Level {
        fn update(_: &Subject<()>) -> anyhow::Result<()> {
            Ok(())
        }
        fn name() -> &'static str {
            "level"
        }
    }

    #[test]
    fn trait_shapes_are_compatible() {
        assert!(is_observer(&Candidate::<()>::instance(Arc::new(Typed))));
        assert!(is_observer(&Candidate::<()>::of_type::<Level>()));
        assert!(is_observer(&Candidate::<()>::from_fn("f", |_| Ok(()))));
    }

    #[test]
    fn record_needs_update_method() {
        let with_method = Record::<()>::new("ok").with_method(UPDATE, |_| Ok(()));
        let with_field = Record::<()>::new("field").with_field(UPDATE, 7u32);
        let with_typo = Record::<()>::new("typo").with_method("update_with_typo", |_| Ok(()));

        assert!(is_observer(&Candidate::record(Arc::new(with_method))));
        assert!(!is_observer(&Candidate::record(Arc::new(with_field))));
        assert!(!is_observer(&Candidate::record(Arc::new(with_typo))));
    }

    #[test]
    fn keys_follow_identity() {
        let a = Arc::new(Typed);
        let first = Candidate::<()>::instance(Arc::clone(&a));
        let second = Candidate::<()>::instance(Arc::clone(&a));
        assert_eq!(first.key(), second.key());
        assert_eq!(first.key(), ObserverKey::of(&a));
        assert_ne!(first.key(), Candidate::<()>::instance(Arc::new(Typed)).key());

        let level = Candidate::<()>::of_type::<Level>();
        assert_eq!(level.key(), ObserverKey::of_type::<Level>());
        assert_eq!(level.name(), "level");
    }

    #[test]
    fn resolved_record_keeps_its_allocation() {
        let rec = Arc::new(Record::<()>::new("kept").with_method(UPDATE, |_| Ok(())));
        let key = ObserverKey::of(&rec);
        let observer = Candidate::record(Arc::clone(&rec)).into_observer().unwrap();
        drop(rec);

        let held = observer.record().unwrap();
        assert_eq!(ObserverKey::of(held), key);
        assert_eq!(held.name(), "kept");
        assert!(Candidate::<()>::from_fn("f", |_| Ok(()))
            .into_observer()
            .unwrap()
            .record()
            .is_none());
    }

    #[test]
    fn rejected_candidate_comes_back_intact() {
        let rec = Arc::new(Record::<()>::new("nope"));
        let key = ObserverKey::of(&rec);
        let back = Candidate::record(rec).into_observer().unwrap_err();
        assert_eq!(back.key(), key);
        assert_eq!(back.name(), "nope");
    }
}
