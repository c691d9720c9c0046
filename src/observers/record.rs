//! # Structural records
//!
//! A [`Record`] is a value assembled at runtime from named members, each either a
//! callable method or a data field. It stands in for duck-typed objects: whether
//! it can observe a subject depends only on what it carries under the name
//! `update`, not on any declared type.
//!
//! ```rust
//! use std::sync::Arc;
//! use patternkit::{Candidate, Record, Subject};
//!
//! let rec = Record::<()>::new("audit")
//!     .with_field("channel", "ops".to_string())
//!     .with_method("update", |_subject| Ok(()));
//!
//! assert_eq!(rec.field::<String>("channel").map(String::as_str), Some("ops"));
//! assert!(Candidate::record(Arc::new(rec)).is_observer());
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::candidate::UpdateFn;
use crate::subject::Subject;

/// One named member of a [`Record`].
pub enum Member<S> {
    /// Callable member.
    Method(UpdateFn<S>),
    /// Data member; never callable.
    Field(Arc<dyn Any + Send + Sync>),
}

impl<S> Member<S> {
    /// True for [`Member::Method`].
    pub fn is_callable(&self) -> bool {
        matches!(self, Member::Method(_))
    }
}

impl<S> fmt::Debug for Member<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Method(_) => f.write_str("Method"),
            Member::Field(_) => f.write_str("Field"),
        }
    }
}

/// Dynamically assembled value with named members.
///
/// Setting a member that already exists replaces it.
pub struct Record<S> {
    name: Cow<'static, str>,
    members: Vec<(Cow<'static, str>, Member<S>)>,
}

impl<S> fmt::Debug for Record<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish()
    }
}

impl<S> Record<S> {
    /// Creates an empty record.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Record name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a callable member.
    pub fn with_method<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Subject<S>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let f: UpdateFn<S> = Arc::new(f);
        self.with_member(name, Member::Method(f))
    }

    /// Sets a data member.
    pub fn with_field<T>(self, name: impl Into<Cow<'static, str>>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.with_member(name, Member::Field(Arc::new(value)))
    }

    /// Sets a member of either kind.
    pub fn with_member(mut self, name: impl Into<Cow<'static, str>>, member: Member<S>) -> Self {
        let name = name.into();
        match self.members.iter().position(|(n, _)| *n == name) {
            Some(i) => self.members[i].1 = member,
            None => self.members.push((name, member)),
        }
        self
    }

    /// Looks up a member by name.
    pub fn member(&self, name: &str) -> Option<&Member<S>> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    /// Looks up a callable member.
    pub fn method(&self, name: &str) -> Option<&UpdateFn<S>> {
        match self.member(name) {
            Some(Member::Method(f)) => Some(f),
            _ => None,
        }
    }

    /// Looks up a data member of type `T`.
    pub fn field<T: Any>(&self, name: &str) -> Option<&T> {
        match self.member(name) {
            Some(Member::Field(v)) => v.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Member names in insertion order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(n, _)| n.as_ref())
    }
}
