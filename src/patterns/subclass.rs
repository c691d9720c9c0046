//! # Subclass registry: late-bound construction by identifier.
//!
//! [`SubclassRegistry`] maps string identifiers to constructors producing a
//! common type (typically `Box<dyn Trait>`), so callers can build an
//! implementation chosen at runtime.
//!
//! ## Rules
//! - Registering an existing identifier replaces its constructor.
//! - Unknown identifiers fail with [`RegistryError::UnknownIdentifier`], listing
//!   the known ones.
//! - Constructor failures are wrapped in [`RegistryError::Instantiation`].
//!
//! ```rust
//! use patternkit::SubclassRegistry;
//!
//! trait Shape { fn sides(&self) -> u32; }
//! struct Triangle;
//! impl Shape for Triangle { fn sides(&self) -> u32 { 3 } }
//!
//! let mut shapes: SubclassRegistry<Box<dyn Shape>> = SubclassRegistry::new();
//! shapes.register("triangle", |()| Ok(Box::new(Triangle) as Box<dyn Shape>));
//!
//! assert_eq!(shapes.create("triangle", ()).unwrap().sides(), 3);
//! assert!(shapes.create("square", ()).is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RegistryError;

type Ctor<T, A> = Box<dyn Fn(A) -> anyhow::Result<T> + Send + Sync>;

/// Identifier → constructor registry.
///
/// - `T`: constructed type
/// - `A`: constructor arguments (defaults to `()`)
pub struct SubclassRegistry<T, A = ()> {
    ctors: BTreeMap<String, Ctor<T, A>>,
}

impl<T, A> Default for SubclassRegistry<T, A> {
    fn default() -> Self {
        Self {
            ctors: BTreeMap::new(),
        }
    }
}

impl<T, A> SubclassRegistry<T, A> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `ctor` under `identifier`, replacing any previous one.
    pub fn register<F>(&mut self, identifier: impl Into<String>, ctor: F) -> &mut Self
    where
        F: Fn(A) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        tracing::debug!(identifier = %identifier, "constructor registered");
        self.ctors.insert(identifier, Box::new(ctor));
        self
    }

    /// Constructs the instance registered under `identifier`.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownIdentifier`] if nothing is registered under it.
    /// - [`RegistryError::Instantiation`] if the constructor fails.
    pub fn create(&self, identifier: &str, args: A) -> Result<T, RegistryError> {
        let ctor = self
            .ctors
            .get(identifier)
            .ok_or_else(|| RegistryError::UnknownIdentifier {
                requested: identifier.to_owned(),
                known: self.ctors.keys().cloned().collect(),
            })?;
        ctor(args).map_err(|source| RegistryError::Instantiation {
            identifier: identifier.to_owned(),
            source,
        })
    }

    /// True if `identifier` is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.ctors.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.ctors.keys().map(String::as_str)
    }

    /// Number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }
}

impl<T, A> fmt::Debug for SubclassRegistry<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubclassRegistry")
            .field("identifiers", &self.ctors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Animal {
        fn speak(&self) -> String;
    }

    struct Dog(String);

    impl Animal for Dog {
        fn speak(&self) -> String {
            format!("{} says woof", self.0)
        }
    }

    struct Cat;

    impl Animal for Cat {
        fn speak(&self) -> String {
            "meow".into()
        }
    }

    fn animals() -> SubclassRegistry<Box<dyn Animal>, String> {
        let mut reg = SubclassRegistry::new();
        reg.register("dog", |name: String| Ok(Box::new(Dog(name)) as Box<dyn Animal>))
            .register("cat", |_| Ok(Box::new(Cat) as Box<dyn Animal>));
        reg
    }

    #[test]
    fn creates_registered_variant() {
        let reg = animals();
        let dog = reg.create("dog", "rex".into()).unwrap();
        assert_eq!(dog.speak(), "rex says woof");
        assert_eq!(reg.identifiers().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn unknown_identifier_lists_known() {
        let err = animals().create("cow", String::new()).err().unwrap();
        match err {
            RegistryError::UnknownIdentifier { requested, known } => {
                assert_eq!(requested, "cow");
                assert_eq!(known, vec!["cat".to_string(), "dog".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn collision_replaces_constructor() {
        let mut reg = animals();
        reg.register("cat", |name: String| Ok(Box::new(Dog(name)) as Box<dyn Animal>));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.create("cat", "tom".into()).unwrap().speak(), "tom says woof");
    }

    #[test]
    fn constructor_failure_is_wrapped() {
        let mut reg: SubclassRegistry<u32, &str> = SubclassRegistry::new();
        reg.register("parsed", |raw| Ok(raw.parse::<u32>()?));

        assert_eq!(reg.create("parsed", "12").unwrap(), 12);
        let err = reg.create("parsed", "x").unwrap_err();
        assert_eq!(err.as_label(), "registry_instantiation");
        assert!(matches!(err, RegistryError::Instantiation { ref identifier, .. } if identifier == "parsed"));
    }
}
