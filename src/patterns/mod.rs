//! # Small creational and structural helpers.
//!
//! - [`ObjectPool`] - memoized construction keyed by arguments
//! - [`Proxy`] / [`Intercept`] - delegation wrapper
//! - [`Singletons`] - one instance per type, in an explicit container
//! - [`SubclassRegistry`] - identifier → constructor lookup

mod pool;
mod proxy;
mod singleton;
mod subclass;

pub use pool::ObjectPool;
pub use proxy::{Intercept, Proxy};
pub use singleton::Singletons;
pub use subclass::SubclassRegistry;
