//! Reference-counted handle used for every heap-carrying `Expr` payload.
//!
//! All of `Expr`'s non-atomic payloads (string contents, argument lists,
//! error bodies) go through `Shared<T>` so that rewriting never deep-copies
//! a subexpression — cloning an `Expr` is always an `Arc` bump. This mirrors
//! `ori_patterns::value`'s `Heap<T>` wrapper, simplified to a
//! single-threaded-friendly but still `Send + Sync` `Arc`.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Thin wrapper around `Arc<T>`.
///
/// Exists mainly to give `Expr`'s variants a short, consistent name for
/// "shared, immutable payload" and to keep construction going through one
/// place if the representation ever needs to change.
#[derive(Clone)]
#[repr(transparent)]
pub struct Shared<T: ?Sized>(Arc<T>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Arc::new(value))
    }
}

impl<T: ?Sized> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: PartialEq + ?Sized> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl From<Vec<super::Expr>> for Shared<[super::Expr]> {
    fn from(items: Vec<super::Expr>) -> Self {
        Shared(Arc::from(items))
    }
}

impl From<String> for Shared<str> {
    fn from(s: String) -> Self {
        Shared(Arc::from(s))
    }
}

impl From<&str> for Shared<str> {
    fn from(s: &str) -> Self {
        Shared(Arc::from(s))
    }
}
