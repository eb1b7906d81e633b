use std::fmt;
use std::ops::{Deref, DerefMut};

/// Handle to the message a wrapper views.
///
/// Wrappers created with `new()` own a fresh node; wrappers created with
/// `from_orig()` borrow a node that lives inside a larger tree, so writes through
/// them are visible to every later view of that node.
pub enum Orig<'a, T> {
    Owned(Box<T>),
    Borrowed(&'a mut T),
}

impl<T> Orig<'_, T> {
    pub fn is_owned(&self) -> bool {
        matches!(self, Orig::Owned(_))
    }
}

impl<T: Default> Default for Orig<'_, T> {
    fn default() -> Self {
        Orig::Owned(Box::default())
    }
}

impl<T> Deref for Orig<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Orig::Owned(b) => b,
            Orig::Borrowed(r) => r,
        }
    }
}

impl<T> DerefMut for Orig<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            Orig::Owned(b) => b,
            Orig::Borrowed(r) => r,
        }
    }
}

/// Compares the viewed messages, regardless of ownership.
impl<T: PartialEq> PartialEq<Orig<'_, T>> for Orig<'_, T> {
    fn eq(&self, other: &Orig<'_, T>) -> bool {
        **self == **other
    }
}

impl<T: fmt::Debug> fmt::Debug for Orig<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}
