use super::{Orig, Wrap};

/// An ordered sequence of messages, viewed element by element.
///
/// Element wrappers are built on access from the underlying `Vec`; nothing is
/// cached, so a view never outlives the mutable borrow of the slice that made it.
#[derive(Debug)]
pub struct Slice<'a, T: Wrap> {
    orig: Orig<'a, Vec<T>>,
}

impl<T: Wrap> Slice<'static, T> {
    /// Creates an empty slice that owns its storage.
    pub fn new() -> Self {
        Slice {
            orig: Orig::default(),
        }
    }
}

impl<T: Wrap> Default for Slice<'static, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Wrap> Slice<'a, T> {
    pub fn from_orig(orig: &'a mut Vec<T>) -> Self {
        Slice {
            orig: Orig::Borrowed(orig),
        }
    }

    pub fn orig(&self) -> &[T] {
        &self.orig
    }

    pub fn len(&self) -> usize {
        self.orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig.is_empty()
    }

    /// Returns the element at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn at(&mut self, i: usize) -> T::View<'_> {
        T::wrap(&mut self.orig[i])
    }

    /// Makes room for at least `new_cap` elements in total without changing the length.
    pub fn ensure_capacity(&mut self, new_cap: usize) {
        let len = self.orig.len();
        self.orig.reserve(new_cap.saturating_sub(len));
    }

    /// Appends an empty element and returns a view over it.
    pub fn append_empty(&mut self) -> T::View<'_> {
        self.orig.push(T::default());
        let last = self.orig.len() - 1;
        T::wrap(&mut self.orig[last])
    }

    /// Moves every element to the end of `dest`, leaving this slice empty.
    pub fn move_and_append_to(&mut self, dest: &mut Slice<'_, T>) {
        if dest.orig.is_empty() {
            *dest.orig = std::mem::take(&mut *self.orig);
        } else {
            dest.orig.append(&mut self.orig);
        }
    }

    /// Overwrites `dest` with a deep copy of this slice.
    pub fn copy_to(&self, dest: &mut Slice<'_, T>) {
        Self::copy_orig(&mut dest.orig, &self.orig);
    }

    /// Removes every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.orig.clear();
    }

    /// Deep-copies `src` into `dest`. Elements already present in `dest` are
    /// overwritten in place; extra ones are dropped.
    pub fn copy_orig(dest: &mut Vec<T>, src: &[T]) {
        dest.truncate(src.len());
        let (overlap, rest) = src.split_at(dest.len());
        for (d, s) in dest.iter_mut().zip(overlap) {
            T::copy_orig(d, s);
        }
        dest.reserve(rest.len());
        for s in rest {
            let mut d = T::default();
            T::copy_orig(&mut d, s);
            dest.push(d);
        }
    }
}

impl<T: Wrap> PartialEq<Slice<'_, T>> for Slice<'_, T> {
    fn eq(&self, other: &Slice<'_, T>) -> bool {
        *self.orig == *other.orig
    }
}
