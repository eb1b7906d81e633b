use std::fmt::Debug;

/// Implemented by every message that has a generated wrapper.
///
/// Collections use it to build element views on access and to deep-copy elements
/// without knowing the concrete message type.
pub trait Wrap: Clone + Default + PartialEq + Debug + 'static {
    /// The wrapper type viewing this message.
    type View<'a>
    where
        Self: 'a;

    /// Builds a view over `orig`; writes through it land in `orig`.
    fn wrap(orig: &mut Self) -> Self::View<'_>;

    /// Overwrites `dest` with a deep copy of `src`, reusing `dest`'s allocations.
    fn copy_orig(dest: &mut Self, src: &Self);
}
