//! Runtime contract shared by every generated wrapper, plus the collection views.

mod map;
mod orig;
mod slice;
mod wrap;

pub use map::Map;
pub use orig::Orig;
pub use slice::Slice;
pub use wrap::Wrap;

#[cfg(test)]
pub(crate) use map::{fill_test_map, generate_test_map};
