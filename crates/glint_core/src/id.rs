//! Opaque host identities
//!
//! The host editor owns caret and view identity; the overlay only needs
//! equality and hashing. Both wrap whatever stable integer the host hands
//! out (caret index, view handle, pointer-derived id).

/// Identity of one caret within a view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaretId(pub u64);

/// Identity of one editor view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl From<u64> for CaretId {
    fn from(raw: u64) -> Self {
        CaretId(raw)
    }
}

impl From<u64> for ViewId {
    fn from(raw: u64) -> Self {
        ViewId(raw)
    }
}
