use serde::Serialize;
use std::fmt;

/// Handle into [`crate::Document::words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WordId(pub(crate) usize);

/// Handle into [`crate::Document::links`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LinkId(pub(crate) usize);

macro_rules! arena_index {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_index!(WordId, "word");
arena_index!(LinkId, "link");
