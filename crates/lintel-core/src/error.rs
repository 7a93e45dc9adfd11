use crate::ids::{LinkId, WordId};

pub type Result<T> = std::result::Result<T, Error>;

/// Which arena a dangling reference was expected to point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Word,
    Link,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word => f.write_str("word"),
            Self::Link => f.write_str("link"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("link `{link}` references unknown {kind} `{target}`")]
    MalformedReference {
        link: String,
        kind: RefKind,
        target: String,
    },

    #[error("cluster `{cluster}` references unknown {kind} `{target}`")]
    MalformedClusterMember {
        cluster: String,
        kind: RefKind,
        target: String,
    },

    #[error("duplicate word id `{id}`")]
    DuplicateWord { id: String },

    #[error("duplicate link id `{id}`")]
    DuplicateLink { id: String },

    #[error("link `{link}` is part of an anchor cycle")]
    CyclicLink { link: String },

    #[error("invalid color `{value}` in style of link `{link}`")]
    InvalidColor { link: String, value: String },

    #[error("row {row} has no words")]
    EmptyRow { row: usize },

    #[error("link `{link}` spans rows {min_row}..={max_row} in inverted order")]
    InvertedSpan {
        link: String,
        min_row: usize,
        max_row: usize,
    },

    #[error("word `{word}` is not assigned to a row")]
    UnplacedWord { word: String },

    #[error("unknown word handle {0:?}")]
    UnknownWord(WordId),

    #[error("unknown link handle {0:?}")]
    UnknownLink(LinkId),

    #[error("unknown row index {row}")]
    UnknownRow { row: usize },
}
