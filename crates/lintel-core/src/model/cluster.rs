use crate::model::link::Anchor;
use serde::Serialize;

/// A labelled group of words/links. Carried through layout untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub key: String,
    pub label: String,
    pub members: Vec<Anchor>,
}
