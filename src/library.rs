//! The two Automerge releases under test.
//!
//! Both are linked into the same binary under renamed dependency keys;
//! [`LibraryVersion`] picks one and [`Document`] owns whatever it parsed.

use std::{fmt, str::FromStr};

use crate::LoadBenchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LibraryVersion {
    V2,
    V3,
}

impl LibraryVersion {
    pub const ALL: [LibraryVersion; 2] = [LibraryVersion::V2, LibraryVersion::V3];

    pub fn number(self) -> u8 {
        match self {
            LibraryVersion::V2 => 2,
            LibraryVersion::V3 => 3,
        }
    }

    /// Parses a raw byte buffer with this version's `load` entry point.
    pub fn load(self, bytes: &[u8]) -> Result<Document, LoadBenchError> {
        let inner = match self {
            LibraryVersion::V2 => automerge2::Automerge::load(bytes)
                .map(DocumentInner::V2)
                .map_err(|e| LoadBenchError::parse(self.number(), e.to_string()))?,
            LibraryVersion::V3 => automerge3::Automerge::load(bytes)
                .map(DocumentInner::V3)
                .map_err(|e| LoadBenchError::parse(self.number(), e.to_string()))?,
        };
        Ok(Document { inner })
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for LibraryVersion {
    type Err = LoadBenchError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "2" => Ok(LibraryVersion::V2),
            "3" => Ok(LibraryVersion::V3),
            other => Err(LoadBenchError::version(other)),
        }
    }
}

enum DocumentInner {
    V2(automerge2::Automerge),
    V3(automerge3::Automerge),
}

/// A parsed document, alive until dropped.
pub struct Document {
    inner: DocumentInner,
}

impl Document {
    pub fn version(&self) -> LibraryVersion {
        match self.inner {
            DocumentInner::V2(_) => LibraryVersion::V2,
            DocumentInner::V3(_) => LibraryVersion::V3,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}
