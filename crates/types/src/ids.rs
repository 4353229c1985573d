//! Newtype wrappers for identifiers that flow between crates.
//!
//! Shot ids come from the request, page handles and figure numbers are minted
//! while the document is built. Keeping them distinct stops a page index from
//! being passed where a page identity is expected.

use std::fmt;
use std::sync::Arc;

/// The caller-supplied identifier of a screenshot.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShotId(Arc<str>);

impl ShotId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ShotId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ShotId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for ShotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The stable identity of a page.
///
/// A handle survives insertion of pages before it; its position in the
/// document is only resolved when page numbers are drawn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PageHandle(u32);

impl PageHandle {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// A 1-based figure number, assigned to embedded screenshots in processing order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FigureNumber(u32);

impl FigureNumber {
    pub const FIRST: FigureNumber = FigureNumber(1);

    pub fn new(n: u32) -> Self {
        Self(n.max(1))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for FigureNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
