//! PDF assembly using lopdf.
//!
//! [`PdfDocument`] keeps every page in memory until [`PdfDocument::finish`]
//! so pages can be inserted anywhere in the sequence after content has been
//! laid out. Pages are addressed by [`PageHandle`](shotdoc_types::PageHandle):
//! a handle is bound to a PDF object id when the page is created, which keeps
//! links and outline entries valid no matter how many pages are inserted
//! in front of their target.
//!
//! Drawing calls take top-down coordinates (`y` grows down the page); the
//! flip to PDF user space happens here.

mod annotations;
mod document;
mod error;
mod images;
mod info;
mod outline;

pub use document::{ImageHandle, PdfDocument, TextStyle};
pub use error::RenderError;
pub use info::DocumentInfo;
pub use outline::OutlineEntry;
