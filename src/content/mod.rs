//! Documentation content: documents, snippet groups, loading and storage.

mod coverage;
mod document;
mod loader;
mod store;

pub use coverage::{DocumentCoverage, LanguageCoverage, SnippetCoverage};
pub use document::{Block, CodeSnippetGroup, Document, Snippet};
pub use loader::{parse_document, ContentLoader};
pub use store::{ContentStore, Snapshot};
