//! Metadata sink abstraction over a document head

use crate::domain::MetaKey;
use crate::error::{FormsiteError, Result};

/// Read/write access to the title and `<meta>` nodes of a document head
pub trait MetadataSink {
    /// Current document title, `None` if the head has no title node
    fn title(&self) -> Result<Option<String>>;

    /// Replace the document title, creating the node if there is none
    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Remove the title node
    fn remove_title(&mut self) -> Result<()>;

    /// Content of the first node matching `key`, `None` if no such node.
    /// A node without a `content` attribute reads as an empty string.
    fn get(&self, key: &MetaKey) -> Result<Option<String>>;

    /// Overwrite the content of the first node matching `key`
    fn set(&mut self, key: &MetaKey, content: &str) -> Result<()>;

    /// Append a new node for `key` with the given content
    fn create(&mut self, key: &MetaKey, content: &str) -> Result<()>;

    /// Remove the first node matching `key`
    fn remove(&mut self, key: &MetaKey) -> Result<()>;
}

/// Sink used when no document is available; every operation fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedDocument;

impl MetadataSink for DetachedDocument {
    fn title(&self) -> Result<Option<String>> {
        Err(FormsiteError::NoDocument)
    }

    fn set_title(&mut self, _title: &str) -> Result<()> {
        Err(FormsiteError::NoDocument)
    }

    fn remove_title(&mut self) -> Result<()> {
        Err(FormsiteError::NoDocument)
    }

    fn get(&self, _key: &MetaKey) -> Result<Option<String>> {
        Err(FormsiteError::NoDocument)
    }

    fn set(&mut self, _key: &MetaKey, _content: &str) -> Result<()> {
        Err(FormsiteError::NoDocument)
    }

    fn create(&mut self, _key: &MetaKey, _content: &str) -> Result<()> {
        Err(FormsiteError::NoDocument)
    }

    fn remove(&mut self, _key: &MetaKey) -> Result<()> {
        Err(FormsiteError::NoDocument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_document_fails() {
        let mut doc = DetachedDocument;
        assert!(matches!(doc.title(), Err(FormsiteError::NoDocument)));
        assert!(matches!(
            doc.create(&MetaKey::name("description"), "x"),
            Err(FormsiteError::NoDocument)
        ));
    }
}
