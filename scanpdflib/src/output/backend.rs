//! The seam between composed documents and whatever lays them out.

use thiserror::Error;

use super::document::Document;

/// A backend could not turn a document into bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Lays out a document and encodes it.
///
/// Implementations own pagination, font metrics and byte encoding. A render
/// is a one-shot call: the same document always yields the same outcome, so
/// callers do not retry.
pub trait RenderBackend {
    fn render(&self, document: &Document) -> Result<Vec<u8>, BackendError>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for &B {
    fn render(&self, document: &Document) -> Result<Vec<u8>, BackendError> {
        (**self).render(document)
    }
}
