use thiserror::Error;

/// Engine-level error type.
///
/// Almost nothing in the core is fatal: extractors, the classifier, and the
/// deduplicator all degrade to documented fallback behavior instead of
/// erroring. The variants here cover the few boundaries where a caller must
/// be told that a result could not be produced at all.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The upstream text-extraction collaborator reported source bytes it
    /// could not read. This is the one ingestion failure surfaced to callers;
    /// empty-but-readable text still yields a defaulted profile.
    #[error("Unreadable source document: {0}")]
    UnreadableSource(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
