//! Error types for tiles.

/// Errors that can occur during segmentation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The text contains fewer than two paragraph breaks, so there is no
    /// structure to segment. Callers that want the classic single-segment
    /// fallback can use [`crate::TextTiler::tile_or_single`] instead of
    /// matching on this variant.
    #[error("no paragraph breaks were found (text too short perhaps?)")]
    NoParagraphBreaks,
}

/// Result type for tiles operations.
pub type Result<T> = std::result::Result<T, Error>;
