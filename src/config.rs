//! Tuning parameters for the TextTiling pipeline.
//!
//! ## Choosing w and k
//!
//! The two numbers that matter are the pseudosentence size `w` (how many
//! tokens form one unit of comparison) and the block size `k` (how many
//! units sit on each side of a gap when scoring it).
//!
//! | Parameter | Smaller | Larger |
//! |-----------|---------|--------|
//! | `w` | finer boundary placement, noisier scores | coarser, smoother |
//! | `k` | local cohesion, sensitive to digressions | document-scale topics |
//!
//! The defaults (`w = 20`, `k = 10`) are the values Hearst recommends for
//! expository prose and are what most deployments pin.

/// Configuration for a [`crate::TextTiler`].
///
/// Builder-style setters allow overriding individual parameters:
///
/// ```rust
/// use tiles::TilingConfig;
///
/// let config = TilingConfig::default()
///     .with_pseudosentence_size(30)
///     .with_block_size(5);
/// assert_eq!(config.pseudosentence_size(), 30);
/// assert_eq!(config.block_size(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingConfig {
    pseudosentence_size: usize,
    block_size: usize,
    smoothing_width: usize,
    min_paragraph: usize,
}

impl TilingConfig {
    /// Create a config with the given pseudosentence and block sizes and
    /// default smoothing.
    ///
    /// # Panics
    ///
    /// Panics if `pseudosentence_size == 0` or `block_size == 0`.
    #[must_use]
    pub fn new(pseudosentence_size: usize, block_size: usize) -> Self {
        assert!(pseudosentence_size > 0, "pseudosentence_size must be > 0");
        assert!(block_size > 0, "block_size must be > 0");
        Self {
            pseudosentence_size,
            block_size,
            smoothing_width: 2,
            min_paragraph: 100,
        }
    }

    /// Tokens per pseudosentence (`w`).
    #[must_use]
    pub const fn pseudosentence_size(&self) -> usize {
        self.pseudosentence_size
    }

    /// Pseudosentences per comparison block (`k`).
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Width of the moving-average smoothing window, minus one.
    ///
    /// A width of 2 averages each gap score with its immediate neighbors.
    #[must_use]
    pub const fn smoothing_width(&self) -> usize {
        self.smoothing_width
    }

    /// Minimum bytes between consecutive paragraph breaks.
    ///
    /// Blank-line gaps closer than this to the previous break are not
    /// counted, so trivially short paragraphs don't become candidate
    /// boundaries.
    #[must_use]
    pub const fn min_paragraph(&self) -> usize {
        self.min_paragraph
    }

    /// Set the pseudosentence size.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    #[must_use]
    pub fn with_pseudosentence_size(mut self, size: usize) -> Self {
        assert!(size > 0, "pseudosentence_size must be > 0");
        self.pseudosentence_size = size;
        self
    }

    /// Set the block size.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    #[must_use]
    pub fn with_block_size(mut self, size: usize) -> Self {
        assert!(size > 0, "block_size must be > 0");
        self.block_size = size;
        self
    }

    /// Set the smoothing width.
    #[must_use]
    pub fn with_smoothing_width(mut self, width: usize) -> Self {
        self.smoothing_width = width;
        self
    }

    /// Set the minimum paragraph length in bytes.
    #[must_use]
    pub fn with_min_paragraph(mut self, bytes: usize) -> Self {
        self.min_paragraph = bytes;
        self
    }
}

impl Default for TilingConfig {
    fn default() -> Self {
        // Hearst's recommended parameters for expository text.
        Self::new(20, 10)
    }
}
