//! The Tile type: a topically coherent chunk of text with position metadata.

/// A topically coherent segment of the original document.
///
/// The name "tile" comes from the TextTiling metaphor: the document is a
/// surface tiled by its topics, and each tile covers one of them. Unlike
/// overlap-based chunkers, tiles never overlap; they partition the input.
///
/// ## Byte Offsets
///
/// `start` is a byte offset into the original text. The end offset is not
/// stored: a tile's span is exactly the text it holds, so [`Tile::end`] is
/// derived as `start + text.len()` and cannot disagree with the content.
///
/// ```rust
/// use tiles::Tile;
///
/// let text = "Hello, world!";
/// let tile = Tile::new("world", 7, 0);
///
/// assert_eq!(&text[tile.span()], "world");
/// assert_eq!(tile.end(), 12);
/// ```
///
/// ## Reconstruction
///
/// Tiles are contiguous: each tile's `start` equals the previous tile's
/// [`Tile::end`], the first starts at 0, and the last ends at the document
/// length. Concatenating tile texts therefore reconstructs the input
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// The segment text.
    pub text: String,
    /// Byte offset where this segment starts in the original document.
    pub start: usize,
    /// Zero-based index of this segment in the sequence.
    pub index: usize,
}

impl Tile {
    /// Create a new tile.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            index,
        }
    }

    /// The length of this segment in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this segment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset where this segment ends (exclusive) in the original
    /// document, derived from the start and the held text.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// The byte span of this segment in the original document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tile {{ index: {}, span: {}..{}, len: {} }}",
            self.index,
            self.start,
            self.end(),
            self.len()
        )
    }
}
