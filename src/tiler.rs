//! The TextTiler: TextTiling segmentation over whole documents.
//!
//! ## Pipeline
//!
//! ```text
//! text ──▶ pseudosentences ──▶ gap scores ──▶ smooth ──▶ depth scores
//!   │                                                        │
//!   └──▶ paragraph breaks ◀── snap selected gaps ◀── select boundaries
//!                 │
//!                 └──▶ slice original text ──▶ Vec<Tile>
//! ```
//!
//! The scoring half works on normalized tokens; the output half slices the
//! *original* text at paragraph-break byte offsets. The two meet in the
//! snapping step, which walks the original text counting words to locate
//! each selected gap, then moves it to the nearest paragraph break.
//!
//! ## Why Paragraph Breaks Are Required
//!
//! Boundaries are only ever placed at blank-line gaps. A text with fewer
//! than two paragraph breaks (the implicit one at offset 0 plus at least
//! one real gap) has nowhere to put a boundary, so [`TextTiler::tile`]
//! reports that as [`Error::NoParagraphBreaks`] rather than guessing.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::TilingConfig;
use crate::error::{Error, Result};
use crate::score::{depth_scores, gap_scores, select_boundaries, smooth};
use crate::tile::Tile;
use crate::tokenize::{paragraph_breaks, pseudosentences};

/// Topic segmenter using the TextTiling algorithm.
///
/// Stateless and `Send + Sync`: one instance can serve concurrent callers.
///
/// ## Example
///
/// ```rust
/// use tiles::{TextTiler, TilingConfig};
///
/// let tiler = TextTiler::new(TilingConfig::default());
/// let tiles = tiler.tile_or_single("One short remark.");
/// assert_eq!(tiles.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TextTiler {
    config: TilingConfig,
}

impl TextTiler {
    /// Create a tiler with the given configuration.
    #[must_use]
    pub fn new(config: TilingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Segment `text` into topically coherent tiles.
    ///
    /// Tiles are contiguous slices of the input in document order; their
    /// concatenation reconstructs the input exactly. A text whose cohesion
    /// curve has no qualifying valley comes back as a single tile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoParagraphBreaks`] if the text has no blank-line
    /// structure to anchor boundaries on (too short, or one paragraph).
    pub fn tile(&self, text: &str) -> Result<Vec<Tile>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let breaks = paragraph_breaks(text, self.config.min_paragraph());
        if breaks.len() < 2 {
            return Err(Error::NoParagraphBreaks);
        }

        let seqs = pseudosentences(text, self.config.pseudosentence_size());
        let gaps = gap_scores(&seqs, self.config.block_size());
        let smoothed = smooth(&gaps, self.config.smoothing_width());
        let depths = depth_scores(&smoothed);
        let selected = select_boundaries(&depths);

        let cuts = self.snap_to_breaks(text, &selected, &breaks);
        Ok(build_tiles(text, &cuts))
    }

    /// Segment `text`, degrading to a single whole-input tile when the text
    /// is too short to contain a paragraph break.
    ///
    /// This is the behavior the HTTP service exposes: short input is not an
    /// error, it is simply one segment.
    #[must_use]
    pub fn tile_or_single(&self, text: &str) -> Vec<Tile> {
        match self.tile(text) {
            Ok(tiles) if !tiles.is_empty() => tiles,
            Ok(_) | Err(Error::NoParagraphBreaks) => {
                vec![Tile::new(text, 0, 0)]
            }
        }
    }

    /// Convert selected gaps into byte offsets at paragraph breaks.
    ///
    /// Walks the text with the same Unicode word segmentation that built
    /// the pseudosentences, so gap indices and word ordinals stay in phase
    /// even on hyphenated or slash-joined tokens. Gap `g` is crossed at the
    /// first word whose ordinal reaches `(g + 1) * w`; each selected gap
    /// snaps to the nearest paragraph break, and duplicate snaps collapse.
    fn snap_to_breaks(&self, text: &str, selected: &[bool], breaks: &[usize]) -> Vec<usize> {
        debug_assert!(!breaks.is_empty());
        let w = self.config.pseudosentence_size();

        let mut cuts: Vec<usize> = Vec::new();
        let mut gaps_seen = 0usize;

        for (ordinal, (offset, _word)) in text.unicode_word_indices().enumerate() {
            while gaps_seen < selected.len() && ordinal >= (gaps_seen + 1) * w {
                if selected[gaps_seen] {
                    let nearest = breaks
                        .iter()
                        .copied()
                        .min_by_key(|b| b.abs_diff(offset))
                        .unwrap_or(0);
                    if nearest != 0 && !cuts.contains(&nearest) {
                        cuts.push(nearest);
                    }
                }
                gaps_seen += 1;
            }
        }

        cuts.sort_unstable();
        cuts
    }
}

impl Default for TextTiler {
    fn default() -> Self {
        Self::new(TilingConfig::default())
    }
}

/// Slice the text at the given sorted interior byte offsets.
fn build_tiles(text: &str, cuts: &[usize]) -> Vec<Tile> {
    debug_assert!(cuts.windows(2).all(|pair| pair[0] < pair[1]));

    let mut tiles = Vec::with_capacity(cuts.len() + 1);
    let mut prev = 0;

    for &cut in cuts {
        if cut == 0 || cut >= text.len() {
            continue;
        }
        tiles.push(Tile::new(&text[prev..cut], prev, tiles.len()));
        prev = cut;
    }
    tiles.push(Tile::new(&text[prev..], prev, tiles.len()));

    tiles
}
