//! # tiles
//!
//! TextTiling topic segmentation: split a document into topically coherent
//! chunks ("tiles") by finding dips in lexical cohesion.
//!
//! ## The Problem
//!
//! A long document usually covers several topics in sequence. For retrieval,
//! summarization, or display you often want to cut it *between* topics, not
//! at arbitrary byte counts. Fixed-size chunking splits mid-argument;
//! sentence grouping ignores topic structure entirely.
//!
//! TextTiling (Hearst, 1997) detects topic shifts from the text alone, with
//! no embedding model, by observing that adjacent stretches of
//! text about the same topic reuse the same vocabulary, while stretches
//! about different topics don't.
//!
//! ## How It Works
//!
//! ```text
//! 1. Tokenize     words -> pseudosentences of w tokens (default w = 20)
//!
//!    [the cat sat ...] [feline whiskers ...] [stars orbit ...] [galaxy ...]
//!         ps0                ps1                  ps2             ps3
//!
//! 2. Score gaps   compare the k pseudosentences either side of each gap
//!                 (default k = 10) by token overlap
//!
//!    cohesion:  0.8        0.7        0.1        0.75
//!                                      ↑
//!                                low overlap = topic shift?
//!
//! 3. Smooth       moving average flattens single-gap noise
//!
//! 4. Depth score  how far does each valley sit below its flanking peaks?
//!
//!    score ─╮              ╭──
//!            ╰─╮   depth ╭─╯
//!              ╰───╲___╱─╯
//!                  valley
//!
//! 5. Select       valleys deeper than (mean - stdev/2), at least 4 gaps
//!                 apart, become boundaries
//!
//! 6. Snap         each boundary moves to the nearest paragraph break, so
//!                 tiles always start at blank lines, never mid-word
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tiles::{TextTiler, TilingConfig};
//!
//! let tiler = TextTiler::new(TilingConfig::default());
//!
//! // Short text has no paragraph structure to analyze; the lenient entry
//! // point degrades to a single tile instead of erroring.
//! let tiles = tiler.tile_or_single("Just one short line.");
//! assert_eq!(tiles.len(), 1);
//! assert_eq!(tiles[0].text, "Just one short line.");
//! ```
//!
//! For callers that want to distinguish "too short to segment" from a real
//! segmentation, use [`TextTiler::tile`] and match on
//! [`Error::NoParagraphBreaks`].
//!
//! ## Guarantees
//!
//! - Tiles are contiguous, non-overlapping, and in document order.
//! - Concatenating tile texts reconstructs the input byte-for-byte.
//! - Interior tile boundaries fall at paragraph breaks (blank lines).
//! - Pure function of (text, config): same input, same output.
//!
//! ## HTTP Service (requires `server` feature)
//!
//! The `server` feature adds an axum microservice exposing the segmenter as
//! `POST /split_text_to_chunks` behind a shared-secret header check, plus
//! the `tiles-server` binary. See the `server` module.

mod config;
mod error;
mod score;
mod stopwords;
mod tile;
mod tiler;
mod tokenize;

#[cfg(feature = "server")]
pub mod server;

pub use config::TilingConfig;
pub use error::{Error, Result};
pub use tile::Tile;
pub use tiler::TextTiler;
