//! Lexical preprocessing: words, pseudosentences, and paragraph breaks.
//!
//! TextTiling does not score real sentences. Sentence lengths vary too much
//! for overlap counts to be comparable, so the text is cut into
//! "pseudosentences": fixed-size blocks of `w` tokens each. Word extraction
//! uses Unicode word boundaries (UAX #29) on the lowercased text, which
//! drops punctuation and handles contractions.
//!
//! Paragraph breaks are blank-line gaps (a newline, a second newline, any
//! horizontal whitespace between and around them). Segment boundaries are
//! only ever placed at these offsets, which is what keeps tiles from
//! starting mid-sentence or mid-word.

use unicode_segmentation::UnicodeSegmentation;

use crate::stopwords::is_stopword;

/// Group the text's words into pseudosentences of `w` tokens.
///
/// Stopwords are removed *after* grouping, so each pseudosentence covers a
/// fixed span of running text even though its scored vocabulary is smaller.
/// The final pseudosentence may be shorter than `w`.
pub(crate) fn pseudosentences(text: &str, w: usize) -> Vec<Vec<String>> {
    debug_assert!(w > 0);
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.unicode_words().collect();

    words
        .chunks(w)
        .map(|chunk| {
            chunk
                .iter()
                .copied()
                .filter(|word| !is_stopword(word))
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Byte offsets of paragraph breaks, always beginning with 0.
///
/// A break is the start of a blank-line gap: optional horizontal whitespace,
/// a newline, optional horizontal whitespace, a second newline. Gaps closer
/// than `min_paragraph` bytes to the previous accepted break are skipped so
/// that trivially short paragraphs don't become boundary candidates.
pub(crate) fn paragraph_breaks(text: &str, min_paragraph: usize) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut breaks = vec![0];
    let mut last_break = 0;
    let mut from = 0;

    while let Some((start, end)) = blank_line_gap(bytes, from) {
        if start - last_break >= min_paragraph {
            breaks.push(start);
            last_break = start;
        }
        // Non-overlapping scan: resume after the consumed gap.
        from = end.max(start + 1);
    }

    breaks
}

fn is_hws(byte: u8) -> bool {
    // Horizontal whitespace: space, tab, CR, form feed, vertical tab.
    matches!(byte, b' ' | b'\t' | b'\r' | 0x0c | 0x0b)
}

/// Find the leftmost blank-line gap at or after `from`.
///
/// Returns the byte range of the whole gap, including leading and trailing
/// horizontal whitespace. ASCII byte scanning is safe here because every
/// pattern byte is ASCII and UTF-8 continuation bytes can't collide.
fn blank_line_gap(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while i < bytes.len() {
        // Attempt a match starting at i.
        let mut j = i;
        while j < bytes.len() && is_hws(bytes[j]) {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'\n' {
            j += 1;
            let mut k = j;
            while k < bytes.len() && is_hws(bytes[k]) {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'\n' {
                k += 1;
                while k < bytes.len() && is_hws(bytes[k]) {
                    k += 1;
                }
                return Some((i, k));
            }
            // One newline but no second: nothing starting before this
            // newline can match either, so resume right after it.
            i = j;
        } else {
            i = if j > i { j } else { i + 1 };
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudosentences_group_then_filter() {
        // 6 words grouped in threes; stopwords dropped inside each group.
        let seqs = pseudosentences("The cat sat on the mat", 3);
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0], vec!["cat", "sat"]);
        assert_eq!(seqs[1], vec!["mat"]);
    }

    #[test]
    fn test_pseudosentences_strip_punctuation() {
        let seqs = pseudosentences("Cats, dogs; birds!", 10);
        assert_eq!(seqs, vec![vec!["cats", "dogs", "birds"]]);
    }

    #[test]
    fn test_pseudosentences_empty_text() {
        assert!(pseudosentences("", 20).is_empty());
    }

    #[test]
    fn test_paragraph_breaks_start_with_zero() {
        assert_eq!(paragraph_breaks("no gaps here", 100), vec![0]);
    }

    #[test]
    fn test_paragraph_breaks_find_blank_lines() {
        let text = format!("{}\n\n{}", "a".repeat(150), "b".repeat(150));
        let breaks = paragraph_breaks(&text, 100);
        assert_eq!(breaks, vec![0, 150]);
    }

    #[test]
    fn test_paragraph_breaks_include_leading_whitespace() {
        // The gap starts at the horizontal whitespace before the first
        // newline, so the break lands on whitespace, never inside a word.
        let text = format!("{}  \n\t\n{}", "a".repeat(150), "b".repeat(150));
        let breaks = paragraph_breaks(&text, 100);
        assert_eq!(breaks, vec![0, 150]);
    }

    #[test]
    fn test_paragraph_breaks_respect_min_distance() {
        let text = format!("short\n\n{}\n\n{}", "a".repeat(150), "b".repeat(150));
        let breaks = paragraph_breaks(&text, 100);
        // The gap after "short" is only 5 bytes in; too close to 0.
        assert_eq!(breaks.len(), 2);
        assert_eq!(breaks[0], 0);
        assert!(breaks[1] > 100);
    }

    #[test]
    fn test_single_newlines_are_not_breaks() {
        let text = format!("{}\n{}", "a".repeat(150), "b".repeat(150));
        assert_eq!(paragraph_breaks(&text, 100), vec![0]);
    }

    #[test]
    fn test_blank_line_gap_crlf() {
        let text = format!("{}\r\n\r\n{}", "a".repeat(150), "b".repeat(150));
        let breaks = paragraph_breaks(&text, 100);
        assert_eq!(breaks, vec![0, 150]);
    }
}
