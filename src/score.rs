//! Cohesion scoring: gap similarity, smoothing, depth scores, boundaries.
//!
//! ## The Signal
//!
//! Each gap between pseudosentences gets a cohesion score: how much
//! vocabulary do the blocks on either side share? Plotted across the
//! document this forms a curve: high plateaus inside topics, valleys at
//! topic shifts:
//!
//! ```text
//! score
//!  1.0 ─ ───╮          ╭────╮
//!           ╰──╮    ╭──╯    ╰──╮
//!  0.5 ─       ╰╮  ╭╯           ╰─╮  ╭──
//!               ╰──╯              ╰──╯
//!  0.0 ─        valley            valley
//!        ──────────────────────────────── gap index
//! ```
//!
//! Raw scores are noisy, so a moving average smooths them first. A valley
//! only counts if it is *deep* relative to the peaks flanking it; a small
//! wobble on a plateau is not a topic shift. The depth score captures this,
//! and the boundary selector keeps valleys whose depth clears a cutoff
//! derived from the depth distribution itself (mean minus half a standard
//! deviation), rejecting candidates that crowd an already-chosen boundary.

use std::collections::HashMap;

/// Cohesion score for each gap between adjacent pseudosentences.
///
/// For gap `i`, compares the block of up to `k` pseudosentences ending at
/// `i` against the block of up to `k` starting at `i + 1`, using the
/// token-frequency dot product normalized by the geometric mean of the
/// blocks' self-products (cosine similarity over raw counts).
pub(crate) fn gap_scores(seqs: &[Vec<String>], k: usize) -> Vec<f64> {
    debug_assert!(k > 0);
    let n = seqs.len();
    if n < 2 {
        return Vec::new();
    }

    let mut scores = Vec::with_capacity(n - 1);
    for gap in 0..n - 1 {
        let left = &seqs[(gap + 1).saturating_sub(k)..=gap];
        let right = &seqs[gap + 1..(gap + 1 + k).min(n)];
        scores.push(block_similarity(left, right));
    }
    scores
}

fn block_counts<'a>(block: &'a [Vec<String>]) -> HashMap<&'a str, f64> {
    let mut counts = HashMap::new();
    for seq in block {
        for word in seq {
            *counts.entry(word.as_str()).or_insert(0.0) += 1.0;
        }
    }
    counts
}

fn block_similarity(left: &[Vec<String>], right: &[Vec<String>]) -> f64 {
    let left_counts = block_counts(left);
    let right_counts = block_counts(right);

    let dot: f64 = left_counts
        .iter()
        .filter_map(|(word, lc)| right_counts.get(word).map(|rc| lc * rc))
        .sum();
    let left_sq: f64 = left_counts.values().map(|c| c * c).sum();
    let right_sq: f64 = right_counts.values().map(|c| c * c).sum();

    if left_sq == 0.0 || right_sq == 0.0 {
        0.0
    } else {
        dot / (left_sq * right_sq).sqrt()
    }
}

/// Centered moving average with window `width + 1`, clamped at the edges.
pub(crate) fn smooth(scores: &[f64], width: usize) -> Vec<f64> {
    let window = width + 1;
    if window <= 1 || scores.len() < 3 {
        return scores.to_vec();
    }

    let half = window / 2;
    (0..scores.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(scores.len());
            scores[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
        })
        .collect()
}

/// Depth of the valley at each gap: `(lpeak - s) + (rpeak - s)`.
///
/// Peaks are found by climbing monotone non-descending runs away from the
/// gap in both directions. Gaps inside the clip margin at either edge of
/// the document score zero, since there is not enough context there to call
/// something a valley.
pub(crate) fn depth_scores(scores: &[f64]) -> Vec<f64> {
    let n = scores.len();
    let mut depths = vec![0.0; n];
    if n == 0 {
        return depths;
    }

    let clip = (n / 10).clamp(2, 5);
    if n <= 2 * clip {
        return depths;
    }

    for i in clip..n - clip {
        let score = scores[i];

        let mut lpeak = score;
        let mut j = i;
        while j > 0 && scores[j - 1] >= lpeak {
            lpeak = scores[j - 1];
            j -= 1;
        }

        let mut rpeak = score;
        let mut j = i;
        while j + 1 < n && scores[j + 1] >= rpeak {
            rpeak = scores[j + 1];
            j += 1;
        }

        depths[i] = (lpeak - score) + (rpeak - score);
    }

    depths
}

/// Select boundary gaps from depth scores.
///
/// Cutoff is `mean - stdev / 2` over the depth distribution. A candidate
/// must have positive depth and clear the cutoff by a small tolerance:
/// on a flat distribution the mean differs from the common value only by
/// rounding noise, and without the margin every gap would qualify.
/// Candidates are taken deepest-first; one within 4 gaps of an
/// already-selected boundary is dropped, which prevents runt segments.
pub(crate) fn select_boundaries(depths: &[f64]) -> Vec<bool> {
    const MIN_GAP_SEPARATION: usize = 4;
    const CUTOFF_TOLERANCE: f64 = 1e-9;

    let n = depths.len();
    let mut boundaries = vec![false; n];
    if n == 0 {
        return boundaries;
    }

    let mean = depths.iter().sum::<f64>() / n as f64;
    let variance = depths.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
    let cutoff = mean - variance.sqrt() / 2.0;

    let mut candidates: Vec<(usize, f64)> = depths
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, depth)| depth > 0.0 && depth > cutoff + CUTOFF_TOLERANCE)
        .collect();
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.0.cmp(&a.0))
    });

    for (idx, _) in candidates {
        let crowded = boundaries
            .iter()
            .enumerate()
            .any(|(j, &set)| set && j.abs_diff(idx) < MIN_GAP_SEPARATION);
        if !crowded {
            boundaries[idx] = true;
        }
    }

    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seqs(words: &[&[&str]]) -> Vec<Vec<String>> {
        words
            .iter()
            .map(|seq| seq.iter().map(|w| (*w).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_identical_blocks_score_one() {
        let seqs = seqs(&[&["cat", "dog"], &["cat", "dog"]]);
        let scores = gap_scores(&seqs, 10);
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_blocks_score_zero() {
        let seqs = seqs(&[&["cat", "dog"], &["star", "moon"]]);
        let scores = gap_scores(&seqs, 10);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_empty_block_scores_zero() {
        let seqs = seqs(&[&[], &["star"]]);
        let scores = gap_scores(&seqs, 10);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_gap_count() {
        let seqs = seqs(&[&["a"], &["b"], &["c"], &["d"]]);
        assert_eq!(gap_scores(&seqs, 2).len(), 3);
        assert!(gap_scores(&seqs[..1], 2).is_empty());
    }

    #[test]
    fn test_smooth_flattens_spike() {
        let scores = [1.0, 1.0, 0.0, 1.0, 1.0];
        let smoothed = smooth(&scores, 2);
        assert_eq!(smoothed.len(), scores.len());
        assert!(smoothed[2] > 0.0, "spike should be averaged with neighbors");
        assert!(smoothed[2] < 1.0);
    }

    #[test]
    fn test_smooth_width_zero_is_identity() {
        let scores = [0.3, 0.9, 0.1];
        assert_eq!(smooth(&scores, 0), scores.to_vec());
    }

    #[test]
    fn test_depth_scores_find_valley() {
        // Plateau, deep valley at index 5, plateau. 11 gaps -> clip = 2.
        let scores = [0.9, 0.9, 0.9, 0.9, 0.5, 0.1, 0.5, 0.9, 0.9, 0.9, 0.9];
        let depths = depth_scores(&scores);
        let deepest = depths
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i);
        assert_eq!(deepest, Some(5));
        assert!((depths[5] - 1.6).abs() < 1e-9, "(0.9-0.1)*2");
    }

    #[test]
    fn test_depth_scores_clip_edges() {
        let scores = [0.1, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9, 0.1];
        let depths = depth_scores(&scores);
        assert_eq!(depths[0], 0.0);
        assert_eq!(depths[depths.len() - 1], 0.0);
    }

    #[test]
    fn test_depth_scores_too_short() {
        assert_eq!(depth_scores(&[0.5, 0.1, 0.5]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_select_boundaries_picks_deep_valley() {
        let mut depths = vec![0.0; 20];
        depths[10] = 1.5;
        let boundaries = select_boundaries(&depths);
        assert!(boundaries[10]);
    }

    #[test]
    fn test_select_boundaries_enforce_separation() {
        let mut depths = vec![0.0; 20];
        depths[10] = 1.5;
        depths[12] = 1.4;
        depths[17] = 1.3;
        let boundaries = select_boundaries(&depths);
        assert!(boundaries[10]);
        assert!(!boundaries[12], "within 4 gaps of a deeper boundary");
        assert!(boundaries[17]);
    }

    #[test]
    fn test_select_boundaries_all_flat_selects_none() {
        let depths = vec![0.7; 16];
        let boundaries = select_boundaries(&depths);
        assert!(boundaries.iter().all(|&b| !b));
    }

    #[test]
    fn test_select_boundaries_skip_zero_depths() {
        // One deep valley drags the cutoff negative; the zero-depth gaps
        // elsewhere must still not qualify.
        let mut depths = vec![0.0; 20];
        depths[10] = 2.0;
        let boundaries = select_boundaries(&depths);
        assert!(boundaries[10]);
        assert_eq!(boundaries.iter().filter(|&&b| b).count(), 1);
    }

    #[test]
    fn test_select_boundaries_empty() {
        assert!(select_boundaries(&[]).is_empty());
    }
}
