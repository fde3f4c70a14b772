use crate::types::{OriginalToken, TimedToken, WordAlignment};

/// Backpointer for one DP cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Original token aligned with timed token (match or substitution).
    Diag,
    /// Original token dropped by ASR.
    Up,
    /// Timed token with no counterpart in the original.
    Left,
}

/// Approximate word equality on normalized forms.
///
/// Equal norms always match. Otherwise one norm has to be a prefix of the
/// other and their lengths may differ by at most `max_length_difference`
/// characters. Very short words are matched permissively ("a" ~ "at").
pub fn approx_equals(a: &str, b: &str, max_length_difference: usize) -> bool {
    if a == b {
        return true;
    }
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a.abs_diff(len_b) > max_length_difference {
        return false;
    }
    a.starts_with(b) || b.starts_with(a)
}

/// Edit-distance alignment of original tokens against timed tokens.
///
/// Returns, for each original token, the index of the timed token it was
/// aligned with. Substitutions count as alignments; tokens that come out of
/// the backtrace as deletions map to `None`.
///
/// Time and memory are O(n·m).
pub fn align_token_indices(
    original: &[OriginalToken],
    timed: &[TimedToken],
    max_length_difference: usize,
) -> Vec<Option<usize>> {
    let n = original.len();
    let m = timed.len();
    let width = m + 1;

    let mut cost = vec![0usize; (n + 1) * width];
    let mut back = vec![Step::Diag; (n + 1) * width];

    for i in 1..=n {
        cost[i * width] = i;
        back[i * width] = Step::Up;
    }
    for j in 1..=m {
        cost[j] = j;
        back[j] = Step::Left;
    }

    for i in 1..=n {
        let a = original[i - 1].norm.as_str();
        let row = i * width;
        let prev_row = (i - 1) * width;
        for j in 1..=m {
            let b = timed[j - 1].norm.as_str();
            let match_cost = usize::from(!approx_equals(a, b, max_length_difference));

            let cost_diag = cost[prev_row + j - 1] + match_cost;
            let cost_up = cost[prev_row + j] + 1;
            let cost_left = cost[row + j - 1] + 1;

            // Strict comparisons keep the earlier candidate on ties:
            // diagonal, then up, then left.
            let mut best = cost_diag;
            let mut step = Step::Diag;
            if cost_up < best {
                best = cost_up;
                step = Step::Up;
            }
            if cost_left < best {
                best = cost_left;
                step = Step::Left;
            }

            cost[row + j] = best;
            back[row + j] = step;
        }
    }

    let mut aligned = vec![None; n];
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        match back[i * width + j] {
            Step::Diag => {
                debug_assert!(i >= 1 && j >= 1);
                aligned[i - 1] = Some(j - 1);
                i -= 1;
                j -= 1;
            }
            Step::Up => {
                aligned[i - 1] = None;
                i -= 1;
            }
            Step::Left => {
                j -= 1;
            }
        }
    }

    tracing::debug!(
        original_count = n,
        timed_count = m,
        edit_cost = cost[n * width + m],
        aligned_count = aligned.iter().filter(|a| a.is_some()).count(),
        "edit distance: alignment complete"
    );

    aligned
}

/// Align and copy timings onto one `WordAlignment` per original token.
///
/// Non-finite timestamps on a timed token are carried over as `None`.
pub fn align_tokens_with_timings(
    original: &[OriginalToken],
    timed: &[TimedToken],
    max_length_difference: usize,
) -> Vec<WordAlignment> {
    let aligned = align_token_indices(original, timed, max_length_difference);

    original
        .iter()
        .zip(aligned)
        .map(|(token, timed_idx)| {
            let matched = timed_idx.and_then(|idx| timed.get(idx));
            WordAlignment {
                index: token.index,
                text: token.text.clone(),
                char_start: token.char_start,
                char_end: token.char_end,
                start: matched.and_then(|t| finite(t.start)),
                end: matched.and_then(|t| finite(t.end)),
            }
        })
        .collect()
}

pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::tokenization::{normalize_word, tokenize_original};

    const MAX_DIFF: usize = 2;

    fn timed(words: &[(&str, f64, f64)]) -> Vec<TimedToken> {
        words
            .iter()
            .enumerate()
            .map(|(index, &(w, start, end))| TimedToken {
                index,
                text: w.to_string(),
                norm: normalize_word(w),
                start,
                end,
            })
            .collect()
    }

    #[test]
    fn approx_equals_rules() {
        assert!(approx_equals("hello", "hello", MAX_DIFF));
        assert!(approx_equals("walk", "walked", MAX_DIFF));
        assert!(approx_equals("walked", "walk", MAX_DIFF));
        assert!(!approx_equals("walk", "walking", MAX_DIFF));
        assert!(!approx_equals("cat", "car", MAX_DIFF));
        assert!(approx_equals("", "", MAX_DIFF));
        assert!(!approx_equals("", "a", MAX_DIFF));
    }

    #[test]
    fn short_words_match_permissively() {
        // Known weakness kept on purpose.
        assert!(approx_equals("a", "at", MAX_DIFF));
        assert!(approx_equals("i", "its", MAX_DIFF));
    }

    #[test]
    fn length_difference_counts_characters_not_bytes() {
        assert!(approx_equals("straße", "straßen", MAX_DIFF));
        assert!(approx_equals("über", "überal", MAX_DIFF));
    }

    #[test]
    fn identical_sequences_align_diagonally() {
        let original = tokenize_original("one two three");
        let timed = timed(&[("one", 0.0, 0.2), ("two", 0.2, 0.4), ("three", 0.4, 0.7)]);
        assert_eq!(
            align_token_indices(&original, &timed, MAX_DIFF),
            [Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn output_length_matches_original_when_no_timed_tokens() {
        let original = tokenize_original("nothing was heard here");
        let words = align_tokens_with_timings(&original, &[], MAX_DIFF);
        assert_eq!(words.len(), 4);
        assert!(words.iter().all(|w| w.start.is_none() && w.end.is_none()));
    }

    #[test]
    fn empty_original_yields_empty_output() {
        let timed = timed(&[("um", 0.0, 0.1)]);
        assert!(align_tokens_with_timings(&[], &timed, MAX_DIFF).is_empty());
    }

    #[test]
    fn dropped_word_is_unmatched() {
        let original = tokenize_original("Hello world. Goodbye now.");
        let timed = timed(&[("Hello", 0.0, 0.3), ("Goodbye", 1.0, 1.4), ("now", 1.4, 1.6)]);
        assert_eq!(
            align_token_indices(&original, &timed, MAX_DIFF),
            [Some(0), None, Some(1), Some(2)]
        );
    }

    #[test]
    fn inserted_filler_is_discarded() {
        let original = tokenize_original("Hello world. Goodbye now.");
        let timed = timed(&[
            ("Hello", 0.0, 0.3),
            ("um", 0.3, 0.4),
            ("world", 0.4, 0.7),
            ("Goodbye", 1.0, 1.4),
            ("now", 1.4, 1.6),
        ]);
        assert_eq!(
            align_token_indices(&original, &timed, MAX_DIFF),
            [Some(0), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn substitution_keeps_one_to_one_alignment() {
        let original = tokenize_original("the cat sat");
        let timed = timed(&[("the", 0.0, 0.1), ("bat", 0.1, 0.3), ("sat", 0.3, 0.5)]);
        let words = align_tokens_with_timings(&original, &timed, MAX_DIFF);
        assert_eq!(words[1].start, Some(0.1));
        assert_eq!(words[1].end, Some(0.3));
    }

    #[test]
    fn noise_before_first_word_does_not_lose_later_matches() {
        // A greedy forward scan looking for "alpha" would run past
        // everything; the DP keeps the later matches.
        let original = tokenize_original("alpha beta gamma delta");
        let timed = timed(&[
            ("elfa", 0.0, 0.2),
            ("beta", 0.2, 0.4),
            ("gamma", 0.4, 0.6),
            ("delta", 0.6, 0.8),
        ]);
        let aligned = align_token_indices(&original, &timed, MAX_DIFF);
        assert_eq!(aligned[1..], [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn tie_prefers_diagonal_over_delete() {
        // At the final cell, substituting "quince" for "rhubarb" costs the
        // same as deleting "quince"; the substitution wins.
        let original = tokenize_original("pear quince");
        let timed = timed(&[("rhubarb", 0.0, 0.4)]);
        assert_eq!(
            align_token_indices(&original, &timed, MAX_DIFF),
            [None, Some(0)]
        );
    }

    #[test]
    fn non_finite_timing_becomes_none() {
        let original = tokenize_original("one two");
        let timed = timed(&[("one", f64::NAN, 0.2), ("two", 0.2, f64::INFINITY)]);
        let words = align_tokens_with_timings(&original, &timed, MAX_DIFF);
        assert_eq!(words[0].start, None);
        assert_eq!(words[0].end, Some(0.2));
        assert_eq!(words[1].start, Some(0.2));
        assert_eq!(words[1].end, None);
    }

    #[test]
    fn word_alignment_copies_offsets_and_index() {
        let original = tokenize_original("  spaced   out ");
        let words = align_tokens_with_timings(&original, &[], MAX_DIFF);
        for (token, word) in original.iter().zip(&words) {
            assert_eq!(token.index, word.index);
            assert_eq!(token.char_start, word.char_start);
            assert_eq!(token.char_end, word.char_end);
            assert_eq!(token.text, word.text);
        }
    }
}
