use crate::alignment::edit_distance::finite;
use crate::types::WordAlignment;

/// Fill missing word timings from the surrounding anchors.
///
/// An anchor is a word with both `start` and `end` present and finite.
/// - Words before the first anchor copy its timing.
/// - Words after the last anchor copy its timing.
/// - Words between two anchors are linearly interpolated by position.
///
/// Anchors are returned untouched. Without any anchor the list comes back
/// as-is, except that non-finite values are cleared to `None`.
pub fn interpolate_word_timings(words: &[WordAlignment]) -> Vec<WordAlignment> {
    let mut result: Vec<WordAlignment> = words
        .iter()
        .cloned()
        .map(|mut w| {
            w.start = w.start.and_then(finite);
            w.end = w.end.and_then(finite);
            w
        })
        .collect();

    let anchors: Vec<usize> = result
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_anchor())
        .map(|(idx, _)| idx)
        .collect();

    let (Some(&first), Some(&last)) = (anchors.first(), anchors.last()) else {
        tracing::debug!(word_count = words.len(), "interpolate: no anchors, nothing to fill");
        return result;
    };

    let (first_start, first_end) = (result[first].start, result[first].end);
    for word in &mut result[..first] {
        word.start = first_start;
        word.end = first_end;
    }

    let (last_start, last_end) = (result[last].start, result[last].end);
    for word in &mut result[last + 1..] {
        word.start = last_start;
        word.end = last_end;
    }

    let mut filled = first + (result.len() - last - 1);
    for pair in anchors.windows(2) {
        let (i0, i1) = (pair[0], pair[1]);
        let span = i1 - i0;
        if span <= 1 {
            continue;
        }
        let (Some(s0), Some(e0)) = (result[i0].start, result[i0].end) else {
            continue;
        };
        let (Some(s1), Some(e1)) = (result[i1].start, result[i1].end) else {
            continue;
        };
        for k in i0 + 1..i1 {
            let frac = (k - i0) as f64 / span as f64;
            result[k].start = Some(lerp(s0, s1, frac));
            result[k].end = Some(lerp(e0, e1, frac));
            filled += 1;
        }
    }

    tracing::debug!(
        word_count = result.len(),
        anchor_count = anchors.len(),
        filled,
        "interpolate: filled missing timings"
    );
    result
}

fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + frac * (b - a)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn word(index: usize, timing: Option<(f64, f64)>) -> WordAlignment {
        WordAlignment {
            index,
            text: format!("w{index}"),
            char_start: index * 3,
            char_end: index * 3 + 2,
            start: timing.map(|t| t.0),
            end: timing.map(|t| t.1),
        }
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(interpolate_word_timings(&[]).is_empty());
    }

    #[test]
    fn no_anchors_returns_input() {
        let words = vec![word(0, None), word(1, None)];
        assert_eq!(interpolate_word_timings(&words), words);
    }

    #[test]
    fn single_gap_gets_midpoint() {
        let words = vec![word(0, Some((0.0, 0.3))), word(1, None), word(2, Some((1.0, 1.4)))];
        let out = interpolate_word_timings(&words);
        assert_abs_diff_eq!(out[1].start.unwrap(), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(out[1].end.unwrap(), 0.85, epsilon = 1e-9);
    }

    #[test]
    fn longer_gap_is_linear() {
        let words = vec![
            word(0, Some((0.0, 1.0))),
            word(1, None),
            word(2, None),
            word(3, Some((3.0, 4.0))),
        ];
        let out = interpolate_word_timings(&words);
        assert_abs_diff_eq!(out[1].start.unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[1].end.unwrap(), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[2].start.unwrap(), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[2].end.unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn edges_copy_nearest_anchor() {
        let words = vec![
            word(0, None),
            word(1, Some((0.5, 0.7))),
            word(2, Some((0.8, 1.0))),
            word(3, None),
            word(4, None),
        ];
        let out = interpolate_word_timings(&words);
        assert_eq!((out[0].start, out[0].end), (Some(0.5), Some(0.7)));
        assert_eq!((out[3].start, out[3].end), (Some(0.8), Some(1.0)));
        assert_eq!((out[4].start, out[4].end), (Some(0.8), Some(1.0)));
    }

    #[test]
    fn anchors_are_untouched() {
        let words = vec![word(0, Some((0.0, 0.2))), word(1, None), word(2, Some((0.9, 1.1)))];
        let out = interpolate_word_timings(&words);
        assert_eq!(out[0], words[0]);
        assert_eq!(out[2], words[2]);
    }

    #[test]
    fn idempotent_on_fully_timed_list() {
        let words = vec![word(0, Some((0.0, 0.2))), word(1, Some((0.2, 0.5)))];
        let once = interpolate_word_timings(&words);
        assert_eq!(once, words);
        assert_eq!(interpolate_word_timings(&once), once);
    }

    #[test]
    fn nan_is_not_an_anchor() {
        let mut nan_word = word(1, Some((0.4, 0.6)));
        nan_word.start = Some(f64::NAN);
        let words = vec![word(0, Some((0.0, 0.2))), nan_word, word(2, Some((1.0, 1.2)))];
        let out = interpolate_word_timings(&words);
        assert_abs_diff_eq!(out[1].start.unwrap(), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(out[1].end.unwrap(), 0.7, epsilon = 1e-9);
    }

    #[test]
    fn preserves_order_and_length() {
        let words: Vec<_> = (0..6)
            .map(|i| word(i, (i % 3 == 0).then_some((i as f64, i as f64 + 0.5))))
            .collect();
        let out = interpolate_word_timings(&words);
        assert_eq!(out.len(), words.len());
        for (i, w) in out.iter().enumerate() {
            assert_eq!(w.index, i);
            assert!(w.is_anchor());
        }
    }
}
