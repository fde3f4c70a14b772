use crate::alignment::tokenization::normalize_word;
use crate::types::{AsrSegment, TimedToken};

/// Flatten ASR segments into one timed-token stream, re-indexed from zero.
///
/// Segments are taken in the order given. Segments without word-level
/// timestamps contribute nothing.
pub fn flatten_segments(segments: &[AsrSegment]) -> Vec<TimedToken> {
    let mut tokens = Vec::new();
    let mut skipped_segments = 0usize;
    let mut prev_start: Option<f64> = None;

    for (segment_idx, segment) in segments.iter().enumerate() {
        if let Some(prev) = prev_start {
            if segment.start < prev {
                tracing::warn!(
                    segment_idx,
                    segment_start = segment.start,
                    previous_start = prev,
                    "flatten: ASR segments are not chronological; keeping given order"
                );
            }
        }
        prev_start = Some(segment.start);

        let Some(words) = segment.words.as_deref().filter(|w| !w.is_empty()) else {
            skipped_segments += 1;
            continue;
        };

        for word in words {
            let raw = word.word.trim();
            if raw.is_empty() {
                continue;
            }
            tokens.push(TimedToken {
                index: tokens.len(),
                text: raw.to_string(),
                norm: normalize_word(raw),
                start: word.start,
                end: word.end,
            });
        }
    }

    tracing::debug!(
        segment_count = segments.len(),
        skipped_segments,
        timed_token_count = tokens.len(),
        "flatten: collected timed tokens"
    );
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AsrWord;

    fn word(w: &str, start: f64, end: f64) -> AsrWord {
        AsrWord {
            word: w.to_string(),
            start,
            end,
        }
    }

    fn segment(start: f64, end: f64, words: Option<Vec<AsrWord>>) -> AsrSegment {
        AsrSegment {
            start,
            end,
            text: String::new(),
            words,
        }
    }

    #[test]
    fn empty_segments_produce_no_tokens() {
        assert!(flatten_segments(&[]).is_empty());
    }

    #[test]
    fn reindexes_across_segments() {
        let segments = vec![
            segment(0.0, 1.0, Some(vec![word(" Hello", 0.0, 0.4), word("world.", 0.4, 1.0)])),
            segment(1.0, 2.0, Some(vec![word("Again", 1.1, 1.5)])),
        ];
        let tokens = flatten_segments(&segments);
        let indices: Vec<usize> = tokens.iter().map(|t| t.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(tokens[0].text, "Hello");
        assert_eq!(tokens[1].norm, "world");
        assert_eq!(tokens[2].start, 1.1);
        assert_eq!(tokens[2].end, 1.5);
    }

    #[test]
    fn segments_without_words_are_skipped() {
        let segments = vec![
            segment(0.0, 1.0, None),
            segment(1.0, 2.0, Some(Vec::new())),
            segment(2.0, 3.0, Some(vec![word("only", 2.0, 2.5)])),
        ];
        let tokens = flatten_segments(&segments);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].index, 0);
        assert_eq!(tokens[0].text, "only");
    }

    #[test]
    fn blank_words_are_skipped_without_gaps_in_index() {
        let segments = vec![segment(
            0.0,
            1.0,
            Some(vec![word("a", 0.0, 0.1), word("   ", 0.1, 0.2), word("b", 0.2, 0.3)]),
        )];
        let tokens = flatten_segments(&segments);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].index, 1);
        assert_eq!(tokens[1].text, "b");
    }

    #[test]
    fn out_of_order_segments_keep_given_order() {
        let segments = vec![
            segment(5.0, 6.0, Some(vec![word("late", 5.0, 5.5)])),
            segment(0.0, 1.0, Some(vec![word("early", 0.0, 0.5)])),
        ];
        let tokens = flatten_segments(&segments);
        assert_eq!(tokens[0].text, "late");
        assert_eq!(tokens[1].text, "early");
    }
}
