use serde::Serialize;

use crate::types::{AlignmentResult, WordAlignment};

/// Structural summary of one alignment run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub counts: AlignmentCounts,
    pub structural: StructuralMetrics,
    /// Share of original words that got a timing directly from ASR.
    /// `None` when the text has no words.
    pub match_ratio: Option<f32>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentCounts {
    pub word_count: u32,
    pub matched_word_count: u32,
    pub interpolated_word_count: u32,
    pub untimed_word_count: u32,
    pub timed_token_count: u32,
    /// Timed tokens that did not end up timing any original word
    /// (insertions, or substitutions lost to deletions).
    pub discarded_timed_token_count: u32,
    pub chunk_count: u32,
    pub untimed_chunk_count: u32,
    pub unassigned_word_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralMetrics {
    pub negative_duration_word_count: u32,
    pub overlap_word_count: u32,
    pub non_monotonic_word_count: u32,
}

/// Build a report from the raw aligner output (before interpolation) and the
/// final result.
pub fn compute_alignment_report(
    raw_words: &[WordAlignment],
    result: &AlignmentResult,
    timed_token_count: usize,
) -> AlignmentReport {
    let mut notes = Vec::new();

    let word_count = result.words.len();
    let matched = raw_words.iter().filter(|w| w.is_anchor()).count();
    let timed_final = result.words.iter().filter(|w| w.is_anchor()).count();
    let interpolated = timed_final.saturating_sub(matched);
    let untimed = word_count - timed_final;

    let assigned: usize = result.chunks.iter().map(|c| c.word_indices.len()).sum();
    let untimed_chunks = result
        .chunks
        .iter()
        .filter(|c| c.start.is_none() || c.end.is_none())
        .count();

    if word_count == 0 {
        notes.push("no_original_words".to_string());
    }
    if timed_token_count == 0 {
        notes.push("no_timed_tokens".to_string());
    }
    if word_count > 0 && matched == 0 {
        notes.push("no_anchors".to_string());
    }
    if raw_words.len() != word_count {
        notes.push(format!(
            "word_count_mismatch:raw={} final={}",
            raw_words.len(),
            word_count
        ));
    }

    let match_ratio = (word_count > 0).then(|| matched as f32 / word_count as f32);

    AlignmentReport {
        counts: AlignmentCounts {
            word_count: to_u32(word_count),
            matched_word_count: to_u32(matched),
            interpolated_word_count: to_u32(interpolated),
            untimed_word_count: to_u32(untimed),
            timed_token_count: to_u32(timed_token_count),
            discarded_timed_token_count: to_u32(timed_token_count.saturating_sub(matched)),
            chunk_count: to_u32(result.chunks.len()),
            untimed_chunk_count: to_u32(untimed_chunks),
            unassigned_word_count: to_u32(word_count.saturating_sub(assigned)),
        },
        structural: compute_structural_metrics(&result.words),
        match_ratio,
        notes,
    }
}

fn compute_structural_metrics(words: &[WordAlignment]) -> StructuralMetrics {
    let timed: Vec<(f64, f64)> = words
        .iter()
        .filter_map(|w| match (w.start, w.end) {
            (Some(s), Some(e)) if s.is_finite() && e.is_finite() => Some((s, e)),
            _ => None,
        })
        .collect();

    // Words are [start, end); an empty or inverted interval counts as negative.
    let negative_duration_word_count = timed.iter().filter(|(s, e)| e <= s).count();

    let mut overlap_word_count = 0usize;
    let mut non_monotonic_word_count = 0usize;
    for pair in timed.windows(2) {
        let (cur_start, cur_end) = pair[0];
        let (next_start, _) = pair[1];
        if next_start < cur_start {
            non_monotonic_word_count += 1;
        } else if next_start < cur_end {
            overlap_word_count += 1;
        }
    }

    StructuralMetrics {
        negative_duration_word_count: to_u32(negative_duration_word_count),
        overlap_word_count: to_u32(overlap_word_count),
        non_monotonic_word_count: to_u32(non_monotonic_word_count),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
