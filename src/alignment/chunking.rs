use crate::types::{ChunkTiming, WordAlignment};

/// Byte positions where chunks begin and end.
///
/// A boundary follows every newline, and every terminator that is followed
/// by whitespace or the end of the text. `0` and `text.len()` are always
/// included; positions strictly increase.
pub fn sentence_boundaries(text: &str, terminators: &[char]) -> Vec<usize> {
    let mut boundaries = vec![0];
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let after = i + c.len_utf8();
        if c == '\n' {
            boundaries.push(after);
        } else if terminators.contains(&c) {
            let ends_sentence = chars
                .peek()
                .map_or(true, |&(_, next)| next.is_whitespace());
            if ends_sentence {
                boundaries.push(after);
            }
        }
    }

    if boundaries.last() != Some(&text.len()) {
        boundaries.push(text.len());
    }
    boundaries
}

/// Split `text` into sentence/paragraph chunks and derive chunk timing from
/// the (already interpolated) word timings.
///
/// Chunk offsets are the raw boundaries; the stored text is trimmed, and
/// spans that trim to nothing are dropped. Each word belongs to the chunk
/// containing its midpoint, if any.
pub fn build_chunks(text: &str, words: &[WordAlignment], terminators: &[char]) -> Vec<ChunkTiming> {
    let boundaries = sentence_boundaries(text, terminators);

    let mut chunks: Vec<ChunkTiming> = boundaries
        .windows(2)
        .filter_map(|span| {
            let (start, end) = (span[0], span[1]);
            let trimmed = text[start..end].trim();
            (!trimmed.is_empty()).then(|| (start, end, trimmed.to_string()))
        })
        .enumerate()
        .map(|(index, (char_start, char_end, text))| ChunkTiming {
            index,
            text,
            char_start,
            char_end,
            start: None,
            end: None,
            word_indices: Vec::new(),
        })
        .collect();

    let mut unassigned = 0usize;
    for word in words {
        // Compare doubled positions so the midpoint stays integral.
        let mid2 = word.char_start + word.char_end;
        let pos = chunks.partition_point(|c| 2 * c.char_end <= mid2);
        let Some(chunk) = chunks.get_mut(pos).filter(|c| 2 * c.char_start <= mid2) else {
            unassigned += 1;
            continue;
        };

        chunk.word_indices.push(word.index);
        if let Some(start) = word.start.filter(|s| s.is_finite()) {
            chunk.start = Some(chunk.start.map_or(start, |cur| cur.min(start)));
        }
        if let Some(end) = word.end.filter(|e| e.is_finite()) {
            chunk.end = Some(chunk.end.map_or(end, |cur| cur.max(end)));
        }
    }

    tracing::debug!(
        boundary_count = boundaries.len(),
        chunk_count = chunks.len(),
        unassigned_words = unassigned,
        "chunking: built chunks"
    );
    chunks
}
