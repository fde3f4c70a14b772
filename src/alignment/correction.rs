use crate::alignment::edit_distance::finite;
use crate::error::AlignmentError;
use crate::types::{AlignmentResult, ChunkTimingPatch};

/// Apply manual chunk timing corrections to a finished alignment.
///
/// Only `start`/`end` of the addressed chunks change; text, offsets, word
/// membership, indexing and word timings are kept. Non-finite values are
/// stored as `None`. Patches are validated up front: if any names a chunk
/// that does not exist, nothing is applied.
pub fn apply_chunk_corrections(
    result: &AlignmentResult,
    patches: &[ChunkTimingPatch],
) -> Result<AlignmentResult, AlignmentError> {
    if let Some(bad) = patches.iter().find(|p| p.index >= result.chunks.len()) {
        return Err(AlignmentError::invalid_input(format!(
            "chunk {} does not exist ({} chunks)",
            bad.index,
            result.chunks.len()
        )));
    }

    let mut corrected = result.clone();
    for patch in patches {
        // Chunk indices are 0..k in order, so the index is the position.
        let chunk = &mut corrected.chunks[patch.index];
        chunk.start = patch.start.and_then(finite);
        chunk.end = patch.end.and_then(finite);
    }

    tracing::debug!(
        patch_count = patches.len(),
        chunk_count = corrected.chunks.len(),
        "correction: applied chunk timing patches"
    );
    Ok(corrected)
}
