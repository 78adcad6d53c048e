//! Embedding BLOB codec: little-endian f64, eight bytes per component.
//!
//! Embeddings are stored exactly (no quantization) so that a stored vector is
//! bit-identical to the one the embedder produced for the title.

/// Encode an embedding as little-endian f64 bytes.
pub fn encode_embedding(embedding: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 8);
    for v in embedding {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode little-endian f64 bytes.
///
/// Returns `None` for an empty blob or one whose length is not a multiple of
/// eight; both are treated as "no embedding".
pub fn decode_embedding(bytes: &[u8]) -> Option<Vec<f64>> {
    if bytes.is_empty() || bytes.len() % 8 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(8)
            .filter_map(|c| c.try_into().ok().map(f64::from_le_bytes))
            .collect(),
    )
}
