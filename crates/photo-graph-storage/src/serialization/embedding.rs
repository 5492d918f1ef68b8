//! Raw little-endian f64 encoding for embeddings and edge weights.

use super::error::SerializationError;

const F64_SIZE: usize = std::mem::size_of::<f64>();

/// Encodes an embedding as `len * 8` little-endian bytes.
pub fn serialize_embedding(embedding: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * F64_SIZE);
    for value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decodes bytes written by [`serialize_embedding`].
///
/// # Errors
///
/// `InvalidEmbeddingSize` if the length is not a multiple of 8.
pub fn deserialize_embedding(bytes: &[u8]) -> Result<Vec<f64>, SerializationError> {
    if bytes.len() % F64_SIZE != 0 {
        return Err(SerializationError::InvalidEmbeddingSize {
            element_size: F64_SIZE,
            actual: bytes.len(),
        });
    }

    bytes
        .chunks_exact(F64_SIZE)
        .map(|chunk| {
            chunk
                .try_into()
                .map(f64::from_le_bytes)
                .map_err(|_| SerializationError::DeserializeFailed("short f64 chunk".into()))
        })
        .collect()
}

#[inline]
pub fn serialize_weight(weight: f64) -> [u8; F64_SIZE] {
    weight.to_le_bytes()
}

/// # Errors
///
/// `InvalidEmbeddingSize` unless `bytes` is exactly 8 long.
pub fn deserialize_weight(bytes: &[u8]) -> Result<f64, SerializationError> {
    let raw: [u8; F64_SIZE] = bytes
        .try_into()
        .map_err(|_| SerializationError::InvalidEmbeddingSize {
            element_size: F64_SIZE,
            actual: bytes.len(),
        })?;
    Ok(f64::from_le_bytes(raw))
}
