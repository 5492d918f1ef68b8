//! Cosine similarity on dense `f64` vectors.

use crate::error::{CoreError, CoreResult};

/// Euclidean norm.
#[inline]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine from a precomputed dot product and norms.
#[inline]
pub(crate) fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Cosine similarity of two vectors of equal length.
///
/// Returns 0.0 when either vector has zero norm.
///
/// # Errors
///
/// `CoreError::DimensionMismatch` when the lengths differ.
///
/// # Example
///
/// ```rust
/// use photo_graph_core::similarity::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
/// assert!((sim - 1.0).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
/// ```
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> CoreResult<f64> {
    if a.len() != b.len() {
        return Err(CoreError::DimensionMismatch {
            context: "cosine operands".to_string(),
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(cosine_from_parts(dot(a, b), l2_norm(a), l2_norm(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_identical_vectors() {
        let v = [0.3, -0.2, 0.9];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < EPS);
    }

    #[test]
    fn test_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn test_scale_invariant() {
        let a = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 1.0, 0.5]).unwrap();
        let b = cosine_similarity(&[10.0, 20.0, 30.0], &[0.2, 0.1, 0.05]).unwrap();
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = [0.1, 0.5, -0.4];
        let b = [0.7, -0.1, 0.2];
        assert_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_length_mismatch() {
        let err = cosine_similarity(&[1.0; 4], &[1.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DimensionMismatch {
                expected: 4,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_clamped() {
        // Rounding can push |dot| slightly above the norm product.
        let v = [0.1_f64; 1000];
        let s = cosine_similarity(&v, &v).unwrap();
        assert!(s <= 1.0);
    }
}
