use num::Float;

/// Dot product of two dense vectors.
///
/// # Arguments
/// * `a`, `b` - vectors of the same dimension (the shorter one bounds the sum)
///
/// # Returns
/// * `N` - Σ aᵢ·bᵢ
#[inline]
pub fn dot<N: Float>(a: &[N], b: &[N]) -> N {
    debug_assert_eq!(a.len(), b.len(), "Vectors must be of the same length to compute dot product.");
    a.iter().zip(b).fold(N::zero(), |acc, (&x, &y)| acc + x * y)
}

#[inline]
pub fn norm_sq<N: Float>(a: &[N]) -> N {
    a.iter().fold(N::zero(), |acc, &x| acc + x * x)
}

#[inline]
pub fn norm<N: Float>(a: &[N]) -> N {
    norm_sq(a).sqrt()
}

/// Cosine similarity
/// cosθ = A・B / (|A||B|)
///
/// A zero-magnitude side yields `0`, never NaN.
pub fn cosine_similarity<N: Float>(a: &[N], b: &[N]) -> N {
    let denom = norm(a) * norm(b);
    if denom == N::zero() {
        return N::zero();
    }
    dot(a, b) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_norm() {
        let a = [1.0_f64, 2.0, 3.0];
        let b = [4.0_f64, 5.0, 6.0];
        assert_eq!(dot(&a, &b), 32.0);
        assert_eq!(norm_sq(&a), 14.0);
        assert!((norm(&[3.0_f32, 4.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_parallel_and_orthogonal_vectors() {
        let a = [1.0_f64, 1.0, 0.0];
        assert!((cosine_similarity(&a, &[2.0, 2.0, 0.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0, 5.0]), 0.0);
        assert!((cosine_similarity(&a, &[-1.0, -1.0, 0.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let zero = [0.0_f64; 3];
        assert_eq!(cosine_similarity(&zero, &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
        assert_eq!(cosine_similarity::<f64>(&[], &[]), 0.0);
    }
}
