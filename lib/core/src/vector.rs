use serde::{Deserialize, Serialize};

/// A dense embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Plain dot product. Equals cosine similarity when both sides are unit length.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        crate::simd::dot_product_simd(&self.data, &other.data)
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        crate::simd::norm_simd(&self.data)
    }

    /// Scale to unit length. Zero vectors are left untouched.
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let v = Vector::new(vec![3.0, 4.0]).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.as_slice()[0] - 0.6).abs() < 1e-6);

        let mut zero = Vector::new(vec![0.0, 0.0]);
        zero.normalize();
        assert_eq!(zero.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_dot_of_unit_vectors_is_cosine() {
        // |a| = |b| = 3, a.b = 8
        let a = Vector::new(vec![1.0, 2.0, 2.0]).normalized();
        let b = Vector::new(vec![2.0, 1.0, 2.0]).normalized();
        assert!((a.dot(&b) - 8.0 / 9.0).abs() < 1e-6);

        let x = Vector::new(vec![1.0, 0.0]);
        let y = Vector::new(vec![0.0, 1.0]);
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(x.dot(&x), 1.0);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let v = Vector::new(vec![0.5, 0.25]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,0.25]");
        let parsed: Vector = serde_json::from_str("[1.0,2.0]").unwrap();
        assert_eq!(parsed.dim(), 2);
    }
}
