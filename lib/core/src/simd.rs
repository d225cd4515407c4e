// Dot product kernels for similarity scoring.
// AVX2/FMA on x86_64, NEON on aarch64, unrolled scalar everywhere else.

#[cfg(target_arch = "x86_64")]
const MIN_DIM_SIZE_AVX: usize = 32;

#[cfg(target_arch = "aarch64")]
const MIN_DIM_SIZE_NEON: usize = 16;

/// Dot product of two equal-length slices. Mismatched lengths score 0.0.
#[inline]
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if a.len() >= MIN_DIM_SIZE_AVX
            && is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("fma")
        {
            return unsafe { dot_product_avx2(a, b) };
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if a.len() >= MIN_DIM_SIZE_NEON && std::arch::is_aarch64_feature_detected!("neon") {
            return unsafe { dot_product_neon(a, b) };
        }
    }

    dot_product_scalar(a, b)
}

/// Euclidean norm
#[inline]
pub fn norm_simd(a: &[f32]) -> f32 {
    dot_product_simd(a, a).sqrt()
}

/// Four independent accumulators so the adds pipeline
#[inline]
pub fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    let chunks = a.len() / 4;
    let mut acc = [0.0f32; 4];

    for c in 0..chunks {
        let i = c * 4;
        acc[0] += a[i] * b[i];
        acc[1] += a[i + 1] * b[i + 1];
        acc[2] += a[i + 2] * b[i + 2];
        acc[3] += a[i + 3] * b[i + 3];
    }

    let mut sum = (acc[0] + acc[1]) + (acc[2] + acc[3]);
    for i in chunks * 4..a.len() {
        sum += a[i] * b[i];
    }
    sum
}

/// 16 floats per iteration across two AVX2 registers
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn dot_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::*;

    let dim = a.len();
    let pa = a.as_ptr();
    let pb = b.as_ptr();
    let mut i = 0;

    let mut sum1 = _mm256_setzero_ps();
    let mut sum2 = _mm256_setzero_ps();

    while i + 16 <= dim {
        sum1 = _mm256_fmadd_ps(_mm256_loadu_ps(pa.add(i)), _mm256_loadu_ps(pb.add(i)), sum1);
        sum2 = _mm256_fmadd_ps(
            _mm256_loadu_ps(pa.add(i + 8)),
            _mm256_loadu_ps(pb.add(i + 8)),
            sum2,
        );
        i += 16;
    }

    let mut lanes = [0.0f32; 8];
    _mm256_storeu_ps(lanes.as_mut_ptr(), _mm256_add_ps(sum1, sum2));
    let mut dot: f32 = lanes.iter().sum();

    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }
    dot
}

/// 8 floats per iteration across two NEON registers
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn dot_product_neon(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::aarch64::*;

    let dim = a.len();
    let pa = a.as_ptr();
    let pb = b.as_ptr();
    let mut i = 0;

    let mut sum1 = vdupq_n_f32(0.0);
    let mut sum2 = vdupq_n_f32(0.0);

    while i + 8 <= dim {
        sum1 = vfmaq_f32(sum1, vld1q_f32(pa.add(i)), vld1q_f32(pb.add(i)));
        sum2 = vfmaq_f32(sum2, vld1q_f32(pa.add(i + 4)), vld1q_f32(pb.add(i + 4)));
        i += 8;
    }

    let mut dot = vaddvq_f32(vaddq_f32(sum1, sum2));
    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }
    dot
}
