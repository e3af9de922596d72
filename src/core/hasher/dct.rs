//! Low-frequency corner of an orthonormal 2-D DCT-II.
//!
//! Only the top-left `k` x `k` coefficients of an `n` x `n` transform are
//! computed, as two separable passes (rows, then columns), which costs
//! O(n²k) instead of O(n⁴).

use std::f64::consts::PI;

/// Coefficients `[v * k + u]` for vertical frequency `v` and horizontal
/// frequency `u`, both below `k`. `pixels` is row-major `n` x `n`.
pub fn low_frequency_block(pixels: &[f64], n: usize, k: usize) -> Vec<f64> {
    debug_assert_eq!(pixels.len(), n * n);
    debug_assert!(k <= n);

    // cos_table[f * n + x] = cos((2x + 1) f π / 2n)
    let cos_table: Vec<f64> = (0..k)
        .flat_map(|f| {
            (0..n).map(move |x| ((2 * x + 1) as f64 * f as f64 * PI / (2.0 * n as f64)).cos())
        })
        .collect();

    let scale = |f: usize| {
        if f == 0 {
            (1.0 / n as f64).sqrt()
        } else {
            (2.0 / n as f64).sqrt()
        }
    };

    // Rows: n rows x k horizontal frequencies
    let mut rows = vec![0.0; n * k];
    for y in 0..n {
        let row = &pixels[y * n..(y + 1) * n];
        for u in 0..k {
            let basis = &cos_table[u * n..(u + 1) * n];
            let sum: f64 = row.iter().zip(basis).map(|(p, c)| p * c).sum();
            rows[y * k + u] = scale(u) * sum;
        }
    }

    // Columns: k vertical frequencies x k horizontal frequencies
    let mut block = vec![0.0; k * k];
    for v in 0..k {
        let basis = &cos_table[v * n..(v + 1) * n];
        for u in 0..k {
            let sum: f64 = (0..n).map(|y| rows[y * k + u] * basis[y]).sum();
            block[v * k + u] = scale(v) * sum;
        }
    }

    block
}
