//! LWE ciphertext and key types

use serde::{Deserialize, Serialize};

/// LWE secret key: coefficient vector in centered representation.
///
/// Coefficients are kept as signed integers so the same key can be
/// viewed modulo every modulus of the bootstrapping pipeline (q, qKS).
/// Ternary keys hold values in {-1, 0, 1}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweSecretKey {
    /// Secret key coefficients, centered around zero
    pub coeffs: Vec<i64>,
    /// Dimension of the key
    pub dim: usize,
}

/// LWE ciphertext: (a, b) with b = <a, s> + e + Δ·m
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweCiphertext {
    /// Mask vector in Z_q^n
    pub a: Vec<u64>,
    /// Body in Z_q: b = <a, s> + e + Δ·m
    pub b: u64,
    /// Ciphertext modulus
    pub q: u64,
}

impl LweCiphertext {
    /// Dimension of the mask vector
    pub fn dimension(&self) -> usize {
        self.a.len()
    }

    /// Ciphertext modulus
    pub fn modulus(&self) -> u64 {
        self.q
    }
}
