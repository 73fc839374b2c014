//! RLWE ciphertext and key types.
//!
//! Ring-LWE over R_Q = Z_Q[X]/(X^N + 1).

use crate::lwe::LweSecretKey;
use crate::math::Poly;
use serde::{Deserialize, Serialize};

/// RLWE secret key: small ring polynomial in centered representation.
///
/// Coefficients stay signed so the same key material serves both the
/// accumulator modulus Q and, through [`RlweSecretKey::to_lwe_key`], the
/// key-switching modulus after sample extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlweSecretKey {
    /// Secret polynomial coefficients, centered around zero
    pub coeffs: Vec<i64>,
}

/// RLWE ciphertext: (a, b) ∈ R_Q × R_Q with b = a·z + e + m.
///
/// The message polynomial is carried unscaled; the bootstrapping
/// accumulator stores values already positioned on the Q-torus.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RlweCiphertext {
    /// Mask polynomial in R_Q
    pub a: Poly,
    /// Body polynomial: b = a·z + e + m
    pub b: Poly,
}

impl RlweSecretKey {
    /// Create a secret key from centered coefficients
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        Self { coeffs }
    }

    /// Ring dimension N
    pub fn dimension(&self) -> usize {
        self.coeffs.len()
    }

    /// The LWE key extracted ciphertexts decrypt under.
    ///
    /// Sample extraction at coefficient 0 negates the wrapped mask
    /// coefficients, so the LWE key is the ring key verbatim.
    pub fn to_lwe_key(&self) -> LweSecretKey {
        LweSecretKey::from_coeffs(self.coeffs.clone())
    }
}

impl RlweCiphertext {
    /// Create a ciphertext from component polynomials
    pub fn from_parts(a: Poly, b: Poly) -> Self {
        debug_assert_eq!(
            a.dimension(),
            b.dimension(),
            "Ciphertext polynomials must have same dimension"
        );
        debug_assert_eq!(
            a.modulus(),
            b.modulus(),
            "Ciphertext polynomials must have same modulus"
        );
        Self { a, b }
    }

    /// Ring dimension N
    pub fn ring_dim(&self) -> usize {
        self.a.dimension()
    }

    /// Modulus Q
    pub fn modulus(&self) -> u64 {
        self.a.modulus()
    }
}
