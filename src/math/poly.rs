//! Polynomial operations over R_Q = Z_Q[X]/(X^N + 1).
//!
//! Provides polynomial arithmetic using NTT for efficient multiplication.
//! Polynomials can exist in either coefficient domain or NTT domain.
//!
//! # Overview
//!
//! The negacyclic ring R_Q = Z_Q[X]/(X^N + 1) hosts the bootstrapping
//! accumulator. This module provides:
//!
//! - Basic arithmetic: addition, subtraction, negation, scalar multiplication
//! - NTT-based multiplication for O(n log n) performance
//! - Monomial multiplication (X^k rotations) for blind rotation
//! - Domain conversion between coefficient and NTT representations
//! - Random and Gaussian polynomial sampling
//!
//! # Example
//!
//! ```
//! use binfhe::math::{Poly, NttContext};
//!
//! let q = 134_215_681;
//! let ctx = NttContext::new(256, q);
//!
//! let a = Poly::random(256, q);
//! let b = Poly::random(256, q);
//!
//! // Multiply using NTT
//! let product = a.mul_ntt(&b, &ctx);
//! ```

use super::gaussian::GaussianSampler;
use super::modular::ModQ;
use super::ntt::NttContext;
use rand::Rng;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Polynomial in R_Q = Z_Q[X]/(X^N + 1).
///
/// Represents a polynomial with coefficients in Z_Q, reduced modulo
/// X^N + 1. Polynomials can be in coefficient domain or NTT domain; the
/// `is_ntt` tag travels with the value so domain mismatches are caught at
/// run time.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Poly {
    /// Coefficients in coefficient or NTT domain.
    coeffs: Vec<u64>,
    /// Modulus q.
    q: u64,
    /// Whether coefficients are in NTT domain.
    is_ntt: bool,
}

impl Poly {
    /// Create zero polynomial with given dimension and modulus
    pub fn zero(dim: usize, q: u64) -> Self {
        Self {
            coeffs: vec![0; dim],
            q,
            is_ntt: false,
        }
    }

    /// Create polynomial from coefficient vector
    pub fn from_coeffs(coeffs: Vec<u64>, q: u64) -> Self {
        let mut p = Self {
            coeffs,
            q,
            is_ntt: false,
        };
        p.reduce();
        p
    }

    /// Create polynomial with a single coefficient (constant polynomial)
    pub fn constant(value: u64, dim: usize, q: u64) -> Self {
        let mut coeffs = vec![0; dim];
        coeffs[0] = value % q;
        Self {
            coeffs,
            q,
            is_ntt: false,
        }
    }

    /// Create the monomial c·X^e with e taken modulo 2N.
    ///
    /// Exponents in [N, 2N) wrap negacyclically: X^(N+j) = -X^j.
    pub fn monomial(value: u64, exp: usize, dim: usize, q: u64) -> Self {
        let e = exp % (2 * dim);
        let mut coeffs = vec![0; dim];
        if e < dim {
            coeffs[e] = value % q;
        } else {
            coeffs[e - dim] = ModQ::negate(value % q, q);
        }
        Self {
            coeffs,
            q,
            is_ntt: false,
        }
    }

    /// Sample polynomial with coefficients from discrete Gaussian distribution
    pub fn sample_gaussian(dim: usize, q: u64, sampler: &mut GaussianSampler) -> Self {
        let coeffs = sampler.sample_vec_centered(dim, q);
        Self {
            coeffs,
            q,
            is_ntt: false,
        }
    }

    /// Generate a uniformly random polynomial
    pub fn random(dim: usize, q: u64) -> Self {
        let mut rng = rand::thread_rng();
        Self::random_with_rng(dim, q, &mut rng)
    }

    /// Generate a uniformly random polynomial with given RNG
    pub fn random_with_rng<R: Rng>(dim: usize, q: u64, rng: &mut R) -> Self {
        let coeffs: Vec<u64> = (0..dim).map(|_| rng.gen_range(0..q)).collect();
        Self {
            coeffs,
            q,
            is_ntt: false,
        }
    }

    /// Get polynomial dimension
    pub fn dimension(&self) -> usize {
        self.coeffs.len()
    }

    /// Get modulus
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// Check if in NTT domain
    pub fn is_ntt(&self) -> bool {
        self.is_ntt
    }

    /// Get coefficient at index (only valid if not in NTT domain)
    pub fn coeff(&self, i: usize) -> u64 {
        assert!(!self.is_ntt, "Cannot access coefficients in NTT domain");
        self.coeffs[i]
    }

    /// Set coefficient at index (only valid if not in NTT domain)
    pub fn set_coeff(&mut self, i: usize, value: u64) {
        assert!(!self.is_ntt, "Cannot set coefficients in NTT domain");
        self.coeffs[i] = value % self.q;
    }

    /// Get reference to coefficient/NTT vector
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Reduce all coefficients modulo q
    fn reduce(&mut self) {
        for c in &mut self.coeffs {
            *c %= self.q;
        }
    }

    /// Convert to NTT domain
    pub fn to_ntt(&mut self, ctx: &NttContext) {
        if !self.is_ntt {
            ctx.forward(&mut self.coeffs);
            self.is_ntt = true;
        }
    }

    /// Convert from NTT domain to coefficient domain
    pub fn from_ntt(&mut self, ctx: &NttContext) {
        if self.is_ntt {
            ctx.inverse(&mut self.coeffs);
            self.is_ntt = false;
        }
    }

    /// Create a copy in NTT domain
    pub fn to_ntt_new(&self, ctx: &NttContext) -> Self {
        let mut result = self.clone();
        result.to_ntt(ctx);
        result
    }

    /// Scalar multiplication
    pub fn scalar_mul(&self, scalar: u64) -> Self {
        let scalar = scalar % self.q;
        let coeffs: Vec<u64> = self
            .coeffs
            .iter()
            .map(|&c| ((c as u128 * scalar as u128) % self.q as u128) as u64)
            .collect();

        Self {
            coeffs,
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }

    /// Multiply by the monomial X^k (k taken modulo 2N).
    ///
    /// In the negacyclic ring X^N = -1, so coefficients that wrap past the
    /// top flip sign. This is the rotation primitive of blind rotation and
    /// costs O(N) with no NTT.
    pub fn mul_monomial(&self, k: usize) -> Self {
        assert!(!self.is_ntt, "Monomial rotation requires coefficient domain");
        let n = self.coeffs.len();
        let q = self.q;
        let k = k % (2 * n);

        let mut coeffs = vec![0u64; n];
        if k < n {
            // res[i] = a[i-k] for i >= k, res[i] = -a[i-k+n] for i < k
            for i in 0..k {
                coeffs[i] = ModQ::negate(self.coeffs[n - k + i], q);
            }
            for i in k..n {
                coeffs[i] = self.coeffs[i - k];
            }
        } else {
            let k = k - n;
            // X^(n+k) = -X^k: same shift with all signs flipped
            for i in 0..k {
                coeffs[i] = self.coeffs[n - k + i];
            }
            for i in k..n {
                coeffs[i] = ModQ::negate(self.coeffs[i - k], q);
            }
        }

        Self {
            coeffs,
            q,
            is_ntt: false,
        }
    }

    /// Polynomial multiplication using NTT (negacyclic for X^N + 1)
    pub fn mul_ntt(&self, other: &Self, ctx: &NttContext) -> Self {
        assert_eq!(self.q, other.q, "Moduli must match");
        assert_eq!(
            self.coeffs.len(),
            other.coeffs.len(),
            "Dimensions must match"
        );

        let mut a = self.clone();
        let mut b = other.clone();

        a.to_ntt(ctx);
        b.to_ntt(ctx);

        let mut result = vec![0u64; self.coeffs.len()];
        ctx.pointwise_mul(&a.coeffs, &b.coeffs, &mut result);

        let mut poly = Self {
            coeffs: result,
            q: self.q,
            is_ntt: true,
        };
        poly.from_ntt(ctx);
        poly
    }

    /// Polynomial multiplication when both are already in NTT domain
    pub fn mul_ntt_domain(&self, other: &Self, ctx: &NttContext) -> Self {
        assert!(
            self.is_ntt && other.is_ntt,
            "Both polynomials must be in NTT domain"
        );
        assert_eq!(self.q, other.q, "Moduli must match");

        let mut result = vec![0u64; self.coeffs.len()];
        ctx.pointwise_mul(&self.coeffs, &other.coeffs, &mut result);

        Self {
            coeffs: result,
            q: self.q,
            is_ntt: true,
        }
    }

    /// In-place multiply-accumulate in NTT domain: self += a * b
    ///
    /// Single pass multiply-add without intermediate allocation; this is
    /// the inner loop of the external product.
    pub fn mul_acc_ntt_domain(&mut self, a: &Self, b: &Self, ctx: &NttContext) {
        assert!(
            self.is_ntt && a.is_ntt && b.is_ntt,
            "All polynomials must be in NTT domain"
        );
        assert_eq!(self.q, a.q, "Moduli must match");
        assert_eq!(self.q, b.q, "Moduli must match");

        let q = self.q;
        for i in 0..self.coeffs.len() {
            let prod = ctx.pointwise_mul_single(a.coeffs[i], b.coeffs[i]);
            let sum = self.coeffs[i] + prod;
            self.coeffs[i] = if sum >= q { sum - q } else { sum };
        }
    }

    /// Check if polynomial is zero
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// L-infinity norm (maximum absolute coefficient value in the
    /// centered representation)
    pub fn linf_norm(&self) -> u64 {
        assert!(!self.is_ntt, "Cannot compute norm in NTT domain");
        self.coeffs
            .iter()
            .map(|&c| if c <= self.q / 2 { c } else { self.q - c })
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q && self.is_ntt == other.is_ntt && self.coeffs == other.coeffs
    }
}

impl Eq for Poly {}

impl Add for Poly {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(self.q, rhs.q, "Moduli must match");
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        let coeffs: Vec<u64> = self
            .coeffs
            .iter()
            .zip(rhs.coeffs.iter())
            .map(|(&a, &b)| {
                let sum = a + b;
                if sum >= self.q {
                    sum - self.q
                } else {
                    sum
                }
            })
            .collect();

        Poly {
            coeffs,
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }
}

impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, rhs: &Self) {
        assert_eq!(self.q, rhs.q, "Moduli must match");
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            let sum = *a + b;
            *a = if sum >= self.q { sum - self.q } else { sum };
        }
    }
}

impl Sub for Poly {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(self.q, rhs.q, "Moduli must match");
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        let coeffs: Vec<u64> = self
            .coeffs
            .iter()
            .zip(rhs.coeffs.iter())
            .map(|(&a, &b)| if a >= b { a - b } else { self.q - b + a })
            .collect();

        Poly {
            coeffs,
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }
}

impl SubAssign<&Poly> for Poly {
    fn sub_assign(&mut self, rhs: &Self) {
        assert_eq!(self.q, rhs.q, "Moduli must match");
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a = if *a >= b { *a - b } else { self.q - b + *a };
        }
    }
}

impl Neg for Poly {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Self::Output {
        let coeffs: Vec<u64> = self
            .coeffs
            .iter()
            .map(|&c| if c == 0 { 0 } else { self.q - c })
            .collect();

        Poly {
            coeffs,
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: u64 = 134_215_681;

    fn make_ctx(n: usize) -> NttContext {
        NttContext::new(n, Q)
    }

    #[test]
    fn test_zero_polynomial() {
        let p = Poly::zero(256, Q);
        assert!(p.is_zero());
        assert_eq!(p.dimension(), 256);
    }

    #[test]
    fn test_constant_polynomial() {
        let p = Poly::constant(42, 256, Q);
        assert_eq!(p.coeff(0), 42);
        assert!(p.coeffs()[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_monomial_wraparound() {
        let n = 16;
        // X^(n+3) = -X^3
        let p = Poly::monomial(5, n + 3, n, Q);
        assert_eq!(p.coeff(3), Q - 5);
        // X^(2n) = 1
        let p = Poly::monomial(5, 2 * n, n, Q);
        assert_eq!(p.coeff(0), 5);
    }

    #[test]
    fn test_addition() {
        let a = Poly::from_coeffs(vec![1, 2, 3, 4], Q);
        let b = Poly::from_coeffs(vec![5, 6, 7, 8], Q);
        let c = &a + &b;

        assert_eq!(c.coeff(0), 6);
        assert_eq!(c.coeff(1), 8);
        assert_eq!(c.coeff(2), 10);
        assert_eq!(c.coeff(3), 12);
    }

    #[test]
    fn test_subtraction_underflow() {
        let a = Poly::from_coeffs(vec![5, 6, 7, 8], Q);
        let b = Poly::from_coeffs(vec![10, 20, 30, 40], Q);
        let c = &a - &b;

        assert_eq!(c.coeff(0), Q - 5);
        assert_eq!(c.coeff(1), Q - 14);
    }

    #[test]
    fn test_negation() {
        let a = Poly::from_coeffs(vec![1, 2, 3, 0], Q);
        let neg_a = -&a;

        assert_eq!(neg_a.coeff(0), Q - 1);
        assert_eq!(neg_a.coeff(1), Q - 2);
        assert_eq!(neg_a.coeff(2), Q - 3);
        assert_eq!(neg_a.coeff(3), 0);

        let sum = &a + &neg_a;
        assert!(sum.is_zero());
    }

    #[test]
    fn test_scalar_multiplication() {
        let a = Poly::from_coeffs(vec![1, 2, 3, 4], Q);
        let b = a.scalar_mul(10);

        assert_eq!(b.coeff(0), 10);
        assert_eq!(b.coeff(1), 20);
        assert_eq!(b.coeff(2), 30);
        assert_eq!(b.coeff(3), 40);
    }

    #[test]
    fn test_ntt_roundtrip() {
        let ctx = make_ctx(256);
        let mut p = Poly::from_coeffs((0..256).collect(), Q);

        let original = p.clone();
        p.to_ntt(&ctx);
        assert!(p.is_ntt());
        p.from_ntt(&ctx);
        assert!(!p.is_ntt());

        assert_eq!(p, original);
    }

    #[test]
    fn test_poly_mul_ntt_identity() {
        let n = 256;
        let ctx = make_ctx(n);

        // a(x) * 1 = a(x)
        let a = Poly::from_coeffs((0..n as u64).collect(), Q);
        let one = Poly::constant(1, n, Q);

        let result = a.mul_ntt(&one, &ctx);
        assert_eq!(result, a);
    }

    #[test]
    fn test_poly_mul_ntt_simple() {
        let n = 256;
        let ctx = make_ctx(n);

        // (1 + x) * (1 + x) = 1 + 2x + x^2
        let mut coeffs = vec![0u64; n];
        coeffs[0] = 1;
        coeffs[1] = 1;
        let a = Poly::from_coeffs(coeffs, Q);

        let result = a.mul_ntt(&a, &ctx);

        assert_eq!(result.coeff(0), 1);
        assert_eq!(result.coeff(1), 2);
        assert_eq!(result.coeff(2), 1);
        assert!(result.coeffs()[3..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_poly_mul_ntt_negacyclic() {
        // In R_q = Z_q[X]/(X^n + 1), x * x^(n-1) = x^n = -1
        let n = 256;
        let ctx = make_ctx(n);

        let a = Poly::monomial(1, 1, n, Q);
        let b = Poly::monomial(1, n - 1, n, Q);

        let result = a.mul_ntt(&b, &ctx);

        assert_eq!(result.coeff(0), Q - 1);
        assert!(result.coeffs()[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_mul_monomial_matches_ntt_mul() {
        let n = 256;
        let ctx = make_ctx(n);

        let a = Poly::from_coeffs((0..n as u64).map(|i| (i * 31) % Q).collect(), Q);

        for k in [0usize, 1, 7, n - 1, n, n + 5, 2 * n - 1] {
            let rotated = a.mul_monomial(k);
            let expected = a.mul_ntt(&Poly::monomial(1, k, n, Q), &ctx);
            assert_eq!(rotated, expected, "rotation by X^{} mismatch", k);
        }
    }

    #[test]
    fn test_mul_monomial_full_cycle_negates() {
        let n = 64;
        let a = Poly::from_coeffs((0..n as u64).collect(), Q);

        // X^n = -1
        let rotated = a.mul_monomial(n);
        assert_eq!(rotated, -&a);

        // X^(2n) = 1
        let full = a.mul_monomial(2 * n);
        assert_eq!(full, a);
    }

    #[test]
    fn test_poly_mul_distributivity() {
        let n = 256;
        let ctx = make_ctx(n);

        let a = Poly::from_coeffs((0..n as u64).map(|i| i % 50).collect(), Q);
        let b = Poly::from_coeffs((0..n as u64).map(|i| (i * 3) % 50).collect(), Q);
        let c = Poly::from_coeffs((0..n as u64).map(|i| (i * 5) % 50).collect(), Q);

        // a * (b + c)
        let b_plus_c = &b + &c;
        let left = a.mul_ntt(&b_plus_c, &ctx);

        // a * b + a * c
        let ab = a.mul_ntt(&b, &ctx);
        let ac = a.mul_ntt(&c, &ctx);
        let right = &ab + &ac;

        assert_eq!(left, right);
    }

    #[test]
    fn test_ntt_domain_multiplication() {
        let n = 256;
        let ctx = make_ctx(n);

        let a = Poly::from_coeffs((0..n as u64).map(|i| i % 100).collect(), Q);
        let b = Poly::from_coeffs((0..n as u64).map(|i| (i * 7) % 100).collect(), Q);

        // Standard multiplication
        let result1 = a.mul_ntt(&b, &ctx);

        // NTT domain multiplication
        let a_ntt = a.to_ntt_new(&ctx);
        let b_ntt = b.to_ntt_new(&ctx);
        let mut result2 = a_ntt.mul_ntt_domain(&b_ntt, &ctx);
        result2.from_ntt(&ctx);

        assert_eq!(result1, result2);
    }

    #[test]
    fn test_mul_acc_ntt_domain() {
        let n = 256;
        let ctx = make_ctx(n);

        let a = Poly::from_coeffs((0..n as u64).map(|i| i % 100).collect(), Q);
        let b = Poly::from_coeffs((0..n as u64).map(|i| (i * 7) % 100).collect(), Q);
        let c = Poly::from_coeffs((0..n as u64).map(|i| (i * 13) % 100).collect(), Q);

        // acc = c + a*b via fused accumulate
        let mut acc = c.to_ntt_new(&ctx);
        let a_ntt = a.to_ntt_new(&ctx);
        let b_ntt = b.to_ntt_new(&ctx);
        acc.mul_acc_ntt_domain(&a_ntt, &b_ntt, &ctx);
        acc.from_ntt(&ctx);

        let expected = &c + &a.mul_ntt(&b, &ctx);
        assert_eq!(acc, expected);
    }

    #[test]
    fn test_linf_norm() {
        let mut coeffs = vec![0u64; 16];
        coeffs[0] = 100;
        coeffs[1] = Q - 50; // represents -50
        let p = Poly::from_coeffs(coeffs, Q);

        assert_eq!(p.linf_norm(), 100);
    }
}
