//! RGSW ciphertext and gadget types.
//!
//! Provides types for RGSW encryption and gadget decomposition.

use crate::math::{GaussianSampler, NttContext, Poly};
use crate::rlwe::RlweCiphertext;
use serde::{Deserialize, Serialize};

/// Gadget vector g_B = [1, B, B², ..., B^(ℓ-1)]^T.
///
/// Used for decomposing polynomials into small-norm components,
/// enabling noise-controlled homomorphic operations. With B a power of
/// two and B^ℓ ≥ q, unsigned base-B digits reconstruct every coefficient
/// exactly.
///
/// # Example
///
/// ```
/// use binfhe::rgsw::GadgetVector;
///
/// let gadget = GadgetVector::from_base(1 << 9, 134_215_681);
/// assert_eq!(gadget.len, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GadgetVector {
    /// Gadget base B
    pub base: u64,
    /// Number of digits ℓ, smallest with B^ℓ ≥ q
    pub len: usize,
    /// Ciphertext modulus q
    pub q: u64,
}

impl GadgetVector {
    /// Create a new gadget vector
    pub fn new(base: u64, len: usize, q: u64) -> Self {
        debug_assert!(base > 1, "Gadget base must be > 1");
        debug_assert!(len > 0, "Gadget length must be > 0");
        Self { base, len, q }
    }

    /// Create gadget vector with automatically computed length
    pub fn from_base(base: u64, q: u64) -> Self {
        let mut len = 0usize;
        let mut acc: u128 = 1;
        while acc < q as u128 {
            acc *= base as u128;
            len += 1;
        }
        Self::new(base, len.max(1), q)
    }

    /// All powers [1, B, B², ..., B^(ℓ-1)] mod q
    pub fn powers(&self) -> Vec<u64> {
        let mut powers = Vec::with_capacity(self.len);
        let mut current = 1u128;
        let base = self.base as u128;
        let q = self.q as u128;

        for _ in 0..self.len {
            powers.push(current as u64);
            current = (current * base) % q;
        }
        powers
    }
}

/// RGSW ciphertext: 2ℓ RLWE rows encrypting gadget multiples of m.
///
/// ```text
/// Row j      (j < ℓ):  (α + m·B^j, α·z + e)       carries -m·B^j·z
/// Row ℓ+j:             (α, α·z + e + m·B^j)       carries  m·B^j
/// ```
///
/// Pairing the first block against the mask digits and the second against
/// the body digits of an RLWE input reproduces m·(b - a·z), which is the
/// external product. Rows live in NTT domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RgswCiphertext {
    /// 2ℓ RLWE ciphertexts arranged as described above
    pub rows: Vec<RlweCiphertext>,
    /// Gadget parameters
    pub gadget: GadgetVector,
}

impl RgswCiphertext {
    /// Encrypt a message polynomial under the given ring key.
    ///
    /// `z_ntt` is the NTT-domain key view from `RlweSecretKey::ntt_poly`.
    /// The message must be small (a constant bit or a monomial) for the
    /// external product noise bound to hold.
    pub fn encrypt(
        z_ntt: &Poly,
        message: &Poly,
        gadget: &GadgetVector,
        sampler: &mut GaussianSampler,
        ctx: &NttContext,
    ) -> Self {
        let dim = message.dimension();
        let q = message.modulus();
        let ell = gadget.len;
        let powers = gadget.powers();

        let mut rows = Vec::with_capacity(2 * ell);

        // First ℓ rows: m·B^j folded into the mask component
        for &power in powers.iter() {
            let alpha = Poly::random(dim, q);
            let error = Poly::sample_gaussian(dim, q, sampler);

            let mut beta = alpha.to_ntt_new(ctx).mul_ntt_domain(z_ntt, ctx);
            beta.from_ntt(ctx);
            beta += &error;

            let a = &alpha + &message.scalar_mul(power);
            rows.push(RlweCiphertext::from_parts(
                a.to_ntt_new(ctx),
                beta.to_ntt_new(ctx),
            ));
        }

        // Last ℓ rows: m·B^j added to the body
        for &power in powers.iter() {
            let alpha = Poly::random(dim, q);
            let error = Poly::sample_gaussian(dim, q, sampler);

            let mut beta = alpha.to_ntt_new(ctx).mul_ntt_domain(z_ntt, ctx);
            beta.from_ntt(ctx);
            beta += &error;
            beta += &message.scalar_mul(power);

            rows.push(RlweCiphertext::from_parts(
                alpha.to_ntt_new(ctx),
                beta.to_ntt_new(ctx),
            ));
        }

        Self {
            rows,
            gadget: gadget.clone(),
        }
    }

    /// Encrypt a constant polynomial
    pub fn encrypt_scalar(
        z_ntt: &Poly,
        message: u64,
        gadget: &GadgetVector,
        sampler: &mut GaussianSampler,
        ctx: &NttContext,
    ) -> Self {
        let msg_poly = Poly::constant(message, ctx.dimension(), ctx.modulus());
        Self::encrypt(z_ntt, &msg_poly, gadget, sampler, ctx)
    }

    /// Encrypt the monomial X^exp, exponent taken modulo 2N.
    ///
    /// Bootstrapping keys for the AP accumulator are built from these.
    pub fn encrypt_monomial(
        z_ntt: &Poly,
        exp: usize,
        gadget: &GadgetVector,
        sampler: &mut GaussianSampler,
        ctx: &NttContext,
    ) -> Self {
        let msg_poly = Poly::monomial(1, exp, ctx.dimension(), ctx.modulus());
        Self::encrypt(z_ntt, &msg_poly, gadget, sampler, ctx)
    }

    /// Ring dimension N
    pub fn ring_dim(&self) -> usize {
        self.rows[0].ring_dim()
    }

    /// Modulus Q
    pub fn modulus(&self) -> u64 {
        self.rows[0].modulus()
    }

    /// Gadget length ℓ
    pub fn gadget_len(&self) -> usize {
        self.gadget.len
    }
}
