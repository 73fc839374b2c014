//! Blind-rotation bootstrapping
//!
//! The refreshing core of the scheme. An LWE ciphertext (a, b) at modulus q
//! is decrypted homomorphically inside a ring accumulator: a test vector tv
//! is placed in a trivial RLWE ciphertext rotated by X^{-b·(2N/q)}, then
//! every mask coefficient contributes its rotation X^{a_i·s_i·(2N/q)}
//! through encrypted key material. The accumulator ends up holding
//! ```text
//! ACC = RLWE( tv · X^{-(2N/q)·phase} )     with phase = b - <a, s> mod q
//! ```
//! so the constant coefficient of the accumulator evaluates the test
//! function at the phase. Extraction turns that coefficient into an LWE
//! ciphertext of dimension N under the ring key, and the switch-back chain
//! (mod-switch to qKS, key switch to dimension n, mod-switch to q) returns
//! it to the original key with fresh noise.
//!
//! Two accumulator updates are implemented: digit decomposition per mask
//! coefficient ([`ApBlindRotationKey`]) and the CMux pair for ternary
//! secrets ([`GinxBlindRotationKey`]). Both produce identical phases; they
//! differ in key size and update count.

mod ap;
mod ginx;

pub use ap::ApBlindRotationKey;
pub use ginx::GinxBlindRotationKey;

use serde::{Deserialize, Serialize};

use crate::ks::{generate_switching_key, key_switch, LweSwitchingKey};
use crate::lwe::{LweCiphertext, LweSecretKey};
use crate::math::{GaussianSampler, ModQ, NttContext, Poly};
use crate::params::{BinFheParams, BootstrapMethod};
use crate::rlwe::{RlweCiphertext, RlweSecretKey};

/// Step offset added after extraction: ⌈Q/8⌉ for prime Q
fn q8(big_q: u64) -> u64 {
    big_q / 8 + 1
}

/// Test vector driving the blind rotation
///
/// A constant coefficient vector realizes the half-plane step function:
/// rotating by X^{-k} leaves +tv\[k\] in the constant slot for k < N and
/// -tv\[k-N\] for k ≥ N, so phases in (0, q/2) and (q/2, q) pick up
/// opposite signs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestVector {
    pub(crate) poly: Poly,
}

impl TestVector {
    /// Step function for Boolean gates: +⌈Q/8⌉ on phases in \[0, q/2),
    /// -⌈Q/8⌉ on the other half-plane. Adding ⌈Q/8⌉ after extraction
    /// maps the halves onto {Q/4, 0}, the Boolean encoding at modulus Q.
    pub fn boolean(params: &BinFheParams) -> Self {
        let value = q8(params.big_q);
        Self {
            poly: Poly::from_coeffs(vec![value; params.ring_dim], params.big_q),
        }
    }

    /// Negated step for MSB extraction: phases in the upper half-plane
    /// (plaintexts ≥ p/2) come out TRUE
    pub fn sign(params: &BinFheParams) -> Self {
        let value = ModQ::negate(q8(params.big_q), params.big_q);
        Self {
            poly: Poly::from_coeffs(vec![value; params.ring_dim], params.big_q),
        }
    }
}

/// Blind-rotation key for the configured bootstrapping method
#[derive(Clone, Serialize, Deserialize)]
pub enum BlindRotationKey {
    /// Digit-decomposition accumulator
    Ap(ApBlindRotationKey),
    /// CMux accumulator for ternary secrets
    Ginx(GinxBlindRotationKey),
}

impl BlindRotationKey {
    /// Encrypt the LWE secret under the ring key for the method fixed in
    /// `params.method`
    pub fn generate(
        params: &BinFheParams,
        sk: &LweSecretKey,
        z_ntt: &Poly,
        sampler: &mut GaussianSampler,
        ntt: &NttContext,
    ) -> Self {
        match params.method {
            BootstrapMethod::Ap => {
                Self::Ap(ApBlindRotationKey::generate(params, sk, z_ntt, sampler, ntt))
            }
            BootstrapMethod::Ginx => {
                Self::Ginx(GinxBlindRotationKey::generate(params, sk, z_ntt, sampler, ntt))
            }
        }
    }

    /// Method this key was generated for
    pub fn method(&self) -> BootstrapMethod {
        match self {
            Self::Ap(_) => BootstrapMethod::Ap,
            Self::Ginx(_) => BootstrapMethod::Ginx,
        }
    }

    /// Number of LWE secret coefficients covered
    pub fn dimension(&self) -> usize {
        match self {
            Self::Ap(k) => k.dimension(),
            Self::Ginx(k) => k.dimension(),
        }
    }

    /// Ring dimension of the accumulator ciphertexts
    pub fn ring_dim(&self) -> usize {
        match self {
            Self::Ap(k) => k.ring_dim(),
            Self::Ginx(k) => k.ring_dim(),
        }
    }
}

/// Bootstrapping key pair: the blind-rotation key plus the switching key
///
/// Everything a server needs to evaluate gates; contains no secret
/// material in the clear and is safe to serialize and ship.
#[derive(Clone, Serialize, Deserialize)]
pub struct EvalKey {
    /// Refreshing key for the blind rotation
    pub bs_key: BlindRotationKey,
    /// LWE switching key (dimension N -> n at qKS)
    pub ks_key: LweSwitchingKey,
}

impl EvalKey {
    /// Generate both halves from the LWE secret and the ring secret
    pub fn generate(
        params: &BinFheParams,
        sk: &LweSecretKey,
        sk_ring: &RlweSecretKey,
        sampler: &mut GaussianSampler,
        ntt: &NttContext,
    ) -> Self {
        let z_ntt = sk_ring.ntt_poly(params.big_q, ntt);
        let bs_key = BlindRotationKey::generate(params, sk, &z_ntt, sampler, ntt);
        let ks_key = generate_switching_key(&sk_ring.to_lwe_key(), sk, params, sampler);
        Self { bs_key, ks_key }
    }
}

/// Initialize the accumulator with tv · X^{-b·(2N/q)}
fn init_accumulator(tv: &TestVector, b: u64, params: &BinFheParams) -> RlweCiphertext {
    let two_n = 2 * params.ring_dim;
    let shift = (b * params.rotation_factor()) as usize % two_n;
    let exp = (two_n - shift) % two_n;
    RlweCiphertext::trivial(&tv.poly.mul_monomial(exp))
}

/// Rotate the test vector by the encrypted phase
///
/// Returns RLWE(tv · X^{-(2N/q)·phase}) under the ring key.
pub fn blind_rotate(
    key: &BlindRotationKey,
    tv: &TestVector,
    ct: &LweCiphertext,
    params: &BinFheParams,
    ntt: &NttContext,
) -> RlweCiphertext {
    debug_assert_eq!(ct.modulus(), params.q, "input must be at the gate modulus");
    let mut acc = init_accumulator(tv, ct.b, params);
    match key {
        BlindRotationKey::Ap(k) => k.rotate(&mut acc, &ct.a, params, ntt),
        BlindRotationKey::Ginx(k) => k.rotate(&mut acc, &ct.a, params, ntt),
    }
    acc
}

/// Full refreshing pipeline on an LWE ciphertext at modulus q
///
/// Blind rotation against `tv`, constant-coefficient extraction, the
/// ⌈Q/8⌉ offset, then the switch-back chain: mod-switch to qKS, key
/// switch to dimension n, mod-switch to q. The output encrypts the test
/// function of the input phase as a Boolean value (Δ = q/4) with fresh
/// noise, independent of the input noise level.
pub fn bootstrap_core(
    ek: &EvalKey,
    tv: &TestVector,
    ct: &LweCiphertext,
    params: &BinFheParams,
    ntt: &NttContext,
) -> LweCiphertext {
    let acc = blind_rotate(&ek.bs_key, tv, ct, params, ntt);

    let extracted = acc.extract_lwe().add_scalar(q8(params.big_q));

    let switched = key_switch(&ek.ks_key, &extracted.mod_switch(params.q_ks));
    switched.mod_switch(params.q)
}
