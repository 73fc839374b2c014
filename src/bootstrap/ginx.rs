//! CMux blind rotation for ternary secrets
//!
//! The ternary secret splits as s_i = s_i⁺ − s_i⁻ with indicator bits
//! s_i⁺ = \[s_i = 1\] and s_i⁻ = \[s_i = -1\]. For an encrypted bit σ the
//! CMux identity
//! ```text
//! ACC + (X^e − 1)·(RGSW(σ) ⊡ ACC) = RLWE(acc · X^{σ·e})
//! ```
//! applies a rotation only where the bit is set. Per mask coefficient the
//! update runs once with e = ā_i for the positive table and once with
//! e = 2N − ā_i for the negative table, so the pair contributes
//! X^{ā_i·(s_i⁺ − s_i⁻)} = X^{a_i·s_i·(2N/q)}. Two RingGSW ciphertexts
//! per coefficient and two external products per update.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lwe::LweSecretKey;
use crate::math::{GaussianSampler, NttContext, Poly};
use crate::params::BinFheParams;
use crate::rgsw::{external_product, GadgetVector, RgswCiphertext};
use crate::rlwe::RlweCiphertext;

/// Blind-rotation key for the CMux accumulator
#[derive(Clone, Serialize, Deserialize)]
pub struct GinxBlindRotationKey {
    /// Encryptions of the positive indicators \[s_i = 1\]
    rows_pos: Vec<RgswCiphertext>,
    /// Encryptions of the negative indicators \[s_i = -1\]
    rows_neg: Vec<RgswCiphertext>,
}

impl GinxBlindRotationKey {
    /// Encrypt both indicator tables under the ring key. Requires a
    /// ternary LWE secret, which parameter validation enforces.
    pub(crate) fn generate(
        params: &BinFheParams,
        sk: &LweSecretKey,
        z_ntt: &Poly,
        sampler: &mut GaussianSampler,
        ntt: &NttContext,
    ) -> Self {
        let gadget = GadgetVector::from_base(params.base_g, params.big_q);

        let mut forks: Vec<GaussianSampler> = (0..sk.dimension())
            .map(|i| sampler.fork(i as u64))
            .collect();

        let pairs: Vec<(RgswCiphertext, RgswCiphertext)> = sk
            .coeffs
            .par_iter()
            .zip(forks.par_iter_mut())
            .map(|(&s_i, fork)| {
                debug_assert!((-1..=1).contains(&s_i), "CMux tables need ternary secrets");
                let pos =
                    RgswCiphertext::encrypt_scalar(z_ntt, (s_i == 1) as u64, &gadget, fork, ntt);
                let neg =
                    RgswCiphertext::encrypt_scalar(z_ntt, (s_i == -1) as u64, &gadget, fork, ntt);
                (pos, neg)
            })
            .collect();

        let (rows_pos, rows_neg) = pairs.into_iter().unzip();
        Self { rows_pos, rows_neg }
    }

    /// Apply the encrypted rotation Π X^{a_i·s_i·(2N/q)} to the accumulator
    pub(crate) fn rotate(
        &self,
        acc: &mut RlweCiphertext,
        a: &[u64],
        params: &BinFheParams,
        ntt: &NttContext,
    ) {
        debug_assert_eq!(a.len(), self.rows_pos.len(), "mask does not match key");
        let two_n = 2 * params.ring_dim;
        let factor = params.rotation_factor() as usize;

        for (i, &a_i) in a.iter().enumerate() {
            let abar = a_i as usize * factor % two_n;
            if abar == 0 {
                continue;
            }
            cmux(acc, &self.rows_pos[i], abar, ntt);
            cmux(acc, &self.rows_neg[i], two_n - abar, ntt);
        }
    }

    /// Number of LWE secret coefficients covered
    pub fn dimension(&self) -> usize {
        self.rows_pos.len()
    }

    /// Ring dimension of the key material
    pub fn ring_dim(&self) -> usize {
        self.rows_pos[0].ring_dim()
    }
}

/// ACC += (X^exp − 1)·(bit ⊡ ACC)
fn cmux(acc: &mut RlweCiphertext, bit: &RgswCiphertext, exp: usize, ntt: &NttContext) {
    let t = external_product(acc, bit, ntt);
    let update = t.rotate(exp).sub(&t);
    *acc = acc.add(&update);
}
