//! Digit-decomposition blind rotation
//!
//! Each mask coefficient a_i is decomposed in base baseR and every nonzero
//! digit applies one external product with a key row encrypting the
//! matching power of the secret rotation:
//! ```text
//! rows[i][k][v-1] = RGSW(X^{v·baseR^k·s_i·(2N/q)})
//! ```
//! Multiplying the accumulator by the rows selected by the digits of a_i
//! realizes X^{a_i·s_i·(2N/q)} without ever exposing s_i. The method
//! places no restriction on the secret distribution, at the price of
//! digits_r × (baseR − 1) RingGSW ciphertexts per coefficient.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lwe::LweSecretKey;
use crate::math::{GaussianSampler, NttContext, Poly};
use crate::params::BinFheParams;
use crate::rgsw::{external_product, GadgetVector, RgswCiphertext};
use crate::rlwe::RlweCiphertext;

/// Blind-rotation key for the digit-decomposition accumulator
#[derive(Clone, Serialize, Deserialize)]
pub struct ApBlindRotationKey {
    /// Monomial encryptions indexed `[coefficient][digit][value - 1]`
    rows: Vec<Vec<Vec<RgswCiphertext>>>,
    /// Refreshing base baseR
    base: u64,
    /// Digits per mask coefficient
    digits: usize,
}

impl ApBlindRotationKey {
    /// Encrypt all digit multiples of the secret rotations under the ring
    /// key. Coefficients are processed in parallel from forked sampler
    /// streams.
    pub(crate) fn generate(
        params: &BinFheParams,
        sk: &LweSecretKey,
        z_ntt: &Poly,
        sampler: &mut GaussianSampler,
        ntt: &NttContext,
    ) -> Self {
        let two_n = 2 * params.ring_dim as u64;
        let factor = params.rotation_factor();
        let base = params.base_r;
        let digits = params.digits_r();
        let gadget = GadgetVector::from_base(params.base_g, params.big_q);

        let mut forks: Vec<GaussianSampler> = (0..sk.dimension())
            .map(|i| sampler.fork(i as u64))
            .collect();

        let rows: Vec<Vec<Vec<RgswCiphertext>>> = sk
            .coeffs
            .par_iter()
            .zip(forks.par_iter_mut())
            .map(|(&s_i, fork)| {
                let mut power = 1u64;
                (0..digits)
                    .map(|_| {
                        let per_digit = (1..base)
                            .map(|v| {
                                let step = v * power * factor % two_n;
                                let exp =
                                    (s_i * step as i64).rem_euclid(two_n as i64) as usize;
                                RgswCiphertext::encrypt_monomial(z_ntt, exp, &gadget, fork, ntt)
                            })
                            .collect();
                        power *= base;
                        per_digit
                    })
                    .collect()
            })
            .collect();

        Self { rows, base, digits }
    }

    /// Apply the encrypted rotation Π X^{a_i·s_i·(2N/q)} to the accumulator
    ///
    /// One external product per nonzero digit of each mask coefficient.
    pub(crate) fn rotate(
        &self,
        acc: &mut RlweCiphertext,
        a: &[u64],
        params: &BinFheParams,
        ntt: &NttContext,
    ) {
        debug_assert_eq!(a.len(), self.rows.len(), "mask does not match key");
        debug_assert_eq!(acc.modulus(), params.big_q);

        for (i, &a_i) in a.iter().enumerate() {
            let mut val = a_i;
            for k in 0..self.digits {
                let digit = val % self.base;
                val /= self.base;
                if digit == 0 {
                    continue;
                }
                *acc = external_product(acc, &self.rows[i][k][(digit - 1) as usize], ntt);
            }
        }
    }

    /// Number of LWE secret coefficients covered
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    /// Ring dimension of the key material
    pub fn ring_dim(&self) -> usize {
        self.rows[0][0][0].ring_dim()
    }
}
