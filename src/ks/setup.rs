//! Switching-key generation

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lwe::{LweCiphertext, LweSecretKey};
use crate::math::{GaussianSampler, ModQ};
use crate::params::BinFheParams;

/// Key-switching key from the extracted ring key (dimension N) to the
/// lattice key (dimension n), at the switching modulus q_ks
///
/// For every source coefficient z_i the key stores encryptions of all
/// scaled digit values under the target key:
/// ```text
/// rows[i][k][v-1] = LWE_s(v · B^k · z_i)   for v in 1..B, k in 0..d
/// ```
/// Digit decomposition of an incoming mask coefficient then selects one
/// row per nonzero digit.
#[derive(Clone, Serialize, Deserialize)]
pub struct LweSwitchingKey {
    /// Encrypted digit multiples, indexed `[source coeff][digit][value - 1]`
    pub(crate) rows: Vec<Vec<Vec<LweCiphertext>>>,
    /// Decomposition base B_ks
    pub(crate) base: u64,
    /// Number of digits d = ⌈log_B q_ks⌉
    pub(crate) digits: usize,
    /// Switching modulus
    pub(crate) q_ks: u64,
}

impl LweSwitchingKey {
    /// Source dimension (ring dimension N)
    pub fn dimension_in(&self) -> usize {
        self.rows.len()
    }

    /// Target dimension n
    pub fn dimension_out(&self) -> usize {
        self.rows[0][0][0].dimension()
    }

    /// Switching modulus q_ks
    pub fn modulus(&self) -> u64 {
        self.q_ks
    }

    /// Decomposition base
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Digits per mask coefficient
    pub fn digits(&self) -> usize {
        self.digits
    }
}

/// Generate the switching key from `sk_from` (the ring key in LWE form) to
/// `sk_to`
///
/// Each coefficient z_i of the source key contributes d × (B − 1) raw
/// encryptions of v·B^k·z_i at q_ks. Source coefficients are processed in
/// parallel, each from its own forked sampler stream so the output does not
/// depend on the thread schedule.
pub fn generate_switching_key(
    sk_from: &LweSecretKey,
    sk_to: &LweSecretKey,
    params: &BinFheParams,
    sampler: &mut GaussianSampler,
) -> LweSwitchingKey {
    let q_ks = params.q_ks;
    let base = params.base_ks;
    let digits = params.digits_ks();

    let mut forks: Vec<GaussianSampler> = (0..sk_from.dimension())
        .map(|i| sampler.fork(i as u64))
        .collect();

    let rows: Vec<Vec<Vec<LweCiphertext>>> = sk_from
        .coeffs
        .par_iter()
        .zip(forks.par_iter_mut())
        .map(|(&z_i, fork)| {
            let z_mod = ModQ::from_signed(z_i, q_ks);
            let mut power = 1u64;
            (0..digits)
                .map(|_| {
                    let scaled = ModQ::mul(z_mod, power, q_ks);
                    let digit_rows = (1..base)
                        .map(|v| {
                            let msg = ModQ::mul(v, scaled, q_ks);
                            LweCiphertext::encrypt_raw(sk_to, msg, q_ks, fork)
                        })
                        .collect();
                    power = ModQ::mul(power, base, q_ks);
                    digit_rows
                })
                .collect()
        })
        .collect();

    LweSwitchingKey {
        rows,
        base,
        digits,
        q_ks,
    }
}
