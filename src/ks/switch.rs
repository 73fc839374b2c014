//! Key-switching operation

use crate::lwe::LweCiphertext;
use crate::math::ModQ;

use super::setup::LweSwitchingKey;

/// Switch a ciphertext from the extracted ring key down to the lattice key
///
/// Given (a, b) of dimension N at q_ks under the ring key z, produces a
/// ciphertext of dimension n valid under the target key with the same phase.
///
/// # Algorithm
///
/// 1. Start from the trivial ciphertext (0, b) of dimension n
/// 2. Decompose each mask coefficient: aᵢ = Σₖ vₖ · B^k
/// 3. Subtract K[i][k][vₖ-1] for every nonzero digit vₖ
///
/// Each subtracted row carries vₖ·B^k·zᵢ in its phase, so the sum over all
/// digits cancels ⟨a, z⟩ from the body. Zero digits cost nothing.
///
/// # Arguments
/// * `ksk` - Switching key from the ring key to the target key
/// * `ct` - Input ciphertext of dimension N at modulus q_ks
///
/// # Returns
/// Ciphertext of dimension n under the target key
pub fn key_switch(ksk: &LweSwitchingKey, ct: &LweCiphertext) -> LweCiphertext {
    let q = ksk.modulus();
    debug_assert_eq!(ct.modulus(), q, "ciphertext must be at the switching modulus");
    debug_assert_eq!(
        ct.dimension(),
        ksk.dimension_in(),
        "ciphertext dimension must match the source key"
    );

    let base = ksk.base();
    let digits = ksk.digits();

    let mut a = vec![0u64; ksk.dimension_out()];
    let mut b = ct.b;

    for (i, &coeff) in ct.a.iter().enumerate() {
        let mut val = coeff;
        for k in 0..digits {
            let digit = val % base;
            val /= base;
            if digit == 0 {
                continue;
            }
            let row = &ksk.rows[i][k][(digit - 1) as usize];
            for (acc, &ra) in a.iter_mut().zip(row.a.iter()) {
                *acc = ModQ::sub(*acc, ra, q);
            }
            b = ModQ::sub(b, row.b, q);
        }
    }

    LweCiphertext { a, b, q }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ks::generate_switching_key;
    use crate::lwe::LweSecretKey;
    use crate::math::GaussianSampler;
    use crate::params::{BinFheParams, BootstrapMethod, ParamSet, SecretKeyDist};

    fn test_params() -> BinFheParams {
        BinFheParams::new(ParamSet::Toy, BootstrapMethod::Ginx).unwrap()
    }

    fn make_keys(
        params: &BinFheParams,
        sampler: &mut GaussianSampler,
    ) -> (LweSecretKey, LweSecretKey) {
        let sk_ring =
            LweSecretKey::generate(params.ring_dim, SecretKeyDist::UniformTernary, sampler);
        let sk_lwe = LweSecretKey::generate(params.n, SecretKeyDist::UniformTernary, sampler);
        (sk_ring, sk_lwe)
    }

    #[test]
    fn test_key_switch_shape() {
        let params = test_params();
        let mut sampler = GaussianSampler::with_seed(params.sigma, 71);
        let (sk_ring, sk_lwe) = make_keys(&params, &mut sampler);

        let ksk = generate_switching_key(&sk_ring, &sk_lwe, &params, &mut sampler);
        let ct = LweCiphertext::encrypt(&sk_ring, 1, 4, params.q_ks, &mut sampler);
        let switched = key_switch(&ksk, &ct);

        assert_eq!(switched.dimension(), params.n);
        assert_eq!(switched.modulus(), params.q_ks);
    }

    #[test]
    fn test_key_switch_correctness() {
        let params = test_params();
        let mut sampler = GaussianSampler::with_seed(params.sigma, 72);
        let (sk_ring, sk_lwe) = make_keys(&params, &mut sampler);

        let ksk = generate_switching_key(&sk_ring, &sk_lwe, &params, &mut sampler);

        for m in 0..4u64 {
            let ct = LweCiphertext::encrypt(&sk_ring, m, 4, params.q_ks, &mut sampler);
            let switched = key_switch(&ksk, &ct);
            assert_eq!(switched.decrypt(&sk_lwe, 4), m, "message {m} did not survive");
        }
    }

    #[test]
    fn test_key_switch_zero_noise_exact() {
        let params = test_params();
        let mut sampler = GaussianSampler::with_seed(0.0, 73);
        let (sk_ring, sk_lwe) = make_keys(&params, &mut sampler);

        let ksk = generate_switching_key(&sk_ring, &sk_lwe, &params, &mut sampler);

        // With zero noise everywhere the phase is preserved exactly
        let val = 1234u64;
        let ct = LweCiphertext::encrypt_raw(&sk_ring, val, params.q_ks, &mut sampler);
        let switched = key_switch(&ksk, &ct);
        assert_eq!(switched.phase(&sk_lwe), val);
    }

    #[test]
    fn test_key_switch_noise_growth() {
        let params = test_params();
        let q_ks = params.q_ks;
        let mut sampler = GaussianSampler::with_seed(params.sigma, 74);
        let (sk_ring, sk_lwe) = make_keys(&params, &mut sampler);

        let ksk = generate_switching_key(&sk_ring, &sk_lwe, &params, &mut sampler);

        // Phase error stays far below the q_ks/8 decision margin
        let val = q_ks / 2;
        let ct = LweCiphertext::encrypt_raw(&sk_ring, val, q_ks, &mut sampler);
        let switched = key_switch(&ksk, &ct);
        let err = ModQ::to_signed(ModQ::sub(switched.phase(&sk_lwe), val, q_ks), q_ks);
        assert!(err.abs() < (q_ks / 8) as i64, "switch noise {err} too large");
    }
}
