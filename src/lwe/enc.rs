//! LWE encryption, decryption and the additive homomorphic operations

use super::types::{LweCiphertext, LweSecretKey};
use crate::math::{GaussianSampler, ModQ};
use crate::params::SecretKeyDist;
use rand::Rng;

impl LweSecretKey {
    /// Generate a secret key from the given distribution
    pub fn generate(dim: usize, dist: SecretKeyDist, sampler: &mut GaussianSampler) -> Self {
        let coeffs: Vec<i64> = match dist {
            SecretKeyDist::UniformTernary => (0..dim).map(|_| sampler.sample_ternary()).collect(),
            SecretKeyDist::Gaussian => sampler.sample_vec(dim),
        };

        Self { coeffs, dim }
    }

    /// Create a secret key from existing centered coefficients
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        let dim = coeffs.len();
        Self { coeffs, dim }
    }

    /// Dimension of the key
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// View the key under modulus q
    pub fn to_mod(&self, q: u64) -> Vec<u64> {
        self.coeffs
            .iter()
            .map(|&s| ModQ::from_signed(s, q))
            .collect()
    }
}

impl LweCiphertext {
    /// Encrypt a message in Z_p under modulus q
    ///
    /// Computes b = <a, s> + e + Δ·m with Δ = ⌊q/p⌋, uniform mask a and
    /// Gaussian error e. The message is taken mod p.
    pub fn encrypt(
        sk: &LweSecretKey,
        message: u64,
        p: u64,
        q: u64,
        sampler: &mut GaussianSampler,
    ) -> Self {
        let mut rng = rand::thread_rng();
        let a: Vec<u64> = (0..sk.dim).map(|_| rng.gen_range(0..q)).collect();
        let error = sampler.sample();

        let delta = q / p;
        let inner = inner_product(&a, &sk.coeffs, q);
        let delta_m = ModQ::mul(delta, message % p, q);
        let e_mod = ModQ::from_signed(error, q);

        let b = ModQ::add(inner, ModQ::add(delta_m, e_mod, q), q);

        Self { a, b, q }
    }

    /// Encrypt a Boolean value (plaintext space Z_4, bit mapped to {0, 1})
    pub fn encrypt_bool(sk: &LweSecretKey, bit: bool, q: u64, sampler: &mut GaussianSampler) -> Self {
        Self::encrypt(sk, bit as u64, 4, q, sampler)
    }

    /// Encrypt a raw torus value with no plaintext scaling: b = <a, s> + e + value
    ///
    /// Key material (switching key rows) is produced this way, since the
    /// encrypted values already sit on the torus.
    pub fn encrypt_raw(
        sk: &LweSecretKey,
        value: u64,
        q: u64,
        sampler: &mut GaussianSampler,
    ) -> Self {
        let mut rng = rand::thread_rng();
        let a: Vec<u64> = (0..sk.dim).map(|_| rng.gen_range(0..q)).collect();
        let error = sampler.sample();

        let inner = inner_product(&a, &sk.coeffs, q);
        let e_mod = ModQ::from_signed(error, q);
        let b = ModQ::add(inner, ModQ::add(value % q, e_mod, q), q);

        Self { a, b, q }
    }

    /// Noiseless encryption of a message in Z_p: (0, Δ·m)
    ///
    /// Decrypts to m under every key of matching dimension. Useful for
    /// feeding known constants into homomorphic circuits.
    pub fn trivial_encrypt(dim: usize, message: u64, p: u64, q: u64) -> Self {
        let delta = q / p;
        Self {
            a: vec![0; dim],
            b: ModQ::mul(delta, message % p, q),
            q,
        }
    }

    /// Phase b - <a, s>, the noisy encoding Δ·m + e
    pub fn phase(&self, sk: &LweSecretKey) -> u64 {
        let inner = inner_product(&self.a, &sk.coeffs, self.q);
        ModQ::sub(self.b, inner, self.q)
    }

    /// Decrypt to a message in Z_p
    ///
    /// Rounds the phase to the nearest multiple of Δ: m = ⌈p·phase/q⌋ mod p.
    /// Noise beyond Δ/2 silently decodes to a wrong value.
    pub fn decrypt(&self, sk: &LweSecretKey, p: u64) -> u64 {
        round_decode(self.phase(sk), self.q, p)
    }

    /// Decrypt a Boolean ciphertext
    ///
    /// The Z_4 decode maps both 1 and 2 to TRUE, so ciphertexts that come
    /// out of a gate (phase near q/4 or q/2 before switching) and fresh
    /// ones decode the same way.
    pub fn decrypt_bool(&self, sk: &LweSecretKey) -> bool {
        let m4 = self.decrypt(sk, 4);
        m4 == 1 || m4 == 2
    }

    /// Homomorphic addition
    pub fn add(&self, other: &LweCiphertext) -> Self {
        debug_assert_eq!(self.q, other.q);
        debug_assert_eq!(self.a.len(), other.a.len());

        let q = self.q;
        let a: Vec<u64> = self
            .a
            .iter()
            .zip(other.a.iter())
            .map(|(&x, &y)| ModQ::add(x, y, q))
            .collect();

        let b = ModQ::add(self.b, other.b, q);

        Self { a, b, q }
    }

    /// Homomorphic subtraction
    pub fn sub(&self, other: &LweCiphertext) -> Self {
        debug_assert_eq!(self.q, other.q);
        debug_assert_eq!(self.a.len(), other.a.len());

        let q = self.q;
        let a: Vec<u64> = self
            .a
            .iter()
            .zip(other.a.iter())
            .map(|(&x, &y)| ModQ::sub(x, y, q))
            .collect();

        let b = ModQ::sub(self.b, other.b, q);

        Self { a, b, q }
    }

    /// Homomorphic negation
    pub fn negate(&self) -> Self {
        let q = self.q;
        let a: Vec<u64> = self.a.iter().map(|&x| ModQ::negate(x, q)).collect();
        let b = ModQ::negate(self.b, q);

        Self { a, b, q }
    }

    /// Scalar multiplication
    pub fn scalar_mul(&self, scalar: u64) -> Self {
        let q = self.q;
        let a: Vec<u64> = self.a.iter().map(|&x| ModQ::mul(x, scalar, q)).collect();
        let b = ModQ::mul(self.b, scalar, q);

        Self { a, b, q }
    }

    /// Add a public constant to the body
    pub fn add_scalar(&self, value: u64) -> Self {
        Self {
            a: self.a.clone(),
            b: ModQ::add(self.b, value, self.q),
            q: self.q,
        }
    }

    /// Boolean NOT: (-a, q/4 - b)
    ///
    /// Maps phase 0 to q/4 and q/4 to 0 without key material or noise
    /// growth, so it composes freely.
    pub fn eval_not(&self) -> Self {
        let q = self.q;
        let a: Vec<u64> = self.a.iter().map(|&x| ModQ::negate(x, q)).collect();
        let b = ModQ::sub(q / 4, self.b, q);

        Self { a, b, q }
    }

    /// Switch the ciphertext to a new modulus by nearest rounding
    ///
    /// Every component c maps to ⌈c·q_new/q⌋ mod q_new. Plaintext scaling
    /// follows along since Δ is q/p for both moduli; noise picks up a
    /// rounding term bounded by the number of nonzero key coefficients.
    pub fn mod_switch(&self, new_q: u64) -> Self {
        let old_q = self.q;
        let a: Vec<u64> = self.a.iter().map(|&x| rescale(x, old_q, new_q)).collect();
        let b = rescale(self.b, old_q, new_q);

        Self { a, b, q: new_q }
    }

    /// Ciphertext with zeroed mask and body
    pub fn zero(dim: usize, q: u64) -> Self {
        Self {
            a: vec![0; dim],
            b: 0,
            q,
        }
    }
}

/// Inner product of a mask with a centered key, mod q
fn inner_product(a: &[u64], s: &[i64], q: u64) -> u64 {
    debug_assert_eq!(a.len(), s.len());
    a.iter().zip(s.iter()).fold(0u64, |acc, (&x, &s_i)| {
        let s_mod = ModQ::from_signed(s_i, q);
        ModQ::add(acc, ModQ::mul(x, s_mod, q), q)
    })
}

/// Round a phase to the nearest multiple of q/p: ⌈p·phase/q⌋ mod p
fn round_decode(phase: u64, q: u64, p: u64) -> u64 {
    let scaled = (phase as u128) * (p as u128);
    let divided = scaled / (q as u128);
    let remainder = scaled % (q as u128);

    let rounded = if remainder >= (q as u128) / 2 {
        divided + 1
    } else {
        divided
    };

    (rounded % (p as u128)) as u64
}

/// Nearest rounding of c from modulus from_q to to_q
fn rescale(c: u64, from_q: u64, to_q: u64) -> u64 {
    let scaled = (c as u128) * (to_q as u128) + (from_q as u128) / 2;
    ((scaled / (from_q as u128)) % (to_q as u128)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 64;
    const Q: u64 = 512;
    const SIGMA: f64 = 3.19;

    fn test_key(sampler: &mut GaussianSampler) -> LweSecretKey {
        LweSecretKey::generate(N, SecretKeyDist::UniformTernary, sampler)
    }

    #[test]
    fn test_bool_roundtrip() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 1);
        let sk = test_key(&mut sampler);

        for _ in 0..100 {
            for bit in [false, true] {
                let ct = LweCiphertext::encrypt_bool(&sk, bit, Q, &mut sampler);
                assert_eq!(ct.decrypt_bool(&sk), bit);
            }
        }
    }

    #[test]
    fn test_mod_p_roundtrip() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 2);
        let sk = test_key(&mut sampler);

        // Δ = 64, tailcut keeps |e| <= 20 < 32
        for m in 0..8 {
            let ct = LweCiphertext::encrypt(&sk, m, 8, Q, &mut sampler);
            assert_eq!(ct.decrypt(&sk, 8), m, "failed for message {}", m);
        }
    }

    #[test]
    fn test_mod_p16_roundtrip() {
        // p = 16 leaves a margin of 16, so use a narrow error here
        let mut sampler = GaussianSampler::with_seed(0.5, 3);
        let sk = test_key(&mut sampler);

        for m in 0..16 {
            let ct = LweCiphertext::encrypt(&sk, m, 16, Q, &mut sampler);
            assert_eq!(ct.decrypt(&sk, 16), m, "failed for message {}", m);
        }
    }

    #[test]
    fn test_gaussian_key_roundtrip() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 4);
        let sk = LweSecretKey::generate(N, SecretKeyDist::Gaussian, &mut sampler);

        for bit in [false, true] {
            let ct = LweCiphertext::encrypt_bool(&sk, bit, Q, &mut sampler);
            assert_eq!(ct.decrypt_bool(&sk), bit);
        }
    }

    #[test]
    fn test_homomorphic_add_sub() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 5);
        let sk = test_key(&mut sampler);

        // p = 4 leaves margin for the summed error of two fresh ciphertexts
        let m1 = 1u64;
        let m2 = 2u64;
        let ct1 = LweCiphertext::encrypt(&sk, m1, 4, Q, &mut sampler);
        let ct2 = LweCiphertext::encrypt(&sk, m2, 4, Q, &mut sampler);

        assert_eq!(ct1.add(&ct2).decrypt(&sk, 4), (m1 + m2) % 4);
        assert_eq!(ct2.sub(&ct1).decrypt(&sk, 4), (m2 - m1) % 4);
    }

    #[test]
    fn test_negate() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 6);
        let sk = test_key(&mut sampler);

        let ct = LweCiphertext::encrypt(&sk, 3, 8, Q, &mut sampler);
        assert_eq!(ct.negate().decrypt(&sk, 8), 5);
    }

    #[test]
    fn test_scalar_mul() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 7);
        let sk = test_key(&mut sampler);

        let ct = LweCiphertext::encrypt(&sk, 1, 4, Q, &mut sampler);
        assert_eq!(ct.scalar_mul(2).decrypt(&sk, 4), 2);
    }

    #[test]
    fn test_add_scalar_shifts_plaintext() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 8);
        let sk = test_key(&mut sampler);

        let delta = Q / 8;
        let ct = LweCiphertext::encrypt(&sk, 1, 8, Q, &mut sampler);
        let shifted = ct.add_scalar(3 * delta);
        assert_eq!(shifted.decrypt(&sk, 8), 4);
    }

    #[test]
    fn test_eval_not() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 9);
        let sk = test_key(&mut sampler);

        for bit in [false, true] {
            let ct = LweCiphertext::encrypt_bool(&sk, bit, Q, &mut sampler);
            let not_ct = ct.eval_not();
            assert_eq!(not_ct.decrypt_bool(&sk), !bit);

            // Double negation restores the value
            assert_eq!(not_ct.eval_not().decrypt_bool(&sk), bit);
        }
    }

    #[test]
    fn test_trivial_encrypt() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 10);
        let sk = test_key(&mut sampler);

        for m in 0..4 {
            let ct = LweCiphertext::trivial_encrypt(N, m, 4, Q);
            assert_eq!(ct.decrypt(&sk, 4), m);
        }
        assert!(LweCiphertext::trivial_encrypt(N, 1, 4, Q).decrypt_bool(&sk));
        assert!(!LweCiphertext::trivial_encrypt(N, 0, 4, Q).decrypt_bool(&sk));
    }

    #[test]
    fn test_mod_switch_preserves_plaintext() {
        let q_big: u64 = 1 << 14;
        let mut sampler = GaussianSampler::with_seed(SIGMA, 11);
        let sk = test_key(&mut sampler);

        for bit in [false, true] {
            let ct = LweCiphertext::encrypt_bool(&sk, bit, q_big, &mut sampler);
            let switched = ct.mod_switch(Q);
            assert_eq!(switched.q, Q);
            assert_eq!(switched.decrypt_bool(&sk), bit);
        }
    }

    #[test]
    fn test_mod_switch_identity() {
        let mut sampler = GaussianSampler::with_seed(SIGMA, 12);
        let sk = test_key(&mut sampler);

        let ct = LweCiphertext::encrypt_bool(&sk, true, Q, &mut sampler);
        let switched = ct.mod_switch(Q);
        assert_eq!(switched, ct);
    }

    #[test]
    fn test_phase_tracks_noise() {
        let mut sampler = GaussianSampler::with_seed(0.0, 13);
        let sk = test_key(&mut sampler);

        // Zero noise: the phase is exactly Δ·m
        let ct = LweCiphertext::encrypt(&sk, 3, 4, Q, &mut sampler);
        assert_eq!(ct.phase(&sk), 3 * (Q / 4));
    }

    #[test]
    fn test_encrypt_raw_phase() {
        let mut sampler = GaussianSampler::with_seed(0.0, 14);
        let sk = test_key(&mut sampler);

        // Raw encryption carries the value on the torus unscaled
        let ct = LweCiphertext::encrypt_raw(&sk, 417, Q, &mut sampler);
        assert_eq!(ct.phase(&sk), 417);
    }
}
