//! RLWE encryption, rotation and LWE sample extraction

use crate::lwe::LweCiphertext;
use crate::math::{GaussianSampler, ModQ, NttContext, Poly};
use crate::params::SecretKeyDist;

use super::types::{RlweCiphertext, RlweSecretKey};

impl RlweSecretKey {
    /// Generate a secret key from the given distribution
    pub fn generate(ring_dim: usize, dist: SecretKeyDist, sampler: &mut GaussianSampler) -> Self {
        let coeffs: Vec<i64> = match dist {
            SecretKeyDist::UniformTernary => {
                (0..ring_dim).map(|_| sampler.sample_ternary()).collect()
            }
            SecretKeyDist::Gaussian => sampler.sample_vec(ring_dim),
        };
        Self { coeffs }
    }

    /// Multiplication-ready view of the key: the polynomial z mod q in
    /// NTT domain. Computed once per keygen or decryption session.
    pub fn ntt_poly(&self, q: u64, ctx: &NttContext) -> Poly {
        let coeffs: Vec<u64> = self
            .coeffs
            .iter()
            .map(|&s| ModQ::from_signed(s, q))
            .collect();
        Poly::from_coeffs(coeffs, q).to_ntt_new(ctx)
    }
}

impl RlweCiphertext {
    /// Encrypt a message polynomial: (a, a·z + e + m)
    ///
    /// The message is added raw; callers position values on the Q-torus
    /// themselves. `z_ntt` is the key view from [`RlweSecretKey::ntt_poly`].
    pub fn encrypt(
        z_ntt: &Poly,
        message: &Poly,
        ctx: &NttContext,
        sampler: &mut GaussianSampler,
    ) -> Self {
        let dim = message.dimension();
        let q = message.modulus();

        let a = Poly::random(dim, q);
        let error = Poly::sample_gaussian(dim, q, sampler);

        let a_z = a.to_ntt_new(ctx).mul_ntt_domain(z_ntt, ctx);
        let mut b = a_z;
        b.from_ntt(ctx);
        b += &error;
        b += message;

        Self { a, b }
    }

    /// Phase b - a·z, the noisy message m + e
    pub fn phase(&self, z_ntt: &Poly, ctx: &NttContext) -> Poly {
        let mut a_z = self.a.to_ntt_new(ctx).mul_ntt_domain(z_ntt, ctx);
        a_z.from_ntt(ctx);
        &self.b - &a_z
    }

    /// Noiseless encryption (0, m); decrypts under every key
    pub fn trivial(message: &Poly) -> Self {
        let a = Poly::zero(message.dimension(), message.modulus());
        Self {
            a,
            b: message.clone(),
        }
    }

    /// Ciphertext with zeroed components
    pub fn zero(ring_dim: usize, q: u64) -> Self {
        Self {
            a: Poly::zero(ring_dim, q),
            b: Poly::zero(ring_dim, q),
        }
    }

    /// Homomorphic addition
    pub fn add(&self, other: &RlweCiphertext) -> RlweCiphertext {
        RlweCiphertext {
            a: &self.a + &other.a,
            b: &self.b + &other.b,
        }
    }

    /// Homomorphic subtraction
    pub fn sub(&self, other: &RlweCiphertext) -> RlweCiphertext {
        RlweCiphertext {
            a: &self.a - &other.a,
            b: &self.b - &other.b,
        }
    }

    /// Multiply both components by X^k (k taken modulo 2N).
    ///
    /// Rotates the underlying message by the same monomial, which is how
    /// the accumulator tracks phase during blind rotation.
    pub fn rotate(&self, k: usize) -> RlweCiphertext {
        RlweCiphertext {
            a: self.a.mul_monomial(k),
            b: self.b.mul_monomial(k),
        }
    }

    /// Extract the LWE ciphertext of coefficient 0.
    ///
    /// With b(X) - a(X)·z(X) = m(X) + e(X), the constant coefficient
    /// satisfies
    ///
    /// ```text
    /// coeff_0(a·z) = a_0·z_0 - Σ_{j=1}^{N-1} a_{N-j}·z_j
    /// ```
    ///
    /// so (a', b') with a'_0 = a_0, a'_j = -a_{N-j} (j > 0), b' = b_0 is an
    /// LWE encryption of m_0 + e_0 under the ring key's coefficient vector.
    pub fn extract_lwe(&self) -> LweCiphertext {
        let n = self.ring_dim();
        let q = self.modulus();

        let mut a_vec = vec![0u64; n];
        a_vec[0] = self.a.coeff(0);
        for j in 1..n {
            a_vec[j] = ModQ::negate(self.a.coeff(n - j), q);
        }

        let b = self.b.coeff(0);

        LweCiphertext { a: a_vec, b, q }
    }
}
