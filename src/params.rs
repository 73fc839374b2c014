//! Parameter sets for FHEW-style Boolean FHE
//!
//! Stock sets follow the published FHEW parameter families. Every set
//! fixes the additive LWE layer (n, q), the RingGSW accumulator layer
//! (N, Q), the key-switching modulus qKS and the three decomposition
//! bases. Q is always an NTT-friendly prime with Q ≡ 1 (mod 2N).

use serde::{Deserialize, Serialize};

use crate::error::{invalid_params, Result};
use crate::math::gaussian::DEFAULT_SIGMA;
use crate::math::ModQ;

/// Bootstrapping method for the blind-rotation accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BootstrapMethod {
    /// Alperin-Sheriff/Peikert accumulator: one RingGSW row per
    /// (coefficient, digit, digit value). Larger keys, works with any
    /// secret distribution.
    Ap,
    /// Gama/Izabachene/Nguyen/Xie accumulator: two RingGSW rows per
    /// coefficient. Small keys, requires ternary secrets.
    #[default]
    Ginx,
}

/// Distribution of secret key coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SecretKeyDist {
    /// Uniform over {-1, 0, 1}
    #[default]
    UniformTernary,
    /// Discrete Gaussian with the parameter set's sigma
    Gaussian,
}

/// Named parameter sets
///
/// Security estimates follow the originating FHEW tables; the `*Opt`
/// variants trade a non-power-of-two lattice dimension n for runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamSet {
    /// No security; tiny parameters for tests and demos
    Toy,
    /// 108-bit classical / 100-bit quantum security
    Medium,
    /// More than 128-bit classical security, tuned for AP
    /// (higher failure probability under GINX)
    Std128Ap,
    /// `Std128Ap` with runtime-optimized non-power-of-two n
    Std128ApOpt,
    /// More than 128-bit classical security, HE-standard setup
    Std128,
    /// `Std128` with runtime-optimized non-power-of-two n
    Std128Opt,
    /// More than 192-bit classical security, HE-standard setup
    Std192,
    /// `Std192` with runtime-optimized non-power-of-two n
    Std192Opt,
    /// More than 256-bit classical security, HE-standard setup
    Std256,
    /// `Std256` with runtime-optimized non-power-of-two n
    Std256Opt,
    /// More than 128-bit security against quantum attacks
    Std128Q,
    /// `Std128Q` with runtime-optimized non-power-of-two n
    Std128QOpt,
    /// More than 192-bit security against quantum attacks
    Std192Q,
    /// `Std192Q` with runtime-optimized non-power-of-two n
    Std192QOpt,
    /// More than 256-bit security against quantum attacks
    Std256Q,
    /// `Std256Q` with runtime-optimized non-power-of-two n
    Std256QOpt,
    /// Exercises signed digit handling in the accumulator; no security claim
    SignedModTest,
}

/// Joint LWE / RingGSW parameter set
///
/// Shared read-only by every scheme layer once a context is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinFheParams {
    /// LWE lattice dimension n
    pub n: usize,

    /// Ring dimension N for RingGSW/RLWE (power of two)
    pub ring_dim: usize,

    /// Ciphertext modulus q for the additive LWE layer (power of two)
    pub q: u64,

    /// Accumulator modulus Q, an NTT-friendly prime with Q ≡ 1 (mod 2N)
    pub big_q: u64,

    /// Modulus used during key switching
    pub q_ks: u64,

    /// Standard deviation for Gaussian error sampling
    pub sigma: f64,

    /// Digit base for key switching
    pub base_ks: u64,

    /// Gadget base for RingGSW decomposition
    pub base_g: u64,

    /// Digit base for AP refreshing
    pub base_r: u64,

    /// Secret key coefficient distribution
    pub key_dist: SecretKeyDist,

    /// Bootstrapping method
    pub method: BootstrapMethod,
}

impl BinFheParams {
    /// Build a named parameter set for the given bootstrapping method
    pub fn new(set: ParamSet, method: BootstrapMethod) -> Result<Self> {
        let params = Self::from_table(set, method);
        params.validate()?;
        Ok(params)
    }

    /// Build from explicit values. For advanced users familiar with LWE
    /// parameter selection; everything still passes `validate`.
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        n: usize,
        ring_dim: usize,
        q: u64,
        big_q: u64,
        q_ks: u64,
        sigma: f64,
        base_ks: u64,
        base_g: u64,
        base_r: u64,
        method: BootstrapMethod,
    ) -> Result<Self> {
        let params = Self {
            n,
            ring_dim,
            q,
            big_q,
            q_ks,
            sigma,
            base_ks,
            base_g,
            base_r,
            key_dist: SecretKeyDist::UniformTernary,
            method,
        };
        params.validate()?;
        Ok(params)
    }

    fn from_table(set: ParamSet, method: BootstrapMethod) -> Self {
        let make = |n: usize,
                    ring_dim: usize,
                    q: u64,
                    big_q: u64,
                    q_ks: u64,
                    base_ks: u64,
                    base_g: u64,
                    base_r: u64| Self {
            n,
            ring_dim,
            q,
            big_q,
            q_ks,
            sigma: DEFAULT_SIGMA,
            base_ks,
            base_g,
            base_r,
            key_dist: SecretKeyDist::UniformTernary,
            method,
        };

        use ParamSet::*;
        match set {
            Toy => make(64, 512, 512, 134_215_681, 1 << 14, 1 << 5, 1 << 9, 1 << 3),
            Medium => make(422, 1024, 1024, 268_369_921, 1 << 14, 1 << 7, 1 << 10, 1 << 5),
            Std128Ap => make(512, 1024, 1024, 134_215_681, 1 << 14, 1 << 7, 1 << 9, 1 << 5),
            Std128ApOpt => make(502, 1024, 1024, 134_215_681, 1 << 14, 1 << 7, 1 << 9, 1 << 5),
            Std128 => make(512, 1024, 1024, 134_215_681, 1 << 14, 1 << 7, 1 << 7, 1 << 5),
            Std128Opt => make(502, 1024, 1024, 134_215_681, 1 << 14, 1 << 7, 1 << 7, 1 << 5),
            Std192 => make(1024, 2048, 1024, 137_438_822_401, 1 << 15, 1 << 5, 1 << 13, 1 << 5),
            Std192Opt => make(805, 2048, 1024, 137_438_822_401, 1 << 15, 1 << 5, 1 << 13, 1 << 5),
            Std256 => make(1024, 2048, 2048, 536_813_569, 1 << 14, 1 << 7, 1 << 8, 1 << 6),
            Std256Opt => make(990, 2048, 2048, 536_813_569, 1 << 14, 1 << 7, 1 << 8, 1 << 6),
            Std128Q => make(1024, 2048, 1024, 1_125_899_906_826_241, 1 << 25, 1 << 5, 1 << 25, 1 << 5),
            Std128QOpt => make(1003, 2048, 1024, 1_125_899_906_826_241, 1 << 25, 1 << 5, 1 << 25, 1 << 5),
            Std192Q => make(1024, 2048, 1024, 34_359_709_697, 1 << 15, 1 << 5, 1 << 12, 1 << 5),
            Std192QOpt => make(875, 2048, 1024, 34_359_709_697, 1 << 15, 1 << 5, 1 << 12, 1 << 5),
            Std256Q => make(1300, 2048, 2048, 134_176_769, 1 << 16, 1 << 7, 1 << 7, 1 << 6),
            Std256QOpt => make(1225, 2048, 2048, 134_176_769, 1 << 16, 1 << 7, 1 << 7, 1 << 6),
            SignedModTest => make(128, 512, 512, 134_215_681, 1 << 14, 1 << 5, 1 << 9, 1 << 3),
        }
    }

    /// Number of gadget digits: smallest ℓ with baseG^ℓ ≥ Q
    pub fn digits_g(&self) -> usize {
        digits_for(self.big_q, self.base_g)
    }

    /// Number of key-switching digits: smallest d with baseKS^d ≥ qKS
    pub fn digits_ks(&self) -> usize {
        digits_for(self.q_ks, self.base_ks)
    }

    /// Number of refreshing digits: smallest d with baseR^d ≥ q
    pub fn digits_r(&self) -> usize {
        digits_for(self.q, self.base_r)
    }

    /// Exponent scale 2N/q mapping Z_q phases onto ring rotations.
    /// Exact because q divides 2N.
    pub fn rotation_factor(&self) -> u64 {
        2 * self.ring_dim as u64 / self.q
    }

    /// Scaling factor Δ_p = ⌊q/p⌋ for plaintext modulus p
    pub fn delta(&self, p: u64) -> u64 {
        self.q / p
    }

    /// Check that all parameters are mutually consistent
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(invalid_params!("lattice dimension n must be at least 1"));
        }
        if !self.ring_dim.is_power_of_two() {
            return Err(invalid_params!(
                "ring dimension {} must be a power of two",
                self.ring_dim
            ));
        }
        if !self.q.is_power_of_two() || self.q < 8 {
            return Err(invalid_params!(
                "LWE modulus q = {} must be a power of two >= 8",
                self.q
            ));
        }
        if self.q > 2 * self.ring_dim as u64 {
            return Err(invalid_params!(
                "LWE modulus q = {} must divide 2N = {}",
                self.q,
                2 * self.ring_dim
            ));
        }
        if self.big_q >= 1 << 63 {
            return Err(invalid_params!(
                "accumulator modulus Q = {} exceeds 63 bits",
                self.big_q
            ));
        }
        if !ModQ::is_prime(self.big_q) {
            return Err(invalid_params!(
                "accumulator modulus Q = {} must be prime",
                self.big_q
            ));
        }
        if self.big_q % (2 * self.ring_dim as u64) != 1 {
            return Err(invalid_params!(
                "accumulator modulus Q = {} must be 1 mod 2N = {}",
                self.big_q,
                2 * self.ring_dim
            ));
        }
        if self.q_ks < self.q || self.q_ks > self.big_q {
            return Err(invalid_params!(
                "key-switching modulus qKS = {} must satisfy q <= qKS <= Q",
                self.q_ks
            ));
        }
        for (name, base) in [
            ("baseKS", self.base_ks),
            ("baseG", self.base_g),
            ("baseR", self.base_r),
        ] {
            if !base.is_power_of_two() || base < 2 {
                return Err(invalid_params!(
                    "{} = {} must be a power of two >= 2",
                    name,
                    base
                ));
            }
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(invalid_params!("sigma = {} must be non-negative", self.sigma));
        }
        if self.method == BootstrapMethod::Ginx && self.key_dist != SecretKeyDist::UniformTernary {
            return Err(invalid_params!(
                "GINX bootstrapping requires uniform ternary secrets"
            ));
        }
        Ok(())
    }
}

impl Default for BinFheParams {
    fn default() -> Self {
        Self::from_table(ParamSet::Std128, BootstrapMethod::Ginx)
    }
}

/// Smallest d with base^d >= value (at least 1)
fn digits_for(value: u64, base: u64) -> usize {
    let mut digits = 0usize;
    let mut acc: u128 = 1;
    while acc < value as u128 {
        acc *= base as u128;
        digits += 1;
    }
    digits.max(1)
}
