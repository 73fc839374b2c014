//! LWE (Learning With Errors) encryption module.
//!
//! This module implements the additive LWE layer of the Boolean FHE
//! scheme: symmetric encryption, the homomorphic affine operations the
//! gates are built from, and the modulus-switching step of the
//! bootstrapping pipeline.
//!
//! # Overview
//!
//! LWE encryption works over vectors in Z_q^n. A ciphertext (a, b)
//! encrypts message m in Z_p as:
//!
//! ```text
//! b = <a, s> + e + Δ·m,  Δ = ⌊q/p⌋
//! ```
//!
//! where s is the secret key and e a small error. The phase b - <a, s>
//! recovers Δ·m + e; decryption rounds it to the nearest multiple of Δ.
//! Boolean plaintexts use p = 4, spending a quarter of the torus on each
//! of TRUE and FALSE and leaving two quarters as gate headroom.
//!
//! # Key Types
//!
//! - [`LweSecretKey`]: centered ternary or Gaussian key vector, valid
//!   under every working modulus
//! - [`LweCiphertext`]: ciphertext pair (a, b) supporting homomorphic
//!   additive operations
//!
//! # Example
//!
//! ```
//! use binfhe::lwe::{LweCiphertext, LweSecretKey};
//! use binfhe::math::GaussianSampler;
//! use binfhe::params::SecretKeyDist;
//!
//! let mut sampler = GaussianSampler::new(3.19);
//! let sk = LweSecretKey::generate(64, SecretKeyDist::UniformTernary, &mut sampler);
//! let ct = LweCiphertext::encrypt_bool(&sk, true, 512, &mut sampler);
//! assert!(ct.decrypt_bool(&sk));
//! ```

mod enc;
mod types;

pub use types::{LweCiphertext, LweSecretKey};
