//! RLWE (Ring Learning With Errors) encryption module
//!
//! This module implements RLWE over R_Q = Z_Q[X]/(X^N + 1), the ring the
//! bootstrapping accumulator lives in.
//!
//! # Overview
//!
//! - Secret key z is a small polynomial (ternary by default)
//! - Ciphertext (a, b) encrypts a message polynomial m as b = a·z + e + m
//! - The phase b - a·z recovers m + e; the accumulator keeps messages
//!   pre-scaled so no Δ appears at this layer
//!
//! Monomial rotation (multiplying both components by X^k) and LWE sample
//! extraction at coefficient 0 are the two operations blind rotation
//! builds on.
//!
//! # Example
//!
//! ```
//! use binfhe::math::{GaussianSampler, NttContext, Poly};
//! use binfhe::params::SecretKeyDist;
//! use binfhe::rlwe::{RlweCiphertext, RlweSecretKey};
//!
//! let (n, q) = (512, 134_215_681);
//! let ctx = NttContext::new(n, q);
//! let mut sampler = GaussianSampler::new(3.19);
//!
//! let sk = RlweSecretKey::generate(n, SecretKeyDist::UniformTernary, &mut sampler);
//! let z_ntt = sk.ntt_poly(q, &ctx);
//!
//! let message = Poly::constant(q / 8, n, q);
//! let ct = RlweCiphertext::encrypt(&z_ntt, &message, &ctx, &mut sampler);
//! let phase = ct.phase(&z_ntt, &ctx);
//! assert!(phase.coeff(0).abs_diff(q / 8) < 100);
//! ```

mod enc;
mod types;

pub use types::{RlweCiphertext, RlweSecretKey};
