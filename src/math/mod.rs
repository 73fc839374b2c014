//! Mathematical primitives for the Boolean FHE engine.
//!
//! This module provides the core operations the accumulator and LWE layers
//! are built on:
//!
//! - **Modular arithmetic** over Z_Q
//! - **Number-Theoretic Transform (NTT)** for fast negacyclic multiplication
//! - **Polynomial operations** over R_Q = Z_Q[X]/(X^N + 1), including the
//!   monomial rotations used by blind rotation
//! - **Discrete Gaussian sampling** for error term generation
//!
//! The ring modulus Q is an NTT-friendly prime with Q ≡ 1 (mod 2N); the
//! LWE moduli q and qKS are powers of two handled with plain u64 arithmetic.
//!
//! # Example
//!
//! ```
//! use binfhe::math::{Poly, NttContext};
//!
//! // Create a polynomial and convert to NTT domain
//! let ctx = NttContext::new(512, 134_215_681);
//! let mut poly = Poly::random(512, ctx.modulus());
//! poly.to_ntt(&ctx);
//! ```

pub mod gaussian;
pub mod modular;
pub mod ntt;
pub mod poly;

pub use gaussian::GaussianSampler;
pub use modular::ModQ;
pub use ntt::NttContext;
pub use poly::Poly;
