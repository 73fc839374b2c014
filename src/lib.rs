//! binfhe: Boolean fully homomorphic encryption with gate bootstrapping
//!
//! This crate implements FHEW-style Boolean FHE: binary gates (AND, OR,
//! NAND, NOR, XOR, XNOR) evaluate directly on encrypted bits, and every
//! gate refreshes its output through a blind rotation, so the result noise
//! is independent of the inputs and circuits compose to any depth.
//!
//! Key components:
//! - Additive LWE layer at a power-of-two modulus q (Boolean and Z_p encodings)
//! - RingGSW accumulator over Z_Q\[X\]/(X^N + 1) with two blind-rotation
//!   methods: AP (digit decomposition, any secret distribution) and GINX
//!   (CMux updates, ternary secrets)
//! - LWE-to-LWE key switching returning extracted ciphertexts from the ring
//!   dimension N back to n
//! - [`BinFheContext`]: parameter sets from Toy to 256-bit quantum, key
//!   generation, gate evaluation, refreshing, and sign extraction

pub mod params;
pub mod error;
pub mod math;
pub mod lwe;
pub mod rlwe;
pub mod rgsw;
pub mod ks;
pub mod bootstrap;
pub mod gates;
pub mod context;

pub use context::{BinFheContext, OutputMode};
pub use error::{FheError, Result};
pub use gates::BinGate;
pub use params::{BinFheParams, BootstrapMethod, ParamSet, SecretKeyDist};

pub use bootstrap::{
    blind_rotate, bootstrap_core, BlindRotationKey, EvalKey, TestVector,
};
pub use ks::{generate_switching_key, key_switch, LweSwitchingKey};
pub use lwe::{LweCiphertext, LweSecretKey};
pub use math::{GaussianSampler, NttContext};
pub use rgsw::{external_product, GadgetVector, RgswCiphertext};
pub use rlwe::{RlweCiphertext, RlweSecretKey};
