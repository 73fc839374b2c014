//! RGSW (Ring-GSW) encryption module
//!
//! This module implements RingGSW encryption, which enables homomorphic
//! multiplication of RLWE ciphertexts via the external product operation.
//! Bootstrapping keys are matrices of RGSW ciphertexts encrypting secret
//! key material as constants or monomials.
//!
//! # Overview
//!
//! RGSW is the GSW (Gentry-Sahai-Waters) scheme over polynomial rings.
//! An RGSW ciphertext encrypting message m is a stack of 2ℓ RLWE rows:
//! the first ℓ carry m·B^j folded into the mask component, the last ℓ
//! carry m·B^j in the body, with B the gadget base and ℓ the digit count.
//! Rows are stored in NTT domain since the external product only ever
//! multiplies against them.
//!
//! # External Product
//!
//! The key operation is RLWE(m₀) ⊡ RGSW(m₁) → RLWE(m₀·m₁): decompose
//! both input components into base-B digits and accumulate digit-times-row
//! products. Noise grows additively in ℓ, N and B rather than
//! multiplicatively, which is what makes chains of N such products (one
//! blind rotation) viable.
//!
//! # Example
//!
//! ```ignore
//! use binfhe::rgsw::{external_product, GadgetVector, RgswCiphertext};
//!
//! let gadget = GadgetVector::from_base(1 << 9, q);
//! let rgsw_ct = RgswCiphertext::encrypt_scalar(&z_ntt, 1, &gadget, &mut sampler, &ctx);
//! let product = external_product(&acc, &rgsw_ct, &ctx);
//! ```

mod external_product;
mod types;

pub use external_product::{external_product, gadget_decompose, gadget_reconstruct};
pub use types::{GadgetVector, RgswCiphertext};
