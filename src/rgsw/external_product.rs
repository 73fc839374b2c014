//! External product operation: RLWE × RGSW → RLWE
//!
//! The multiply-accumulate at the heart of blind rotation.

use crate::math::{NttContext, Poly};
use crate::rlwe::RlweCiphertext;

use super::types::{GadgetVector, RgswCiphertext};

/// Decompose a polynomial coefficient-wise into base-B digits
///
/// For each coefficient c, computes digits [c₀, c₁, ..., c_{ℓ-1}] with
/// c = c₀ + c₁·B + ... + c_{ℓ-1}·B^{ℓ-1}, each digit in [0, B). The
/// reconstruction is exact because B^ℓ ≥ q.
pub fn gadget_decompose(poly: &Poly, gadget: &GadgetVector) -> Vec<Poly> {
    let dim = poly.dimension();
    let base = gadget.base;
    let ell = gadget.len;

    let mut result = Vec::with_capacity(ell);
    for _ in 0..ell {
        result.push(Poly::zero(dim, poly.modulus()));
    }

    for j in 0..dim {
        let mut val = poly.coeff(j);

        for digit_poly in result.iter_mut() {
            digit_poly.set_coeff(j, val % base);
            val /= base;
        }
    }

    result
}

/// Reconstruct a polynomial from its gadget decomposition
pub fn gadget_reconstruct(decomposed: &[Poly], gadget: &GadgetVector) -> Poly {
    assert_eq!(
        decomposed.len(),
        gadget.len,
        "Decomposition length must match gadget length"
    );

    let dim = decomposed[0].dimension();
    let powers = gadget.powers();

    let mut result = Poly::zero(dim, gadget.q);
    for (digit_poly, &power) in decomposed.iter().zip(powers.iter()) {
        result += &digit_poly.scalar_mul(power);
    }

    result
}

/// Compute the external product: RLWE(m₀) ⊡ RGSW(m₁) → RLWE(m₀·m₁)
///
/// Decomposes both input components into gadget digits and accumulates
/// digit-times-row products against the RGSW rows:
///
/// ```text
/// (a', b') = Σⱼ g⁻¹(a)ⱼ · rows[j] + Σⱼ g⁻¹(b)ⱼ · rows[ℓ+j]
/// ```
///
/// The mask-block rows carry -m₁·B^j·z and the body-block rows m₁·B^j,
/// so the output phase is m₁·(b - a·z) = m₁·m₀ plus digit-scaled key
/// noise. Costs 2ℓ forward and 2 inverse NTTs.
pub fn external_product(
    rlwe: &RlweCiphertext,
    rgsw: &RgswCiphertext,
    ctx: &NttContext,
) -> RlweCiphertext {
    let dim = rlwe.ring_dim();
    let q = rlwe.modulus();
    let ell = rgsw.gadget.len;
    debug_assert_eq!(rgsw.rows.len(), 2 * ell, "RGSW must have 2ℓ rows");
    debug_assert_eq!(rgsw.ring_dim(), dim);
    debug_assert!(!rlwe.a.is_ntt(), "External product input is coefficient-domain");

    let mut a_digits = gadget_decompose(&rlwe.a, &rgsw.gadget);
    let mut b_digits = gadget_decompose(&rlwe.b, &rgsw.gadget);

    let mut acc_a = Poly::zero(dim, q).to_ntt_new(ctx);
    let mut acc_b = Poly::zero(dim, q).to_ntt_new(ctx);

    for j in 0..ell {
        a_digits[j].to_ntt(ctx);
        acc_a.mul_acc_ntt_domain(&a_digits[j], &rgsw.rows[j].a, ctx);
        acc_b.mul_acc_ntt_domain(&a_digits[j], &rgsw.rows[j].b, ctx);

        b_digits[j].to_ntt(ctx);
        acc_a.mul_acc_ntt_domain(&b_digits[j], &rgsw.rows[ell + j].a, ctx);
        acc_b.mul_acc_ntt_domain(&b_digits[j], &rgsw.rows[ell + j].b, ctx);
    }

    acc_a.from_ntt(ctx);
    acc_b.from_ntt(ctx);

    RlweCiphertext::from_parts(acc_a, acc_b)
}
